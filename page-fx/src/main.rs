use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use page_fx::config::{PageConfig, Preset};

#[derive(Parser)]
#[command(name = "page-fx", version)]
#[command(about = "page-fx — scroll reveal, parallax and dropdown behaviors for static sites")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Page variant presets.
#[derive(Clone, Copy, ValueEnum)]
enum PresetArg {
    /// Landing page
    Home,
    /// Inner pages (adds the `avatar-info` fallback id)
    Subpage,
}

impl From<PresetArg> for Preset {
    fn from(p: PresetArg) -> Self {
        match p {
            PresetArg::Home => Preset::Home,
            PresetArg::Subpage => Preset::Subpage,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a JSON config file
    Check {
        /// Config file
        file: PathBuf,
    },

    /// Emit the ES module loader that mounts the wasm package
    Loader {
        /// JSON config file (overrides --preset)
        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "home")]
        preset: PresetArg,

        /// URL the wasm-pack output is served from
        #[arg(long, default_value = "/pkg")]
        pkg: String,

        /// Wrap in a <script type="module"> element
        #[arg(long)]
        script_tag: bool,

        /// Write output to file instead of stdout
        #[arg(short)]
        o: Option<PathBuf>,
    },

    /// Emit a self-contained demo page exercising every behavior
    Demo {
        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "home")]
        preset: PresetArg,

        #[arg(long, default_value = "/pkg")]
        pkg: String,

        /// Page title
        #[arg(long, default_value = "page-fx demo")]
        title: String,

        #[arg(short)]
        o: Option<PathBuf>,
    },

    /// Print layer and background transforms for scroll offsets
    Sample {
        /// Scroll offsets in CSS pixels
        #[arg(required = true)]
        offsets: Vec<f64>,

        /// Number of decorative layers
        #[arg(long, default_value_t = 3)]
        layers: usize,

        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "home")]
        preset: PresetArg,

        /// Simulate a host that prefers reduced motion
        #[arg(long)]
        reduced_motion: bool,
    },

    /// Start a live-reload dev server for the demo page
    Dev {
        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "home")]
        preset: PresetArg,

        /// wasm-pack output directory
        #[arg(long, default_value = "pkg")]
        pkg_dir: PathBuf,

        /// Server port
        #[arg(long, default_value_t = 3333)]
        port: u16,

        #[arg(long, default_value = "page-fx demo")]
        title: String,
    },
}

fn load_config(path: Option<&Path>, preset: PresetArg) -> Result<PageConfig> {
    let json = match path {
        Some(p) => Some(
            fs::read_to_string(p).with_context(|| format!("cannot read '{}'", p.display()))?,
        ),
        None => None,
    };
    page_fx::resolve_config(json.as_deref(), preset.into()).with_context(|| match path {
        Some(p) => format!("invalid config '{}'", p.display()),
        None => "invalid preset config".to_string(),
    })
}

fn emit(output: &str, kind: &str, o: Option<PathBuf>) -> Result<()> {
    match o {
        Some(out_path) => {
            fs::write(&out_path, output)
                .with_context(|| format!("cannot write '{}'", out_path.display()))?;
            eprintln!("wrote {kind} to {} ({} bytes)", out_path.display(), output.len());
        }
        None => print!("{output}"),
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Check { file } => {
            let config = load_config(Some(&file), PresetArg::Home)?;
            println!("{}: ok", file.display());
            println!("  reveal:    {} (threshold {})", config.reveal_selector, config.reveal_threshold);
            println!("  layers:    {}", config.layer_selector);
            println!("  background: {}", config.background_selector);
            println!("  avatar:    {} in {}", config.avatar_ids.join(" | "), config.avatar_wrap_selector);
            println!("  dropdown:  #{} -> #{}", config.dropdown_trigger_id, config.dropdown_menu_id);
        }

        Commands::Loader {
            config,
            preset,
            pkg,
            script_tag,
            o,
        } => {
            let config = load_config(config.as_deref(), preset)?;
            let js = if script_tag {
                page_fx::runtime::loader_script_tag(&config, &pkg)?
            } else {
                page_fx::runtime::loader_js(&config, &pkg)?
            };
            emit(&js, "loader", o)?;
        }

        Commands::Demo {
            config,
            preset,
            pkg,
            title,
            o,
        } => {
            let config = load_config(config.as_deref(), preset)?;
            let html = page_fx::runtime::demo_html(&config, &pkg, &title)?;
            emit(&html, "demo HTML", o)?;
        }

        Commands::Sample {
            offsets,
            layers,
            config,
            preset,
            reduced_motion,
        } => {
            let config = load_config(config.as_deref(), preset)?;
            let rows = page_fx::simulate_scroll(&config, layers, &offsets, reduced_motion)?;
            for row in rows {
                println!("scroll {}", row.offset);
                for (i, t) in row.layers.iter().enumerate() {
                    let shown = if t.is_empty() { "(none)" } else { t.as_str() };
                    println!("  layer {i}: {shown}");
                }
                println!("  background: {}", row.background);
            }
        }

        Commands::Dev {
            config,
            preset,
            pkg_dir,
            port,
            title,
        } => {
            // Fail fast on a bad config; the server reports later edits in-page.
            load_config(config.as_deref(), preset)?;
            let opts = page_fx::server::DevOptions {
                config_path: config,
                preset: preset.into(),
                pkg_dir,
                port,
                title,
            };
            let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
            rt.block_on(page_fx::server::run_dev_server(opts))
                .map_err(|e| anyhow::anyhow!("dev server failed: {e}"))?;
        }
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("page_fx=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
