//! Live-reload dev server for the demo page. Local tooling only; the
//! published site is static and never talks to it.
//!
//! Serves the demo page built from the current config at `/`, the loader
//! module at `/loader.js`, the resolved config at `/config.json` and the
//! wasm-pack output under `/pkg/`. Edits to the config file or a rebuild of
//! the package trigger a browser reload.

use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use axum::extract::{Path as UrlPath, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use notify::{Event, RecursiveMode, Watcher};
use tower_livereload::LiveReloadLayer;

use crate::config::{PageConfig, Preset};
use crate::runtime;

/// What the dev server serves.
#[derive(Debug, Clone)]
pub struct DevOptions {
    /// JSON config file; `None` uses `preset`.
    pub config_path: Option<PathBuf>,
    pub preset: Preset,
    /// Directory produced by `wasm-pack build --target web`.
    pub pkg_dir: PathBuf,
    pub port: u16,
    pub title: String,
}

/// URL the package directory is mounted at.
const PKG_URL: &str = "/pkg";

/// Start the dev server. Runs until the process is stopped.
pub async fn run_dev_server(opts: DevOptions) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(opts.clone());

    let livereload = LiveReloadLayer::new();
    let reloader = livereload.reloader();

    let mut _watcher = notify::recommended_watcher(move |res: Result<Event, _>| {
        if let Ok(event) = res {
            if event.kind.is_modify() || event.kind.is_create() {
                tracing::info!(paths = ?event.paths, "change detected, reloading");
                reloader.reload();
            }
        }
    })?;
    if let Some(config_path) = &opts.config_path {
        let dir = config_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        _watcher.watch(dir, RecursiveMode::NonRecursive)?;
    }
    if opts.pkg_dir.is_dir() {
        _watcher.watch(&opts.pkg_dir, RecursiveMode::Recursive)?;
    } else {
        tracing::warn!(pkg = %opts.pkg_dir.display(), "package directory missing; run wasm-pack first");
    }

    let app = Router::new()
        .route("/", get(serve_demo))
        .route("/loader.js", get(serve_loader))
        .route("/config.json", get(serve_config))
        .route("/pkg/{*path}", get(serve_pkg))
        .layer(livereload)
        .with_state(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], opts.port));
    let port = opts.port;
    eprintln!("page-fx dev server");
    match &opts.config_path {
        Some(p) => eprintln!("  config:  {}", p.display()),
        None => eprintln!("  preset:  {}", opts.preset),
    }
    eprintln!("  package: {}", opts.pkg_dir.display());
    eprintln!("  demo:    http://localhost:{port}/");
    eprintln!("  loader:  http://localhost:{port}/loader.js");
    eprintln!("  watching for changes...");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

// ── Config ────────────────────────────────────────────────────────────

fn load_config(opts: &DevOptions) -> Result<PageConfig, String> {
    match &opts.config_path {
        None => Ok(PageConfig::preset(opts.preset)),
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read '{}': {e}", path.display()))?;
            PageConfig::from_json(&json).map_err(|e| format!("{}: {e}", path.display()))
        }
    }
}

/// Resolve a `/pkg/...` request path inside `root`, refusing traversal.
fn resolve_pkg_path(root: &Path, request: &str) -> Option<PathBuf> {
    let rel = Path::new(request);
    if rel
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }
    Some(root.join(rel))
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("js") => "text/javascript",
        Some("wasm") => "application/wasm",
        Some("json") => "application/json",
        Some("ts") => "text/plain",
        Some("html") => "text/html; charset=utf-8",
        _ => "application/octet-stream",
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

// ── Error page ────────────────────────────────────────────────────────

fn build_error_page(error: &str) -> String {
    let escaped = html_escape(error);
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>page-fx dev — Error</title>
<style>
  * {{ margin: 0; padding: 0; box-sizing: border-box; }}
  html, body {{ width: 100%; height: 100%; background: #0A0A0A; color: #A0A0A0;
    font-family: 'JetBrains Mono', monospace; }}
  .error-container {{
    max-width: 640px; margin: 80px auto; padding: 32px;
    border: 1px solid #3F1818; border-radius: 8px;
    background: rgba(239,68,68,0.04);
  }}
  .error-header {{ margin-bottom: 20px; font-size: 13px; color: #EF4444; }}
  .error-message {{
    font-size: 12px; color: #EF4444; line-height: 1.7;
    white-space: pre-wrap; word-break: break-word;
    padding: 16px; background: #141414; border-radius: 4px;
    border-left: 3px solid #EF4444;
  }}
  .waiting {{ margin-top: 24px; font-size: 11px; color: #666; }}
</style>
</head>
<body>
<div class="error-container">
  <div class="error-header">page-fx dev: invalid config</div>
  <div class="error-message">{escaped}</div>
  <div class="waiting">waiting for fix...</div>
</div>
</body>
</html>"##
    )
}

// ── Route handlers ────────────────────────────────────────────────────

async fn serve_demo(State(opts): State<Arc<DevOptions>>) -> Html<String> {
    let page = load_config(&opts).and_then(|config| {
        runtime::demo_html(&config, PKG_URL, &opts.title).map_err(|e| e.to_string())
    });
    match page {
        Ok(html) => Html(html),
        Err(e) => Html(build_error_page(&e)),
    }
}

async fn serve_loader(State(opts): State<Arc<DevOptions>>) -> Response {
    let js = load_config(&opts)
        .and_then(|config| runtime::loader_js(&config, PKG_URL).map_err(|e| e.to_string()));
    match js {
        Ok(js) => ([(header::CONTENT_TYPE, "text/javascript")], js).into_response(),
        Err(e) => {
            let escaped = e.replace('\\', "\\\\").replace('\'', "\\'");
            (
                [(header::CONTENT_TYPE, "text/javascript")],
                format!("console.error('page-fx: {escaped}');"),
            )
                .into_response()
        }
    }
}

async fn serve_config(State(opts): State<Arc<DevOptions>>) -> Response {
    let json = load_config(&opts).and_then(|c| c.to_json_pretty().map_err(|e| e.to_string()));
    match json {
        Ok(json) => ([(header::CONTENT_TYPE, "application/json")], json).into_response(),
        Err(e) => (StatusCode::UNPROCESSABLE_ENTITY, e).into_response(),
    }
}

async fn serve_pkg(
    State(opts): State<Arc<DevOptions>>,
    UrlPath(path): UrlPath<String>,
) -> Response {
    let Some(file) = resolve_pkg_path(&opts.pkg_dir, &path) else {
        return (StatusCode::BAD_REQUEST, "invalid path").into_response();
    };
    match tokio::fs::read(&file).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, content_type(&file))], bytes).into_response(),
        Err(e) => {
            tracing::debug!(file = %file.display(), error = %e, "package file not served");
            (StatusCode::NOT_FOUND, format!("{path}: not found")).into_response()
        }
    }
}
