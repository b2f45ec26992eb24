//! ES module loader: imports the wasm package and mounts it with a config.

use super::helpers::{js_string, script_safe_json};
use crate::config::PageConfig;
use crate::error::Result;

/// Name of the JS glue file `wasm-pack --target web` emits for this crate.
pub const GLUE_FILE: &str = "page_fx.js";

/// Generate the loader module body (without `<script>` tags).
///
/// `pkg_url` is where the wasm-pack output is served from, e.g. `/pkg`.
pub fn loader_js(config: &PageConfig, pkg_url: &str) -> Result<String> {
    let config_json = script_safe_json(&serde_json::to_string_pretty(config)?);
    let glue = js_string(&format!("{}/{GLUE_FILE}", pkg_url.trim_end_matches('/')));
    Ok(format!(
        r#"import init, {{ mount_with }} from '{glue}';

const config = {config_json};

async function start() {{
  try {{
    await init();
    mount_with(config);
  }} catch (err) {{
    console.warn('[page-fx]', err);
  }}
}}

if (document.readyState === 'loading') {{
  document.addEventListener('DOMContentLoaded', start, {{ once: true }});
}} else {{
  start();
}}
"#
    ))
}

/// The loader wrapped in a `<script type="module">` element.
pub fn loader_script_tag(config: &PageConfig, pkg_url: &str) -> Result<String> {
    Ok(format!(
        "<script type=\"module\">\n{}</script>\n",
        loader_js(config, pkg_url)?
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preset;

    #[test]
    fn imports_glue_from_pkg() {
        let js = loader_js(&PageConfig::default(), "/pkg/").unwrap();
        assert!(js.contains("from '/pkg/page_fx.js'"));
        assert!(js.contains("mount_with(config)"));
        assert!(js.contains("DOMContentLoaded"));
    }

    #[test]
    fn embeds_config() {
        let js = loader_js(&PageConfig::preset(Preset::Subpage), "./pkg").unwrap();
        assert!(js.contains("\"avatar-info\""));
        assert!(js.contains("\"background_scale\": 1.18"));
    }

    #[test]
    fn script_tag_wraps_module() {
        let tag = loader_script_tag(&PageConfig::default(), "/pkg").unwrap();
        assert!(tag.starts_with("<script type=\"module\">"));
        assert!(tag.trim_end().ends_with("</script>"));
    }
}
