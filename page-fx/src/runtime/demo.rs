//! Self-contained demo page with every element the behaviors target, built
//! from a [`PageConfig`] so custom selectors still find their markup.

use super::helpers::html_escape;
use super::loader::loader_script_tag;
use crate::config::PageConfig;
use crate::error::Result;
use crate::selector::SimpleSelector;

/// Number of decorative layers and reveal sections on the demo page.
const DEMO_LAYERS: usize = 3;
const DEMO_SECTIONS: [(&str, &str); 4] = [
    ("About", "Scroll down: each section fades in once it is 12% visible."),
    ("Projects", "The blurred shapes behind this text drift at different depths."),
    ("Writing", "Open the Pages menu with the keyboard: Down, Up, Escape."),
    ("Contact", "Move the pointer over the avatar to tilt it."),
];
const DEMO_PAGES: [&str; 3] = ["Home", "Projects", "Writing"];

fn element(selector: &str, default_tag: &str, extra_classes: &[&str]) -> (String, String) {
    let sel = SimpleSelector::parse(selector);
    (sel.tag_or(default_tag).to_string(), sel.attributes(extra_classes))
}

fn build_css(config: &PageConfig) -> String {
    let reveal = html_escape(&config.reveal_selector);
    let visible = html_escape(&config.visible_class);
    let layer = html_escape(&config.layer_selector);
    let bg = html_escape(&config.background_selector);
    let wrap = html_escape(&config.avatar_wrap_selector);
    let menu = html_escape(&config.dropdown_menu_id);
    let open = html_escape(&config.menu_open_class);
    format!(
        r#"* {{ margin: 0; padding: 0; box-sizing: border-box; }}
body {{ background: #0A0A0A; color: #C8C8C8; font-family: 'Inter', system-ui, sans-serif;
  line-height: 1.6; overflow-x: hidden; }}
header {{ position: sticky; top: 0; z-index: 20; display: flex; align-items: center;
  gap: 16px; padding: 14px 24px; background: rgba(10,10,10,0.85); backdrop-filter: blur(6px); }}
header nav {{ margin-left: auto; position: relative; }}
header button {{ background: #1F1F1F; border: 1px solid #2A2A2A; color: #C8C8C8;
  padding: 6px 12px; border-radius: 4px; cursor: pointer; font: inherit; }}
#{menu} {{ display: none; position: absolute; right: 0; top: 110%; list-style: none;
  background: #141414; border: 1px solid #2A2A2A; border-radius: 6px; min-width: 160px; }}
#{menu}.{open} {{ display: block; }}
#{menu} a {{ display: block; padding: 8px 14px; color: #C8C8C8; text-decoration: none; }}
#{menu} a:focus, #{menu} a:hover {{ background: #1F1F1F; outline: none; }}
{bg} {{ position: fixed; inset: -10%; width: 120%; height: 120%; z-index: -2;
  background: radial-gradient(circle at 30% 20%, #1d2b3a, #0A0A0A 60%); transform: scale(1.18); }}
{layer} {{ position: fixed; border-radius: 50%; filter: blur(40px); opacity: 0.35; z-index: -1;
  will-change: transform; }}
.layer-1 {{ width: 320px; height: 320px; left: 8%; top: 20%; background: #D4AF37; }}
.layer-2 {{ width: 260px; height: 260px; right: 10%; top: 45%; background: #3A7BD5; }}
.layer-3 {{ width: 200px; height: 200px; left: 40%; top: 70%; background: #9B59B6; }}
main {{ max-width: 720px; margin: 0 auto; padding: 80px 24px; }}
{wrap} {{ width: 160px; height: 160px; margin: 0 auto 80px; }}
{wrap} .avatar {{ width: 100%; height: 100%; border-radius: 50%; background: #222;
  border: 2px solid #D4AF37; transition: transform 0.1s ease-out; display: block; }}
{reveal} {{ opacity: 0; transform: translateY(24px); transition: opacity 0.6s, transform 0.6s;
  margin-bottom: 50vh; }}
{reveal}.{visible} {{ opacity: 1; transform: none; }}
footer {{ text-align: center; padding: 40px; color: #555; font-size: 13px; }}
@media (prefers-reduced-motion: reduce) {{
  {reveal} {{ transition: none; }}
}}"#
    )
}

/// Generate the demo page. `pkg_url` is where the wasm package is served.
pub fn demo_html(config: &PageConfig, pkg_url: &str, title: &str) -> Result<String> {
    let css = build_css(config);
    let title = html_escape(title);

    let (bg_tag, bg_attrs) = element(&config.background_selector, "div", &[]);
    let mut layers = String::new();
    for i in 1..=DEMO_LAYERS {
        let class = format!("layer-{i}");
        let (tag, attrs) = element(&config.layer_selector, "div", &[class.as_str()]);
        layers.push_str(&format!("<{tag}{attrs} aria-hidden=\"true\"></{tag}>\n"));
    }

    let (wrap_tag, wrap_attrs) = element(&config.avatar_wrap_selector, "div", &[]);
    let avatar_id = config
        .avatar_ids
        .first()
        .map(|id| html_escape(id))
        .unwrap_or_else(|| "avatar".to_string());

    let mut sections = String::new();
    for (heading, body) in DEMO_SECTIONS {
        let (tag, attrs) = element(&config.reveal_selector, "section", &[]);
        sections.push_str(&format!(
            "<{tag}{attrs}>\n  <h2>{heading}</h2>\n  <p>{body}</p>\n</{tag}>\n"
        ));
    }

    let (link_tag, link_attrs) = element(&config.menu_link_selector, "a", &[]);
    let mut links = String::new();
    for page in DEMO_PAGES {
        let href = format!("#{}", page.to_ascii_lowercase());
        links.push_str(&format!(
            "    <li><{link_tag}{link_attrs} href=\"{href}\">{page}</{link_tag}></li>\n"
        ));
    }

    let trigger_id = html_escape(&config.dropdown_trigger_id);
    let menu_id = html_escape(&config.dropdown_menu_id);
    let year_id = html_escape(&config.year_id);
    let loader = loader_script_tag(config, pkg_url)?;

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
{css}
</style>
</head>
<body>
<{bg_tag}{bg_attrs} aria-hidden="true"></{bg_tag}>
{layers}<header>
  <strong>{title}</strong>
  <nav>
    <button id="{trigger_id}" aria-haspopup="true" aria-controls="{menu_id}" aria-expanded="false">Pages</button>
    <ul id="{menu_id}" role="menu">
{links}    </ul>
  </nav>
</header>
<main>
<{wrap_tag}{wrap_attrs}>
  <div id="{avatar_id}" class="avatar" role="img" aria-label="Avatar"></div>
</{wrap_tag}>
{sections}</main>
<footer>&copy; <span id="{year_id}"></span></footer>
{loader}</body>
</html>
"#
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preset;

    #[test]
    fn contains_every_target() {
        let html = demo_html(&PageConfig::default(), "/pkg", "Demo").unwrap();
        assert!(html.contains("id=\"year\""));
        assert_eq!(html.matches("class=\"reveal\"").count(), DEMO_SECTIONS.len());
        assert!(html.contains("class=\"bg-layer layer-1\""));
        assert!(html.contains("class=\"bg-layer layer-3\""));
        assert!(html.contains("<div id=\"bgImage\" aria-hidden=\"true\">"));
        assert!(html.contains("class=\"avatar-wrap\""));
        assert!(html.contains("id=\"avatar\""));
        assert!(html.contains("id=\"pagesBtn\""));
        assert!(html.contains("aria-expanded=\"false\""));
        assert!(html.contains("id=\"pagesMenu\""));
        assert_eq!(html.matches("<li><a").count(), DEMO_PAGES.len());
        assert!(html.contains("#pagesMenu.show { display: block; }"));
        assert!(html.contains(".reveal.is-visible { opacity: 1;"));
        assert!(html.contains("mount_with(config)"));
    }

    #[test]
    fn follows_custom_selectors() {
        let config = PageConfig {
            reveal_selector: "article.fade".into(),
            layer_selector: ".blob".into(),
            menu_open_class: "is-open".into(),
            ..PageConfig::preset(Preset::Subpage)
        };
        let html = demo_html(&config, "/pkg", "Custom").unwrap();
        assert!(html.contains("<article class=\"fade\">"));
        assert!(html.contains("class=\"blob layer-2\""));
        assert!(html.contains("#pagesMenu.is-open"));
    }

    #[test]
    fn title_is_escaped() {
        let html = demo_html(&PageConfig::default(), "/pkg", "<Me & You>").unwrap();
        assert!(html.contains("<title>&lt;Me &amp; You&gt;</title>"));
    }
}
