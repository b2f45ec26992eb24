pub mod avatar;
pub mod config;
pub mod dropdown;
pub mod error;
pub mod host;
pub mod page;
pub mod parallax;
pub mod reveal;
pub mod runtime;
pub mod selector;
#[cfg(not(target_arch = "wasm32"))]
pub mod server;
pub mod transform;
#[cfg(feature = "wasm")]
pub mod wasm;
pub mod year;

use config::{PageConfig, Preset};
use error::Result;
use host::memory::{MemoryPage, NodeId};
use page::PageInteractions;

pub use avatar::Rect;
pub use page::{Bindings, Motion, ScrollBinding};

/// Resolve a config from an optional JSON document, falling back to a preset.
pub fn resolve_config(json: Option<&str>, preset: Preset) -> Result<PageConfig> {
    match json {
        Some(json) => PageConfig::from_json(json),
        None => Ok(PageConfig::preset(preset)),
    }
}

/// One row of a headless parallax simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollSample {
    pub offset: f64,
    pub layers: Vec<String>,
    pub background: String,
}

/// Build a headless page with `layers` decorative layers and a background
/// image, mount the behaviors on it, and record the transforms written at
/// each scroll offset.
///
/// With `reduced_motion` the host reports the preference, so every row
/// shows the static transforms.
pub fn simulate_scroll(
    config: &PageConfig,
    layers: usize,
    offsets: &[f64],
    reduced_motion: bool,
) -> Result<Vec<ScrollSample>> {
    let page = MemoryPage::new(0).with_reduced_motion(reduced_motion);
    let layer_nodes: Vec<NodeId> = (0..layers)
        .map(|_| markup(&page, &config.layer_selector, "div"))
        .collect();
    let background = markup(&page, &config.background_selector, "div");

    let mut fx = PageInteractions::start(page, config.clone())?;
    let mut rows = Vec::with_capacity(offsets.len());
    for &offset in offsets {
        fx.page().scroll_to(offset);
        fx.on_scroll()?;
        rows.push(ScrollSample {
            offset,
            layers: layer_nodes.iter().map(|n| fx.page().transform(*n)).collect(),
            background: fx.page().transform(background),
        });
    }
    Ok(rows)
}

/// Add a node the given selector will match.
fn markup(page: &MemoryPage, selector: &str, default_tag: &str) -> NodeId {
    let sel = selector::SimpleSelector::parse(selector);
    let node = page.add(sel.tag_or(default_tag), None);
    if let Some(id) = &sel.id {
        page.set_id(node, id);
    }
    for class in &sel.classes {
        page.add_class(node, class);
    }
    node
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn simulate_matches_formulas() {
        let rows = simulate_scroll(&PageConfig::default(), 2, &[0.0, 200.0], false)
            .expect("simulation should succeed");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].layers[0], "translate3d(0px, 0px, 0) rotate(0deg)");
        assert_eq!(rows[0].background, "translate3d(0, 0px, 0) scale(1.18)");
        assert_eq!(rows[1].layers[0], "translate3d(3px, -3px, 0) rotate(0.06deg)");
        assert_eq!(rows[1].layers[1], "translate3d(6px, -6px, 0) rotate(0.12deg)");
        assert_eq!(rows[1].background, "translate3d(0, 2px, 0) scale(1.18)");
    }

    #[test]
    fn simulate_reduced_motion_is_static() {
        let rows = simulate_scroll(&PageConfig::default(), 3, &[0.0, 500.0, 5000.0], true)
            .expect("simulation should succeed");
        for row in rows {
            assert!(row.layers.iter().all(|t| t.is_empty()));
            assert_eq!(row.background, "scale(1.18)");
        }
    }

    #[test]
    fn simulate_honours_custom_selectors() {
        let config = PageConfig {
            layer_selector: "span.blob".into(),
            background_selector: "#hero-bg".into(),
            ..PageConfig::default()
        };
        let rows = simulate_scroll(&config, 1, &[100.0], false).unwrap();
        assert_eq!(rows[0].layers[0], "translate3d(1.5px, -1.5px, 0) rotate(0.03deg)");
        assert_eq!(rows[0].background, "translate3d(0, 1px, 0) scale(1.18)");
    }

    #[test]
    fn resolve_prefers_json() {
        let c = resolve_config(Some(r#"{ "year_id": "y" }"#), Preset::Subpage).unwrap();
        assert_eq!(c.year_id, "y");
        assert_eq!(c.avatar_ids, vec!["avatar"]);
        let c = resolve_config(None, Preset::Subpage).unwrap();
        assert_eq!(c.avatar_ids.len(), 2);
    }
}
