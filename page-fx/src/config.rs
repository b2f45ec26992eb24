//! Page configuration: which elements each behavior targets and the numeric
//! factors of the parallax effects.
//!
//! The two page scripts the site shipped differed only in element lookups,
//! so both survive as [`Preset`]s over one [`PageConfig`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FxError, Result};

/// Scroll parallax factors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParallaxConfig {
    /// Layer `i` moves with depth `(i + 1) * depth_step`.
    pub depth_step: f64,
    /// Degrees of rotation per pixel of layer displacement.
    pub rotate_factor: f64,
    /// Background image vertical drift per pixel scrolled.
    pub background_factor: f64,
    /// Fixed background scale, kept so the drift never exposes an edge.
    pub background_scale: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            depth_step: 0.015,
            rotate_factor: 0.02,
            background_factor: 0.01,
            background_scale: 1.18,
        }
    }
}

/// Pointer-driven avatar tilt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AvatarConfig {
    /// Pixels of translation at the wrapper's edge (normalised offset 1.0).
    pub translate_px: f64,
    /// Degrees of rotation at normalised offset 1.0.
    pub rotate_deg: f64,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            translate_px: 6.0,
            rotate_deg: 2.0,
        }
    }
}

/// Everything [`crate::page::PageInteractions`] needs to find its elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    pub year_id: String,
    pub reveal_selector: String,
    pub visible_class: String,
    /// Fraction of an element that must be in view before it is revealed.
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
    pub layer_selector: String,
    pub background_selector: String,
    pub avatar_wrap_selector: String,
    /// Avatar element ids, tried in order; the first present one wins.
    pub avatar_ids: Vec<String>,
    pub dropdown_trigger_id: String,
    pub dropdown_menu_id: String,
    /// Selects the menu's links, scoped to the menu element.
    pub menu_link_selector: String,
    pub menu_open_class: String,
    pub parallax: ParallaxConfig,
    pub avatar: AvatarConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            year_id: "year".into(),
            reveal_selector: ".reveal".into(),
            visible_class: "is-visible".into(),
            reveal_threshold: 0.12,
            reveal_root_margin: "0px".into(),
            layer_selector: ".bg-layer".into(),
            background_selector: "#bgImage".into(),
            avatar_wrap_selector: ".avatar-wrap".into(),
            avatar_ids: vec!["avatar".into()],
            dropdown_trigger_id: "pagesBtn".into(),
            dropdown_menu_id: "pagesMenu".into(),
            menu_link_selector: "a".into(),
            menu_open_class: "show".into(),
            parallax: ParallaxConfig::default(),
            avatar: AvatarConfig::default(),
        }
    }
}

/// The page variants the site ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Landing page.
    Home,
    /// Inner pages; their avatar may carry the `avatar-info` id instead.
    Subpage,
}

impl Preset {
    pub fn name(self) -> &'static str {
        match self {
            Preset::Home => "home",
            Preset::Subpage => "subpage",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = FxError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" | "index" => Ok(Preset::Home),
            "subpage" | "page" => Ok(Preset::Subpage),
            _ => Err(FxError::unknown_preset(s)),
        }
    }
}

impl PageConfig {
    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Home => Self::default(),
            Preset::Subpage => Self {
                avatar_ids: vec!["avatar".into(), "avatar-info".into()],
                ..Self::default()
            },
        }
    }

    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: PageConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configs that would make a behavior misbehave rather than
    /// merely stay inert.
    pub fn validate(&self) -> Result<()> {
        let selectors = [
            ("year_id", &self.year_id),
            ("reveal_selector", &self.reveal_selector),
            ("visible_class", &self.visible_class),
            ("layer_selector", &self.layer_selector),
            ("background_selector", &self.background_selector),
            ("avatar_wrap_selector", &self.avatar_wrap_selector),
            ("dropdown_trigger_id", &self.dropdown_trigger_id),
            ("dropdown_menu_id", &self.dropdown_menu_id),
            ("menu_link_selector", &self.menu_link_selector),
            ("menu_open_class", &self.menu_open_class),
        ];
        for (field, value) in selectors {
            if value.trim().is_empty() {
                return Err(FxError::config(field, "must not be empty"));
            }
        }
        if self.avatar_ids.iter().any(|id| id.trim().is_empty()) {
            return Err(FxError::config("avatar_ids", "ids must not be empty"));
        }
        for class in [&self.visible_class, &self.menu_open_class] {
            if class.contains(char::is_whitespace) {
                return Err(FxError::config("class", "class names cannot contain whitespace"));
            }
        }

        if !(self.reveal_threshold > 0.0 && self.reveal_threshold <= 1.0) {
            return Err(FxError::config("reveal_threshold", "must be in (0, 1]"));
        }

        let factors = [
            ("parallax.depth_step", self.parallax.depth_step),
            ("parallax.rotate_factor", self.parallax.rotate_factor),
            ("parallax.background_factor", self.parallax.background_factor),
            ("parallax.background_scale", self.parallax.background_scale),
            ("avatar.translate_px", self.avatar.translate_px),
            ("avatar.rotate_deg", self.avatar.rotate_deg),
        ];
        for (field, value) in factors {
            if !value.is_finite() {
                return Err(FxError::config(field, "must be a finite number"));
            }
        }
        if self.parallax.background_scale <= 0.0 {
            return Err(FxError::config("parallax.background_scale", "must be positive"));
        }
        Ok(())
    }
}
