//! `PageInteractions`: binds every behavior to one page.
//!
//! The controller owns the element handles it found at init and exposes one
//! method per event family. Event wiring is left to the host layer (see
//! `host::dom` for the browser), so the controller can be driven
//! synchronously in tests and by the CLI's headless simulation.

#[cfg(test)]
mod tests;

use tracing::{debug, warn};

use crate::avatar;
use crate::config::PageConfig;
use crate::dropdown::{Dropdown, Focus, KeyOrigin, MenuInput, MenuKey, MenuState, Reaction};
use crate::error::Result;
use crate::host::Page;
use crate::parallax;
use crate::reveal::RevealTracker;
use crate::transform::Transform;
use crate::year;

/// Whether the scroll parallax handlers are still subscribed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBinding {
    Attached,
    /// Permanently detached by the reduced-motion override.
    Detached,
}

/// Motion preference sampled once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Unknown,
    Full,
    Reduced,
}

/// Which event listeners the host layer should attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bindings {
    pub scroll: bool,
    pub pointer: bool,
    pub dropdown: bool,
    pub reveal_targets: usize,
}

struct AvatarParts<E> {
    wrapper: E,
    avatar: E,
}

struct DropdownParts<E> {
    trigger: E,
    menu: E,
    links: Vec<E>,
    machine: Dropdown,
}

/// Outcome of a key event for the host layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyOutcome {
    pub prevent_default: bool,
}

pub struct PageInteractions<P: Page> {
    page: P,
    config: PageConfig,
    reveal_targets: Vec<P::Element>,
    reveal: RevealTracker,
    layers: Vec<P::Element>,
    background: Option<P::Element>,
    avatar: Option<AvatarParts<P::Element>>,
    dropdown: Option<DropdownParts<P::Element>>,
    scroll: ScrollBinding,
    motion: Motion,
}

/// Log and drop a behavior's error so the remaining behaviors still run.
fn soft<T>(behavior: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(behavior, error = %e, "page behavior failed");
            None
        }
    }
}

impl<P: Page> PageInteractions<P> {
    /// Find every behavior's elements and apply initial state: footer year,
    /// reveal observation, the first parallax frame and the dropdown's
    /// `aria-expanded`. The motion preference is applied separately by
    /// [`Self::apply_motion_preference`], after listeners are attached.
    pub fn init(page: P, config: PageConfig) -> Result<Self> {
        config.validate()?;

        soft("footer-year", year::apply_footer_year(&page, &config.year_id));

        let reveal_targets = page.query_selector_all(&config.reveal_selector);
        for el in &reveal_targets {
            soft("reveal", page.observe(el));
        }
        let reveal = RevealTracker::new(reveal_targets.len());

        let layers = page.query_selector_all(&config.layer_selector);
        let background = page.query_selector(&config.background_selector);

        let avatar = page
            .query_selector(&config.avatar_wrap_selector)
            .and_then(|wrapper| {
                config
                    .avatar_ids
                    .iter()
                    .find_map(|id| page.element_by_id(id))
                    .map(|avatar| AvatarParts { wrapper, avatar })
            });

        let dropdown = match (
            page.element_by_id(&config.dropdown_trigger_id),
            page.element_by_id(&config.dropdown_menu_id),
        ) {
            (Some(trigger), Some(menu)) => {
                let links = page.query_within(&menu, &config.menu_link_selector);
                let machine = Dropdown::new(links.len());
                Some(DropdownParts {
                    trigger,
                    menu,
                    links,
                    machine,
                })
            }
            _ => None,
        };

        let mut this = Self {
            page,
            config,
            reveal_targets,
            reveal,
            layers,
            background,
            avatar,
            dropdown,
            scroll: ScrollBinding::Attached,
            motion: Motion::Unknown,
        };

        if let Some(dd) = &this.dropdown {
            soft("dropdown", sync_menu(&this.page, &this.config, dd));
        }
        soft("scroll-parallax", this.on_scroll());

        debug!(
            reveal = this.reveal_targets.len(),
            layers = this.layers.len(),
            background = this.background.is_some(),
            avatar = this.avatar.is_some(),
            dropdown = this.dropdown.is_some(),
            "page interactions initialised"
        );
        Ok(this)
    }

    /// `init` followed by `apply_motion_preference`, for hosts that attach
    /// no listeners of their own.
    pub fn start(page: P, config: PageConfig) -> Result<Self> {
        let mut this = Self::init(page, config)?;
        this.apply_motion_preference();
        Ok(this)
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn scroll_binding(&self) -> ScrollBinding {
        self.scroll
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    pub fn reveal_tracker(&self) -> &RevealTracker {
        &self.reveal
    }

    /// `None` when the page has no dropdown.
    pub fn menu_state(&self) -> Option<MenuState> {
        self.dropdown.as_ref().map(|dd| dd.machine.state())
    }

    pub fn reveal_targets(&self) -> &[P::Element] {
        &self.reveal_targets
    }

    /// Element that receives pointer events for the avatar tilt.
    pub fn avatar_wrapper(&self) -> Option<&P::Element> {
        self.avatar.as_ref().map(|a| &a.wrapper)
    }

    pub fn dropdown_trigger(&self) -> Option<&P::Element> {
        self.dropdown.as_ref().map(|d| &d.trigger)
    }

    pub fn bindings(&self) -> Bindings {
        Bindings {
            scroll: self.scroll == ScrollBinding::Attached
                && (!self.layers.is_empty() || self.background.is_some()),
            pointer: self.avatar.is_some(),
            dropdown: self.dropdown.is_some(),
            reveal_targets: self.reveal_targets.len(),
        }
    }

    /// Sample the reduced-motion preference. Only the first call reads the
    /// host; if motion is reduced the scroll handlers are detached for good
    /// and every parallax element is reset to its static transform.
    pub fn apply_motion_preference(&mut self) -> Motion {
        if self.motion != Motion::Unknown {
            return self.motion;
        }
        if !self.page.prefers_reduced_motion() {
            self.motion = Motion::Full;
            return self.motion;
        }

        self.motion = Motion::Reduced;
        self.scroll = ScrollBinding::Detached;
        for layer in &self.layers {
            soft("reduced-motion", self.page.set_transform(layer, ""));
        }
        if let Some(bg) = &self.background {
            let rest = parallax::background_rest(&self.config.parallax);
            soft("reduced-motion", self.page.set_transform(bg, &rest.to_css()));
        }
        debug!("reduced motion: scroll parallax detached");
        self.motion
    }

    /// Recompute layer and background transforms from the current scroll
    /// offset. No-op once detached.
    pub fn on_scroll(&mut self) -> Result<()> {
        if self.scroll == ScrollBinding::Detached {
            return Ok(());
        }
        let s = self.page.scroll_offset();
        for (i, layer) in self.layers.iter().enumerate() {
            let t = parallax::layer_transform(s, i, &self.config.parallax);
            self.page.set_transform(layer, &t.to_css())?;
        }
        if let Some(bg) = &self.background {
            let t = parallax::background_transform(s, &self.config.parallax);
            self.page.set_transform(bg, &t.to_css())?;
        }
        Ok(())
    }

    /// Handle one visibility observer entry. Returns `true` if the element
    /// was revealed (and unobserved) by this report.
    pub fn on_intersection(
        &mut self,
        target: &P::Element,
        is_intersecting: bool,
    ) -> Result<bool> {
        let Some(index) = self.reveal_targets.iter().position(|el| el == target) else {
            return Ok(false);
        };
        if !self.reveal.report(index, is_intersecting) {
            return Ok(false);
        }
        self.page.set_class(target, &self.config.visible_class, true)?;
        self.page.unobserve(target)?;
        Ok(true)
    }

    /// Pointer moved inside the avatar wrapper (viewport coordinates).
    pub fn on_pointer_move(&mut self, client_x: f64, client_y: f64) -> Result<()> {
        let Some(parts) = &self.avatar else {
            return Ok(());
        };
        let rect = self.page.bounding_rect(&parts.wrapper);
        if let Some(t) = avatar::tilt_for_pointer(rect, client_x, client_y, &self.config.avatar) {
            self.page.set_transform(&parts.avatar, &t.to_css())?;
        }
        Ok(())
    }

    pub fn on_pointer_leave(&mut self) -> Result<()> {
        let Some(parts) = &self.avatar else {
            return Ok(());
        };
        self.page.set_transform(&parts.avatar, &Transform::none().to_css())
    }

    pub fn on_trigger_click(&mut self) -> Result<()> {
        self.dispatch_menu(MenuInput::TriggerClick).map(|_| ())
    }

    /// Any click in the document. Clicks landing on the trigger or inside
    /// the menu are left to their own handlers.
    pub fn on_document_click(&mut self, target: Option<&P::Element>) -> Result<()> {
        let Some(dd) = &self.dropdown else {
            return Ok(());
        };
        if let Some(target) = target {
            if self.page.contains(&dd.trigger, target) || self.page.contains(&dd.menu, target) {
                return Ok(());
            }
        }
        self.dispatch_menu(MenuInput::OutsideClick).map(|_| ())
    }

    /// A keydown anywhere in the document; `target` is the focused element
    /// the event was dispatched on.
    pub fn on_keydown(&mut self, key: &str, target: Option<&P::Element>) -> Result<KeyOutcome> {
        let Some(dd) = &self.dropdown else {
            return Ok(KeyOutcome::default());
        };
        let origin = match target {
            Some(t) if *t == dd.trigger => KeyOrigin::Trigger,
            Some(t) => dd
                .links
                .iter()
                .position(|link| link == t)
                .map(KeyOrigin::Link)
                .unwrap_or(KeyOrigin::Elsewhere),
            None => KeyOrigin::Elsewhere,
        };
        let key = MenuKey::from_key(key);
        let reaction = self.dispatch_menu(MenuInput::Key { key, origin })?;
        Ok(KeyOutcome {
            prevent_default: reaction.prevent_default,
        })
    }

    fn dispatch_menu(&mut self, input: MenuInput) -> Result<Reaction> {
        let Some(dd) = self.dropdown.as_mut() else {
            return Ok(Reaction::default());
        };
        let reaction = dd.machine.handle(input);
        if reaction.state_changed {
            sync_menu(&self.page, &self.config, dd)?;
        }
        if let Some(focus) = reaction.focus {
            let el = match focus {
                Focus::Trigger => Some(&dd.trigger),
                Focus::Link(i) => dd.links.get(i),
            };
            if let Some(el) = el {
                self.page.focus(el)?;
            }
        }
        Ok(reaction)
    }

}

/// Mirror the dropdown state onto the menu class and `aria-expanded`.
fn sync_menu<P: Page>(page: &P, config: &PageConfig, dd: &DropdownParts<P::Element>) -> Result<()> {
    let state = dd.machine.state();
    page.set_class(&dd.menu, &config.menu_open_class, state.is_open())?;
    page.set_attribute(&dd.trigger, "aria-expanded", state.aria_expanded())
}
