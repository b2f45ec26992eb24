//! The seam between behaviors and the document they run in.
//!
//! This module is split into:
//! - `memory` — headless in-memory page (CLI simulation, tests)
//! - `dom` — `web-sys` backed page (wasm builds only)

#[cfg(feature = "wasm")]
pub mod dom;
pub mod memory;

use std::fmt::Debug;

use crate::avatar::Rect;
use crate::error::Result;

/// Operations the page behaviors need from their host document.
///
/// Lookups return `None`/empty for absent elements; behaviors treat that as
/// "disabled", never as an error. Mutations return `Err` only when the host
/// itself rejects the operation.
pub trait Page {
    /// Handle to a document element. Equality is node identity.
    type Element: Clone + PartialEq + Debug;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// All elements matching `selector`, in document order.
    fn query_selector_all(&self, selector: &str) -> Vec<Self::Element>;

    fn query_selector(&self, selector: &str) -> Option<Self::Element> {
        self.query_selector_all(selector).into_iter().next()
    }

    /// Descendants of `root` matching `selector`, in document order.
    fn query_within(&self, root: &Self::Element, selector: &str) -> Vec<Self::Element>;

    fn set_text(&self, el: &Self::Element, text: &str) -> Result<()>;

    /// Add (`on == true`) or remove a class.
    fn set_class(&self, el: &Self::Element, class: &str, on: bool) -> Result<()>;

    /// Set the inline `transform` style; `""` clears it.
    fn set_transform(&self, el: &Self::Element, css: &str) -> Result<()>;

    fn set_attribute(&self, el: &Self::Element, name: &str, value: &str) -> Result<()>;

    fn focus(&self, el: &Self::Element) -> Result<()>;

    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: &Self::Element, node: &Self::Element) -> bool;

    fn bounding_rect(&self, el: &Self::Element) -> Rect;

    /// Current vertical scroll offset in CSS pixels.
    fn scroll_offset(&self) -> f64;

    /// Calendar year according to the host clock.
    fn current_year(&self) -> i32;

    /// `prefers-reduced-motion: reduce`, sampled at call time.
    fn prefers_reduced_motion(&self) -> bool;

    /// Register `el` with the reveal visibility observer.
    fn observe(&self, el: &Self::Element) -> Result<()>;

    fn unobserve(&self, el: &Self::Element) -> Result<()>;
}
