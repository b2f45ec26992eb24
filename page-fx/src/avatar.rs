//! Pointer-driven avatar tilt.

use crate::config::AvatarConfig;
use crate::transform::Transform;

/// A bounding box in viewport coordinates, as returned by
/// `getBoundingClientRect()`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Pointer offset from the wrapper's center, divided by the wrapper's size.
/// Inside the wrapper both components lie in `[-0.5, 0.5]`.
///
/// Returns `None` for a collapsed wrapper (zero width or height).
pub fn pointer_offset(wrapper: Rect, client_x: f64, client_y: f64) -> Option<(f64, f64)> {
    if wrapper.width <= 0.0 || wrapper.height <= 0.0 {
        return None;
    }
    let dx = (client_x - wrapper.left - wrapper.width / 2.0) / wrapper.width;
    let dy = (client_y - wrapper.top - wrapper.height / 2.0) / wrapper.height;
    Some((dx, dy))
}

/// `translate(dx*k, dy*k) rotate(dx*r)` for a normalised offset.
pub fn avatar_transform(dx: f64, dy: f64, config: &AvatarConfig) -> Transform {
    Transform::none()
        .translate(dx * config.translate_px, dy * config.translate_px)
        .rotate(dx * config.rotate_deg)
}

/// Transform for a pointer sample, or `None` when the wrapper is collapsed.
pub fn tilt_for_pointer(
    wrapper: Rect,
    client_x: f64,
    client_y: f64,
    config: &AvatarConfig,
) -> Option<Transform> {
    pointer_offset(wrapper, client_x, client_y).map(|(dx, dy)| avatar_transform(dx, dy, config))
}
