//! Scroll-driven parallax for decorative layers and the background image.
//!
//! Every function here is a pure function of the current scroll offset, so
//! handlers can run any number of times per frame without drift.

use crate::config::ParallaxConfig;
use crate::transform::{Offset, Transform};

/// Depth coefficient of the layer at `index` (0-based).
pub fn layer_depth(index: usize, config: &ParallaxConfig) -> f64 {
    (index as f64 + 1.0) * config.depth_step
}

/// Transform for layer `index` at scroll offset `scroll`:
/// `translate3d(s*d px, -s*d px, 0) rotate(s*d*rotate_factor deg)`.
pub fn layer_transform(scroll: f64, index: usize, config: &ParallaxConfig) -> Transform {
    let shift = scroll * layer_depth(index, config);
    Transform::none()
        .translate3d(Offset::Px(shift), Offset::Px(-shift), Offset::Zero)
        .rotate(shift * config.rotate_factor)
}

/// Background image drift: `translate3d(0, s*factor px, 0) scale(background_scale)`.
pub fn background_transform(scroll: f64, config: &ParallaxConfig) -> Transform {
    Transform::none()
        .translate3d(
            Offset::Zero,
            Offset::Px(scroll * config.background_factor),
            Offset::Zero,
        )
        .scale(config.background_scale)
}

/// Background transform used when motion is reduced: scaled, never moved.
pub fn background_rest(config: &ParallaxConfig) -> Transform {
    Transform::none().scale(config.background_scale)
}
