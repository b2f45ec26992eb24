//! CSS transform values and their inline-style rendering.
//!
//! Numbers are printed the way a browser stringifies them in a template
//! literal: shortest round-trip form, no trailing `.0`, and `-0` collapses
//! to `0`.

use std::fmt;

/// One axis of a `translate3d`: a pixel length, or a bare unitless `0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Offset {
    Zero,
    Px(f64),
}

/// A single CSS transform function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformFn {
    /// `translate(Xpx, Ypx)`
    Translate(f64, f64),
    /// `translate3d(X, Y, Z)`; keeps the element on its own compositor layer.
    Translate3d(Offset, Offset, Offset),
    /// `rotate(Rdeg)`
    Rotate(f64),
    /// `scale(S)`
    Scale(f64),
}

/// An ordered list of transform functions. The empty transform renders as
/// an empty string, which clears the inline style back to the stylesheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transform(Vec<TransformFn>);

impl Transform {
    /// The identity: renders as `""`.
    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn then(mut self, f: TransformFn) -> Self {
        self.0.push(f);
        self
    }

    pub fn translate(self, x: f64, y: f64) -> Self {
        self.then(TransformFn::Translate(x, y))
    }

    pub fn translate3d(self, x: Offset, y: Offset, z: Offset) -> Self {
        self.then(TransformFn::Translate3d(x, y, z))
    }

    pub fn rotate(self, deg: f64) -> Self {
        self.then(TransformFn::Rotate(deg))
    }

    pub fn scale(self, s: f64) -> Self {
        self.then(TransformFn::Scale(s))
    }

    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }

    pub fn functions(&self) -> &[TransformFn] {
        &self.0
    }

    /// Render to an inline `style.transform` value.
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

/// Format a number like JavaScript's `String(n)` for the finite values
/// produced here.
pub fn css_number(n: f64) -> String {
    if n == 0.0 || !n.is_finite() {
        // also maps -0 and NaN to "0"
        return "0".to_string();
    }
    format!("{n}")
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Offset::Zero => f.write_str("0"),
            Offset::Px(n) => write!(f, "{}px", css_number(n)),
        }
    }
}

impl fmt::Display for TransformFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TransformFn::Translate(x, y) => {
                write!(f, "translate({}px, {}px)", css_number(x), css_number(y))
            }
            TransformFn::Translate3d(x, y, z) => write!(f, "translate3d({x}, {y}, {z})"),
            TransformFn::Rotate(r) => write!(f, "rotate({}deg)", css_number(r)),
            TransformFn::Scale(s) => write!(f, "scale({})", css_number(s)),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, func) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{func}")?;
        }
        Ok(())
    }
}
