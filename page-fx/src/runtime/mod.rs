//! Generates the browser-side artifacts that load the wasm package.
//!
//! This module is split into:
//! - `loader` — ES module that imports the package and calls `mount_with`
//! - `demo` — self-contained demo page exercising every behavior
//! - `helpers` — escaping shared by both outputs

mod demo;
mod helpers;
mod loader;

pub use demo::demo_html;
pub use loader::{loader_js, loader_script_tag, GLUE_FILE};
