//! Output writers for asrc.
//!
//! - `png` persists distinct images as `<hash>.png`
//! - `json` writes the resource description

mod json;
mod png;

pub use json::{resource_json, write_resource_json};
pub use png::{write_png, PngWriter};
