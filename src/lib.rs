//! asrc - Layered art to runtime resource compiler
//!
//! A library for turning layered art documents into deduplicated images and
//! a JSON resource description of groups, sprites, hitmaps and walkmaps.

pub mod bitmap;
pub mod cli;
pub mod compiler;
pub mod discovery;
pub mod error;
pub mod output;
pub mod parser;
pub mod registry;
pub mod render;
pub mod types;
pub mod validation;

pub use bitmap::{encode_bits, encode_hitmap, encode_walkmap, hitmap_size, Walkmap};
pub use compiler::{CompileStats, CompilerOptions, Context, Origin, ResourceCompiler};
pub use discovery::{discover, discover_paths, DiscoveryResult, Manifest};
pub use error::{AsrcError, Result};
pub use parser::{load_document, parse_document, parse_layer_name, LayerName, Tag};
pub use registry::{content_hash, DiscardSink, ImageRegistry, RasterSink};
pub use render::{write_png, write_resource_json, PngWriter};
pub use types::{
    Layer, LayerContent, LayerDocument, Raster, ResourceAnimation, ResourceAnimationFrame,
    ResourceBitmap, ResourceFile, ResourceFrame, ResourceGroup, ResourceImage, ResourcePoint,
    ResourceQuad, ResourceSprite,
};
pub use validation::{validate_resources, Diagnostic, Severity, ValidationResult};
