//! Parsers for asrc inputs.
//!
//! - `tag` splits layer names into local name and tag (`hero:namespace`)
//! - `document` loads `*.layers.yaml` layer documents and their rasters

pub mod document;
pub mod tag;

pub use document::{document_name, load_document, load_raster, parse_document, DOCUMENT_SUFFIX};
pub use tag::{parse_frame_delay, parse_layer_name, LayerName, Tag, DEFAULT_NAME, TAG_DELIMITER};
