//! Layer document loading.
//!
//! A layer document (`*.layers.yaml`) is a decoded layered image: a tree of
//! named, positioned layers whose leaves point at PNG rasters.
//!
//! ```yaml
//! layers:
//!   - name: "hero:namespace"
//!     children:
//!       - name: idle
//!         left: 10
//!         top: 20
//!         image: hero/idle.png
//!       - name: "spawn:point"
//!         left: 4
//!         top: 8
//! ```
//!
//! Image paths are resolved relative to the document file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AsrcError, Result};
use crate::types::{Layer, LayerContent, LayerDocument, Raster};

/// File suffix of layer documents.
pub const DOCUMENT_SUFFIX: &str = ".layers.yaml";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDocument {
    #[serde(default)]
    layers: Vec<RawLayer>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLayer {
    name: Option<String>,
    #[serde(default)]
    left: i32,
    #[serde(default)]
    top: i32,
    image: Option<PathBuf>,
    children: Option<Vec<RawLayer>>,
}

/// Document name for a path: the file name without the `.layers.yaml` suffix.
pub fn document_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document");
    file_name
        .strip_suffix(DOCUMENT_SUFFIX)
        .unwrap_or(file_name)
        .to_string()
}

/// Load a layer document and decode all of its rasters.
pub fn load_document(path: &Path) -> Result<LayerDocument> {
    let source = fs::read_to_string(path).map_err(|e| AsrcError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read document: {}", e),
    })?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    parse_document(&source, &document_name(path), base_dir)
}

/// Parse layer document source. Image paths resolve against `base_dir`.
pub fn parse_document(source: &str, name: &str, base_dir: &Path) -> Result<LayerDocument> {
    let raw: RawDocument = serde_yaml::from_str(source).map_err(|e| AsrcError::Parse {
        message: format!("Invalid layer document {}: {}", name, e),
        help: Some("A layer document is a YAML mapping with a 'layers' list".to_string()),
    })?;

    let layers = raw
        .layers
        .into_iter()
        .map(|layer| convert_layer(layer, base_dir))
        .collect::<Result<Vec<_>>>()?;

    Ok(LayerDocument::new(name, layers))
}

fn convert_layer(raw: RawLayer, base_dir: &Path) -> Result<Layer> {
    let content = match (raw.image, raw.children) {
        (Some(_), Some(_)) => {
            return Err(AsrcError::Parse {
                message: format!(
                    "Layer '{}' has both an image and children",
                    raw.name.as_deref().unwrap_or("")
                ),
                help: Some("A layer holds either a raster or child layers, not both".to_string()),
            })
        }
        (Some(image), None) => Some(LayerContent::Raster(load_raster(&base_dir.join(image))?)),
        (None, Some(children)) => Some(LayerContent::Container(
            children
                .into_iter()
                .map(|child| convert_layer(child, base_dir))
                .collect::<Result<Vec<_>>>()?,
        )),
        (None, None) => None,
    };

    Ok(Layer {
        name: raw.name,
        left: raw.left,
        top: raw.top,
        content,
    })
}

/// Decode an image file into an RGBA8 raster.
pub fn load_raster(path: &Path) -> Result<Raster> {
    let img = image::open(path)
        .map_err(|e| AsrcError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to load image: {}", e),
        })?
        .to_rgba8();

    let (width, height) = img.dimensions();
    Raster::new(width, height, img.into_raw())
}
