//! Content hashing for rasters.

use std::hash::Hasher;

use twox_hash::XxHash64;

use crate::types::Raster;

/// Hash a raster's dimensions and RGBA bytes into 16 hex digits.
///
/// Equal pixel content always produces the same key, independent of the
/// layer name, position or source document.
pub fn content_hash(raster: &Raster) -> String {
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(&raster.width().to_le_bytes());
    hasher.write(&raster.height().to_le_bytes());
    hasher.write(raster.pixels());
    format!("{:016x}", hasher.finish())
}
