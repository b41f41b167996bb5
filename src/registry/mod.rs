//! Content-addressed image registry.
//!
//! Every raster that ends up referenced by a sprite goes through
//! [`ImageRegistry::register`]. Identical pixel content, wherever it appears,
//! collapses to one [`ResourceImage`] and one persisted raster file.
//!
//! # Example
//!
//! ```ignore
//! use asrc::registry::{DiscardSink, ImageRegistry};
//!
//! let mut registry = ImageRegistry::new(Box::new(DiscardSink), 4);
//! let a = registry.register(&raster, true)?;
//! let b = registry.register(&raster, true)?;
//! assert_eq!(a, b);
//! ```

mod hash;

use std::collections::HashMap;

use crate::bitmap::{encode_bits, encode_hitmap};
use crate::error::Result;
use crate::types::{Raster, ResourceImage};

pub use hash::content_hash;

/// Destination for the raw pixels of newly seen images.
pub trait RasterSink {
    /// Persist `raster` under its content hash.
    fn persist(&mut self, hash: &str, raster: &Raster) -> Result<()>;
}

/// A sink that drops everything. Used for dry runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardSink;

impl RasterSink for DiscardSink {
    fn persist(&mut self, _hash: &str, _raster: &Raster) -> Result<()> {
        Ok(())
    }
}

/// Store of distinct images keyed by content hash.
pub struct ImageRegistry {
    images: Vec<ResourceImage>,
    index: HashMap<String, usize>,
    sink: Box<dyn RasterSink>,
    compression: u32,
    hits: usize,
}

impl ImageRegistry {
    /// Create a registry persisting new images to `sink`, computing hitmaps
    /// with the given compression factor.
    pub fn new(sink: Box<dyn RasterSink>, compression: u32) -> Self {
        Self {
            images: Vec::new(),
            index: HashMap::new(),
            sink,
            compression,
            hits: 0,
        }
    }

    /// Register a raster and return its content hash.
    ///
    /// A known hash returns immediately without touching the stored image or
    /// the sink. Otherwise the image is recorded (with a hitmap when
    /// `want_hitmap` is set) and handed to the sink.
    pub fn register(&mut self, raster: &Raster, want_hitmap: bool) -> Result<String> {
        let hash = content_hash(raster);
        if self.index.contains_key(&hash) {
            self.hits += 1;
            return Ok(hash);
        }

        let hitmap = want_hitmap.then(|| encode_bits(&encode_hitmap(raster, self.compression)));
        self.sink.persist(&hash, raster)?;

        self.index.insert(hash.clone(), self.images.len());
        self.images.push(ResourceImage {
            hash: hash.clone(),
            width: raster.width(),
            height: raster.height(),
            hitmap,
        });

        Ok(hash)
    }

    /// Look up a registered image.
    pub fn get(&self, hash: &str) -> Option<&ResourceImage> {
        self.index.get(hash).map(|&i| &self.images[i])
    }

    /// Registered images in first-seen order.
    pub fn images(&self) -> &[ResourceImage] {
        &self.images
    }

    /// Number of registrations answered from the existing set.
    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Consume the registry, returning the images in first-seen order.
    pub fn into_images(self) -> Vec<ResourceImage> {
        self.images
    }
}

impl std::fmt::Debug for ImageRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageRegistry")
            .field("images", &self.images.len())
            .field("compression", &self.compression)
            .field("hits", &self.hits)
            .finish()
    }
}
