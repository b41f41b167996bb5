//! Decoded layer tree.
//!
//! This is the ingestion boundary between a document decoder and the
//! compiler. A layer either holds raster pixels, holds child layers, or
//! holds nothing at all (an empty layer or a pure position marker).

use crate::error::{AsrcError, Result};

/// An RGBA8 raster buffer in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Raster {
    /// Create a raster from raw RGBA bytes.
    ///
    /// Fails when the buffer length does not match `width * height * 4`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(AsrcError::Parse {
                message: format!(
                    "Raster {}x{} needs {} bytes, got {}",
                    width,
                    height,
                    expected,
                    pixels.len()
                ),
                help: None,
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a raster with every pixel set to the same RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Alpha value at (x, y).
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        let idx = (y as usize * self.width as usize + x as usize) * 4 + 3;
        self.pixels[idx]
    }

    /// A pixel is occupied when its alpha is non-zero.
    pub fn is_occupied(&self, x: u32, y: u32) -> bool {
        self.alpha(x, y) != 0
    }

    /// Set a single pixel.
    pub fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels[idx..idx + 4].copy_from_slice(&rgba);
    }
}

/// What a layer holds.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerContent {
    /// A group of child layers.
    Container(Vec<Layer>),
    /// A raster-bearing leaf.
    Raster(Raster),
}

/// One node of a decoded layered document.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Raw display name, including any `:tag` suffix.
    pub name: Option<String>,

    /// Horizontal position in document space.
    pub left: i32,

    /// Vertical position in document space.
    pub top: i32,

    /// Raster or children; `None` for empty layers.
    pub content: Option<LayerContent>,
}

impl Layer {
    /// A raster layer at the given position.
    pub fn raster(name: impl Into<String>, left: i32, top: i32, raster: Raster) -> Self {
        Self {
            name: Some(name.into()),
            left,
            top,
            content: Some(LayerContent::Raster(raster)),
        }
    }

    /// A container layer at the document origin.
    pub fn group(name: impl Into<String>, children: Vec<Layer>) -> Self {
        Self {
            name: Some(name.into()),
            left: 0,
            top: 0,
            content: Some(LayerContent::Container(children)),
        }
    }

    /// A layer with a position but no content.
    pub fn marker(name: impl Into<String>, left: i32, top: i32) -> Self {
        Self {
            name: Some(name.into()),
            left,
            top,
            content: None,
        }
    }

    /// Set the position of this layer.
    pub fn at(mut self, left: i32, top: i32) -> Self {
        self.left = left;
        self.top = top;
        self
    }

    /// The raw name, or an empty string when unnamed.
    pub fn raw_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

/// A decoded document: its name and top-level layers.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerDocument {
    /// Document name (usually the file stem).
    pub name: String,

    /// Top-level layers in document order.
    pub layers: Vec<Layer>,
}

impl LayerDocument {
    pub fn new(name: impl Into<String>, layers: Vec<Layer>) -> Self {
        Self {
            name: name.into(),
            layers,
        }
    }
}
