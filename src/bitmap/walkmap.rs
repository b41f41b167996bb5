//! Walkmap encoding.
//!
//! A walkmap downsamples a navigation layer by a fixed integer `scale`.
//! Pixels past the last whole tile on either axis are dropped. A tile is
//! walkable when at least half of its pixels are occupied.

use crate::types::Raster;

use super::pack::BitPacker;

/// A packed walkmap grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Walkmap {
    /// Grid width in tiles.
    pub width: u32,
    /// Grid height in tiles.
    pub height: u32,
    /// Packed tile bits, row-major.
    pub data: Vec<u8>,
}

impl Walkmap {
    /// Number of tiles in the grid.
    pub fn tiles(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Encode a raster into a walkmap at the given scale.
pub fn encode_walkmap(raster: &Raster, scale: u32) -> Walkmap {
    let scale = scale.max(1);
    let width = raster.width() / scale;
    let height = raster.height() / scale;
    let capacity = scale as usize * scale as usize;

    let mut packer = BitPacker::with_capacity((width as usize * height as usize).div_ceil(8));
    for ty in 0..height {
        for tx in 0..width {
            let mut count = 0usize;
            for y in ty * scale..(ty + 1) * scale {
                for x in tx * scale..(tx + 1) * scale {
                    if raster.is_occupied(x, y) {
                        count += 1;
                    }
                }
            }
            packer.push(count * 2 >= capacity);
        }
    }

    Walkmap {
        width,
        height,
        data: packer.finish(),
    }
}
