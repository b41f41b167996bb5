//! Occupancy bitmaps.
//!
//! Both encoders treat a pixel as occupied when its alpha is non-zero and
//! pack one bit per grid cell, most significant bit first.

mod hitmap;
mod pack;
mod walkmap;

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine as _;

pub use hitmap::{encode_hitmap, hitmap_size};
pub use pack::BitPacker;
pub use walkmap::{encode_walkmap, Walkmap};

/// Default hitmap compression factor.
pub const HITMAP_COMPRESSION: u32 = 4;

/// Default walkmap downscale factor.
pub const WALKMAP_SCALE: u32 = 8;

/// Encode packed bits for the resource file (base64, no padding).
pub fn encode_bits(bytes: &[u8]) -> String {
    STANDARD_NO_PAD.encode(bytes)
}
