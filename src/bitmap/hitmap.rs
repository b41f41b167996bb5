//! Hitmap encoding.
//!
//! A hitmap is a coarse collision mask for one image. The image is divided
//! into a grid of roughly the image's own aspect ratio with `size * 8` cells,
//! where `size` grows with the square root of the image area. A cell's bit is
//! set when strictly more than half of its pixels are occupied.

use crate::types::Raster;

use super::pack::BitPacker;

/// Byte length of the hitmap for a `width` x `height` image.
///
/// `roundUp4(ceil(sqrt(width * height) / compression))`.
pub fn hitmap_size(width: u32, height: u32, compression: u32) -> usize {
    let compression = compression.max(1) as f64;
    let area = width as f64 * height as f64;
    let raw = (area.sqrt() / compression).ceil() as usize;
    (raw + 3) & !3
}

/// Encode the hitmap of a raster. The output is exactly
/// [`hitmap_size`] bytes.
pub fn encode_hitmap(raster: &Raster, compression: u32) -> Vec<u8> {
    let (width, height) = (raster.width(), raster.height());
    let size = hitmap_size(width, height, compression);
    if size == 0 {
        return Vec::new();
    }

    let bits = size * 8;
    let xdiv = ((bits as f64 * width as f64 / height as f64).sqrt().floor() as usize).clamp(1, bits);
    let ydiv = bits / xdiv;
    let xstep = (width as usize).div_ceil(xdiv);
    let ystep = (height as usize).div_ceil(ydiv);

    let mut buckets = vec![0u32; bits];
    for y in 0..height {
        let row = (y as usize / ystep) * xdiv;
        for x in 0..width {
            if raster.is_occupied(x, y) {
                buckets[row + x as usize / xstep] += 1;
            }
        }
    }

    let capacity = xstep * ystep;
    let mut packer = BitPacker::with_capacity(size);
    for count in buckets {
        packer.push(count as usize * 2 > capacity);
    }
    packer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPAQUE: [u8; 4] = [255, 255, 255, 255];
    const CLEAR: [u8; 4] = [0, 0, 0, 0];

    #[test]
    fn test_size_law() {
        assert_eq!(hitmap_size(8, 8, 4), 4);
        assert_eq!(hitmap_size(2, 2, 4), 4);
        // sqrt(100*100)/4 = 25 -> 28
        assert_eq!(hitmap_size(100, 100, 4), 28);
        // sqrt(64*16)/4 = 8 -> 8
        assert_eq!(hitmap_size(64, 16, 4), 8);
        // sqrt(33*33)/4 = 8.25 -> 9 -> 12
        assert_eq!(hitmap_size(33, 33, 4), 12);
        assert_eq!(hitmap_size(0, 10, 4), 0);
    }

    #[test]
    fn test_output_length_ignores_content() {
        for (w, h) in [(8, 8), (1, 50), (50, 1), (17, 5), (100, 100), (3, 7)] {
            let clear = Raster::filled(w, h, CLEAR);
            let solid = Raster::filled(w, h, OPAQUE);
            let expected = hitmap_size(w, h, 4);
            assert_eq!(encode_hitmap(&clear, 4).len(), expected, "{}x{}", w, h);
            assert_eq!(encode_hitmap(&solid, 4).len(), expected, "{}x{}", w, h);
        }
    }

    #[test]
    fn test_solid_square() {
        // 32 bits: xdiv 5, ydiv 6, 2x2 pixel cells; a 4x4 block of cells is
        // covered, the fifth column and the last rows stay empty.
        let raster = Raster::filled(8, 8, OPAQUE);
        assert_eq!(encode_hitmap(&raster, 4), vec![0xF7, 0xBD, 0xE0, 0x00]);
    }

    #[test]
    fn test_transparent_is_all_zero() {
        let raster = Raster::filled(8, 8, CLEAR);
        assert_eq!(encode_hitmap(&raster, 4), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_half_occupied_cell_is_clear() {
        // Cell 0 covers pixels (0..2, 0..2).
        let mut raster = Raster::filled(8, 8, CLEAR);
        raster.put_pixel(0, 0, OPAQUE);
        raster.put_pixel(1, 0, OPAQUE);
        assert_eq!(encode_hitmap(&raster, 4)[0], 0x00);

        raster.put_pixel(0, 1, OPAQUE);
        assert_eq!(encode_hitmap(&raster, 4)[0], 0x80);
    }

    #[test]
    fn test_any_nonzero_alpha_counts() {
        let mut raster = Raster::filled(2, 2, CLEAR);
        raster.put_pixel(0, 0, [0, 0, 0, 1]);
        // 1x1 cells, cell index = y * 5 + x
        assert_eq!(encode_hitmap(&raster, 4), vec![0x80, 0, 0, 0]);
    }

    #[test]
    fn test_tall_thin_raster() {
        let raster = Raster::filled(1, 64, OPAQUE);
        let bits = encode_hitmap(&raster, 4);
        assert_eq!(bits.len(), hitmap_size(1, 64, 4));
        assert!(bits.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_deterministic() {
        let mut raster = Raster::filled(13, 9, CLEAR);
        for i in 0..9 {
            raster.put_pixel(i, i, OPAQUE);
            raster.put_pixel(12 - i, i, OPAQUE);
        }
        assert_eq!(encode_hitmap(&raster, 4), encode_hitmap(&raster.clone(), 4));
    }
}
