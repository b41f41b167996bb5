//! PNG output for registered images.
//!
//! Each distinct image is written once as `<hash>.png`, keeping the alpha
//! channel.

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::error::{AsrcError, Result};
use crate::registry::RasterSink;
use crate::types::Raster;

/// Write a raster to a PNG file.
pub fn write_png(raster: &Raster, path: &Path) -> Result<()> {
    let img = RgbaImage::from_raw(raster.width(), raster.height(), raster.pixels().to_vec())
        .ok_or_else(|| AsrcError::Build {
            message: format!(
                "Raster buffer does not match its size {}x{}",
                raster.width(),
                raster.height()
            ),
            help: None,
        })?;

    img.save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| AsrcError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write PNG: {}", e),
        })?;

    Ok(())
}

/// Persists rasters as PNG files named by content hash.
#[derive(Debug, Clone)]
pub struct PngWriter {
    dir: PathBuf,
    written: usize,
}

impl PngWriter {
    /// Create a writer for `dir`, creating the directory when missing.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| AsrcError::Io {
                path: dir.clone(),
                message: format!("Failed to create image directory: {}", e),
            })?;
        }
        Ok(Self { dir, written: 0 })
    }

    /// Path of the file for a content hash.
    pub fn path_for(&self, hash: &str) -> PathBuf {
        self.dir.join(format!("{}.png", hash))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of files written by this writer.
    pub fn written(&self) -> usize {
        self.written
    }
}

impl RasterSink for PngWriter {
    fn persist(&mut self, hash: &str, raster: &Raster) -> Result<()> {
        write_png(raster, &self.path_for(hash))?;
        self.written += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_png_keeps_alpha() {
        let mut raster = Raster::filled(2, 1, [0, 0, 0, 0]);
        raster.put_pixel(1, 0, [255, 0, 0, 128]);

        let dir = tempdir().unwrap();
        let path = dir.path().join("alpha.png");
        write_png(&raster, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!((img.width(), img.height()), (2, 1));
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 0]);
        assert_eq!(img.get_pixel(1, 0).0, [255, 0, 0, 128]);
    }

    #[test]
    fn test_writer_names_files_by_hash() {
        let dir = tempdir().unwrap();
        let images = dir.path().join("out/images");
        let mut writer = PngWriter::create(&images).unwrap();
        assert!(images.is_dir());

        writer
            .persist("00ff00ff00ff00ff", &Raster::filled(3, 3, [1, 2, 3, 255]))
            .unwrap();

        let path = images.join("00ff00ff00ff00ff.png");
        assert!(path.exists());
        assert_eq!(writer.path_for("00ff00ff00ff00ff"), path);
        assert_eq!(writer.written(), 1);
    }
}
