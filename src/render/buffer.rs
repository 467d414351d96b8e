//! RGB pixel buffer sized for an enumeration

use super::color::Rgb;
use crate::error::{Result, SatArtError};
use image::RgbImage;
use std::path::Path;

/// Largest variable count that is enumerated without projection
pub const MAX_VARIABLES: u32 = 30;

/// Buffer dimensions `(width, height)` for `n` variables.
///
/// `2^floor(n/2) x 2^ceil(n/2)` holds exactly `2^n` pixels, which is the
/// part of the order-`ceil(n/2)` Hilbert grid reached by indices below `2^n`.
pub fn dimensions_for(n: u32) -> (u32, u32) {
    (1 << (n / 2), 1 << n.div_ceil(2))
}

/// Row-major 3-channel image buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a black buffer
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 3],
        }
    }

    /// Allocate the buffer for an enumeration of `n` variables
    pub fn for_variables(n: u32) -> Result<Self> {
        if n > MAX_VARIABLES {
            return Err(SatArtError::ResourceLimit(format!(
                "number of variables ({}) cannot exceed {} (the image would need {} bytes)",
                n,
                MAX_VARIABLES,
                3u128 << n
            )));
        }
        let (width, height) = dimensions_for(n);
        Ok(Self::new(width, height))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 3
    }

    /// Get the color at `(x, y)`, if inside the buffer
    pub fn get(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        Some(Rgb([self.data[i], self.data[i + 1], self.data[i + 2]]))
    }

    /// Set the color at `(x, y)`
    pub fn set(&mut self, x: u32, y: u32, color: Rgb) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(SatArtError::InvalidArgument(format!(
                "pixel ({}, {}) is outside the {}x{} buffer",
                x, y, self.width, self.height
            )));
        }
        let i = self.offset(x, y);
        self.data[i..i + 3].copy_from_slice(&color.0);
        Ok(())
    }

    /// Overwrite every pixel with `color`
    pub fn fill(&mut self, color: Rgb) {
        for pixel in self.data.chunks_exact_mut(3) {
            pixel.copy_from_slice(&color.0);
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw bytes, `width * 3` per row
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Convert into an `image` buffer of the same dimensions
    pub fn into_image(self) -> Result<RgbImage> {
        let (width, height, len) = (self.width, self.height, self.data.len());
        RgbImage::from_raw(width, height, self.data).ok_or_else(|| {
            SatArtError::InvalidArgument(format!(
                "{} bytes do not form a {}x{} RGB image",
                len, width, height
            ))
        })
    }

    /// Encode the buffer to `path`; the format follows the file extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        self.clone().into_image()?.save(path)?;
        Ok(())
    }
}
