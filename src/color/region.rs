//! Pixel regions and the canonical color triplet
//!
//! The whole pipeline works in one fixed color convention: sRGB, channel
//! order R,G,B, channel range 0–255. Calibration CSVs are authored in this
//! convention and decoded patch images are converted into it, so Euclidean
//! distances between the two sides are meaningful. Channel means keep full
//! `f64` precision on both sides.

use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// A color triplet of per-channel means in sRGB, range 0–255
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    /// Create a color triplet from channel values
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Euclidean distance to another color in the shared sRGB space
    pub fn distance(&self, other: &Rgb) -> f64 {
        let dr = self.r - other.r;
        let dg = self.g - other.g;
        let db = self.b - other.b;
        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// Hexadecimal display string (e.g. "#C86432"), rounding channel means
    pub fn to_hex(&self) -> String {
        let srgb = Srgb::new(
            (self.r / 255.0) as f32,
            (self.g / 255.0) as f32,
            (self.b / 255.0) as f32,
        );
        let r = (srgb.red.clamp(0.0, 1.0) * 255.0).round() as u8;
        let g = (srgb.green.clamp(0.0, 1.0) * 255.0).round() as u8;
        let b = (srgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }
}

/// A rectangular patch of RGB8 pixels corresponding to one reagent pad.
///
/// Pixels are stored interleaved (R, G, B) in row-major order. Regions are
/// produced by an external segmentation step; this crate only reads them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelRegion {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelRegion {
    /// Create a region from raw interleaved RGB8 bytes
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::ImageLoad` if the buffer length does not
    /// match `width * height * 3`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(AnalysisError::ImageLoad {
                message: format!(
                    "Region buffer length {} does not match {}x{} RGB8 ({} bytes)",
                    data.len(),
                    width,
                    height,
                    expected
                ),
                source: None,
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create a region from a decoded RGB8 image
    pub fn from_rgb_image(image: image::RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            data: image.into_raw(),
        }
    }

    /// Region filled with a single color, mainly for tests and calibration tooling
    pub fn uniform(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * 3);
        for _ in 0..count {
            data.extend_from_slice(&rgb);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Region width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Region height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of pixels
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Iterate over pixels as `[r, g, b]` triplets in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.data.chunks_exact(3).map(|p| [p[0], p[1], p[2]])
    }
}
