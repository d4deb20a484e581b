//! Patch image loading
//!
//! Loads pre-segmented patch images from disk into [`PixelRegion`]s for the
//! extraction step. Decoding goes through the `image` crate and always
//! lands in RGB8, the pipeline's canonical channel order.
//!
//! Patch files for one strip live in a directory, one image per pad; the
//! sorted file-name order defines the pad order (file 1 = pad 1).

use std::path::{Path, PathBuf};

use crate::color::PixelRegion;
use crate::error::{AnalysisError, Result};

/// Supported patch image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// JPEG image
    Jpeg,
    /// PNG image
    Png,
    /// TIFF image
    Tiff,
    /// BMP image
    Bmp,
    /// WebP image
    WebP,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<ImageFormat> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "tiff" | "tif" => Some(ImageFormat::Tiff),
            "bmp" => Some(ImageFormat::Bmp),
            "webp" => Some(ImageFormat::WebP),
            _ => None,
        }
    }
}

/// Load a patch image from disk as an RGB8 pixel region
///
/// # Errors
///
/// Returns `AnalysisError::ImageLoad` if:
/// - The file extension is not a supported image format
/// - The file cannot be opened
/// - Decoding fails
pub fn load_patch(path: &Path) -> Result<PixelRegion> {
    use image::ImageReader;

    if ImageFormat::from_extension(path).is_none() {
        return Err(AnalysisError::ImageLoad {
            message: format!("Unknown image format for file: {}", path.display()),
            source: None,
        });
    }

    let reader = ImageReader::open(path).map_err(|e| {
        AnalysisError::image_load(format!("Failed to open image file: {}", path.display()), e)
    })?;

    let img = reader.decode().map_err(|e| {
        AnalysisError::image_load(format!("Failed to decode image: {}", path.display()), e)
    })?;

    Ok(PixelRegion::from_rgb_image(img.to_rgb8()))
}

/// Load all patch images of one strip from a directory, in sorted name order.
///
/// Non-image files are ignored. Returns one region per recognized image
/// file; matching the region count against the catalog's pad count is the
/// orchestrator's job, not this loader's.
pub fn load_patch_dir(dir: &Path) -> Result<Vec<PixelRegion>> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        AnalysisError::image_load(format!("Failed to read patch directory: {}", dir.display()), e)
    })?;

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry
            .map_err(|e| AnalysisError::image_load("Failed to list patch directory", e))?;
        let path = entry.path();
        if ImageFormat::from_extension(&path).is_some() {
            paths.push(path);
        }
    }
    paths.sort();

    paths.iter().map(|path| load_patch(path)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(
            ImageFormat::from_extension(Path::new("pad_01.jpg")),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::from_extension(Path::new("pad_01.JPEG")),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::from_extension(Path::new("pad_01.png")),
            Some(ImageFormat::Png)
        );
        assert_eq!(
            ImageFormat::from_extension(Path::new("pad_01.webp")),
            Some(ImageFormat::WebP)
        );
        assert_eq!(ImageFormat::from_extension(Path::new("pad_01.xyz")), None);
        assert_eq!(ImageFormat::from_extension(Path::new("pad_01")), None);
    }

    #[test]
    fn test_unknown_extension_rejected_before_io() {
        let err = load_patch(Path::new("notes.txt")).unwrap_err();
        assert!(matches!(err, AnalysisError::ImageLoad { .. }));
    }

    #[test]
    fn test_region_from_decoded_image() {
        let mut img = image::RgbImage::new(2, 2);
        for pixel in img.pixels_mut() {
            *pixel = image::Rgb([150, 100, 50]);
        }
        let region = PixelRegion::from_rgb_image(img);
        assert_eq!(region.pixel_count(), 4);
        assert!(region.pixels().all(|p| p == [150, 100, 50]));
    }
}
