//! Mean color extraction from pad regions
//!
//! Flattens a rectangular pad region into one sequence of pixel colors and
//! computes the per-channel arithmetic mean. The mean keeps full precision
//! so that distances against the real-valued reference table stay exact.
//!
//! Algorithm tag: `algo-patch-mean-color`

use crate::color::region::{PixelRegion, Rgb};
use crate::error::{AnalysisError, Result};

/// Compute the representative color of one pad region.
///
/// Pure function: exactly one color triplet per invocation, no shared state.
/// Pad attribution for skipped regions is the orchestrator's concern.
///
/// # Errors
///
/// Returns `AnalysisError::EmptyRegion` if the region has no pixels.
pub fn extract_mean_color(region: &PixelRegion) -> Result<Rgb> {
    let count = region.pixel_count();
    if count == 0 {
        return Err(AnalysisError::EmptyRegion);
    }

    let mut sum = [0.0f64; 3];
    for [r, g, b] in region.pixels() {
        sum[0] += r as f64;
        sum[1] += g as f64;
        sum[2] += b as f64;
    }

    let n = count as f64;
    Ok(Rgb::new(sum[0] / n, sum[1] / n, sum[2] / n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_region_mean_is_the_color() {
        let region = PixelRegion::uniform(4, 4, [150, 100, 50]);
        let mean = extract_mean_color(&region).unwrap();
        assert_eq!(mean, Rgb::new(150.0, 100.0, 50.0));
    }

    #[test]
    fn test_mean_keeps_full_precision() {
        // Two pixels averaging to a non-integer channel value
        let region = PixelRegion::from_raw(2, 1, vec![100, 0, 0, 101, 0, 0]).unwrap();
        let mean = extract_mean_color(&region).unwrap();
        assert!((mean.r - 100.5).abs() < 1e-12);
        assert_eq!(mean.g, 0.0);
        assert_eq!(mean.b, 0.0);
    }

    #[test]
    fn test_mean_over_mixed_pixels() {
        let region =
            PixelRegion::from_raw(2, 2, vec![0, 0, 0, 255, 255, 255, 0, 255, 0, 255, 0, 255])
                .unwrap();
        let mean = extract_mean_color(&region).unwrap();
        assert!((mean.r - 127.5).abs() < 1e-12);
        assert!((mean.g - 127.5).abs() < 1e-12);
        assert!((mean.b - 127.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty_region_fails() {
        let region = PixelRegion::from_raw(0, 0, vec![]).unwrap();
        let err = extract_mean_color(&region).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyRegion));
    }
}
