//! Color types and patch color extraction
//!
//! This module defines the canonical color representation used across
//! calibration ingestion and patch extraction, and the mean-color extractor.

pub mod extract;
pub mod region;

pub use extract::extract_mean_color;
pub use region::{PixelRegion, Rgb};
