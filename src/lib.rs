//! # stripscan
//!
//! A Rust crate for classifying multi-pad colorimetric test strips (urine
//! reagent strips) into discrete diagnostic levels.
//!
//! The library compares the mean color of each reagent pad's image patch
//! against a reference table of calibrated colors:
//! - A catalog defines the pad layout and per-analyte level labels
//! - The builder turns calibration measurements into a reference table
//! - The extractor reduces a pad's patch to one representative color
//! - The classifier resolves that color to the nearest calibrated level
//!
//! Image acquisition and segmentation into per-pad patches happen upstream;
//! this crate starts from rectangular pixel regions, one per pad.
//!
//! ## Example
//!
//! ```rust
//! use stripscan::{analyze_strip, reference, Catalog, MemorySource, PixelRegion, Rgb};
//!
//! let catalog = Catalog::urine_10();
//!
//! let mut calibration = MemorySource::new();
//! calibration.insert(
//!     "GLU",
//!     vec![
//!         Rgb::new(200.0, 200.0, 200.0),
//!         Rgb::new(150.0, 100.0, 50.0),
//!         Rgb::new(80.0, 40.0, 20.0),
//!     ],
//! );
//!
//! let outcome = reference::build(&catalog, &calibration)?;
//! let regions = vec![PixelRegion::uniform(8, 8, [155, 102, 48])];
//! let report = analyze_strip(&catalog, &regions, &outcome.table);
//!
//! assert_eq!(report.results[0].value_label, "100(5)");
//! # Ok::<(), stripscan::AnalysisError>(())
//! ```

pub mod calibration;
pub mod catalog;
pub mod classify;
pub mod color;
pub mod constants;
pub mod error;
pub mod image_loader;
pub mod pipeline;
pub mod reference;
pub mod report;
pub mod storage;

pub use calibration::{CalibrationSource, CsvDirectorySource, MemorySource};
pub use catalog::{AnalytePad, Catalog};
pub use classify::classify;
pub use color::{extract_mean_color, PixelRegion, Rgb};
pub use error::{AnalysisError, Result};
pub use reference::{ReferenceEntry, ReferenceTable};
pub use report::{ClassificationResult, RunWarning, StripReport};
pub use storage::SqliteStore;

/// Classify one strip from its per-pad image regions.
///
/// This is the main entry point for strip analysis. The reference table
/// must be fully built (see [`reference::build`]) before calling; the run
/// itself never fails, degrading to warnings for skipped pads instead.
pub fn analyze_strip(
    catalog: &Catalog,
    regions: &[PixelRegion],
    table: &ReferenceTable,
) -> StripReport {
    pipeline::run(catalog, regions, table)
}
