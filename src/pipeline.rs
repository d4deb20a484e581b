//! Strip classification pipeline
//!
//! Sequences extraction and classification across all pads of one strip and
//! assembles the final report. The reference table must be fully built
//! before a run begins; taking it as an argument makes that ordering a
//! visible dependency instead of a hidden file-system fact.

use log::{debug, warn};

use crate::catalog::Catalog;
use crate::classify::classify;
use crate::color::{extract_mean_color, PixelRegion};
use crate::error::AnalysisError;
use crate::reference::ReferenceTable;
use crate::report::{RunWarning, StripReport};

/// Classify one strip from its per-pad image regions.
///
/// Regions are matched to pads positionally: `regions[0]` is pad 1. A
/// region count that differs from the catalog's pad count is recorded as a
/// single summary warning and the run proceeds over the pads both sides
/// supply. Per-pad failures (empty region, missing reference data) skip the
/// pad with a warning; they never abort the run, so a report is always
/// produced.
pub fn run(catalog: &Catalog, regions: &[PixelRegion], table: &ReferenceTable) -> StripReport {
    let mut report = StripReport::default();

    let expected = catalog.pad_count();
    if regions.len() != expected {
        warn!(
            "region count mismatch: expected {}, got {}",
            expected,
            regions.len()
        );
        report.warnings.push(RunWarning::RegionCountMismatch {
            expected,
            supplied: regions.len(),
        });
    }

    for pad in catalog.pads() {
        let region = (pad.pad_index as usize)
            .checked_sub(1)
            .and_then(|i| regions.get(i));
        let Some(region) = region else {
            // Pads beyond the supplied regions are covered by the summary
            // warning above.
            continue;
        };

        let color = match extract_mean_color(region) {
            Ok(color) => color,
            Err(AnalysisError::EmptyRegion) => {
                warn!("pad {}: image region contains no pixels", pad.pad_index);
                report.warnings.push(RunWarning::EmptyRegion {
                    pad_index: pad.pad_index,
                });
                continue;
            }
            Err(err) => {
                // extract_mean_color only fails with EmptyRegion today;
                // treat anything else as a skip too rather than aborting.
                warn!("pad {}: extraction failed: {}", pad.pad_index, err);
                report.warnings.push(RunWarning::EmptyRegion {
                    pad_index: pad.pad_index,
                });
                continue;
            }
        };

        match classify(pad.pad_index, color, catalog, table) {
            Ok(result) => {
                debug!(
                    "pad {} ({}): level {} '{}' at distance {:.3}",
                    pad.pad_index, pad.code, result.level_index, result.value_label, result.distance
                );
                report.results.push(result);
            }
            Err(AnalysisError::NoReferenceData { pad_index }) => {
                warn!("pad {}: no reference data, skipped", pad_index);
                report
                    .warnings
                    .push(RunWarning::NoReferenceData { pad_index });
            }
            Err(err) => {
                warn!("pad {}: classification failed: {}", pad.pad_index, err);
                report.warnings.push(RunWarning::NoReferenceData {
                    pad_index: pad.pad_index,
                });
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::MemorySource;
    use crate::color::Rgb;
    use crate::reference;

    fn table_for(catalog: &Catalog, colors: &[(&str, Vec<Rgb>)]) -> ReferenceTable {
        let mut source = MemorySource::new();
        for (code, rows) in colors {
            source.insert(*code, rows.clone());
        }
        reference::build(catalog, &source).unwrap().table
    }

    #[test]
    fn test_results_ordered_by_pad_index() {
        let catalog = Catalog::urine_10();
        let mut source = MemorySource::new();
        for pad in catalog.pads() {
            source.insert(pad.code.clone(), vec![Rgb::new(100.0, 100.0, 100.0)]);
        }
        let table = reference::build(&catalog, &source).unwrap().table;

        let regions: Vec<PixelRegion> = (0..10)
            .map(|_| PixelRegion::uniform(2, 2, [100, 100, 100]))
            .collect();

        let report = run(&catalog, &regions, &table);
        assert_eq!(report.results.len(), 10);
        assert!(report.warnings.is_empty());
        let indices: Vec<u32> = report.results.iter().map(|r| r.pad_index).collect();
        assert_eq!(indices, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_fewer_regions_yields_summary_warning() {
        let catalog = Catalog::urine_10();
        let table = table_for(&catalog, &[("GLU", vec![Rgb::new(100.0, 100.0, 100.0)])]);
        let regions = vec![PixelRegion::uniform(2, 2, [100, 100, 100])];

        let report = run(&catalog, &regions, &table);
        assert_eq!(report.results.len(), 1);
        assert!(report
            .warnings
            .contains(&RunWarning::RegionCountMismatch {
                expected: 10,
                supplied: 1,
            }));
        // Exactly one mismatch warning, not one per missing pad
        let mismatches = report
            .warnings
            .iter()
            .filter(|w| matches!(w, RunWarning::RegionCountMismatch { .. }))
            .count();
        assert_eq!(mismatches, 1);
    }

    #[test]
    fn test_pad_without_reference_is_skipped_with_one_warning() {
        let catalog = Catalog::urine_10();
        // Only GLU (pad 1) calibrated; pad 2 (BIL) gets a region but no data
        let table = table_for(&catalog, &[("GLU", vec![Rgb::new(100.0, 100.0, 100.0)])]);
        let regions = vec![
            PixelRegion::uniform(2, 2, [100, 100, 100]),
            PixelRegion::uniform(2, 2, [50, 50, 50]),
        ];

        let report = run(&catalog, &regions, &table);
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].pad_index, 1);

        let skips: Vec<_> = report
            .warnings
            .iter()
            .filter(|w| matches!(w, RunWarning::NoReferenceData { pad_index: 2 }))
            .collect();
        assert_eq!(skips.len(), 1);
    }

    #[test]
    fn test_empty_region_is_skipped_with_warning() {
        let catalog = Catalog::urine_10();
        let table = table_for(&catalog, &[("GLU", vec![Rgb::new(100.0, 100.0, 100.0)])]);
        let regions = vec![PixelRegion::from_raw(0, 0, vec![]).unwrap()];

        let report = run(&catalog, &regions, &table);
        assert!(report.results.is_empty());
        assert!(report
            .warnings
            .contains(&RunWarning::EmptyRegion { pad_index: 1 }));
    }

    #[test]
    fn test_report_always_produced() {
        // No regions, empty table: degraded output, never a panic or error
        let catalog = Catalog::urine_10();
        let report = run(&catalog, &[], &ReferenceTable::default());
        assert!(report.results.is_empty());
        assert!(report.has_warnings());
    }
}
