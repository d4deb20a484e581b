//! Reference table builder
//!
//! Turns per-analyte calibration rows and the catalog into one flat,
//! queryable reference table:
//! - Validates the catalog before producing anything (fatal on violation)
//! - Resolves each row's value label with the clamping policy
//! - Degrades per pad and per row: missing sources and malformed rows
//!   become warnings, never build failures
//!
//! Algorithm tag: `algo-reference-table-build`

use std::fmt;

use log::{debug, warn};

use crate::calibration::CalibrationSource;
use crate::catalog::Catalog;
use crate::error::Result;
use crate::reference::table::{ReferenceEntry, ReferenceTable};

/// Non-fatal condition recorded while building the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildWarning {
    /// No calibration rows located for an analyte; its pad stays empty
    MissingCalibrationSource { pad_index: u32, analyte_code: String },

    /// A calibration row failed to parse and was skipped
    MalformedCalibrationRow {
        pad_index: u32,
        analyte_code: String,
        row_index: usize,
        reason: String,
    },
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildWarning::MissingCalibrationSource {
                pad_index,
                analyte_code,
            } => write!(
                f,
                "pad {}: no calibration source for analyte '{}'",
                pad_index, analyte_code
            ),
            BuildWarning::MalformedCalibrationRow {
                pad_index,
                analyte_code,
                row_index,
                reason,
            } => write!(
                f,
                "pad {} ({}): skipped malformed calibration row {}: {}",
                pad_index, analyte_code, row_index, reason
            ),
        }
    }
}

/// A freshly built reference table plus the warnings recorded on the way
#[derive(Debug)]
pub struct BuildOutcome {
    /// Complete replacement table; prior contents of any store should be
    /// discarded in favor of this snapshot.
    pub table: ReferenceTable,
    pub warnings: Vec<BuildWarning>,
}

/// Build a reference table from the catalog and a calibration source.
///
/// The produced table is a complete replacement value: rerunning the build
/// yields a fresh snapshot, never a merge with earlier results.
///
/// # Errors
///
/// Returns `AnalysisError::Configuration` if the catalog is invalid (before
/// any entry is produced) and `AnalysisError::CalibrationIo` if the source
/// itself cannot be read. Missing analytes and malformed rows are warnings.
pub fn build(catalog: &Catalog, source: &dyn CalibrationSource) -> Result<BuildOutcome> {
    catalog.validate()?;

    let mut entries = Vec::new();
    let mut warnings = Vec::new();

    for pad in catalog.pads() {
        let rows = match source.rows_for(&pad.code)? {
            Some(rows) => rows,
            None => {
                warn!(
                    "no calibration source for analyte '{}' (pad {})",
                    pad.code, pad.pad_index
                );
                warnings.push(BuildWarning::MissingCalibrationSource {
                    pad_index: pad.pad_index,
                    analyte_code: pad.code.clone(),
                });
                continue;
            }
        };

        for malformed in rows.malformed {
            warn!(
                "pad {} ({}): skipped malformed calibration row {}: {}",
                pad.pad_index, pad.code, malformed.row_index, malformed.reason
            );
            warnings.push(BuildWarning::MalformedCalibrationRow {
                pad_index: pad.pad_index,
                analyte_code: pad.code.clone(),
                row_index: malformed.row_index,
                reason: malformed.reason,
            });
        }

        for (level_index, color) in rows.colors.into_iter().enumerate() {
            // Label list may be shorter than the calibration data; the last
            // label covers all excess rows.
            let value_label = catalog
                .value_label(&pad.code, level_index)
                .unwrap_or_default()
                .to_string();

            entries.push(ReferenceEntry {
                pad_index: pad.pad_index,
                analyte_code: pad.code.clone(),
                level_index,
                value_label,
                color,
            });
        }
    }

    debug!(
        "built reference table: {} entries, {} warnings",
        entries.len(),
        warnings.len()
    );

    Ok(BuildOutcome {
        table: ReferenceTable::new(entries),
        warnings,
    })
}
