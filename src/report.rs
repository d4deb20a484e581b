//! Strip reports, warnings, and export
//!
//! The report is the pipeline's only product: one classification row per
//! pad that could be analyzed, ordered by pad index, plus the list of
//! warnings for everything that was skipped on the way.

use std::fmt;
use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::{AnalysisError, Result};

/// Classification outcome for one pad
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// 1-based pad position
    pub pad_index: u32,

    /// Analyte code, e.g. "GLU"
    pub analyte_code: String,

    /// Analyte display name, e.g. "Glucose"
    pub analyte_name: String,

    /// Winning reference level (0-based calibration row)
    pub level_index: usize,

    /// Display label of the winning level
    pub value_label: String,

    /// Display unit; may be empty
    pub unit: String,

    /// Euclidean distance between the extracted and the winning color
    pub distance: f64,

    /// The color extracted from the pad's patch
    pub extracted_color: Rgb,
}

/// Non-fatal condition recorded during a classification run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunWarning {
    /// Supplied region count differs from the catalog pad count
    RegionCountMismatch { expected: usize, supplied: usize },

    /// A pad's image region held no pixels; pad skipped
    EmptyRegion { pad_index: u32 },

    /// A pad had no reference entries; pad skipped
    NoReferenceData { pad_index: u32 },
}

impl fmt::Display for RunWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunWarning::RegionCountMismatch { expected, supplied } => {
                write!(
                    f,
                    "expected {} image regions, got {}",
                    expected, supplied
                )
            }
            RunWarning::EmptyRegion { pad_index } => {
                write!(f, "pad {}: image region contains no pixels", pad_index)
            }
            RunWarning::NoReferenceData { pad_index } => {
                write!(f, "pad {}: no reference data", pad_index)
            }
        }
    }
}

/// Full result of one strip run: rows ordered by pad index, plus warnings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StripReport {
    pub results: Vec<ClassificationResult>,
    pub warnings: Vec<RunWarning>,
}

impl StripReport {
    /// Whether any pad was skipped during the run
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Write the report rows as CSV (Pad, Analyte, Level, Value, Unit)
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer
            .write_record(["Pad", "Analyte", "Level", "Value", "Unit"])
            .map_err(|e| AnalysisError::calibration_io("Failed to write report header", e))?;
        for row in &self.results {
            csv_writer
                .write_record([
                    row.pad_index.to_string(),
                    row.analyte_name.clone(),
                    row.level_index.to_string(),
                    row.value_label.clone(),
                    row.unit.clone(),
                ])
                .map_err(|e| AnalysisError::calibration_io("Failed to write report row", e))?;
        }
        csv_writer
            .flush()
            .map_err(|e| AnalysisError::calibration_io("Failed to flush report", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(pad: u32) -> ClassificationResult {
        ClassificationResult {
            pad_index: pad,
            analyte_code: "GLU".to_string(),
            analyte_name: "Glucose".to_string(),
            level_index: 1,
            value_label: "100(5)".to_string(),
            unit: "mg/dL (mmol/L)".to_string(),
            distance: 5.385,
            extracted_color: Rgb::new(155.0, 102.0, 48.0),
        }
    }

    #[test]
    fn test_csv_export_columns() {
        let report = StripReport {
            results: vec![result(1)],
            warnings: vec![],
        };
        let mut buffer = Vec::new();
        report.write_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Pad,Analyte,Level,Value,Unit"));
        assert_eq!(lines.next(), Some("1,Glucose,1,100(5),mg/dL (mmol/L)"));
    }

    #[test]
    fn test_json_serialization() {
        let report = StripReport {
            results: vec![result(1)],
            warnings: vec![RunWarning::NoReferenceData { pad_index: 2 }],
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"value_label\""));
        assert!(json.contains("\"warnings\""));

        let parsed: StripReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.results.len(), 1);
        assert_eq!(parsed.warnings.len(), 1);
    }

    #[test]
    fn test_warning_display() {
        let warning = RunWarning::NoReferenceData { pad_index: 4 };
        assert_eq!(warning.to_string(), "pad 4: no reference data");

        let warning = RunWarning::RegionCountMismatch {
            expected: 10,
            supplied: 8,
        };
        assert!(warning.to_string().contains("10"));
        assert!(warning.to_string().contains('8'));
    }
}
