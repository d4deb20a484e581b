//! Calibration catalog: pad layout and level labels
//!
//! The catalog is the static domain configuration of a strip: an ordered
//! list of pad definitions and, per analyte, the ordered level labels.
//! It is fixed at configuration time and validated once at load; every
//! build and classification run depends on a validated catalog.
//!
//! # Catalog Loading
//!
//! Catalogs can be loaded from JSON files or constructed from the built-in
//! strip definition:
//!
//! ```no_run
//! use stripscan::Catalog;
//! use std::path::Path;
//!
//! // Load from file
//! let catalog = Catalog::from_json_file(Path::new("catalog.json"))?;
//!
//! // Or use the standard 10-pad urine strip
//! let catalog = Catalog::urine_10();
//! # Ok::<(), stripscan::AnalysisError>(())
//! ```

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{AnalysisError, Result};

/// One reagent pad position on the strip.
///
/// Immutable; defined entirely by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalytePad {
    /// 1-based position on the strip
    pub pad_index: u32,

    /// Short stable identifier, e.g. "GLU"
    pub code: String,

    /// Display name, e.g. "Glucose"
    pub name: String,

    /// Display unit; may be empty for dimensionless scales
    pub unit: String,
}

/// Ordered pad definitions plus per-analyte level labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pads: Vec<AnalytePad>,
    labels: HashMap<String, Vec<String>>,
}

impl Catalog {
    /// Build a catalog from pad definitions and label lists, validating it.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::Configuration` if an invariant is violated.
    pub fn new(pads: Vec<AnalytePad>, labels: HashMap<String, Vec<String>>) -> Result<Self> {
        let catalog = Self { pads, labels };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The standard 10-pad urine reagent strip
    pub fn urine_10() -> Self {
        let pads = constants::PAD_SEQUENCE
            .iter()
            .enumerate()
            .map(|(i, (code, name, unit))| AnalytePad {
                pad_index: i as u32 + 1,
                code: (*code).to_string(),
                name: (*name).to_string(),
                unit: (*unit).to_string(),
            })
            .collect();

        let labels = constants::PAD_SEQUENCE
            .iter()
            .map(|(code, _, _)| {
                let level_labels = constants::labels_for(code)
                    .unwrap_or_default()
                    .iter()
                    .map(|s| (*s).to_string())
                    .collect();
                ((*code).to_string(), level_labels)
            })
            .collect();

        // Built-in data upholds the invariants; validation is still cheap
        // enough to keep as a debug check.
        let catalog = Self { pads, labels };
        debug_assert!(catalog.validate().is_ok());
        catalog
    }

    /// Load and validate a catalog from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AnalysisError::calibration_io("Failed to read catalog file", e))?;
        let catalog: Self = serde_json::from_str(&content)
            .map_err(|e| AnalysisError::calibration_io("Failed to parse catalog JSON", e))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Save the catalog to a JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AnalysisError::calibration_io("Failed to serialize catalog", e))?;
        std::fs::write(path, json)
            .map_err(|e| AnalysisError::calibration_io("Failed to write catalog file", e))?;
        Ok(())
    }

    /// Check the catalog's structural invariants.
    ///
    /// Contract: analyte codes unique across pads, pad indices a contiguous
    /// range starting at 1, a label list present for every pad code.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::Configuration` naming the first violation.
    pub fn validate(&self) -> Result<()> {
        if self.pads.is_empty() {
            return Err(AnalysisError::configuration("catalog defines no pads"));
        }

        let mut seen = HashSet::new();
        for (i, pad) in self.pads.iter().enumerate() {
            let expected = i as u32 + 1;
            if pad.pad_index != expected {
                return Err(AnalysisError::configuration(format!(
                    "pad indices must be contiguous from 1: position {} has pad_index {}",
                    i + 1,
                    pad.pad_index
                )));
            }
            if !seen.insert(pad.code.as_str()) {
                return Err(AnalysisError::configuration(format!(
                    "duplicate analyte code '{}'",
                    pad.code
                )));
            }
            match self.labels.get(&pad.code) {
                Some(labels) if !labels.is_empty() => {}
                _ => {
                    return Err(AnalysisError::configuration(format!(
                        "no level labels defined for analyte '{}'",
                        pad.code
                    )));
                }
            }
        }
        Ok(())
    }

    /// Pad definitions in strip order
    pub fn pads(&self) -> &[AnalytePad] {
        &self.pads
    }

    /// Number of pads on the strip
    pub fn pad_count(&self) -> usize {
        self.pads.len()
    }

    /// Pad definition at a 1-based pad index
    pub fn pad(&self, pad_index: u32) -> Option<&AnalytePad> {
        self.pads.get(pad_index.checked_sub(1)? as usize)
    }

    /// Ordered level labels for an analyte code
    pub fn labels_for(&self, code: &str) -> Option<&[String]> {
        self.labels.get(code).map(Vec::as_slice)
    }

    /// Resolve the value label for a calibration row index.
    ///
    /// Clamping policy: once row indices outgrow the label list, the last
    /// label is reused for every excess row.
    pub fn value_label(&self, code: &str, level_index: usize) -> Option<&str> {
        let labels = self.labels.get(code)?;
        let clamped = level_index.min(labels.len().saturating_sub(1));
        labels.get(clamped).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pad(index: u32, code: &str) -> AnalytePad {
        AnalytePad {
            pad_index: index,
            code: code.to_string(),
            name: code.to_string(),
            unit: String::new(),
        }
    }

    fn labels(code: &str, values: &[&str]) -> HashMap<String, Vec<String>> {
        let mut map = HashMap::new();
        map.insert(
            code.to_string(),
            values.iter().map(|s| s.to_string()).collect(),
        );
        map
    }

    #[test]
    fn test_urine_10_is_valid() {
        let catalog = Catalog::urine_10();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.pad_count(), 10);
        assert_eq!(catalog.pad(1).unwrap().code, "GLU");
        assert_eq!(catalog.pad(10).unwrap().code, "LEU");
        assert_eq!(catalog.pad(6).unwrap().name, "pH");
    }

    #[test]
    fn test_duplicate_code_rejected() {
        let mut label_map = labels("GLU", &["-"]);
        label_map.insert("GLU".to_string(), vec!["-".to_string()]);
        let result = Catalog::new(vec![pad(1, "GLU"), pad(2, "GLU")], label_map);
        match result {
            Err(AnalysisError::Configuration { reason }) => {
                assert!(reason.contains("duplicate"))
            }
            other => panic!("Expected Configuration error, got: {:?}", other),
        }
    }

    #[test]
    fn test_non_contiguous_indices_rejected() {
        let mut label_map = labels("GLU", &["-"]);
        label_map.extend(labels("BIL", &["-"]));
        let result = Catalog::new(vec![pad(1, "GLU"), pad(3, "BIL")], label_map);
        assert!(matches!(
            result,
            Err(AnalysisError::Configuration { .. })
        ));
    }

    #[test]
    fn test_missing_labels_rejected() {
        let result = Catalog::new(vec![pad(1, "GLU")], HashMap::new());
        assert!(matches!(
            result,
            Err(AnalysisError::Configuration { .. })
        ));
    }

    #[test]
    fn test_value_label_clamps_past_last() {
        let catalog = Catalog::new(
            vec![pad(1, "NIT")],
            labels("NIT", &["-", "+"]),
        )
        .unwrap();
        assert_eq!(catalog.value_label("NIT", 0), Some("-"));
        assert_eq!(catalog.value_label("NIT", 1), Some("+"));
        assert_eq!(catalog.value_label("NIT", 2), Some("+"));
        assert_eq!(catalog.value_label("NIT", 9), Some("+"));
    }

    #[test]
    fn test_json_roundtrip() {
        let catalog = Catalog::urine_10();
        let json = serde_json::to_string(&catalog).unwrap();
        let parsed: Catalog = serde_json::from_str(&json).unwrap();
        assert!(parsed.validate().is_ok());
        assert_eq!(parsed.pad_count(), 10);
        assert_eq!(
            parsed.labels_for("GLU").unwrap().len(),
            catalog.labels_for("GLU").unwrap().len()
        );
    }
}
