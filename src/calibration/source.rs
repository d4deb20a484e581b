//! Calibration row ingestion
//!
//! Calibration data arrives as per-analyte CSV files of channel means, one
//! row per level, level index implicit in row order:
//!
//! ```csv
//! R_mean,G_mean,B_mean
//! 200.0,200.0,200.0
//! 150.0,100.0,50.0
//! ```
//!
//! Parsing is lenient per row: a malformed row is recorded and skipped and
//! ingestion continues, so one bad measurement does not lose an analyte.

use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::color::Rgb;
use crate::error::{AnalysisError, Result};

/// One parsed calibration CSV record
#[derive(Debug, Deserialize)]
struct CalibrationRecord {
    #[serde(rename = "R_mean")]
    r_mean: f64,
    #[serde(rename = "G_mean")]
    g_mean: f64,
    #[serde(rename = "B_mean")]
    b_mean: f64,
}

/// A calibration row that failed to parse
#[derive(Debug, Clone)]
pub struct MalformedRow {
    /// 0-based row position in the source, counting parsed and failed rows
    pub row_index: usize,
    /// Parser diagnostic
    pub reason: String,
}

/// Ordered calibration rows for one analyte, plus per-row parse failures.
///
/// `rows[i]` corresponds to level index `i` after malformed rows are
/// dropped, matching the source order of the surviving rows.
#[derive(Debug, Clone, Default)]
pub struct CalibrationRows {
    pub colors: Vec<Rgb>,
    pub malformed: Vec<MalformedRow>,
}

/// Source of calibration measurements, keyed by analyte code
pub trait CalibrationSource {
    /// Ordered calibration rows for an analyte code.
    ///
    /// Returns `Ok(None)` when the source has no data for this analyte;
    /// the builder records a warning and skips the pad.
    fn rows_for(&self, analyte_code: &str) -> Result<Option<CalibrationRows>>;
}

/// In-memory calibration source for tests and programmatic use
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    rows: HashMap<String, Vec<Rgb>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register ordered calibration colors for an analyte
    pub fn insert(&mut self, analyte_code: impl Into<String>, colors: Vec<Rgb>) {
        self.rows.insert(analyte_code.into(), colors);
    }
}

impl CalibrationSource for MemorySource {
    fn rows_for(&self, analyte_code: &str) -> Result<Option<CalibrationRows>> {
        Ok(self.rows.get(analyte_code).map(|colors| CalibrationRows {
            colors: colors.clone(),
            malformed: Vec::new(),
        }))
    }
}

/// Calibration source backed by a directory of per-analyte CSV files.
///
/// Files are matched to analyte codes by case-insensitive substring of the
/// file name, e.g. `glu_means.csv` serves analyte "GLU". When several files
/// match one code, the lexicographically first wins.
#[derive(Debug, Clone)]
pub struct CsvDirectorySource {
    files: HashMap<String, PathBuf>,
}

impl CsvDirectorySource {
    /// Scan a directory and index its CSV files by the analyte codes they name.
    ///
    /// # Arguments
    ///
    /// * `dir` - Directory holding calibration CSV files
    /// * `analyte_codes` - Codes to look for in file names
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::CalibrationIo` if the directory cannot be read.
    pub fn scan<S: AsRef<str>>(dir: &Path, analyte_codes: &[S]) -> Result<Self> {
        let entries = std::fs::read_dir(dir).map_err(|e| {
            AnalysisError::calibration_io(
                format!("Failed to read calibration directory: {}", dir.display()),
                e,
            )
        })?;

        let mut names: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                AnalysisError::calibration_io("Failed to list calibration directory", e)
            })?;
            let path = entry.path();
            let is_csv = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("csv"))
                .unwrap_or(false);
            if is_csv {
                names.push(path);
            }
        }
        names.sort();

        let mut files = HashMap::new();
        for path in names {
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let upper = file_name.to_uppercase();
            for code in analyte_codes {
                let code = code.as_ref();
                if upper.contains(&code.to_uppercase()) {
                    files
                        .entry(code.to_string())
                        .or_insert_with(|| path.clone());
                }
            }
        }

        Ok(Self { files })
    }

    /// The CSV file matched to an analyte code, if any
    pub fn file_for(&self, analyte_code: &str) -> Option<&Path> {
        self.files.get(analyte_code).map(PathBuf::as_path)
    }
}

impl CalibrationSource for CsvDirectorySource {
    fn rows_for(&self, analyte_code: &str) -> Result<Option<CalibrationRows>> {
        let Some(path) = self.files.get(analyte_code) else {
            return Ok(None);
        };

        let reader = csv::Reader::from_path(path).map_err(|e| {
            AnalysisError::calibration_io(
                format!("Failed to open calibration file: {}", path.display()),
                e,
            )
        })?;

        Ok(Some(parse_rows(reader)))
    }
}

/// Parse calibration records from an open CSV reader, row by row.
///
/// Rows that fail to deserialize (missing or non-numeric channel values)
/// are collected as [`MalformedRow`]s; parsing continues with the next row.
fn parse_rows<R: Read>(mut reader: csv::Reader<R>) -> CalibrationRows {
    let mut rows = CalibrationRows::default();

    for (row_index, record) in reader.deserialize::<CalibrationRecord>().enumerate() {
        match record {
            Ok(record) => {
                rows.colors
                    .push(Rgb::new(record.r_mean, record.g_mean, record.b_mean));
            }
            Err(e) => {
                rows.malformed.push(MalformedRow {
                    row_index,
                    reason: e.to_string(),
                });
            }
        }
    }

    rows
}
