//! Calibration measurement sources
//!
//! A calibration source exposes, per analyte, the ordered sequence of
//! calibrated color rows used to build the reference table.

pub mod source;

pub use source::{
    CalibrationRows, CalibrationSource, CsvDirectorySource, MalformedRow, MemorySource,
};
