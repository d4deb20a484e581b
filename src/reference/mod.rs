//! Reference table construction and lookup
//!
//! The reference table is the classification ground truth: the full set of
//! calibrated (pad, level) to color associations, built once and passed by
//! reference to the classifier.

pub mod builder;
pub mod table;

pub use builder::{build, BuildOutcome, BuildWarning};
pub use table::{ReferenceEntry, ReferenceTable};
