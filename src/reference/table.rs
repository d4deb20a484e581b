//! Immutable reference table of calibrated colors

use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// One calibrated color sample.
///
/// Uniquely keyed by (pad_index, level_index); never mutated after the
/// build that created it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    /// 1-based pad position
    pub pad_index: u32,

    /// Analyte code of the pad at build time
    pub analyte_code: String,

    /// 0-based row position within the pad's calibration data
    pub level_index: usize,

    /// Display label resolved via the catalog's label list (clamped)
    pub value_label: String,

    /// Calibrated mean color for this level
    pub color: Rgb,
}

/// The full set of reference entries for one strip, read-only once built.
///
/// Entries are held sorted by (pad_index, level_index) so that per-pad
/// slices are always in ascending level order. The classifier's lowest-level
/// tie-break relies on this ordering, so it is established here structurally
/// rather than left to insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceTable {
    entries: Vec<ReferenceEntry>,
}

impl ReferenceTable {
    /// Build a table from entries, establishing the canonical order
    pub fn new(mut entries: Vec<ReferenceEntry>) -> Self {
        entries.sort_by_key(|e| (e.pad_index, e.level_index));
        Self { entries }
    }

    /// All entries, ordered by (pad_index, level_index)
    pub fn entries(&self) -> &[ReferenceEntry] {
        &self.entries
    }

    /// Entries for one pad, in ascending level order.
    ///
    /// Empty when the pad has no calibration data.
    pub fn entries_for_pad(&self, pad_index: u32) -> &[ReferenceEntry] {
        let start = self.entries.partition_point(|e| e.pad_index < pad_index);
        let end = self.entries.partition_point(|e| e.pad_index <= pad_index);
        &self.entries[start..end]
    }

    /// Total number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no entries at all
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
