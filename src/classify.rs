//! Nearest-reference-color classification
//!
//! Resolves an extracted pad color to the calibrated level whose reference
//! color is nearest by Euclidean distance in the shared sRGB space.
//!
//! Tie-break: when several entries are exactly equidistant, the lowest
//! level index wins. The scan below keeps the first strict minimum over the
//! pad's entries, and [`ReferenceTable`](crate::ReferenceTable) guarantees
//! those entries arrive in ascending level order, so the tie-break is
//! deterministic rather than an accident of iteration order.
//!
//! Algorithm tag: `algo-nearest-reference-match`

use crate::catalog::Catalog;
use crate::color::Rgb;
use crate::error::{AnalysisError, Result};
use crate::reference::ReferenceTable;
use crate::report::ClassificationResult;

/// Classify one pad's extracted color against the reference table.
///
/// Pure function over its inputs and the table snapshot; no side effects.
///
/// # Arguments
///
/// * `pad_index` - 1-based pad position
/// * `color` - Extracted representative color of the pad's patch
/// * `catalog` - Pad definitions supplying analyte name and unit
/// * `table` - Reference table built before this run
///
/// # Errors
///
/// Returns `AnalysisError::NoReferenceData` if the table holds no entries
/// for this pad; callers treat this as a skip signal, not a failure.
pub fn classify(
    pad_index: u32,
    color: Rgb,
    catalog: &Catalog,
    table: &ReferenceTable,
) -> Result<ClassificationResult> {
    let entries = table.entries_for_pad(pad_index);
    if entries.is_empty() {
        return Err(AnalysisError::NoReferenceData { pad_index });
    }

    let mut best = &entries[0];
    let mut best_distance = color.distance(&best.color);
    for entry in &entries[1..] {
        let distance = color.distance(&entry.color);
        // Strict comparison keeps the earliest (lowest-level) entry on ties
        if distance < best_distance {
            best = entry;
            best_distance = distance;
        }
    }

    let (analyte_name, unit) = match catalog.pad(pad_index) {
        Some(pad) => (pad.name.clone(), pad.unit.clone()),
        None => (best.analyte_code.clone(), String::new()),
    };

    Ok(ClassificationResult {
        pad_index,
        analyte_code: best.analyte_code.clone(),
        analyte_name,
        level_index: best.level_index,
        value_label: best.value_label.clone(),
        unit,
        distance: best_distance,
        extracted_color: color,
    })
}
