//! Reference data for the standard 10-pad urine reagent strip
//!
//! This module contains compile-time constants describing the pad layout
//! and calibrated level labels of the common 10-parameter urinalysis strip.
//! Values follow the manufacturer reference chart shipped with the strips.

/// One pad position: (analyte code, display name, unit).
///
/// The unit string is empty where the chart reports a dimensionless scale
/// (specific gravity, pH, nitrite).
pub type PadSpec = (&'static str, &'static str, &'static str);

/// Standard pad order, index 1 at the end nearest the handle.
pub const PAD_SEQUENCE: [PadSpec; 10] = [
    ("GLU", "Glucose", "mg/dL (mmol/L)"),
    ("BIL", "Bilirubin", "mg/dL (µmol/L)"),
    ("KET", "Ketone", "mg/dL (mmol/L)"),
    ("SG", "Specific Gravity", ""),
    ("BLO", "Blood", "Ery/µL"),
    ("PH", "pH", ""),
    ("PRO", "Protein", "mg/dL (g/L)"),
    ("URO", "Urobilinogen", "mg/dL (µmol/L)"),
    ("NIT", "Nitrite", ""),
    ("LEU", "Leukocyte", "Leu/µL"),
];

/// Level labels per analyte, ordered from lowest to highest concentration.
///
/// Labels mirror the reference chart: "-" for negative, then the chart's
/// concentration text (conventional units with SI in parentheses where the
/// chart prints both).
pub mod labels {
    pub const GLU: &[&str] = &["-", "100(5)", "250(15)", "500(30)", "1000(60)", "≥2000(110)"];
    pub const BIL: &[&str] = &["-", "1(17)", "2(35)", "4(70)"];
    pub const KET: &[&str] = &["-", "5(0.5)", "15(1.5)", "40(4.0)", "80(8.0)", "160(16)"];
    pub const SG: &[&str] = &["1.000", "1.005", "1.010", "1.015", "1.020", "1.025", "1.030"];
    pub const BLO: &[&str] = &["-", "±", "+", "++", "+++", "5–10", "50 Ery/µL"];
    pub const PH: &[&str] = &["5.0", "6.0", "6.5", "7.0", "7.5", "8.0", "9.0"];
    pub const PRO: &[&str] = &["-", "15(0.15)", "30(0.3)", "100(1.0)", "300(3.0)", "2000(20)"];
    pub const URO: &[&str] = &["0.2(3.5)", "1(17)", "2(35)", "4(70)", "8(140)", "12(200)"];
    pub const NIT: &[&str] = &["-", "+"];
    pub const LEU: &[&str] = &["-", "15 ±", "70 +", "125 ++", "500 +++"];
}

/// Label list for an analyte code, if it is part of the standard strip.
pub fn labels_for(code: &str) -> Option<&'static [&'static str]> {
    match code {
        "GLU" => Some(labels::GLU),
        "BIL" => Some(labels::BIL),
        "KET" => Some(labels::KET),
        "SG" => Some(labels::SG),
        "BLO" => Some(labels::BLO),
        "PH" => Some(labels::PH),
        "PRO" => Some(labels::PRO),
        "URO" => Some(labels::URO),
        "NIT" => Some(labels::NIT),
        "LEU" => Some(labels::LEU),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_sequence_codes_unique() {
        for (i, (code, _, _)) in PAD_SEQUENCE.iter().enumerate() {
            for (other, _, _) in &PAD_SEQUENCE[i + 1..] {
                assert_ne!(code, other);
            }
        }
    }

    #[test]
    fn test_every_pad_has_labels() {
        for (code, _, _) in PAD_SEQUENCE {
            let labels = labels_for(code).expect("missing label table");
            assert!(!labels.is_empty());
        }
    }

    #[test]
    fn test_unknown_code_has_no_labels() {
        assert!(labels_for("XYZ").is_none());
    }
}
