//! Error types for the stripscan library

use thiserror::Error;

/// Result type alias for stripscan operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Error types for calibration-table construction and strip classification
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Calibration catalog violates a structural invariant
    #[error("Invalid catalog configuration: {reason}")]
    Configuration { reason: String },

    /// No calibration rows could be located for an analyte during build
    #[error("No calibration source found for analyte '{analyte_code}'")]
    MissingCalibrationSource { analyte_code: String },

    /// A calibration row could not be parsed into a color triplet
    #[error("Malformed calibration row {row_index} for analyte '{analyte_code}': {reason}")]
    MalformedCalibrationRow {
        analyte_code: String,
        row_index: usize,
        reason: String,
    },

    /// A supplied image region contains no pixels
    #[error("Image region contains no pixels")]
    EmptyRegion,

    /// The reference table holds no entries for the requested pad
    #[error("No reference data for pad {pad_index}")]
    NoReferenceData { pad_index: u32 },

    /// Supplied region count does not match the catalog pad count
    #[error("Expected {expected} image regions, got {supplied}")]
    RegionCountMismatch { expected: usize, supplied: usize },

    /// Reference table storage failed
    #[error("Reference table storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Calibration source could not be read
    #[error("Failed to read calibration source: {message}")]
    CalibrationIo {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Image file could not be loaded or decoded
    #[error("Failed to load image: {message}")]
    ImageLoad {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl AnalysisError {
    /// Create a configuration error
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Create a calibration I/O error with context
    pub fn calibration_io<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::CalibrationIo {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an image load error with context
    pub fn image_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoad {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Check if this error degrades a single pad/row rather than the whole run.
    ///
    /// Recoverable errors are surfaced as warnings by the builder and the
    /// orchestrator; only the remaining variants abort an operation.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AnalysisError::MissingCalibrationSource { .. }
                | AnalysisError::MalformedCalibrationRow { .. }
                | AnalysisError::EmptyRegion
                | AnalysisError::NoReferenceData { .. }
                | AnalysisError::RegionCountMismatch { .. }
        )
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::Configuration { .. } => {
                "The pad catalog is misconfigured. Check for duplicate analyte codes or gaps in the pad sequence.".to_string()
            }
            AnalysisError::MissingCalibrationSource { analyte_code } => {
                format!(
                    "No calibration file matched analyte '{}'. The corresponding pad will not be classified.",
                    analyte_code
                )
            }
            AnalysisError::EmptyRegion => {
                "An image patch is empty. Check the segmentation output.".to_string()
            }
            AnalysisError::NoReferenceData { pad_index } => {
                format!(
                    "Pad {} has no calibrated reference colors and was skipped.",
                    pad_index
                )
            }
            AnalysisError::RegionCountMismatch { expected, supplied } => {
                format!(
                    "Expected {} patch images but found {}. Only matching pads were analyzed.",
                    expected, supplied
                )
            }
            AnalysisError::ImageLoad { .. } => {
                "Could not load a patch image. Please check the file format and try again.".to_string()
            }
            _ => "Strip analysis failed. See the error details for more information.".to_string(),
        }
    }
}
