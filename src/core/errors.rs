//! Error types for the table clustering pipeline.
//!
//! Clustering itself is total over well-formed input, so most variants come
//! from the surrounding stages: geometry validation, configuration loading and
//! page preparation.

use crate::domain::Cell;
use thiserror::Error;

/// Enum representing the stages of the pipeline an error can come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    /// Error occurred while correcting page rotation.
    RotationCorrection,
    /// Error occurred in the external cell detector.
    CellDetection,
    /// Generic processing error.
    Generic,
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingStage::RotationCorrection => write!(f, "rotation correction"),
            ProcessingStage::CellDetection => write!(f, "cell detection"),
            ProcessingStage::Generic => write!(f, "processing"),
        }
    }
}

/// Enum representing the errors that can occur in the table pipeline.
#[derive(Error, Debug)]
pub enum TableError {
    /// A cell violates the geometric preconditions of the clustering engine.
    #[error("invalid geometry for cell {index} {cell}: {reason}")]
    InvalidGeometry {
        /// Position of the offending cell in the input sequence.
        index: usize,
        /// The offending cell.
        cell: Cell,
        /// Which precondition was violated.
        reason: String,
    },

    /// Error indicating invalid input.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// Error indicating a configuration problem.
    #[error("configuration: {message}")]
    ConfigError {
        /// A message describing the configuration error.
        message: String,
    },

    /// Error occurred while loading an image.
    #[error("image load")]
    ImageLoad(#[source] image::ImageError),

    /// Error occurred during processing.
    #[error("{kind} failed: {context}")]
    Processing {
        /// The stage of processing where the error occurred.
        kind: ProcessingStage,
        /// Additional context about the error.
        context: String,
        /// The underlying error that caused this error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("serialization")]
    Serialization(#[from] serde_json::Error),
}

/// Convenient result alias for table pipeline operations.
pub type TableResult<T> = Result<T, TableError>;

impl TableError {
    /// Creates a TableError for a cell that fails geometry validation.
    pub fn invalid_geometry(index: usize, cell: Cell, reason: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            index,
            cell,
            reason: reason.into(),
        }
    }

    /// Creates a TableError for invalid input.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a TableError for configuration errors.
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Creates a TableError for a failed processing stage.
    ///
    /// # Arguments
    ///
    /// * `kind` - The stage of processing where the error occurred.
    /// * `context` - Additional context about the error.
    /// * `error` - The underlying error that caused this error.
    pub fn processing_error(
        kind: ProcessingStage,
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Processing {
            kind,
            context: context.to_string(),
            source: Box::new(error),
        }
    }

    /// Creates a TableError for failures inside the external cell detector.
    pub fn cell_detection(
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::processing_error(ProcessingStage::CellDetection, context, error)
    }

    /// Creates a TableError for failures inside a rotation corrector.
    pub fn rotation_correction(
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::processing_error(ProcessingStage::RotationCorrection, context, error)
    }
}

impl From<image::ImageError> for TableError {
    fn from(error: image::ImageError) -> Self {
        Self::ImageLoad(error)
    }
}

impl From<crate::core::config::ConfigError> for TableError {
    fn from(error: crate::core::config::ConfigError) -> Self {
        Self::config_error(error.to_string())
    }
}
