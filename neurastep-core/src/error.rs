use thiserror::Error;

/// Custom error type for the NeuraStep engine.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum NeuraStepError {
    #[error("Dimension mismatch during {operation}: expected {expected}, got {actual}")]
    DimensionMismatch {
        operation: String,
        expected: usize,
        actual: usize,
    },

    #[error("Shape mismatch during {operation}: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        operation: String,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Sequence misuse: {0}")]
    SequenceMisuse(String),

    #[error("Index out of bounds: index {index} for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

impl NeuraStepError {
    /// Helper for the most common length check failure.
    pub fn dimension(operation: &str, expected: usize, actual: usize) -> Self {
        NeuraStepError::DimensionMismatch {
            operation: operation.to_string(),
            expected,
            actual,
        }
    }

    /// True for both vector-length and matrix-shape disagreements.
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(
            self,
            NeuraStepError::DimensionMismatch { .. } | NeuraStepError::ShapeMismatch { .. }
        )
    }
}

impl From<serde_json::Error> for NeuraStepError {
    fn from(err: serde_json::Error) -> Self {
        NeuraStepError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for NeuraStepError {
    fn from(err: std::io::Error) -> Self {
        NeuraStepError::IoError(err.to_string())
    }
}
