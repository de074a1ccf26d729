use std::fmt;

/// Error types for dense matrix operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixError {
    InvalidShape,
    ShapeMismatch,
    IndexOutOfRange,
    DimensionMismatch,
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixError::InvalidShape => {
                write!(f, "Invalid shape: rows must all have equal length")
            }
            MatrixError::ShapeMismatch => {
                write!(f, "Shape mismatch between operands")
            }
            MatrixError::IndexOutOfRange => write!(f, "Index out of range"),
            MatrixError::DimensionMismatch => {
                write!(f, "Dimension mismatch: inner dimensions must agree")
            }
        }
    }
}

impl std::error::Error for MatrixError {}

/// Error types for optimizers
#[derive(Debug, Clone, PartialEq)]
pub enum MinimizerError {
    InvalidDimension,
    GradientEvaluationError,
    LinearAlgebraError(String),
}

impl fmt::Display for MinimizerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MinimizerError::InvalidDimension => write!(f, "Invalid dimension or empty vector"),
            MinimizerError::GradientEvaluationError => {
                write!(f, "Gradient length disagrees with the parameter vector")
            }
            MinimizerError::LinearAlgebraError(msg) => write!(f, "Linear algebra error: {}", msg),
        }
    }
}

impl std::error::Error for MinimizerError {}

impl From<MatrixError> for MinimizerError {
    fn from(err: MatrixError) -> Self {
        MinimizerError::LinearAlgebraError(err.to_string())
    }
}
