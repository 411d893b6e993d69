//! Error types for the algorithms crate.

use qalgo_hal::HalError;
use qalgo_ir::IrError;
use thiserror::Error;

/// Errors raised while building, running or interpreting an algorithm.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AlgoError {
    /// Malformed bit-string, out-of-range qubit count or unsupported size.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Measurement data that cannot be interpreted (empty or zero shots).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Circuit construction failed.
    #[error(transparent)]
    Ir(#[from] IrError),

    /// The execution backend failed; passed through unchanged.
    #[error(transparent)]
    Backend(#[from] HalError),

    /// Run configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for algorithm operations.
pub type AlgoResult<T> = Result<T, AlgoError>;
