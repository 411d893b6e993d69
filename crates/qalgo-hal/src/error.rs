//! Error types for the HAL crate.

use thiserror::Error;

/// Errors reported by an execution backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// Backend is not available.
    #[error("Backend not available: {0}")]
    BackendUnavailable(String),

    /// The backend rejected the circuit.
    #[error("Invalid circuit: {0}")]
    InvalidCircuit(String),

    /// Invalid number of shots.
    #[error("Invalid shots: {0}")]
    InvalidShots(String),

    /// Execution started but did not complete.
    #[error("Job failed: {0}")]
    JobFailed(String),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
