//! Backend trait.
//!
//! The [`Backend`] trait is the only way circuits leave this workspace:
//!
//! ```text
//!   availability() ──→ validate() ──→ run()
//!      (async)           (async)      (async)
//! ```
//!
//! [`Backend::execute`] chains the three and maps a negative answer at each
//! step onto the matching [`HalError`]. It never retries.

use async_trait::async_trait;
use tracing::debug;

use qalgo_ir::Circuit;

use crate::error::{HalError, HalResult};
use crate::result::ExecutionResult;

/// Trait for circuit executors.
///
/// # Contract
///
/// - `run()` MUST return counts whose total equals `shots`.
/// - Count keys MUST follow the big-endian convention documented at the
///   crate root, one character per classical bit.
/// - `run()` MUST reject `shots == 0` with [`HalError::InvalidShots`].
#[async_trait]
pub trait Backend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Check whether the backend is accepting work.
    async fn availability(&self) -> HalResult<BackendAvailability>;

    /// Validate a circuit against backend constraints.
    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult>;

    /// Run a circuit for `shots` repetitions.
    async fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult>;

    /// Check availability, validate, then run.
    ///
    /// An unavailable backend yields [`HalError::BackendUnavailable`] and an
    /// invalid circuit yields [`HalError::InvalidCircuit`]. Errors from
    /// `run()` are returned as-is.
    async fn execute(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        let availability = self.availability().await?;
        if !availability.is_available {
            return Err(HalError::BackendUnavailable(
                availability
                    .status_message
                    .unwrap_or_else(|| self.name().to_string()),
            ));
        }

        if let ValidationResult::Invalid { reasons } = self.validate(circuit).await? {
            return Err(HalError::InvalidCircuit(reasons.join("; ")));
        }

        debug!(
            backend = self.name(),
            circuit = circuit.name(),
            shots,
            "Running circuit"
        );
        self.run(circuit, shots).await
    }
}

/// Backend availability information.
#[derive(Debug, Clone)]
pub struct BackendAvailability {
    /// Whether the backend is currently accepting jobs.
    pub is_available: bool,
    /// Human-readable status message.
    pub status_message: Option<String>,
}

impl BackendAvailability {
    /// Availability for a backend that is always ready, such as a local
    /// simulator.
    pub fn always_available() -> Self {
        Self {
            is_available: true,
            status_message: None,
        }
    }

    /// Create availability for an offline backend.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            is_available: false,
            status_message: Some(reason.into()),
        }
    }
}

/// Result of circuit validation against backend constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Circuit can be run as-is.
    Valid,
    /// Circuit cannot run on this backend.
    Invalid {
        /// Reasons the circuit is invalid.
        reasons: Vec<String>,
    },
}

impl ValidationResult {
    /// Check if the circuit is valid.
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }
}
