//! Error types for the IR crate.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Errors that can occur while building gate sequences and circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit index is outside the sequence or circuit width.
    #[error("Qubit {qubit} not found in a {width}-qubit register{}", format_gate_context(.gate_name))]
    QubitNotFound {
        /// The qubit that was not found.
        qubit: QubitId,
        /// Width of the register that was addressed.
        width: u32,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Classical bit index is outside the circuit.
    #[error("Classical bit {clbit} not found in a {width}-bit register")]
    ClbitNotFound {
        /// The classical bit that was not found.
        clbit: ClbitId,
        /// Number of classical bits in the circuit.
        width: u32,
    },

    /// The same qubit appears twice in one operation.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// A gate sequence does not fit the circuit it is appended to.
    #[error("Sequence '{name}' spans {expected} qubits, circuit has {got}")]
    QubitCountMismatch {
        /// Name of the sequence.
        name: String,
        /// Qubits required by the sequence.
        expected: u32,
        /// Qubits available in the circuit.
        got: u32,
    },

    /// A classical bit is the target of more than one measurement.
    #[error("Classical bit {0} is already written by an earlier measurement")]
    ClbitReused(ClbitId),

    /// JSON encoding or decoding failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
