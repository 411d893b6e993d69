//! Gate kinds and the operations that place them on qubits.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::qubit::QubitId;

/// Single-qubit gate kinds with known semantics.
///
/// A kind on its own acts on one qubit; [`GateOp`] adds controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardGate {
    /// Identity gate.
    I,
    /// Pauli-X (NOT) gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z (phase flip) gate.
    Z,
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// T gate (fourth root of Z).
    T,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::T => "t",
        }
    }
}

/// A gate placed on concrete qubits.
///
/// Operations are immutable values; builders create them and sequences own
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateOp {
    /// Uncontrolled gate on one qubit.
    Single {
        /// Gate kind.
        gate: StandardGate,
        /// Qubit the gate acts on.
        target: QubitId,
    },
    /// Gate on `target` conditioned on one control qubit.
    Controlled {
        /// Gate kind applied to the target.
        gate: StandardGate,
        /// Control qubit.
        control: QubitId,
        /// Target qubit.
        target: QubitId,
    },
    /// Gate on `target` conditioned on every qubit in `controls`.
    MultiControlled {
        /// Gate kind applied to the target.
        gate: StandardGate,
        /// Control qubits, in the order they were given.
        controls: Vec<QubitId>,
        /// Target qubit.
        target: QubitId,
    },
}

impl GateOp {
    /// Create an uncontrolled gate.
    pub fn single(gate: StandardGate, target: QubitId) -> Self {
        GateOp::Single { gate, target }
    }

    /// Create a singly-controlled gate.
    pub fn controlled_by(gate: StandardGate, control: QubitId, target: QubitId) -> Self {
        GateOp::Controlled {
            gate,
            control,
            target,
        }
    }

    /// Create a gate with any number of controls, using the smallest variant
    /// that fits: no controls gives [`GateOp::Single`], one gives
    /// [`GateOp::Controlled`], more gives [`GateOp::MultiControlled`].
    pub fn controlled(
        gate: StandardGate,
        controls: impl IntoIterator<Item = QubitId>,
        target: QubitId,
    ) -> Self {
        let mut controls: Vec<_> = controls.into_iter().collect();
        match controls.len() {
            0 => GateOp::single(gate, target),
            1 => GateOp::controlled_by(gate, controls.remove(0), target),
            _ => GateOp::MultiControlled {
                gate,
                controls,
                target,
            },
        }
    }

    /// The gate kind applied to the target.
    pub fn gate(&self) -> StandardGate {
        match self {
            GateOp::Single { gate, .. }
            | GateOp::Controlled { gate, .. }
            | GateOp::MultiControlled { gate, .. } => *gate,
        }
    }

    /// The target qubit.
    pub fn target(&self) -> QubitId {
        match self {
            GateOp::Single { target, .. }
            | GateOp::Controlled { target, .. }
            | GateOp::MultiControlled { target, .. } => *target,
        }
    }

    /// Control qubits (empty for an uncontrolled gate).
    pub fn controls(&self) -> &[QubitId] {
        match self {
            GateOp::Single { .. } => &[],
            GateOp::Controlled { control, .. } => std::slice::from_ref(control),
            GateOp::MultiControlled { controls, .. } => controls,
        }
    }

    /// Every qubit the operation touches, controls first and target last.
    pub fn qubits(&self) -> Vec<QubitId> {
        let mut qubits = self.controls().to_vec();
        qubits.push(self.target());
        qubits
    }

    /// Mnemonic name: `x`, `cx`, `mcx`, `cz`, ...
    pub fn name(&self) -> String {
        match self {
            GateOp::Single { gate, .. } => gate.name().to_string(),
            GateOp::Controlled { gate, .. } => format!("c{}", gate.name()),
            GateOp::MultiControlled { gate, .. } => format!("mc{}", gate.name()),
        }
    }

    /// Check the operation against a register of `width` qubits.
    ///
    /// Every referenced qubit must be below `width` and no qubit may appear
    /// twice.
    pub fn validate(&self, width: u32) -> IrResult<()> {
        let mut seen = FxHashSet::default();
        for qubit in self.qubits() {
            if qubit.0 >= width {
                return Err(IrError::QubitNotFound {
                    qubit,
                    width,
                    gate_name: Some(self.name()),
                });
            }
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: Some(self.name()),
                });
            }
        }
        Ok(())
    }
}
