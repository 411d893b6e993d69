//! Fixed-width gate sequences (oracles and reusable sub-circuits).

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{GateOp, StandardGate};
use crate::qubit::QubitId;

/// An ordered list of gate operations over a fixed number of qubits.
///
/// Every operation is range-checked when it is pushed, so a sequence can
/// never reference a qubit at or above its width. Two sequences built from
/// the same parameters compare equal. Deserialization applies the same
/// checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGateSequence")]
pub struct GateSequence {
    name: String,
    num_qubits: u32,
    ops: Vec<GateOp>,
}

/// Unchecked wire form of [`GateSequence`].
#[derive(Deserialize)]
struct RawGateSequence {
    name: String,
    num_qubits: u32,
    ops: Vec<GateOp>,
}

impl TryFrom<RawGateSequence> for GateSequence {
    type Error = IrError;

    fn try_from(raw: RawGateSequence) -> IrResult<Self> {
        for op in &raw.ops {
            op.validate(raw.num_qubits)?;
        }
        Ok(Self {
            name: raw.name,
            num_qubits: raw.num_qubits,
            ops: raw.ops,
        })
    }
}

impl GateSequence {
    /// Create an empty sequence over `num_qubits` qubits.
    pub fn new(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            ops: vec![],
        }
    }

    /// Append an operation after checking it against the sequence width.
    pub fn push(&mut self, op: GateOp) -> IrResult<&mut Self> {
        op.validate(self.num_qubits)?;
        self.ops.push(op);
        Ok(self)
    }

    /// Append every operation of `other`, which must fit this width.
    ///
    /// Nothing is appended if any operation is out of range.
    pub fn extend_from(&mut self, other: &GateSequence) -> IrResult<&mut Self> {
        for op in other.ops() {
            op.validate(self.num_qubits)?;
        }
        self.ops.extend(other.ops().iter().cloned());
        Ok(self)
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(GateOp::single(StandardGate::H, qubit))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(GateOp::single(StandardGate::X, qubit))
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(GateOp::single(StandardGate::Z, qubit))
    }

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(GateOp::controlled_by(StandardGate::X, control, target))
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(GateOp::controlled_by(StandardGate::Z, control, target))
    }

    /// Apply X to `target` conditioned on all `controls`.
    pub fn mcx(
        &mut self,
        controls: impl IntoIterator<Item = QubitId>,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.push(GateOp::controlled(StandardGate::X, controls, target))
    }

    /// Apply Z to `target` conditioned on all `controls`.
    pub fn mcz(
        &mut self,
        controls: impl IntoIterator<Item = QubitId>,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.push(GateOp::controlled(StandardGate::Z, controls, target))
    }

    /// Get the sequence name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits the sequence spans.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Get the operations in order.
    pub fn ops(&self) -> &[GateOp] {
        &self.ops
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// True when the sequence has no operations (identity).
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Iterate over the operations.
    pub fn iter(&self) -> std::slice::Iter<'_, GateOp> {
        self.ops.iter()
    }
}

impl<'a> IntoIterator for &'a GateSequence {
    type Item = &'a GateOp;
    type IntoIter = std::slice::Iter<'a, GateOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sequence() {
        let seq = GateSequence::new("oracle", 3);
        assert_eq!(seq.name(), "oracle");
        assert_eq!(seq.num_qubits(), 3);
        assert!(seq.is_empty());
    }

    #[test]
    fn test_fluent_api() {
        let mut seq = GateSequence::new("test", 3);
        seq.x(QubitId(0))
            .unwrap()
            .cz(QubitId(0), QubitId(1))
            .unwrap()
            .mcx([QubitId(0), QubitId(1)], QubitId(2))
            .unwrap();

        let names: Vec<_> = seq.iter().map(GateOp::name).collect();
        assert_eq!(names, vec!["x", "cz", "mcx"]);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut seq = GateSequence::new("test", 2);
        let err = seq.cx(QubitId(0), QubitId(2)).unwrap_err();
        assert!(matches!(err, IrError::QubitNotFound { .. }));
        assert!(seq.is_empty());
    }

    #[test]
    fn test_extend_from() {
        let mut inner = GateSequence::new("inner", 2);
        inner.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();

        let mut outer = GateSequence::new("outer", 3);
        outer.extend_from(&inner).unwrap();
        assert_eq!(outer.ops(), inner.ops());

        let mut narrow = GateSequence::new("narrow", 1);
        assert!(narrow.extend_from(&inner).is_err());
        assert!(narrow.is_empty());
    }

    #[test]
    fn test_structural_equality() {
        let build = || {
            let mut seq = GateSequence::new("s", 2);
            seq.cx(QubitId(0), QubitId(1)).unwrap();
            seq
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_deserialize_validates_ops() {
        let mut seq = GateSequence::new("s", 2);
        seq.cx(QubitId(0), QubitId(1)).unwrap();
        let json = serde_json::to_string(&seq).unwrap();

        let back: GateSequence = serde_json::from_str(&json).unwrap();
        assert_eq!(back, seq);

        let narrowed = json.replace("\"num_qubits\":2", "\"num_qubits\":1");
        assert!(serde_json::from_str::<GateSequence>(&narrowed).is_err());

        let duplicated = json.replace("\"control\":0", "\"control\":1");
        assert!(serde_json::from_str::<GateSequence>(&duplicated).is_err());
    }
}
