//! Circuit descriptions handed to an execution backend.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::GateOp;
use crate::qubit::{ClbitId, QubitId};
use crate::sequence::GateSequence;

/// Measure one qubit into one classical bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Measurement {
    /// Qubit being measured.
    pub qubit: QubitId,
    /// Classical bit receiving the outcome.
    pub clbit: ClbitId,
}

impl Measurement {
    /// Create a measurement.
    pub fn new(qubit: QubitId, clbit: ClbitId) -> Self {
        Self { qubit, clbit }
    }
}

/// A named quantum circuit: gate operations followed by measurements.
///
/// All measurements happen after the last gate. Circuits that measure
/// mid-way and then apply classically controlled corrections are expressed
/// in their deferred-measurement form (the correction becomes a quantum
/// controlled gate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCircuit")]
pub struct Circuit {
    name: String,
    num_clbits: u32,
    body: GateSequence,
    measurements: Vec<Measurement>,
}

/// Unchecked wire form of [`Circuit`].
#[derive(Deserialize)]
struct RawCircuit {
    name: String,
    num_clbits: u32,
    body: GateSequence,
    measurements: Vec<Measurement>,
}

impl TryFrom<RawCircuit> for Circuit {
    type Error = IrError;

    fn try_from(raw: RawCircuit) -> IrResult<Self> {
        let circuit = Self {
            name: raw.name,
            num_clbits: raw.num_clbits,
            body: raw.body,
            measurements: raw.measurements,
        };
        circuit.validate()?;
        Ok(circuit)
    }
}

impl Circuit {
    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let name = name.into();
        Self {
            body: GateSequence::new(name.clone(), num_qubits),
            name,
            num_clbits,
            measurements: vec![],
        }
    }

    // =========================================================================
    // Gates
    // =========================================================================

    /// Append a single operation.
    pub fn push(&mut self, op: GateOp) -> IrResult<&mut Self> {
        self.body.push(op)?;
        Ok(self)
    }

    /// Append a gate sequence, mapping its qubit `i` onto circuit qubit `i`.
    pub fn append(&mut self, sequence: &GateSequence) -> IrResult<&mut Self> {
        if sequence.num_qubits() > self.num_qubits() {
            return Err(IrError::QubitCountMismatch {
                name: sequence.name().to_string(),
                expected: sequence.num_qubits(),
                got: self.num_qubits(),
            });
        }
        self.body.extend_from(sequence)?;
        Ok(self)
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.body.h(qubit)?;
        Ok(self)
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.body.x(qubit)?;
        Ok(self)
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.body.z(qubit)?;
        Ok(self)
    }

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.body.cx(control, target)?;
        Ok(self)
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.body.cz(control, target)?;
        Ok(self)
    }

    /// Apply multi-controlled X.
    pub fn mcx(
        &mut self,
        controls: impl IntoIterator<Item = QubitId>,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.body.mcx(controls, target)?;
        Ok(self)
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        let measurement = Measurement::new(qubit, clbit);
        self.check_measurement(&measurement, self.measurements.iter())?;
        self.measurements.push(measurement);
        Ok(self)
    }

    /// Measure qubits `0..n` into classical bits `0..n`.
    ///
    /// On error the circuit is left as it was.
    pub fn measure_range(&mut self, n: u32) -> IrResult<&mut Self> {
        let recorded = self.measurements.len();
        for i in 0..n {
            let measurement = Measurement::new(QubitId(i), ClbitId(i));
            if let Err(e) = self.check_measurement(&measurement, self.measurements.iter()) {
                self.measurements.truncate(recorded);
                return Err(e);
            }
            self.measurements.push(measurement);
        }
        Ok(self)
    }

    /// Measure all qubits to corresponding classical bits, growing the
    /// classical register if needed.
    ///
    /// On error the circuit, including its classical width, is left as it
    /// was.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        let num_clbits = self.num_clbits;
        self.num_clbits = num_clbits.max(self.num_qubits());
        let measured = self.measure_range(self.num_qubits()).map(|_| ());
        if measured.is_err() {
            self.num_clbits = num_clbits;
        }
        measured?;
        Ok(self)
    }

    fn check_measurement<'a>(
        &self,
        measurement: &Measurement,
        earlier: impl Iterator<Item = &'a Measurement>,
    ) -> IrResult<()> {
        if measurement.qubit.0 >= self.num_qubits() {
            return Err(IrError::QubitNotFound {
                qubit: measurement.qubit,
                width: self.num_qubits(),
                gate_name: Some("measure".into()),
            });
        }
        if measurement.clbit.0 >= self.num_clbits {
            return Err(IrError::ClbitNotFound {
                clbit: measurement.clbit,
                width: self.num_clbits,
            });
        }
        let mut earlier = earlier;
        if earlier.any(|m| m.clbit == measurement.clbit) {
            return Err(IrError::ClbitReused(measurement.clbit));
        }
        Ok(())
    }

    /// Re-check every operation and measurement.
    ///
    /// Builder methods and deserialization already enforce these rules.
    pub fn validate(&self) -> IrResult<()> {
        for op in self.body.ops() {
            op.validate(self.num_qubits())?;
        }
        let mut written = FxHashSet::default();
        for m in &self.measurements {
            self.check_measurement(m, std::iter::empty())?;
            if !written.insert(m.clbit) {
                return Err(IrError::ClbitReused(m.clbit));
            }
        }
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.body.num_qubits()
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> u32 {
        self.num_clbits
    }

    /// Get the gate operations in order.
    pub fn ops(&self) -> &[GateOp] {
        self.body.ops()
    }

    /// Get the measurement mapping in order.
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// Qubits that are measured, in measurement order.
    pub fn measured_qubits(&self) -> Vec<QubitId> {
        self.measurements.iter().map(|m| m.qubit).collect()
    }

    /// Count operations by mnemonic, sorted by name.
    pub fn count_ops(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = vec![];
        for op in self.body.ops() {
            let name = op.name();
            match counts.iter_mut().find(|(n, _)| *n == name) {
                Some((_, c)) => *c += 1,
                None => counts.push((name, 1)),
            }
        }
        counts.sort();
        counts
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    /// Encode the circuit as JSON.
    pub fn to_json(&self) -> IrResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a circuit from JSON. Invalid circuits are rejected.
    pub fn from_json(json: &str) -> IrResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::StandardGate;

    #[test]
    fn test_circuit_with_size() {
        let circuit = Circuit::with_size("test", 3, 2);
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_clbits(), 2);
        assert!(circuit.ops().is_empty());
    }

    #[test]
    fn test_fluent_api() {
        let mut circuit = Circuit::with_size("test", 2, 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap()
            .measure(QubitId(1), ClbitId(1))
            .unwrap();

        assert_eq!(circuit.ops().len(), 2);
        assert_eq!(circuit.measured_qubits(), vec![QubitId(0), QubitId(1)]);
    }

    #[test]
    fn test_append_wider_sequence_fails() {
        let seq = GateSequence::new("wide", 4);
        let mut circuit = Circuit::with_size("test", 3, 3);
        assert!(matches!(
            circuit.append(&seq),
            Err(IrError::QubitCountMismatch { expected: 4, got: 3, .. })
        ));
    }

    #[test]
    fn test_measure_checks() {
        let mut circuit = Circuit::with_size("test", 2, 1);
        assert!(matches!(
            circuit.measure(QubitId(2), ClbitId(0)),
            Err(IrError::QubitNotFound { .. })
        ));
        assert!(matches!(
            circuit.measure(QubitId(0), ClbitId(1)),
            Err(IrError::ClbitNotFound { .. })
        ));
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();
        assert!(matches!(
            circuit.measure(QubitId(1), ClbitId(0)),
            Err(IrError::ClbitReused(ClbitId(0)))
        ));
    }

    #[test]
    fn test_measure_all_grows_clbits() {
        let mut circuit = Circuit::with_size("test", 3, 0);
        circuit.measure_all().unwrap();
        assert_eq!(circuit.num_clbits(), 3);
        assert_eq!(circuit.measurements().len(), 3);
    }

    #[test]
    fn test_measure_all_failure_leaves_circuit_unchanged() {
        let mut circuit = Circuit::with_size("test", 3, 2);
        circuit.measure(QubitId(2), ClbitId(1)).unwrap();
        let before = circuit.clone();

        assert!(matches!(
            circuit.measure_all(),
            Err(IrError::ClbitReused(ClbitId(1)))
        ));
        assert_eq!(circuit.num_clbits(), 2);
        assert_eq!(circuit.measurements().len(), 1);
        assert_eq!(circuit, before);
    }

    #[test]
    fn test_measure_range_failure_leaves_circuit_unchanged() {
        let mut circuit = Circuit::with_size("test", 3, 2);
        let before = circuit.clone();
        assert!(matches!(
            circuit.measure_range(3),
            Err(IrError::ClbitNotFound { .. })
        ));
        assert_eq!(circuit, before);
    }

    #[test]
    fn test_count_ops() {
        let mut circuit = Circuit::with_size("test", 3, 0);
        circuit
            .h(QubitId(0))
            .unwrap()
            .h(QubitId(1))
            .unwrap()
            .cx(QubitId(0), QubitId(2))
            .unwrap()
            .push(GateOp::controlled(
                StandardGate::X,
                [QubitId(0), QubitId(1)],
                QubitId(2),
            ))
            .unwrap();

        assert_eq!(
            circuit.count_ops(),
            vec![("cx".to_string(), 1), ("h".to_string(), 2), ("mcx".to_string(), 1)]
        );
    }

    #[test]
    fn test_json_roundtrip_validates() {
        let mut circuit = Circuit::with_size("bell", 2, 2);
        circuit.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();
        circuit.measure_all().unwrap();

        let json = circuit.to_json().unwrap();
        assert_eq!(Circuit::from_json(&json).unwrap(), circuit);

        let tampered = json.replace("\"num_clbits\":2", "\"num_clbits\":1");
        assert!(Circuit::from_json(&tampered).is_err());
    }

    #[test]
    fn test_serde_rejects_invalid_circuit() {
        let mut circuit = Circuit::with_size("pair", 2, 2);
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.measure_all().unwrap();
        let json = serde_json::to_string(&circuit).unwrap();
        assert_eq!(serde_json::from_str::<Circuit>(&json).unwrap(), circuit);

        let bad_target = json.replace("\"target\":1", "\"target\":5");
        assert!(serde_json::from_str::<Circuit>(&bad_target).is_err());

        let bad_clbit = json.replace("\"clbit\":1", "\"clbit\":0");
        assert!(matches!(
            Circuit::from_json(&bad_clbit),
            Err(IrError::Serialization(_))
        ));
    }
}
