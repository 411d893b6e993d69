//! Circuit representation for textbook quantum algorithms.
//!
//! This crate holds the plain data that the algorithm builders produce and
//! that an execution backend consumes. Nothing here simulates anything: a
//! circuit is an ordered list of gate operations plus a measurement mapping.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`]
//! - **Gates**: [`StandardGate`] kinds and the [`GateOp`] variants that place
//!   them on qubits (single, controlled, multi-controlled)
//! - **Oracles**: [`GateSequence`], a fixed-width ordered list of operations
//! - **Circuits**: [`Circuit`], a named sequence with a [`Measurement`] list
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qalgo_ir::{Circuit, ClbitId, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell", 2, 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure_all().unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.ops().len(), 2);
//! assert_eq!(circuit.measurements().len(), 2);
//! ```
//!
//! # Example: Appending an Oracle
//!
//! ```rust
//! use qalgo_ir::{Circuit, GateSequence, QubitId};
//!
//! let mut oracle = GateSequence::new("oracle", 3);
//! oracle.cx(QubitId(0), QubitId(2)).unwrap();
//!
//! let mut circuit = Circuit::with_size("demo", 3, 2);
//! circuit.append(&oracle).unwrap();
//! assert_eq!(circuit.ops().len(), 1);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Description |
//! |------|-------------|
//! | `I` | Identity |
//! | `X`, `Y`, `Z` | Pauli gates |
//! | `H` | Hadamard |
//! | `S`, `T` | Phase gates |
//!
//! Any gate kind may be placed under one control ([`GateOp::Controlled`]) or
//! several ([`GateOp::MultiControlled`]).

pub mod circuit;
pub mod error;
pub mod gate;
pub mod qubit;
pub mod sequence;

pub use circuit::{Circuit, Measurement};
pub use error::{IrError, IrResult};
pub use gate::{GateOp, StandardGate};
pub use qubit::{ClbitId, QubitId};
pub use sequence::GateSequence;
