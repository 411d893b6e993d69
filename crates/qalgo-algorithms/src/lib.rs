//! Textbook quantum algorithms as circuit descriptions.
//!
//! This crate builds the circuits for Bernstein-Vazirani, Deutsch-Jozsa,
//! Grover search, Bell-pair preparation, a single X gate and teleportation,
//! and reads the answers back out of measurement counts. Execution is
//! delegated to a [`Backend`](qalgo_hal::Backend).
//!
//! The pipeline has three stages, each usable on its own:
//!
//! ```text
//!   oracle::build_*  ──→  circuits::assemble_*  ──→  Backend  ──→  interpret::*
//!   (GateSequence)        (Circuit)                  (Counts)      (answer)
//! ```
//!
//! [`AlgorithmRunner`] chains them for a configured backend and shot count.
//!
//! # Bit ordering
//!
//! Bit-strings are big-endian: the first character is the highest-index
//! qubit. The Bernstein-Vazirani secret `"110"` sets qubits 2 and 1, and a
//! noiseless run reports the key `"110"`. See [`BitString`].
//!
//! # Example
//!
//! ```ignore
//! use qalgo_algorithms::{AlgorithmRunner, RunConfig};
//!
//! let runner = AlgorithmRunner::new(backend, RunConfig::load(None)?)?;
//! let outcome = runner.run_bernstein_vazirani("1101").await?;
//! assert_eq!(outcome.found.as_str(), "1101");
//! ```

pub mod circuits;
pub mod config;
pub mod error;
pub mod interpret;
pub mod oracle;
pub mod params;
pub mod runner;

pub use circuits::{
    assemble_bell, assemble_bv, assemble_dj, assemble_grover, assemble_teleportation,
    assemble_x_gate, grover_diffuser, grover_iterations,
};
pub use config::RunConfig;
pub use error::{AlgoError, AlgoResult};
pub use interpret::{
    DJ_CONSTANT_THRESHOLD, interpret_bv, interpret_dj, interpret_grover, interpret_teleportation,
};
pub use oracle::{MAX_GROVER_QUBITS, build_bv_oracle, build_dj_oracle, build_grover_oracle, phase_flip};
pub use params::{BitString, ConstantValue, DjCase, DjVerdict};
pub use runner::{AlgorithmRunner, BvOutcome, DjOutcome, GroverOutcome, TeleportationOutcome};
