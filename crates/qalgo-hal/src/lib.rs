//! Execution backend boundary.
//!
//! Circuits built by `qalgo-algorithms` are run by something else: a local
//! simulator, a remote service, a test double. This crate fixes the narrow
//! contract between the two sides:
//!
//! - A [`Backend`] takes a [`Circuit`](qalgo_ir::Circuit) and a shot count and
//!   returns an [`ExecutionResult`] holding [`Counts`].
//! - Failures are reported as [`HalError`]; callers surface them unchanged.
//!
//! # Bit-string convention
//!
//! Keys in [`Counts`] are big-endian over classical bits: the first character
//! is the highest-index classical bit and the last character is classical
//! bit 0. A 3-bit circuit that measures `1` into `c0` and `0` elsewhere
//! reports `"001"`.
//!
//! # Implementing a Backend
//!
//! ```ignore
//! use qalgo_hal::{Backend, BackendAvailability, Counts, ExecutionResult, HalResult, ValidationResult};
//! use qalgo_ir::Circuit;
//! use async_trait::async_trait;
//!
//! struct MyBackend;
//!
//! #[async_trait]
//! impl Backend for MyBackend {
//!     fn name(&self) -> &str { "my_backend" }
//!
//!     async fn availability(&self) -> HalResult<BackendAvailability> {
//!         Ok(BackendAvailability::always_available())
//!     }
//!
//!     async fn validate(&self, _circuit: &Circuit) -> HalResult<ValidationResult> {
//!         Ok(ValidationResult::Valid)
//!     }
//!
//!     async fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
//!         // Hand the circuit to the executor and collect counts
//!         # todo!()
//!     }
//! }
//! ```

pub mod backend;
pub mod error;
pub mod result;

pub use backend::{Backend, BackendAvailability, ValidationResult};
pub use error::{HalError, HalResult};
pub use result::{Counts, ExecutionResult};
