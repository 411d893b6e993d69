//! Shared test doubles for integration tests.
//!
//! [`IdealBackend`] is a small noiseless statevector executor. It exists so
//! the algorithms can be checked end to end; it is not part of the library.

#![allow(dead_code)]

use std::f64::consts::FRAC_1_SQRT_2;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use num_complex::Complex64;
use rand::SeedableRng;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;

use qalgo_hal::{
    Backend, BackendAvailability, Counts, ExecutionResult, HalError, HalResult, ValidationResult,
};
use qalgo_ir::{Circuit, GateOp, StandardGate};

/// Install a test subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Dense statevector over `num_qubits` qubits, qubit 0 in the lowest bit.
struct Statevector {
    amplitudes: Vec<Complex64>,
}

impl Statevector {
    fn new(num_qubits: u32) -> Self {
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self { amplitudes }
    }

    fn apply(&mut self, op: &GateOp) {
        let matrix = gate_matrix(op.gate());
        let target = 1usize << op.target().index();
        let controls = op
            .controls()
            .iter()
            .fold(0usize, |mask, q| mask | (1 << q.index()));

        for i in 0..self.amplitudes.len() {
            if i & target != 0 || i & controls != controls {
                continue;
            }
            let j = i | target;
            let a = self.amplitudes[i];
            let b = self.amplitudes[j];
            self.amplitudes[i] = matrix[0][0] * a + matrix[0][1] * b;
            self.amplitudes[j] = matrix[1][0] * a + matrix[1][1] * b;
        }
    }

    fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }
}

fn gate_matrix(gate: StandardGate) -> [[Complex64; 2]; 2] {
    let zero = Complex64::new(0.0, 0.0);
    let one = Complex64::new(1.0, 0.0);
    let i = Complex64::new(0.0, 1.0);
    let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
    match gate {
        StandardGate::I => [[one, zero], [zero, one]],
        StandardGate::X => [[zero, one], [one, zero]],
        StandardGate::Y => [[zero, -i], [i, zero]],
        StandardGate::Z => [[one, zero], [zero, -one]],
        StandardGate::H => [[h, h], [h, -h]],
        StandardGate::S => [[one, zero], [zero, i]],
        StandardGate::T => [
            [one, zero],
            [zero, Complex64::from_polar(1.0, std::f64::consts::FRAC_PI_4)],
        ],
    }
}

/// Big-endian key over the circuit's classical bits for basis state `index`.
fn outcome_key(circuit: &Circuit, index: usize) -> String {
    let width = circuit.num_clbits() as usize;
    let mut key = vec![b'0'; width];
    for m in circuit.measurements() {
        if (index >> m.qubit.index()) & 1 == 1 {
            key[width - 1 - m.clbit.index()] = b'1';
        }
    }
    String::from_utf8(key).expect("key is ASCII")
}

/// Noiseless sampler with a fixed seed.
pub struct IdealBackend {
    name: String,
    max_qubits: u32,
    seed: u64,
    runs: AtomicU32,
}

impl IdealBackend {
    pub fn new() -> Self {
        Self {
            name: "qasm_simulator".to_string(),
            max_qubits: 16,
            seed: 0x5eed,
            runs: AtomicU32::new(0),
        }
    }

    pub fn with_max_qubits(mut self, max_qubits: u32) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of completed `run` calls.
    pub fn runs(&self) -> u32 {
        self.runs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Backend for IdealBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        Ok(BackendAvailability::always_available())
    }

    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        if circuit.num_qubits() > self.max_qubits {
            return Ok(ValidationResult::Invalid {
                reasons: vec![format!(
                    "circuit has {} qubits, backend supports {}",
                    circuit.num_qubits(),
                    self.max_qubits
                )],
            });
        }
        Ok(ValidationResult::Valid)
    }

    async fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        if shots == 0 {
            return Err(HalError::InvalidShots("shots must be positive".into()));
        }

        let mut state = Statevector::new(circuit.num_qubits());
        for op in circuit.ops() {
            state.apply(op);
        }

        let weights = state.probabilities();
        let dist = WeightedIndex::new(&weights).map_err(|e| HalError::JobFailed(e.to_string()))?;
        let mut rng = StdRng::seed_from_u64(self.seed);

        let mut counts = Counts::new();
        for _ in 0..shots {
            counts.insert(outcome_key(circuit, dist.sample(&mut rng)), 1);
        }

        self.runs.fetch_add(1, Ordering::SeqCst);
        Ok(ExecutionResult::new(counts, shots))
    }
}

/// Backend that is never available.
pub struct OfflineBackend;

#[async_trait]
impl Backend for OfflineBackend {
    fn name(&self) -> &str {
        "offline"
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        Ok(BackendAvailability::unavailable("offline for calibration"))
    }

    async fn validate(&self, _circuit: &Circuit) -> HalResult<ValidationResult> {
        Ok(ValidationResult::Valid)
    }

    async fn run(&self, _circuit: &Circuit, _shots: u32) -> HalResult<ExecutionResult> {
        Err(HalError::JobFailed("offline backend was run".into()))
    }
}

/// Backend whose jobs always fail.
pub struct FailingBackend;

#[async_trait]
impl Backend for FailingBackend {
    fn name(&self) -> &str {
        "failing"
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        Ok(BackendAvailability::always_available())
    }

    async fn validate(&self, _circuit: &Circuit) -> HalResult<ValidationResult> {
        Ok(ValidationResult::Valid)
    }

    async fn run(&self, _circuit: &Circuit, _shots: u32) -> HalResult<ExecutionResult> {
        Err(HalError::JobFailed("queue rejected the job".into()))
    }
}
