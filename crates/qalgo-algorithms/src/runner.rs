//! Algorithm runner.
//!
//! [`AlgorithmRunner`] drives one algorithm end to end: build the oracle,
//! assemble the circuit, execute it on a [`Backend`], interpret the counts.
//! Backend failures surface unchanged as
//! [`AlgoError::Backend`](crate::AlgoError::Backend); nothing is
//! retried.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, instrument, warn};

use qalgo_hal::{Backend, Counts};
use qalgo_ir::Circuit;

use crate::circuits::{
    assemble_bell, assemble_bv, assemble_dj, assemble_grover, assemble_teleportation,
    assemble_x_gate, grover_iterations,
};
use crate::config::RunConfig;
use crate::error::AlgoResult;
use crate::interpret::{interpret_bv, interpret_dj, interpret_grover, interpret_teleportation};
use crate::oracle::{build_bv_oracle, build_dj_oracle};
use crate::params::{BitString, ConstantValue, DjCase, DjVerdict};

/// Outcome of a Bernstein-Vazirani run.
#[derive(Debug, Clone)]
pub struct BvOutcome {
    /// The secret the oracle encoded.
    pub secret: BitString,
    /// The secret read back from the counts.
    pub found: BitString,
    /// Raw measurement counts.
    pub counts: Counts,
    /// The executed circuit.
    pub circuit: Circuit,
}

impl BvOutcome {
    /// Whether the run recovered the secret.
    pub fn is_correct(&self) -> bool {
        self.secret == self.found
    }
}

/// Outcome of a Deutsch-Jozsa run.
#[derive(Debug, Clone)]
pub struct DjOutcome {
    /// The oracle that was queried.
    pub case: DjCase,
    /// The verdict read from the counts.
    pub verdict: DjVerdict,
    /// Raw measurement counts.
    pub counts: Counts,
    /// The executed circuit.
    pub circuit: Circuit,
}

impl DjOutcome {
    /// Whether the verdict matches the oracle.
    pub fn is_correct(&self) -> bool {
        self.case.expected_verdict() == self.verdict
    }
}

/// Outcome of a Grover search.
#[derive(Debug, Clone)]
pub struct GroverOutcome {
    /// The marked bit-string.
    pub target: BitString,
    /// Oracle plus diffuser rounds applied.
    pub iterations: u32,
    /// Observed probability of the target.
    pub probability: f64,
    /// Raw measurement counts.
    pub counts: Counts,
    /// The executed circuit.
    pub circuit: Circuit,
}

/// Outcome of a teleportation run.
#[derive(Debug, Clone)]
pub struct TeleportationOutcome {
    /// The teleported basis state.
    pub payload: bool,
    /// Fraction of shots where the receiving qubit read the payload.
    pub fidelity: f64,
    /// Raw measurement counts.
    pub counts: Counts,
    /// The executed circuit.
    pub circuit: Circuit,
}

/// Runs algorithms against a backend.
pub struct AlgorithmRunner<B: Backend> {
    backend: B,
    config: RunConfig,
}

impl<B: Backend> AlgorithmRunner<B> {
    /// Create a runner.
    ///
    /// Fails when `config` does not validate.
    pub fn new(backend: B, config: RunConfig) -> AlgoResult<Self> {
        config.validate()?;
        if backend.name() != config.backend {
            warn!(
                configured = %config.backend,
                actual = backend.name(),
                "Backend name differs from configuration"
            );
        }
        Ok(Self { backend, config })
    }

    /// Runner with the default configuration.
    pub fn with_defaults(backend: B) -> AlgoResult<Self> {
        Self::new(backend, RunConfig::default())
    }

    /// The backend circuits run on.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The active configuration.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// A constant Deutsch-Jozsa case with a coin-flipped value.
    ///
    /// With a configured seed every call returns the same value.
    pub fn random_constant_case(&self) -> DjCase {
        let value = match self.config.seed {
            Some(seed) => ConstantValue::random(&mut StdRng::seed_from_u64(seed)),
            None => ConstantValue::random(&mut rand::thread_rng()),
        };
        DjCase::Constant(value)
    }

    async fn execute(&self, circuit: &Circuit) -> AlgoResult<Counts> {
        let result = self.backend.execute(circuit, self.config.shots).await?;
        Ok(result.counts)
    }

    /// Recover `secret` with a single Bernstein-Vazirani query.
    #[instrument(skip(self), fields(backend = self.backend.name()))]
    pub async fn run_bernstein_vazirani(&self, secret: &str) -> AlgoResult<BvOutcome> {
        let secret = BitString::parse(secret)?;
        let oracle = build_bv_oracle(secret.as_str())?;
        let circuit = assemble_bv(&oracle, secret.width())?;

        let counts = self.execute(&circuit).await?;
        let found = interpret_bv(&counts)?;

        info!(%secret, %found, "Bernstein-Vazirani complete");
        Ok(BvOutcome {
            secret,
            found,
            counts,
            circuit,
        })
    }

    /// Decide whether the `case` oracle over `n` qubits is constant or
    /// balanced.
    #[instrument(skip(self), fields(backend = self.backend.name()))]
    pub async fn run_deutsch_jozsa(&self, case: DjCase, n: u32) -> AlgoResult<DjOutcome> {
        let oracle = build_dj_oracle(case, n)?;
        let circuit = assemble_dj(&oracle, n)?;

        let counts = self.execute(&circuit).await?;
        let verdict = interpret_dj(&counts, n)?;

        info!(?case, %verdict, "Deutsch-Jozsa complete");
        Ok(DjOutcome {
            case,
            verdict,
            counts,
            circuit,
        })
    }

    /// Search for `target` over `k` qubits.
    #[instrument(skip(self, target), fields(backend = self.backend.name(), marked = target))]
    pub async fn run_grover(&self, target: &str, k: u32) -> AlgoResult<GroverOutcome> {
        let target = BitString::parse(target)?;
        let circuit = assemble_grover(target.as_str(), k)?;

        let counts = self.execute(&circuit).await?;
        let probability = interpret_grover(&counts, target.as_str())?;

        info!(marked = %target, probability, "Grover search complete");
        Ok(GroverOutcome {
            target,
            iterations: grover_iterations(k),
            probability,
            counts,
            circuit,
        })
    }

    /// Teleport `|payload⟩` from qubit 0 to qubit 2.
    #[instrument(skip(self), fields(backend = self.backend.name()))]
    pub async fn run_teleportation(&self, payload: bool) -> AlgoResult<TeleportationOutcome> {
        let circuit = assemble_teleportation(payload)?;

        let counts = self.execute(&circuit).await?;
        let fidelity = interpret_teleportation(&counts, payload)?;

        info!(payload, fidelity, "Teleportation complete");
        Ok(TeleportationOutcome {
            payload,
            fidelity,
            counts,
            circuit,
        })
    }

    /// Prepare and measure a Bell pair, returning the raw counts.
    #[instrument(skip(self), fields(backend = self.backend.name()))]
    pub async fn run_bell(&self) -> AlgoResult<Counts> {
        let circuit = assemble_bell()?;
        let counts = self.execute(&circuit).await?;
        info!(outcomes = counts.len(), "Bell pair measured");
        Ok(counts)
    }

    /// Flip `|0⟩` with an X gate and measure, returning the raw counts.
    #[instrument(skip(self), fields(backend = self.backend.name()))]
    pub async fn run_x_gate(&self) -> AlgoResult<Counts> {
        let circuit = assemble_x_gate()?;
        let counts = self.execute(&circuit).await?;
        info!(ones = counts.get("1"), "X gate measured");
        Ok(counts)
    }
}
