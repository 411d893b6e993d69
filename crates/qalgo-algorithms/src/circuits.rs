//! Circuit assemblers.
//!
//! Assemblers wire an oracle between a preparation stage and a measurement
//! stage. They only describe circuits; running them is a
//! [`Backend`](qalgo_hal::Backend)'s job.

use std::f64::consts::FRAC_PI_4;

use tracing::{debug, warn};

use qalgo_ir::{Circuit, ClbitId, GateSequence, QubitId};

use crate::error::{AlgoError, AlgoResult};
use crate::oracle::build_grover_oracle;
use crate::params::require_positive;

/// Shared shape of Bernstein-Vazirani and Deutsch-Jozsa:
///
/// ```text
/// q0..q(n-1)  ──H── ┤        ├ ──H── measure into c0..c(n-1)
/// q(n)       ─X─H── ┤ oracle ├
/// ```
fn assemble_phase_kickback(name: &str, oracle: &GateSequence, n: u32) -> AlgoResult<Circuit> {
    require_positive(n, "input qubit count")?;
    if oracle.num_qubits().checked_sub(1) != Some(n) {
        return Err(AlgoError::InvalidParameter(format!(
            "oracle '{}' spans {} qubits, expected {} inputs plus one ancilla",
            oracle.name(),
            oracle.num_qubits(),
            n
        )));
    }

    let ancilla = QubitId(n);
    let mut circuit = Circuit::with_size(name, n + 1, n);

    // Ancilla in |1⟩ so the oracle kicks its output back as a phase
    circuit.x(ancilla)?;
    for i in 0..=n {
        circuit.h(QubitId(i))?;
    }

    circuit.append(oracle)?;

    for i in 0..n {
        circuit.h(QubitId(i))?;
    }
    circuit.measure_range(n)?;

    debug!(circuit = name, ops = circuit.ops().len(), "Assembled circuit");
    Ok(circuit)
}

/// Bernstein-Vazirani circuit around `oracle` over `n` input qubits.
///
/// Measuring the inputs yields the secret under the big-endian convention.
pub fn assemble_bv(oracle: &GateSequence, n: u32) -> AlgoResult<Circuit> {
    assemble_phase_kickback("bernstein_vazirani", oracle, n)
}

/// Deutsch-Jozsa circuit around `oracle` over `n` input qubits.
///
/// A constant oracle measures all zeros; a balanced one never does.
pub fn assemble_dj(oracle: &GateSequence, n: u32) -> AlgoResult<Circuit> {
    assemble_phase_kickback("deutsch_jozsa", oracle, n)
}

/// Number of Grover iterations for `k` qubits: `floor(π/4 · sqrt(2^k))`.
///
/// The result is truncated, not rounded, so it can be zero for registers
/// too small to benefit from amplification.
pub fn grover_iterations(k: u32) -> u32 {
    let space = 2f64.powi(k as i32);
    (FRAC_PI_4 * space.sqrt()).floor() as u32
}

/// Grover diffusion operator (inversion about the mean) over `k` qubits.
///
/// 1. H on all qubits
/// 2. X on all qubits
/// 3. H on the last qubit, X on it controlled by all others, H again
/// 4. X on all qubits
/// 5. H on all qubits
pub fn grover_diffuser(k: u32) -> AlgoResult<GateSequence> {
    require_positive(k, "diffuser width")?;
    let last = QubitId(k - 1);
    let mut diffuser = GateSequence::new("diffuser", k);

    for i in 0..k {
        diffuser.h(QubitId(i))?;
    }
    for i in 0..k {
        diffuser.x(QubitId(i))?;
    }

    diffuser.h(last)?;
    diffuser.mcx((0..k - 1).map(QubitId), last)?;
    diffuser.h(last)?;

    for i in 0..k {
        diffuser.x(QubitId(i))?;
    }
    for i in 0..k {
        diffuser.h(QubitId(i))?;
    }

    Ok(diffuser)
}

/// Grover search circuit for `target` over `k` qubits.
///
/// Uniform superposition, then [`grover_iterations`] rounds of oracle plus
/// diffuser, then every qubit measured into the classical bit of the same
/// index. A zero iteration count is kept as-is: the circuit still measures
/// and the search is simply not amplified.
pub fn assemble_grover(target: &str, k: u32) -> AlgoResult<Circuit> {
    let oracle = build_grover_oracle(target, k)?;
    let diffuser = grover_diffuser(k)?;
    let iterations = grover_iterations(k);
    if iterations == 0 {
        warn!(k, "Grover iteration count rounds to zero; search is not amplified");
    }

    let mut circuit = Circuit::with_size("grover", k, k);
    for i in 0..k {
        circuit.h(QubitId(i))?;
    }
    for _ in 0..iterations {
        circuit.append(&oracle)?;
        circuit.append(&diffuser)?;
    }
    circuit.measure_range(k)?;

    debug!(marked = target, k, iterations, ops = circuit.ops().len(), "Assembled Grover circuit");
    Ok(circuit)
}

/// Bell pair `(|00⟩ + |11⟩)/√2` with both qubits measured.
pub fn assemble_bell() -> AlgoResult<Circuit> {
    let mut circuit = Circuit::with_size("bell", 2, 2);
    circuit
        .h(QubitId(0))?
        .cx(QubitId(0), QubitId(1))?
        .measure_range(2)?;
    Ok(circuit)
}

/// A single X gate on `|0⟩`, measured. A noiseless run reads `1` every shot.
pub fn assemble_x_gate() -> AlgoResult<Circuit> {
    let mut circuit = Circuit::with_size("x_gate", 1, 1);
    circuit.x(QubitId(0))?.measure_range(1)?;
    Ok(circuit)
}

/// Teleport the basis state `|payload⟩` from qubit 0 to qubit 2.
///
/// ```text
/// q0 ─[X if payload]──────────■──H──────────■──── measure c0
/// q1 ─────────────H──■────────X─────■───────┼──── measure c1
/// q2 ────────────────X──────────────X───────Z──── measure c2
/// ```
///
/// Corrections are the controlled gates CX(q1, q2) and CZ(q0, q2), the
/// deferred-measurement form of measuring q0 and q1 first and correcting
/// classically. Classical bit 2 always reads `payload` on a noiseless
/// backend.
pub fn assemble_teleportation(payload: bool) -> AlgoResult<Circuit> {
    let (alice, shared, bob) = (QubitId(0), QubitId(1), QubitId(2));
    let mut circuit = Circuit::with_size("teleportation", 3, 3);

    if payload {
        circuit.x(alice)?;
    }

    // Shared Bell pair between q1 and q2
    circuit.h(shared)?.cx(shared, bob)?;

    // Rotate q0, q1 into the Bell basis
    circuit.cx(alice, shared)?.h(alice)?;

    circuit.cx(shared, bob)?.cz(alice, bob)?;

    circuit
        .measure(alice, ClbitId(0))?
        .measure(shared, ClbitId(1))?
        .measure(bob, ClbitId(2))?;
    Ok(circuit)
}
