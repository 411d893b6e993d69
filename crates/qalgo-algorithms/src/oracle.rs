//! Oracle builders.
//!
//! Each builder turns algorithm parameters into a [`GateSequence`] that
//! encodes a boolean function. Builders are pure: the same parameters always
//! give structurally identical sequences. Input qubits are `0..n`; oracles
//! with an output bit put it on the ancilla qubit `n`.

use tracing::debug;

use qalgo_ir::{GateSequence, QubitId};

use crate::error::{AlgoError, AlgoResult};
use crate::params::{BitString, ConstantValue, DjCase, require_positive};

/// Largest Grover register [`build_grover_oracle`] accepts.
///
/// Wider registers need a multi-controlled phase flip that a backend may
/// have to decompose; [`phase_flip`] already builds it, the limit only
/// gates the oracle.
pub const MAX_GROVER_QUBITS: u32 = 2;

/// Width of an `n`-input register plus its ancilla.
fn with_ancilla(n: u32) -> AlgoResult<u32> {
    n.checked_add(1)
        .ok_or_else(|| AlgoError::InvalidParameter(format!("{n} input qubits leave no room for an ancilla")))
}

/// Bernstein-Vazirani oracle for f(x) = secret · x (mod 2).
///
/// For every `1` in `secret` a CX runs from the matching input qubit onto
/// the ancilla (qubit `n`). Qubits are matched using the big-endian
/// convention of [`BitString`], so `"101"` gives CX(q0, q3) and CX(q2, q3).
pub fn build_bv_oracle(secret: &str) -> AlgoResult<GateSequence> {
    let secret = BitString::parse(secret)?;
    let n = secret.width();
    let ancilla = QubitId(n);

    let mut oracle = GateSequence::new(format!("oracle: {secret}"), with_ancilla(n)?);
    for (qubit, bit) in secret.qubit_bits() {
        if bit {
            oracle.cx(qubit, ancilla)?;
        }
    }

    debug!(secret = %secret, ops = oracle.len(), "Built Bernstein-Vazirani oracle");
    Ok(oracle)
}

/// Deutsch-Jozsa oracle over `n` input qubits and one ancilla.
///
/// - [`DjCase::Balanced`]: CX from every input qubit onto the ancilla, so
///   f(x) is the parity of x.
/// - [`DjCase::Constant`] with [`ConstantValue::Zero`]: no gates.
/// - [`DjCase::Constant`] with [`ConstantValue::One`]: X on the ancilla.
///
/// The constant value is an argument, so callers that want a coin flip draw
/// it with [`ConstantValue::random`] before calling.
pub fn build_dj_oracle(case: DjCase, n: u32) -> AlgoResult<GateSequence> {
    require_positive(n, "Deutsch-Jozsa qubit count")?;
    let ancilla = QubitId(n);

    let mut oracle = GateSequence::new("oracle", with_ancilla(n)?);
    match case {
        DjCase::Balanced => {
            for i in 0..n {
                oracle.cx(QubitId(i), ancilla)?;
            }
        }
        DjCase::Constant(ConstantValue::Zero) => {}
        DjCase::Constant(ConstantValue::One) => {
            oracle.x(ancilla)?;
        }
    }

    debug!(?case, n, ops = oracle.len(), "Built Deutsch-Jozsa oracle");
    Ok(oracle)
}

/// Phase flip on `|1…1⟩` over `k` qubits.
///
/// A Z on qubit `k-1` controlled by qubits `0..k-1`: a bare Z for one
/// qubit, CZ for two, a multi-controlled Z beyond that.
pub fn phase_flip(k: u32) -> AlgoResult<GateSequence> {
    require_positive(k, "phase flip width")?;
    let mut seq = GateSequence::new("phase flip", k);
    seq.mcz((0..k - 1).map(QubitId), QubitId(k - 1))?;
    Ok(seq)
}

/// Grover oracle marking the basis state `target` with a phase of -1.
///
/// Each qubit whose target bit is `0` is bracketed with X gates around a
/// [`phase_flip`], so the flip fires exactly on `target`. For an all-ones
/// target only the bare phase flip is emitted.
///
/// `k` must equal the target length and lie in `1..=MAX_GROVER_QUBITS`.
pub fn build_grover_oracle(target: &str, k: u32) -> AlgoResult<GateSequence> {
    let target = BitString::parse(target)?;
    require_positive(k, "Grover qubit count")?;
    if target.width() != k {
        return Err(AlgoError::InvalidParameter(format!(
            "target {target} has {} bits but the register has {k} qubits",
            target.width()
        )));
    }
    if k > MAX_GROVER_QUBITS {
        return Err(AlgoError::InvalidParameter(format!(
            "Grover oracle supports 1 to {MAX_GROVER_QUBITS} qubits, got {k}"
        )));
    }

    let zero_qubits: Vec<QubitId> = target
        .qubit_bits()
        .filter_map(|(qubit, bit)| (!bit).then_some(qubit))
        .collect();

    let mut oracle = GateSequence::new(format!("oracle: {target}"), k);
    for &qubit in &zero_qubits {
        oracle.x(qubit)?;
    }
    oracle.extend_from(&phase_flip(k)?)?;
    for &qubit in &zero_qubits {
        oracle.x(qubit)?;
    }

    debug!(marked = %target, ops = oracle.len(), "Built Grover oracle");
    Ok(oracle)
}
