//! Result interpreters.
//!
//! Interpreters read [`Counts`] from a backend run and turn them into the
//! answer of the algorithm. Every interpreter rejects a table with zero total
//! shots, or a total that overflows `u64`, with [`AlgoError::InvalidInput`].

use tracing::debug;

use qalgo_hal::Counts;

use crate::error::{AlgoError, AlgoResult};
use crate::params::{BitString, DjVerdict, require_positive};

/// Fraction of shots that must land on `0…0` for a Deutsch-Jozsa run to be
/// judged constant. The comparison is strict.
pub const DJ_CONSTANT_THRESHOLD: f64 = 0.9;

fn total_shots(counts: &Counts) -> AlgoResult<u64> {
    match counts.try_total_shots() {
        None => Err(AlgoError::InvalidInput(
            "shot total overflows u64".to_string(),
        )),
        Some(0) => Err(AlgoError::InvalidInput(
            "counts contain no shots".to_string(),
        )),
        Some(total) => Ok(total),
    }
}

/// The secret recovered by a Bernstein-Vazirani run: the most frequent
/// bit-string.
///
/// Ties go to the lexicographically smallest bit-string.
pub fn interpret_bv(counts: &Counts) -> AlgoResult<BitString> {
    total_shots(counts)?;
    let (bits, count) = counts
        .most_frequent()
        .ok_or_else(|| AlgoError::InvalidInput("counts are empty".to_string()))?;
    let secret = BitString::parse(bits).map_err(|_| {
        AlgoError::InvalidInput(format!("measured key {bits:?} is not a bit-string"))
    })?;
    debug!(%secret, count, "Interpreted Bernstein-Vazirani counts");
    Ok(secret)
}

/// Deutsch-Jozsa verdict over `n` input qubits.
///
/// Constant when the all-zero string takes strictly more than
/// [`DJ_CONSTANT_THRESHOLD`] of the shots, balanced otherwise.
pub fn interpret_dj(counts: &Counts, n: u32) -> AlgoResult<DjVerdict> {
    require_positive(n, "Deutsch-Jozsa qubit count")?;
    let total = total_shots(counts)?;
    let zeros = BitString::zeros(n)?;
    let ratio = counts.get(zeros.as_str()) as f64 / total as f64;

    let verdict = if ratio > DJ_CONSTANT_THRESHOLD {
        DjVerdict::Constant
    } else {
        DjVerdict::Balanced
    };
    debug!(ratio, %verdict, "Interpreted Deutsch-Jozsa counts");
    Ok(verdict)
}

/// Observed probability of `target` in a Grover run.
pub fn interpret_grover(counts: &Counts, target: &str) -> AlgoResult<f64> {
    let target = BitString::parse(target)?;
    let total = total_shots(counts)?;
    Ok(counts.get(target.as_str()) as f64 / total as f64)
}

/// Teleportation fidelity: the fraction of shots whose classical bit 2 (the
/// first character of each key) equals `payload`.
pub fn interpret_teleportation(counts: &Counts, payload: bool) -> AlgoResult<f64> {
    let total = total_shots(counts)?;
    let expected = if payload { '1' } else { '0' };

    let mut matching = 0u64;
    for (bits, &count) in counts.iter() {
        if bits.len() != 3 {
            return Err(AlgoError::InvalidInput(format!(
                "teleportation key {bits:?} does not have 3 bits"
            )));
        }
        if bits.starts_with(expected) {
            matching += count;
        }
    }
    Ok(matching as f64 / total as f64)
}
