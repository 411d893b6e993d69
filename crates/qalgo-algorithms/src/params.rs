//! Algorithm parameters: validated bit-strings and oracle case tags.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use qalgo_ir::QubitId;

use crate::error::{AlgoError, AlgoResult};

/// A non-empty string over the alphabet `{0, 1}`.
///
/// # Qubit ordering
///
/// Bit-strings are read big-endian, matching the key format of
/// [`Counts`](qalgo_hal::Counts): the first character belongs to the
/// highest-index qubit and the last character to qubit 0. For `"110"` on
/// three qubits, qubit 2 and qubit 1 carry `1` and qubit 0 carries `0`.
/// [`BitString::qubit_bits`] applies this mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitString(String);

impl BitString {
    /// Validate `bits` and wrap it.
    pub fn parse(bits: &str) -> AlgoResult<Self> {
        if bits.is_empty() {
            return Err(AlgoError::InvalidParameter(
                "bit-string must not be empty".into(),
            ));
        }
        if let Some((pos, c)) = bits.char_indices().find(|&(_, c)| c != '0' && c != '1') {
            return Err(AlgoError::InvalidParameter(format!(
                "'{c}' at position {pos} of {bits:?} is not 0 or 1"
            )));
        }
        if u32::try_from(bits.len()).is_err() {
            return Err(AlgoError::InvalidParameter(format!(
                "bit-string of length {} is too long",
                bits.len()
            )));
        }
        Ok(Self(bits.to_string()))
    }

    /// The all-zero string of length `n`.
    pub fn zeros(n: u32) -> AlgoResult<Self> {
        require_positive(n, "bit-string length")?;
        Ok(Self("0".repeat(n as usize)))
    }

    /// Number of bits (always at least one).
    pub fn width(&self) -> u32 {
        // Length was checked against u32 in `parse`.
        self.0.len() as u32
    }

    /// Borrow the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `(qubit, bit)` pairs under the big-endian convention, starting from
    /// qubit 0 (the last character).
    pub fn qubit_bits(&self) -> impl Iterator<Item = (QubitId, bool)> + '_ {
        self.0
            .bytes()
            .rev()
            .enumerate()
            .map(|(i, b)| (QubitId(i as u32), b == b'1'))
    }

    /// Number of `1` bits.
    pub fn count_ones(&self) -> usize {
        self.0.bytes().filter(|&b| b == b'1').count()
    }
}

impl FromStr for BitString {
    type Err = AlgoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BitString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Output value of a constant boolean function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstantValue {
    /// f(x) = 0 for every x.
    Zero,
    /// f(x) = 1 for every x.
    One,
}

impl ConstantValue {
    /// Flip a fair coin.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            ConstantValue::One
        } else {
            ConstantValue::Zero
        }
    }
}

/// Which kind of Deutsch-Jozsa oracle to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DjCase {
    /// f(x) is the parity of x, which is 1 on exactly half the inputs.
    Balanced,
    /// f(x) is the given constant.
    Constant(ConstantValue),
}

/// Answer of a Deutsch-Jozsa run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DjVerdict {
    /// The function was judged constant.
    Constant,
    /// The function was judged balanced.
    Balanced,
}

impl DjCase {
    /// The verdict a noiseless run of this oracle must produce.
    pub fn expected_verdict(self) -> DjVerdict {
        match self {
            DjCase::Balanced => DjVerdict::Balanced,
            DjCase::Constant(_) => DjVerdict::Constant,
        }
    }
}

impl fmt::Display for DjVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DjVerdict::Constant => f.write_str("constant"),
            DjVerdict::Balanced => f.write_str("balanced"),
        }
    }
}

/// Reject a zero qubit count or length.
pub(crate) fn require_positive(n: u32, what: &str) -> AlgoResult<()> {
    if n == 0 {
        return Err(AlgoError::InvalidParameter(format!(
            "{what} must be positive"
        )));
    }
    Ok(())
}
