//! Proof-of-work parameters: retarget algorithm selection and the compact
//! target encoding used in block headers.
//!
//! Two retarget regimes exist over the life of a chain:
//!
//!   Legacy: averaging-window retarget. The mean target of the last
//!     `averaging_window` blocks is scaled by the actual timespan, clamped to
//!     `max_adjust_up` / `max_adjust_down` percent of the expected timespan.
//!
//!   Lwma: linearly weighted moving average over `averaging_window` solve
//!     times, newest blocks weighted heaviest, solve times optionally clamped.
//!
//! The switch happens at a single height per network. The activation height
//! itself already belongs to the new regime.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::Serialize;

pub mod equihash;

/// Difficulty retarget algorithm governing a height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DifficultyAlgorithm {
    Legacy,
    Lwma,
}

/// Parameters of the legacy averaging-window retarget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyRetarget {
    pub averaging_window: i64,
    /// Percent
    pub max_adjust_down: i64,
    /// Percent
    pub max_adjust_up: i64,
    pub target_spacing: i64,
}

impl LegacyRetarget {
    pub fn averaging_window_timespan(&self) -> i64 {
        self.averaging_window * self.target_spacing
    }

    pub fn min_actual_timespan(&self) -> i64 {
        (self.averaging_window_timespan() * (100 - self.max_adjust_up)) / 100
    }

    pub fn max_actual_timespan(&self) -> i64 {
        (self.averaging_window_timespan() * (100 + self.max_adjust_down)) / 100
    }
}

/// Parameters of the weighted moving average retarget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LwmaRetarget {
    /// First height retargeted with this algorithm
    pub activation_height: u64,
    pub target_spacing: i64,
    pub averaging_window: i64,
    pub adjusted_weight: i64,
    pub min_denominator: i64,
    pub solvetime_limitation: bool,
}

/// Select the retarget algorithm for `height`.
pub fn algorithm_for(height: u64, lwma_activation_height: u64) -> DifficultyAlgorithm {
    if height >= lwma_activation_height {
        DifficultyAlgorithm::Lwma
    } else {
        DifficultyAlgorithm::Legacy
    }
}

/// Largest 256-bit value.
pub fn max_uint256() -> BigUint {
    (BigUint::one() << 256u32) - BigUint::one()
}

/// Interpret a 32-byte hash in internal byte order as a number.
pub fn hash_to_uint(hash: &[u8; 32]) -> BigUint {
    BigUint::from_bytes_le(hash)
}

/// Decode compact "nBits" into a target.
///
/// Returns `None` for negative or overflowing encodings, which no valid
/// header may carry.
pub fn compact_to_target(bits: u32) -> Option<BigUint> {
    let size = bits >> 24;
    let mantissa = bits & 0x007f_ffff;
    let negative = bits & 0x0080_0000 != 0;

    let target = if size <= 3 {
        BigUint::from(mantissa >> (8 * (3 - size)))
    } else {
        BigUint::from(mantissa) << (8 * (size - 3))
    };

    if negative && !target.is_zero() {
        return None;
    }
    if target.bits() > 256 {
        return None;
    }
    Some(target)
}

/// Encode a target in compact form (the inverse of [`compact_to_target`]
/// up to mantissa precision).
pub fn target_to_compact(target: &BigUint) -> u32 {
    let mut size = ((target.bits() + 7) / 8) as u32;
    let mut compact: u32 = if size <= 3 {
        let low = target.iter_u64_digits().next().unwrap_or(0);
        (low << (8 * (3 - size))) as u32
    } else {
        let shifted: BigUint = target >> (8 * (size - 3));
        shifted.iter_u32_digits().next().unwrap_or(0)
    };
    // Keep the sign bit clear by moving one byte into the exponent.
    if compact & 0x0080_0000 != 0 {
        compact >>= 8;
        size += 1;
    }
    compact | (size << 24)
}
