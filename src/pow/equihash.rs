//! Equihash parameter sets and the epochs in which they are valid.
//!
//! A chain moves from one (n, k) pair to another at a configured height.
//! Around the switch both pairs may be accepted for a while; in that band
//! the newer pair is listed first so verifiers try it before falling back.

use serde::Serialize;

/// One Equihash (n, k) parameter pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EquihashParams {
    pub n: u32,
    pub k: u32,
}

pub const EH200_9: EquihashParams = EquihashParams { n: 200, k: 9 };
pub const EH144_5: EquihashParams = EquihashParams { n: 144, k: 5 };
pub const EH48_5: EquihashParams = EquihashParams { n: 48, k: 5 };

impl EquihashParams {
    pub const fn new(n: u32, k: u32) -> Self {
        Self { n, k }
    }

    /// Whether a solver/verifier can be instantiated for this pair.
    pub fn is_acceptable(&self) -> bool {
        self.k > 0
            && self.k < self.n
            && self.n % 8 == 0
            && self.n % (self.k + 1) == 0
            && self.collision_bit_length() + 1 < 32
    }

    pub fn collision_bit_length(&self) -> u32 {
        self.n / (self.k + 1)
    }

    /// Encoded solution length in bytes: 2^k indices of (n/(k+1) + 1) bits.
    pub fn solution_size(&self) -> usize {
        ((1usize << self.k) * (self.collision_bit_length() as usize + 1)) / 8
    }
}

/// The two puzzle epochs of a network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquihashSchedule {
    pub epoch_1: EquihashParams,
    pub epoch_2: EquihashParams,
    /// Last height at which epoch 1 parameters are accepted
    pub epoch_1_end: u64,
    /// First height at which epoch 2 parameters are accepted
    pub epoch_2_start: u64,
}

impl EquihashSchedule {
    /// Parameter sets valid at `height`, preferred set first.
    ///
    /// One entry outside the overlap band; two (epoch 2, then epoch 1)
    /// while both epochs are open.
    pub fn valid_params(&self, height: u64) -> Vec<EquihashParams> {
        if height >= self.epoch_2_start && height > self.epoch_1_end {
            return vec![self.epoch_2];
        }
        if height < self.epoch_2_start {
            return vec![self.epoch_1];
        }
        vec![self.epoch_2, self.epoch_1]
    }

    /// Parameters a miner should use at `height`.
    pub fn preferred(&self, height: u64) -> EquihashParams {
        if height >= self.epoch_2_start {
            self.epoch_2
        } else {
            self.epoch_1
        }
    }

    /// Whether a solution of `len` bytes could satisfy any parameter set
    /// valid at `height`.
    pub fn accepts_solution_size(&self, height: u64, len: usize) -> bool {
        self.valid_params(height).iter().any(|p| p.solution_size() == len)
    }
}
