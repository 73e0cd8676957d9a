use thiserror::Error;

use crate::core::params::NetworkKind;
use crate::core::upgrades::UpgradeIndex;

/// Fatal configuration and registry errors.
///
/// None of these are recoverable: they mean the hardcoded tables or the
/// caller are wrong, and a node seeing one must refuse to start.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParamsError {
    #[error("{network}: genesis hash mismatch (expected {expected}, computed {computed})")]
    GenesisHashMismatch { network: NetworkKind, expected: String, computed: String },

    #[error("{network}: genesis merkle root mismatch (expected {expected}, computed {computed})")]
    MerkleRootMismatch { network: NetworkKind, expected: String, computed: String },

    #[error("{network}: genesis bits {bits:#010x} do not decode to a target within the pow limit")]
    GenesisTargetAboveLimit { network: NetworkKind, bits: u32 },

    #[error("{network}: max uint / pow limit is below the averaging window of {averaging_window}")]
    PowLimitOverflow { network: NetworkKind, averaging_window: i64 },

    #[error("{network}: {addresses} founders addresses exceed last founders reward height {last_height}")]
    FoundersRotationTooLong { network: NetworkKind, addresses: usize, last_height: u64 },

    #[error("{network}: founders rotation is empty")]
    FoundersRotationEmpty { network: NetworkKind },

    #[error("{network}: founders address {address} is not a valid script address: {reason}")]
    InvalidFoundersAddress { network: NetworkKind, address: String, reason: String },

    #[error("{network}: equihash parameters n={n} k={k} are not acceptable")]
    InvalidEquihashParams { network: NetworkKind, n: u32, k: u32 },

    #[error("{network}: genesis solution is {actual} bytes, epoch 1 expects {expected}")]
    SolutionSizeMismatch { network: NetworkKind, expected: usize, actual: usize },

    #[error("{network}: epoch 1 ends at {epoch_1_end} but epoch 2 starts at {epoch_2_start}")]
    EpochBoundaryMismatch { network: NetworkKind, epoch_1_end: u64, epoch_2_start: u64 },

    #[error("networks {first} and {second} share message start bytes")]
    MagicCollision { first: NetworkKind, second: NetworkKind },

    #[error("{network}: network upgrade heights are fixed on this network")]
    UpgradeOverrideNotPermitted { network: NetworkKind },

    #[error("activation height of {0} cannot be overridden")]
    UpgradeIndexNotOverridable(UpgradeIndex),

    #[error("unknown network upgrade '{0}'")]
    UnknownUpgrade(String),

    #[error("unknown network '{0}'")]
    UnknownNetwork(String),

    #[error("invalid hex literal '{0}'")]
    InvalidHex(String),

    #[error("no network has been selected")]
    NotSelected,

    #[error("network {0} is already selected")]
    AlreadySelected(NetworkKind),
}
