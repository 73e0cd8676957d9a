/// Bitzec Chain Parameters
/// All consensus-critical constants are defined here, one profile per network.
use num_bigint::BigUint;
use num_traits::Zero;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::core::founders::FoundersReward;
use crate::core::genesis::{GenesisSpec, GENESIS_TIME};
use crate::core::script::Script;
use crate::core::types::*;
use crate::core::upgrades::{Activation, NetworkUpgrade, UpgradeIndex, UpgradeTable};
use crate::crypto::address::{Base58Prefixes, Bech32Hrps};
use crate::error::ParamsError;
use crate::pow::equihash::{EquihashParams, EquihashSchedule, EH144_5, EH200_9, EH48_5};
use crate::pow::{self, DifficultyAlgorithm, LegacyRetarget, LwmaRetarget};

// ─── Network Kind ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkKind {
    Main,
    Test,
    Regtest,
}

impl NetworkKind {
    pub const ALL: [NetworkKind; 3] = [NetworkKind::Main, NetworkKind::Test, NetworkKind::Regtest];

    pub fn network_id(self) -> &'static str {
        match self {
            NetworkKind::Main => "main",
            NetworkKind::Test => "test",
            NetworkKind::Regtest => "regtest",
        }
    }

    /// Message start bytes framing every peer message on this network.
    pub fn magic(self) -> [u8; 4] {
        match self {
            NetworkKind::Main => MAIN_MAGIC,
            NetworkKind::Test => TEST_MAGIC,
            NetworkKind::Regtest => REGTEST_MAGIC,
        }
    }

    /// Which network a peer message belongs to, by its start bytes.
    pub fn from_magic(magic: [u8; 4]) -> Option<NetworkKind> {
        NetworkKind::ALL.into_iter().find(|k| k.magic() == magic)
    }
}

impl fmt::Display for NetworkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.network_id())
    }
}

impl FromStr for NetworkKind {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "main" | "mainnet" => Ok(NetworkKind::Main),
            "test" | "testnet" => Ok(NetworkKind::Test),
            "regtest" => Ok(NetworkKind::Regtest),
            _ => Err(ParamsError::UnknownNetwork(s.to_string())),
        }
    }
}

/// Network magic bytes
pub const MAIN_MAGIC: [u8; 4] = [0x21, 0xe8, 0x27, 0x61];
pub const TEST_MAGIC: [u8; 4] = [0xfb, 0x1a, 0xf7, 0xbf];
pub const REGTEST_MAGIC: [u8; 4] = [0xaa, 0xe7, 0x3f, 0x5f];

// ─── Checkpoints ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    pub height: u64,
    pub hash: Hash256,
}

/// Trusted (height, hash) pairs plus sync-progress hints.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckpointData {
    /// Ascending by height
    pub checkpoints: Vec<Checkpoint>,
    /// UNIX time of the last checkpoint block
    pub last_checkpoint_time: i64,
    /// Transactions between genesis and the last checkpoint
    pub total_transactions: u64,
    /// Estimated transactions per day after the last checkpoint
    pub transactions_per_day: f64,
}

impl CheckpointData {
    pub fn checkpoint_at(&self, height: u64) -> Option<&Hash256> {
        self.checkpoints.iter().find(|c| c.height == height).map(|c| &c.hash)
    }

    /// False only when `height` is checkpointed with a different hash.
    pub fn check_block(&self, height: u64, hash: &Hash256) -> bool {
        self.checkpoint_at(height).map_or(true, |expected| expected == hash)
    }

    pub fn last_checkpoint_height(&self) -> u64 {
        self.checkpoints.last().map_or(0, |c| c.height)
    }
}

// ─── Consensus Parameters ────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ConsensusParams {
    pub hash_genesis_block: Hash256,
    /// Coinbase outputs must be sent to the shielded pool before spending
    pub coinbase_must_be_protected: bool,
    pub subsidy_slow_start_interval: u64,
    pub subsidy_halving_interval: u64,
    pub majority_enforce_block_upgrade: u32,
    pub majority_reject_block_outdated: u32,
    pub majority_window: u32,
    upgrades: UpgradeTable,
    /// Easiest allowed target
    pub pow_limit: BigUint,
    pub pow_no_retargeting: bool,
    pub legacy: LegacyRetarget,
    pub lwma: LwmaRetarget,
    /// Chains with less total work are not considered during sync
    pub minimum_chain_work: BigUint,
}

impl ConsensusParams {
    pub fn upgrades(&self) -> &UpgradeTable {
        &self.upgrades
    }

    pub fn subsidy_slow_start_shift(&self) -> u64 {
        self.subsidy_slow_start_interval / 2
    }

    pub fn last_founders_reward_block_height(&self) -> u64 {
        self.subsidy_halving_interval + self.subsidy_slow_start_shift() - 1
    }

    pub fn difficulty_algorithm(&self, height: u64) -> DifficultyAlgorithm {
        pow::algorithm_for(height, self.lwma.activation_height)
    }

    pub fn target_spacing_at(&self, height: u64) -> i64 {
        match self.difficulty_algorithm(height) {
            DifficultyAlgorithm::Legacy => self.legacy.target_spacing,
            DifficultyAlgorithm::Lwma => self.lwma.target_spacing,
        }
    }

    pub fn pow_limit_compact(&self) -> u32 {
        pow::target_to_compact(&self.pow_limit)
    }

    pub fn is_upgrade_active(&self, height: u64, idx: UpgradeIndex) -> bool {
        self.upgrades.is_active(height, idx)
    }

    /// Summing `averaging_window` targets must not overflow 256 bits.
    fn check_pow_limit(&self, network: NetworkKind) -> Result<(), ParamsError> {
        let too_easy = self.pow_limit.is_zero()
            || pow::max_uint256() / &self.pow_limit < BigUint::from(self.legacy.averaging_window.max(0) as u64);
        if too_easy {
            tracing::error!("❌ {} pow limit too easy for averaging window", network);
            return Err(ParamsError::PowLimitOverflow {
                network,
                averaging_window: self.legacy.averaging_window,
            });
        }
        Ok(())
    }
}

// ─── Network Profile ─────────────────────────────────────────────────

/// Complete, validated parameter set of one network.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkProfile {
    pub kind: NetworkKind,
    pub currency_units: &'static str,
    pub bip44_coin_type: u32,
    pub consensus: ConsensusParams,
    pub equihash: EquihashSchedule,
    pub message_start: [u8; 4],
    pub alert_pubkey: Vec<u8>,
    pub default_port: u16,
    pub prune_after_height: u64,
    /// Height from which the stricter block time rule applies
    pub new_time_rule_height: Option<u64>,
    pub base58_prefixes: Base58Prefixes,
    pub bech32_hrps: Bech32Hrps,
    pub dns_seeds: &'static [&'static str],
    pub fixed_seeds: &'static [&'static str],
    pub mining_requires_peers: bool,
    pub default_consistency_checks: bool,
    pub require_standard: bool,
    pub mine_blocks_on_demand: bool,
    pub testnet_to_be_deprecated_field_rpc: bool,
    pub checkpoints: CheckpointData,
    pub founders_reward: FoundersReward,
    pub genesis: Block,
    /// Upgrade heights may be overridden (test orchestration only)
    mutable_upgrade_heights: bool,
}

impl NetworkProfile {
    /// Build and validate the profile of `kind` from its literal tables.
    pub fn new(kind: NetworkKind) -> Result<Self, ParamsError> {
        Self::with_genesis(kind, &GenesisSpec::for_network(kind)?)
    }

    /// Build `kind` with explicit genesis inputs; fails unless they
    /// reproduce the expected genesis.
    pub fn with_genesis(kind: NetworkKind, genesis: &GenesisSpec) -> Result<Self, ParamsError> {
        let template = match kind {
            NetworkKind::Main => main_template()?,
            NetworkKind::Test => test_template()?,
            NetworkKind::Regtest => regtest_template()?,
        };
        template.validate(genesis)
    }

    pub fn network_id(&self) -> &'static str {
        self.kind.network_id()
    }

    pub fn genesis_hash(&self) -> Hash256 {
        self.consensus.hash_genesis_block
    }

    pub fn allows_upgrade_overrides(&self) -> bool {
        self.mutable_upgrade_heights
    }

    /// Override an upgrade activation height. Only networks built with
    /// mutable upgrade heights (regtest) accept this, and it must happen
    /// before the profile is shared with validation workers.
    pub fn update_upgrade(&mut self, idx: UpgradeIndex, activation: Activation) -> Result<(), ParamsError> {
        if !self.mutable_upgrade_heights {
            return Err(ParamsError::UpgradeOverrideNotPermitted { network: self.kind });
        }
        self.consensus.upgrades.set_activation(idx, activation)?;
        tracing::warn!("⚠️  {} activation height of {} set to {}", self.kind, idx, activation);
        Ok(())
    }

    /// Force the coinbase protection rule (regtest policy override).
    pub fn set_coinbase_must_be_protected(&mut self) {
        self.consensus.coinbase_must_be_protected = true;
    }

    pub fn difficulty_algorithm(&self, height: u64) -> DifficultyAlgorithm {
        self.consensus.difficulty_algorithm(height)
    }

    /// Equihash parameter sets valid at `height`, preferred first.
    pub fn equihash_params_at(&self, height: u64) -> Vec<EquihashParams> {
        self.equihash.valid_params(height)
    }

    pub fn founders_reward_address_at_height(&self, height: u64) -> &'static str {
        self.founders_reward.address_at_height(height)
    }

    pub fn founders_reward_script_at_height(&self, height: u64) -> &Script {
        self.founders_reward.script_at_height(height)
    }

    pub fn founders_reward_address_at_index(&self, index: usize) -> &'static str {
        self.founders_reward.address_at_index(index)
    }

    pub fn summary(&self) -> ProfileSummary {
        ProfileSummary {
            network: self.kind,
            currency_units: self.currency_units,
            bip44_coin_type: self.bip44_coin_type,
            magic: hex::encode(self.message_start),
            default_port: self.default_port,
            genesis_hash: hash256_to_hex(&self.genesis_hash()),
            genesis_merkle_root: hash256_to_hex(&self.genesis.header.merkle_root),
            pow_limit: format!("{:064x}", self.consensus.pow_limit),
            pow_limit_compact: format!("{:#010x}", self.consensus.pow_limit_compact()),
            pow_no_retargeting: self.consensus.pow_no_retargeting,
            lwma_activation_height: self.consensus.lwma.activation_height,
            equihash: self.equihash.clone(),
            founders_addresses: self.founders_reward.len(),
            last_founders_reward_height: self.founders_reward.last_height(),
            founders_address_change_interval: self.founders_reward.address_change_interval(),
            coinbase_must_be_protected: self.consensus.coinbase_must_be_protected,
            upgrades: self
                .consensus
                .upgrades
                .iter()
                .map(|(idx, nu)| UpgradeSummary {
                    name: idx.name(),
                    protocol_version: nu.protocol_version,
                    branch_id: format!("{:08x}", idx.branch_id()),
                    activation: nu.activation.to_string(),
                })
                .collect(),
            checkpoints: self.checkpoints.checkpoints.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpgradeSummary {
    pub name: &'static str,
    pub protocol_version: u32,
    pub branch_id: String,
    pub activation: String,
}

/// Read-only view of a profile for display.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummary {
    pub network: NetworkKind,
    pub currency_units: &'static str,
    pub bip44_coin_type: u32,
    pub magic: String,
    pub default_port: u16,
    pub genesis_hash: String,
    pub genesis_merkle_root: String,
    pub pow_limit: String,
    pub pow_limit_compact: String,
    pub pow_no_retargeting: bool,
    pub lwma_activation_height: u64,
    pub equihash: EquihashSchedule,
    pub founders_addresses: usize,
    pub last_founders_reward_height: u64,
    pub founders_address_change_interval: u64,
    pub coinbase_must_be_protected: bool,
    pub upgrades: Vec<UpgradeSummary>,
    pub checkpoints: usize,
}

// ─── Construction & Validation ───────────────────────────────────────

/// Unvalidated profile literals. The genesis-derived fields are filled in
/// by [`ProfileTemplate::validate`].
struct ProfileTemplate {
    kind: NetworkKind,
    currency_units: &'static str,
    bip44_coin_type: u32,
    consensus: ConsensusParams,
    equihash: EquihashSchedule,
    alert_pubkey: &'static str,
    default_port: u16,
    prune_after_height: u64,
    new_time_rule_height: Option<u64>,
    base58_prefixes: Base58Prefixes,
    bech32_hrps: Bech32Hrps,
    dns_seeds: &'static [&'static str],
    fixed_seeds: &'static [&'static str],
    mining_requires_peers: bool,
    default_consistency_checks: bool,
    require_standard: bool,
    mine_blocks_on_demand: bool,
    testnet_to_be_deprecated_field_rpc: bool,
    /// Checkpoints after genesis; genesis is always checkpoint 0
    later_checkpoints: Vec<Checkpoint>,
    last_checkpoint_time: i64,
    total_transactions: u64,
    transactions_per_day: f64,
    founders_addresses: &'static [&'static str],
    mutable_upgrade_heights: bool,
}

impl ProfileTemplate {
    /// Startup validation pass. Every check here guards a value other
    /// components rely on bit for bit.
    fn validate(self, genesis_spec: &GenesisSpec) -> Result<NetworkProfile, ParamsError> {
        let kind = self.kind;
        let mut consensus = self.consensus;

        check_magics_distinct(&NetworkKind::ALL)?;
        consensus.check_pow_limit(kind)?;

        for eh in [self.equihash.epoch_1, self.equihash.epoch_2] {
            if !eh.is_acceptable() {
                return Err(ParamsError::InvalidEquihashParams { network: kind, n: eh.n, k: eh.k });
            }
        }
        // Both epochs are valid at exactly one height
        if self.equihash.epoch_2_start != self.equihash.epoch_1_end {
            tracing::error!("❌ {} equihash epoch boundary mismatch", kind);
            return Err(ParamsError::EpochBoundaryMismatch {
                network: kind,
                epoch_1_end: self.equihash.epoch_1_end,
                epoch_2_start: self.equihash.epoch_2_start,
            });
        }

        let genesis = genesis_spec.build_verified(kind)?;

        let solution_len = genesis.header.solution.len();
        if !self.equihash.accepts_solution_size(0, solution_len) {
            return Err(ParamsError::SolutionSizeMismatch {
                network: kind,
                expected: self.equihash.epoch_1.solution_size(),
                actual: solution_len,
            });
        }

        match pow::compact_to_target(genesis.header.bits) {
            Some(target) if target <= consensus.pow_limit => {}
            _ => {
                tracing::error!("❌ {} genesis bits exceed pow limit", kind);
                return Err(ParamsError::GenesisTargetAboveLimit { network: kind, bits: genesis.header.bits });
            }
        }

        let founders_reward = FoundersReward::new(
            kind,
            self.founders_addresses,
            consensus.last_founders_reward_block_height(),
            &self.base58_prefixes,
        )?;

        let genesis_hash = genesis.hash();
        consensus.hash_genesis_block = genesis_hash;

        let mut checkpoints = vec![Checkpoint { height: 0, hash: genesis_hash }];
        checkpoints.extend(self.later_checkpoints);

        let alert_pubkey =
            hex::decode(self.alert_pubkey).map_err(|_| ParamsError::InvalidHex(self.alert_pubkey.to_string()))?;

        Ok(NetworkProfile {
            kind,
            currency_units: self.currency_units,
            bip44_coin_type: self.bip44_coin_type,
            consensus,
            equihash: self.equihash,
            message_start: kind.magic(),
            alert_pubkey,
            default_port: self.default_port,
            prune_after_height: self.prune_after_height,
            new_time_rule_height: self.new_time_rule_height,
            base58_prefixes: self.base58_prefixes,
            bech32_hrps: self.bech32_hrps,
            dns_seeds: self.dns_seeds,
            fixed_seeds: self.fixed_seeds,
            mining_requires_peers: self.mining_requires_peers,
            default_consistency_checks: self.default_consistency_checks,
            require_standard: self.require_standard,
            mine_blocks_on_demand: self.mine_blocks_on_demand,
            testnet_to_be_deprecated_field_rpc: self.testnet_to_be_deprecated_field_rpc,
            checkpoints: CheckpointData {
                checkpoints,
                last_checkpoint_time: self.last_checkpoint_time,
                total_transactions: self.total_transactions,
                transactions_per_day: self.transactions_per_day,
            },
            founders_reward,
            genesis,
            mutable_upgrade_heights: self.mutable_upgrade_heights,
        })
    }
}

/// Peers are told apart by message start bytes alone.
fn check_magics_distinct(kinds: &[NetworkKind]) -> Result<(), ParamsError> {
    for (i, first) in kinds.iter().enumerate() {
        if let Some(second) = kinds[i + 1..].iter().find(|k| k.magic() == first.magic()) {
            tracing::error!("❌ {} and {} share message start bytes", first, second);
            return Err(ParamsError::MagicCollision { first: *first, second: *second });
        }
    }
    Ok(())
}

fn uint_from_hex(text: &str) -> Result<BigUint, ParamsError> {
    Ok(pow::hash_to_uint(&hash256_from_hex(text)?))
}

fn upgrade(protocol_version: u32, activation: Activation) -> NetworkUpgrade {
    NetworkUpgrade { protocol_version, activation }
}

const LWMA_TARGET_SPACING: i64 = 60;
const LWMA_AVERAGING_WINDOW: i64 = 75;
const LWMA_ADJUSTED_WEIGHT: i64 = 2280;
const LWMA_MIN_DENOMINATOR: i64 = 10;

fn lwma(activation_height: u64) -> LwmaRetarget {
    LwmaRetarget {
        activation_height,
        target_spacing: LWMA_TARGET_SPACING,
        averaging_window: LWMA_AVERAGING_WINDOW,
        adjusted_weight: LWMA_ADJUSTED_WEIGHT,
        min_denominator: LWMA_MIN_DENOMINATOR,
        solvetime_limitation: true,
    }
}

/// Legacy retarget spacing: 2.5 minutes
const LEGACY_TARGET_SPACING: i64 = 150;

// ─── Main network ────────────────────────────────────────────────────

pub const MAIN_BASE58_PREFIXES: Base58Prefixes = Base58Prefixes::new([
    &[0x1C, 0xB8],             // "t1"
    &[0x1C, 0xBD],             // "t3"
    &[0x80],                   // "5", "K" or "L"
    &[0x04, 0x88, 0xB2, 0x1E], // xpub
    &[0x04, 0x88, 0xAD, 0xE4], // xprv
    &[0x16, 0x9A],             // "zc"
    &[0xA8, 0xAB, 0xD3],       // "ZiVK"
    &[0xAB, 0x36],             // "SK"
]);

pub const MAIN_BECH32_HRPS: Bech32Hrps =
    Bech32Hrps::new(["zs", "zviews", "zivks", "secret-spending-key-main"]);

/// 2-of-3 multisig addresses, one per rotation slot
pub const MAIN_FOUNDERS_ADDRESSES: [&str; 48] = ["t3SAe5q2qTaZyFvQwGDTRLYGVtNpzhi9EyG"; 48];

fn main_template() -> Result<ProfileTemplate, ParamsError> {
    let consensus = ConsensusParams {
        hash_genesis_block: NULL_HASH,
        coinbase_must_be_protected: true,
        subsidy_slow_start_interval: 5_000,
        subsidy_halving_interval: 2_628_000,
        majority_enforce_block_upgrade: 750,
        majority_reject_block_outdated: 950,
        majority_window: 4_000,
        upgrades: UpgradeTable::new([
            upgrade(170_002, Activation::always()),
            upgrade(170_002, Activation::never()),
            upgrade(170_005, Activation::at(1)),
            upgrade(170_007, Activation::at(1)),
        ]),
        pow_limit: uint_from_hex("0007ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff")?,
        pow_no_retargeting: false,
        legacy: LegacyRetarget {
            averaging_window: 17,
            max_adjust_down: 32,
            max_adjust_up: 16,
            target_spacing: LEGACY_TARGET_SPACING,
        },
        lwma: lwma(10_000),
        minimum_chain_work: uint_from_hex("0x00000000000000000000000000000000000000000000000000281b32ff3198a1")?,
    };

    Ok(ProfileTemplate {
        kind: NetworkKind::Main,
        currency_units: "BZC",
        bip44_coin_type: 133,
        consensus,
        equihash: EquihashSchedule { epoch_1: EH200_9, epoch_2: EH144_5, epoch_1_end: 25_000, epoch_2_start: 25_000 },
        alert_pubkey: concat!(
            "04b7ecf0baa90495ceb4e4090f6b2fd37eec1e9c85fac68a487f3ce11589692e4a",
            "317479316ee814e066638e1db54e37a10689b70286e6315b1087b6615d179264",
        ),
        default_port: 8733,
        prune_after_height: 100_000,
        new_time_rule_height: Some(25_000),
        base58_prefixes: MAIN_BASE58_PREFIXES,
        bech32_hrps: MAIN_BECH32_HRPS,
        dns_seeds: &[],
        fixed_seeds: &[],
        mining_requires_peers: false,
        default_consistency_checks: false,
        require_standard: true,
        mine_blocks_on_demand: false,
        testnet_to_be_deprecated_field_rpc: false,
        later_checkpoints: vec![],
        last_checkpoint_time: GENESIS_TIME as i64,
        total_transactions: 0,
        transactions_per_day: 0.0,
        founders_addresses: &MAIN_FOUNDERS_ADDRESSES,
        mutable_upgrade_heights: false,
    })
}

// ─── Test network ────────────────────────────────────────────────────

pub const TEST_BASE58_PREFIXES: Base58Prefixes = Base58Prefixes::new([
    &[0x1D, 0x25],             // "tm"
    &[0x1C, 0xBA],             // "t2"
    &[0xEF],                   // "9" or "c"
    &[0x04, 0x35, 0x87, 0xCF], // tpub
    &[0x04, 0x35, 0x83, 0x94], // tprv
    &[0x16, 0xB6],             // "zt"
    &[0xA8, 0xAC, 0x0C],       // "ZiVt"
    &[0xAC, 0x08],             // "ST"
]);

pub const TEST_BECH32_HRPS: Bech32Hrps =
    Bech32Hrps::new(["ztestsapling", "zviewtestsapling", "zivktestsapling", "secret-spending-key-test"]);

/// 2-of-3 multisig addresses, one per rotation slot
pub const TEST_FOUNDERS_ADDRESSES: [&str; 48] = [
    "t2UNzUUx8mWBCRYPRezvA363EYXyEpHokyi", "t2N9PH9Wk9xjqYg9iin1Ua3aekJqfAtE543",
    "t2NGQjYMQhFndDHguvUw4wZdNdsssA6K7x2", "t2ENg7hHVqqs9JwU5cgjvSbxnT2a9USNfhy",
    "t2BkYdVCHzvTJJUTx4yZB8qeegD8QsPx8bo", "t2J8q1xH1EuigJ52MfExyyjYtN3VgvshKDf",
    "t2Crq9mydTm37kZokC68HzT6yez3t2FBnFj", "t2EaMPUiQ1kthqcP5UEkF42CAFKJqXCkXC9",
    "t2F9dtQc63JDDyrhnfpzvVYTJcr57MkqA12", "t2LPirmnfYSZc481GgZBa6xUGcoovfytBnC",
    "t26xfxoSw2UV9Pe5o3C8V4YybQD4SESfxtp", "t2D3k4fNdErd66YxtvXEdft9xuLoKD7CcVo",
    "t2DWYBkxKNivdmsMiivNJzutaQGqmoRjRnL", "t2C3kFF9iQRxfc4B9zgbWo4dQLLqzqjpuGQ",
    "t2MnT5tzu9HSKcppRyUNwoTp8MUueuSGNaB", "t2AREsWdoW1F8EQYsScsjkgqobmgrkKeUkK",
    "t2Vf4wKcJ3ZFtLj4jezUUKkwYR92BLHn5UT", "t2K3fdViH6R5tRuXLphKyoYXyZhyWGghDNY",
    "t2VEn3KiKyHSGyzd3nDw6ESWtaCQHwuv9WC", "t2F8XouqdNMq6zzEvxQXHV1TjwZRHwRg8gC",
    "t2BS7Mrbaef3fA4xrmkvDisFVXVrRBnZ6Qj", "t2FuSwoLCdBVPwdZuYoHrEzxAb9qy4qjbnL",
    "t2SX3U8NtrT6gz5Db1AtQCSGjrpptr8JC6h", "t2V51gZNSoJ5kRL74bf9YTtbZuv8Fcqx2FH",
    "t2FyTsLjjdm4jeVwir4xzj7FAkUidbr1b4R", "t2EYbGLekmpqHyn8UBF6kqpahrYm7D6N1Le",
    "t2NQTrStZHtJECNFT3dUBLYA9AErxPCmkka", "t2GSWZZJzoesYxfPTWXkFn5UaxjiYxGBU2a",
    "t2RpffkzyLRevGM3w9aWdqMX6bd8uuAK3vn", "t2JzjoQqnuXtTGSN7k7yk5keURBGvYofh1d",
    "t2AEefc72ieTnsXKmgK2bZNckiwvZe3oPNL", "t2NNs3ZGZFsNj2wvmVd8BSwSfvETgiLrD8J",
    "t2ECCQPVcxUCSSQopdNquguEPE14HsVfcUn", "t2JabDUkG8TaqVKYfqDJ3rqkVdHKp6hwXvG",
    "t2FGzW5Zdc8Cy98ZKmRygsVGi6oKcmYir9n", "t2DUD8a21FtEFn42oVLp5NGbogY13uyjy9t",
    "t2UjVSd3zheHPgAkuX8WQW2CiC9xHQ8EvWp", "t2TBUAhELyHUn8i6SXYsXz5Lmy7kDzA1uT5",
    "t2Tz3uCyhP6eizUWDc3bGH7XUC9GQsEyQNc", "t2NysJSZtLwMLWEJ6MH3BsxRh6h27mNcsSy",
    "t2KXJVVyyrjVxxSeazbY9ksGyft4qsXUNm9", "t2J9YYtH31cveiLZzjaE4AcuwVho6qjTNzp",
    "t2QgvW4sP9zaGpPMH1GRzy7cpydmuRfB4AZ", "t2NDTJP9MosKpyFPHJmfjc5pGCvAU58XGa4",
    "t29pHDBWq7qN4EjwSEHg8wEqYe9pkmVrtRP", "t2Ez9KM8VJLuArcxuEkNRAkhNvidKkzXcjJ",
    "t2D5y7J5fpXajLbGrMBQkFg2mFN8fo3n8cX", "t2UV2wr1PTaUiybpkV3FdSdGxUJeZdZztyt",
];

fn test_template() -> Result<ProfileTemplate, ParamsError> {
    let consensus = ConsensusParams {
        hash_genesis_block: NULL_HASH,
        coinbase_must_be_protected: true,
        subsidy_slow_start_interval: 3,
        subsidy_halving_interval: 840_000,
        majority_enforce_block_upgrade: 51,
        majority_reject_block_outdated: 75,
        majority_window: 400,
        upgrades: UpgradeTable::new([
            upgrade(170_002, Activation::always()),
            upgrade(170_002, Activation::never()),
            upgrade(170_003, Activation::at(1)),
            upgrade(170_007, Activation::at(1)),
        ]),
        pow_limit: uint_from_hex("07ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff")?,
        pow_no_retargeting: false,
        legacy: LegacyRetarget {
            averaging_window: 17,
            max_adjust_down: 32,
            max_adjust_up: 16,
            target_spacing: LEGACY_TARGET_SPACING,
        },
        lwma: lwma(1_000),
        minimum_chain_work: uint_from_hex("0x00000000000000000000000000000000000000000000000000000001d0c4d9cd")?,
    };

    Ok(ProfileTemplate {
        kind: NetworkKind::Test,
        currency_units: "TBZC",
        bip44_coin_type: 1,
        consensus,
        equihash: EquihashSchedule { epoch_1: EH200_9, epoch_2: EH144_5, epoch_1_end: 25_000, epoch_2_start: 25_000 },
        alert_pubkey: concat!(
            "044e7a1553392325c871c5ace5d6ad73501c66f4c185d6b0453cf45dec5a1322e7",
            "05c672ac1a27ef7cdaf588c10effdf50ed5f95f85f2f54a5f6159fca394ed0c6",
        ),
        default_port: 18733,
        prune_after_height: 1_000,
        new_time_rule_height: None,
        base58_prefixes: TEST_BASE58_PREFIXES,
        bech32_hrps: TEST_BECH32_HRPS,
        dns_seeds: &[],
        fixed_seeds: &[],
        mining_requires_peers: true,
        default_consistency_checks: false,
        require_standard: true,
        mine_blocks_on_demand: false,
        testnet_to_be_deprecated_field_rpc: true,
        later_checkpoints: vec![],
        last_checkpoint_time: GENESIS_TIME as i64,
        total_transactions: 0,
        transactions_per_day: 0.0,
        founders_addresses: &TEST_FOUNDERS_ADDRESSES,
        mutable_upgrade_heights: false,
    })
}

// ─── Regression test network ─────────────────────────────────────────

pub const REGTEST_BECH32_HRPS: Bech32Hrps = Bech32Hrps::new([
    "zregtestsapling",
    "zviewregtestsapling",
    "zivkregtestsapling",
    "secret-spending-key-regtest",
]);

pub const REGTEST_FOUNDERS_ADDRESSES: [&str; 1] = ["t2FwcEhFdNXuFMv1tcYwaBJtYVtMj8b1uTg"];

fn regtest_template() -> Result<ProfileTemplate, ParamsError> {
    let consensus = ConsensusParams {
        hash_genesis_block: NULL_HASH,
        coinbase_must_be_protected: false,
        subsidy_slow_start_interval: 0,
        subsidy_halving_interval: 150,
        majority_enforce_block_upgrade: 750,
        majority_reject_block_outdated: 950,
        majority_window: 1_000,
        upgrades: UpgradeTable::new([
            upgrade(170_002, Activation::always()),
            upgrade(170_002, Activation::never()),
            upgrade(170_003, Activation::never()),
            upgrade(170_007, Activation::never()),
        ]),
        pow_limit: uint_from_hex("0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f")?,
        pow_no_retargeting: true,
        legacy: LegacyRetarget {
            averaging_window: 17,
            max_adjust_down: 0,
            max_adjust_up: 0,
            target_spacing: LEGACY_TARGET_SPACING,
        },
        lwma: lwma(0),
        minimum_chain_work: uint_from_hex("0x00")?,
    };

    Ok(ProfileTemplate {
        kind: NetworkKind::Regtest,
        currency_units: "REG",
        bip44_coin_type: 1,
        consensus,
        equihash: EquihashSchedule { epoch_1: EH48_5, epoch_2: EH48_5, epoch_1_end: 25_000, epoch_2_start: 25_000 },
        alert_pubkey: "",
        default_port: 18734,
        prune_after_height: 1_000,
        new_time_rule_height: None,
        // Same as testnet
        base58_prefixes: TEST_BASE58_PREFIXES,
        bech32_hrps: REGTEST_BECH32_HRPS,
        dns_seeds: &[],
        fixed_seeds: &[],
        mining_requires_peers: false,
        default_consistency_checks: true,
        require_standard: false,
        mine_blocks_on_demand: true,
        testnet_to_be_deprecated_field_rpc: false,
        later_checkpoints: vec![],
        last_checkpoint_time: 0,
        total_transactions: 0,
        transactions_per_day: 0.0,
        founders_addresses: &REGTEST_FOUNDERS_ADDRESSES,
        mutable_upgrade_heights: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pow::equihash::EH48_5;

    fn profile(kind: NetworkKind) -> NetworkProfile {
        NetworkProfile::new(kind).unwrap()
    }

    #[test]
    fn test_all_profiles_build() {
        for kind in NetworkKind::ALL {
            let p = profile(kind);
            assert_eq!(p.kind, kind);
            assert_eq!(p.network_id(), kind.network_id());
            assert_eq!(p.genesis_hash(), p.genesis.hash());
            assert_eq!(p.checkpoints.checkpoint_at(0), Some(&p.genesis_hash()));
        }
    }

    #[test]
    fn test_expected_genesis_hashes() {
        let expected = [
            (NetworkKind::Main, "00027f370c78f3866b3f90794c4daf6770fa62a6e1cd93ea4f160bcb3e7cc88c"),
            (NetworkKind::Test, "02d8377b5ae8870c318f19b8c6be8ca7fd32fa2b9306dbcf13098be69e6600e8"),
            (NetworkKind::Regtest, "0be024573a7bf8665bafe6e69efd52cefa68eafd3c13957335186889bc80f48e"),
        ];
        for (kind, hash) in expected {
            assert_eq!(hash256_to_hex(&profile(kind).genesis_hash()), hash);
        }
    }

    #[test]
    fn test_perturbed_genesis_fails_construction() {
        let mut spec = GenesisSpec::for_network(NetworkKind::Main).unwrap();
        spec.time += 1;
        let err = NetworkProfile::with_genesis(NetworkKind::Main, &spec).unwrap_err();
        assert!(matches!(err, ParamsError::GenesisHashMismatch { network: NetworkKind::Main, .. }));
    }

    #[test]
    fn test_genesis_of_other_network_rejected() {
        // Testnet genesis hashes to itself but its bits are easier than
        // the mainnet pow limit
        let spec = GenesisSpec::for_network(NetworkKind::Test).unwrap();
        let err = NetworkProfile::with_genesis(NetworkKind::Main, &spec).unwrap_err();
        assert_eq!(err, ParamsError::GenesisTargetAboveLimit { network: NetworkKind::Main, bits: 0x2007ffff });
    }

    #[test]
    fn test_solution_size_must_match_epoch_1() {
        // A regtest-sized solution under mainnet expectations
        let mut spec = GenesisSpec::for_network(NetworkKind::Main).unwrap();
        let regtest = GenesisSpec::for_network(NetworkKind::Regtest).unwrap();
        spec.solution = regtest.solution;
        spec.expected_hash = spec.build().hash();
        let err = NetworkProfile::with_genesis(NetworkKind::Main, &spec).unwrap_err();
        assert_eq!(
            err,
            ParamsError::SolutionSizeMismatch { network: NetworkKind::Main, expected: 1344, actual: 36 }
        );
    }

    #[test]
    fn test_pow_limit_bound_and_compact() {
        for kind in NetworkKind::ALL {
            let c = &profile(kind).consensus;
            let ratio = pow::max_uint256() / &c.pow_limit;
            assert!(ratio >= BigUint::from(c.legacy.averaging_window as u64));
        }
        assert_eq!(profile(NetworkKind::Main).consensus.pow_limit_compact(), 0x1f07ffff);
        assert_eq!(profile(NetworkKind::Test).consensus.pow_limit_compact(), 0x2007ffff);
        assert_eq!(profile(NetworkKind::Regtest).consensus.pow_limit_compact(), 0x200f0f0f);
    }

    #[test]
    fn test_pow_limit_overflow_detected() {
        let mut c = main_template().unwrap().consensus;
        c.pow_limit = pow::max_uint256();
        assert_eq!(
            c.check_pow_limit(NetworkKind::Main),
            Err(ParamsError::PowLimitOverflow { network: NetworkKind::Main, averaging_window: 17 })
        );
    }

    #[test]
    fn test_zero_pow_limit_rejected() {
        let mut c = main_template().unwrap().consensus;
        c.pow_limit = BigUint::zero();
        assert_eq!(
            c.check_pow_limit(NetworkKind::Main),
            Err(ParamsError::PowLimitOverflow { network: NetworkKind::Main, averaging_window: 17 })
        );
    }

    #[test]
    fn test_epoch_boundaries_must_coincide() {
        let main = GenesisSpec::for_network(NetworkKind::Main).unwrap();
        for (end, start) in [(25_000, 25_001), (30_000, 20_000), (24_999, 25_000)] {
            let mut t = main_template().unwrap();
            t.equihash.epoch_1_end = end;
            t.equihash.epoch_2_start = start;
            assert_eq!(
                t.validate(&main).unwrap_err(),
                ParamsError::EpochBoundaryMismatch { network: NetworkKind::Main, epoch_1_end: end, epoch_2_start: start }
            );
        }
    }

    #[test]
    fn test_unacceptable_equihash_params_rejected() {
        let main = GenesisSpec::for_network(NetworkKind::Main).unwrap();
        let mut t = main_template().unwrap();
        t.equihash.epoch_2 = EquihashParams::new(200, 8);
        assert_eq!(
            t.validate(&main).unwrap_err(),
            ParamsError::InvalidEquihashParams { network: NetworkKind::Main, n: 200, k: 8 }
        );
    }

    #[test]
    fn test_magic_collision_detected() {
        assert_eq!(check_magics_distinct(&NetworkKind::ALL), Ok(()));
        assert_eq!(
            check_magics_distinct(&[NetworkKind::Main, NetworkKind::Test, NetworkKind::Main]),
            Err(ParamsError::MagicCollision { first: NetworkKind::Main, second: NetworkKind::Main })
        );
    }

    #[test]
    fn test_last_founders_reward_heights() {
        assert_eq!(profile(NetworkKind::Main).consensus.last_founders_reward_block_height(), 2_630_499);
        assert_eq!(profile(NetworkKind::Test).consensus.last_founders_reward_block_height(), 840_000);
        assert_eq!(profile(NetworkKind::Regtest).consensus.last_founders_reward_block_height(), 149);
    }

    #[test]
    fn test_mainnet_founders_scenario() {
        let p = profile(NetworkKind::Main);
        let last = p.consensus.last_founders_reward_block_height();
        assert_eq!(p.founders_reward.index_at_height(1), 0);
        assert_eq!(p.founders_reward.index_at_height(last), MAIN_FOUNDERS_ADDRESSES.len() - 1);
        assert_eq!(p.founders_reward.address_change_interval(), 54_803);
        assert_eq!(
            hex::encode(p.founders_reward_script_at_height(last)),
            "a91453686718fd3a1cce89ebbaba3493e982ba6e789987"
        );
    }

    #[test]
    fn test_testnet_founders_index_monotonic() {
        let p = profile(NetworkKind::Test);
        let fr = &p.founders_reward;
        let last = fr.last_height();
        let mut prev = 0;
        // every interval boundary plus its neighbours
        let interval = fr.address_change_interval();
        let mut heights: Vec<u64> = vec![1, last];
        for i in 1..=fr.len() as u64 {
            let b = i * interval;
            heights.extend([b - 1, b, b + 1].into_iter().filter(|h| *h >= 1 && *h <= last));
        }
        heights.sort_unstable();
        for h in heights {
            let i = fr.index_at_height(h);
            assert!(i >= prev && i < fr.len(), "height {}", h);
            prev = i;
        }
        assert_eq!(fr.index_at_height(last), 47);
        assert_eq!(p.founders_reward_address_at_height(last), "t2UV2wr1PTaUiybpkV3FdSdGxUJeZdZztyt");
        assert_eq!(p.founders_reward_address_at_index(0), "t2UNzUUx8mWBCRYPRezvA363EYXyEpHokyi");
    }

    #[test]
    fn test_regtest_single_address_rotation() {
        let p = profile(NetworkKind::Regtest);
        for h in 1..=149 {
            assert_eq!(p.founders_reward_address_at_height(h), REGTEST_FOUNDERS_ADDRESSES[0]);
        }
        assert_eq!(
            hex::encode(p.founders_reward_script_at_height(149)),
            "a9146708e6670db0b950dac68031025cc5b63213a49187"
        );
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_founders_past_period_panics() {
        profile(NetworkKind::Regtest).founders_reward_address_at_height(150);
    }

    #[test]
    fn test_difficulty_algorithm_switch() {
        let p = profile(NetworkKind::Main);
        let switch = p.consensus.lwma.activation_height;
        for h in [0, 1, switch - 1] {
            assert_eq!(p.difficulty_algorithm(h), DifficultyAlgorithm::Legacy);
            assert_eq!(p.consensus.target_spacing_at(h), 150);
        }
        for h in [switch, switch + 1, 5_000_000] {
            assert_eq!(p.difficulty_algorithm(h), DifficultyAlgorithm::Lwma);
            assert_eq!(p.consensus.target_spacing_at(h), 60);
        }
        assert_eq!(profile(NetworkKind::Regtest).difficulty_algorithm(0), DifficultyAlgorithm::Lwma);
    }

    #[test]
    fn test_regtest_disables_retargeting() {
        let c = profile(NetworkKind::Regtest).consensus;
        assert!(c.pow_no_retargeting);
        assert_eq!(c.legacy.max_adjust_up, 0);
        assert_eq!(c.legacy.max_adjust_down, 0);
    }

    #[test]
    fn test_equihash_epochs() {
        let p = profile(NetworkKind::Main);
        assert_eq!(p.equihash_params_at(24_999), vec![EH200_9]);
        assert_eq!(p.equihash_params_at(25_000), vec![EH144_5, EH200_9]);
        assert_eq!(p.equihash_params_at(25_001), vec![EH144_5]);
        assert_eq!(profile(NetworkKind::Regtest).equihash_params_at(0), vec![EH48_5]);
    }

    #[test]
    fn test_regtest_upgrade_override() {
        let mut p = profile(NetworkKind::Regtest);
        assert!(!p.consensus.is_upgrade_active(500, UpgradeIndex::Sapling));
        p.update_upgrade(UpgradeIndex::Sapling, Activation::at(100)).unwrap();
        assert_eq!(p.consensus.upgrades().get(UpgradeIndex::Sapling).activation, Activation::at(100));
        assert!(!p.consensus.is_upgrade_active(99, UpgradeIndex::Sapling));
        assert!(p.consensus.is_upgrade_active(100, UpgradeIndex::Sapling));
    }

    #[test]
    fn test_regtest_override_rejects_base_slot() {
        let mut p = profile(NetworkKind::Regtest);
        assert_eq!(
            p.update_upgrade(UpgradeIndex::BaseSprout, Activation::never()),
            Err(ParamsError::UpgradeIndexNotOverridable(UpgradeIndex::BaseSprout))
        );
    }

    #[test]
    fn test_only_regtest_allows_overrides() {
        for kind in [NetworkKind::Main, NetworkKind::Test] {
            let mut p = profile(kind);
            assert!(!p.allows_upgrade_overrides());
            assert_eq!(
                p.update_upgrade(UpgradeIndex::Overwinter, Activation::at(5)),
                Err(ParamsError::UpgradeOverrideNotPermitted { network: kind })
            );
        }
        assert!(profile(NetworkKind::Regtest).allows_upgrade_overrides());
    }

    #[test]
    fn test_mainnet_upgrade_schedule() {
        let p = profile(NetworkKind::Main);
        let upgrades = p.consensus.upgrades();
        assert!(upgrades.is_active(0, UpgradeIndex::BaseSprout));
        assert!(!upgrades.is_active(u64::MAX - 1, UpgradeIndex::TestDummy));
        assert!(upgrades.is_active(1, UpgradeIndex::Overwinter));
        assert_eq!(upgrades.current_epoch(0), UpgradeIndex::BaseSprout);
        assert_eq!(upgrades.current_epoch(1), UpgradeIndex::Sapling);
    }

    #[test]
    fn test_magic_bytes_distinct_and_resolvable() {
        for a in NetworkKind::ALL {
            assert_eq!(NetworkKind::from_magic(a.magic()), Some(a));
            assert_eq!(profile(a).message_start, a.magic());
            for b in NetworkKind::ALL {
                if a != b {
                    assert_ne!(a.magic(), b.magic());
                }
            }
        }
        assert_eq!(NetworkKind::from_magic([0, 0, 0, 0]), None);
    }

    #[test]
    fn test_address_tables() {
        let main = profile(NetworkKind::Main);
        let reg = profile(NetworkKind::Regtest);
        use crate::crypto::address::{Base58Type, Bech32Type};
        assert_eq!(main.base58_prefixes.get(Base58Type::ScriptAddress), &[0x1C, 0xBD]);
        assert_eq!(reg.base58_prefixes.get(Base58Type::ScriptAddress), &[0x1C, 0xBA]);
        assert_eq!(main.bech32_hrps.get(Bech32Type::SaplingPaymentAddress), "zs");
        assert_eq!(reg.bech32_hrps.get(Bech32Type::SaplingSpendingKey), "secret-spending-key-regtest");
    }

    #[test]
    fn test_profile_flags() {
        let main = profile(NetworkKind::Main);
        let test = profile(NetworkKind::Test);
        let reg = profile(NetworkKind::Regtest);
        assert!(main.require_standard && !main.mine_blocks_on_demand && !main.mining_requires_peers);
        assert!(test.mining_requires_peers && test.testnet_to_be_deprecated_field_rpc);
        assert!(reg.mine_blocks_on_demand && !reg.require_standard && reg.default_consistency_checks);
        assert_eq!(main.default_port, 8733);
        assert_eq!(main.new_time_rule_height, Some(25_000));
        assert_eq!(main.alert_pubkey.len(), 65);
        assert!(reg.alert_pubkey.is_empty());
        assert!(main.consensus.coinbase_must_be_protected);
        assert!(!reg.consensus.coinbase_must_be_protected);
    }

    #[test]
    fn test_checkpoint_checks() {
        let p = profile(NetworkKind::Test);
        let genesis = p.genesis_hash();
        assert!(p.checkpoints.check_block(0, &genesis));
        assert!(!p.checkpoints.check_block(0, &NULL_HASH));
        assert!(p.checkpoints.check_block(1, &NULL_HASH));
        assert_eq!(p.checkpoints.last_checkpoint_height(), 0);
    }

    #[test]
    fn test_network_names() {
        assert_eq!("main".parse::<NetworkKind>().unwrap(), NetworkKind::Main);
        assert_eq!("testnet".parse::<NetworkKind>().unwrap(), NetworkKind::Test);
        assert_eq!("REGTEST".parse::<NetworkKind>().unwrap(), NetworkKind::Regtest);
        assert_eq!(
            "signet".parse::<NetworkKind>(),
            Err(ParamsError::UnknownNetwork("signet".to_string()))
        );
    }

    #[test]
    fn test_summary_serializes() {
        let json = serde_json::to_value(profile(NetworkKind::Main).summary()).unwrap();
        assert_eq!(json["network"], "main");
        assert_eq!(json["pow_limit_compact"], "0x1f07ffff");
        assert_eq!(json["founders_addresses"], 48);
        assert_eq!(json["upgrades"][2]["name"], "Overwinter");
    }
}
