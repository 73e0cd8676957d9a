//! Network upgrade activation table.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::ParamsError;

/// Network upgrades in activation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum UpgradeIndex {
    BaseSprout,
    TestDummy,
    Overwinter,
    Sapling,
}

pub const MAX_NETWORK_UPGRADES: usize = 4;

impl UpgradeIndex {
    pub const ALL: [UpgradeIndex; MAX_NETWORK_UPGRADES] = [
        UpgradeIndex::BaseSprout,
        UpgradeIndex::TestDummy,
        UpgradeIndex::Overwinter,
        UpgradeIndex::Sapling,
    ];

    pub fn name(self) -> &'static str {
        UPGRADE_INFO[self as usize].name
    }

    /// Consensus branch id committed to by transactions in this epoch.
    pub fn branch_id(self) -> u32 {
        UPGRADE_INFO[self as usize].branch_id
    }
}

impl fmt::Display for UpgradeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UpgradeIndex {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s.chars().filter(|c| !matches!(c, ' ' | '-' | '_')).collect();
        UpgradeIndex::ALL
            .into_iter()
            .find(|idx| idx.name().replace(' ', "").eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| ParamsError::UnknownUpgrade(s.to_string()))
    }
}

struct UpgradeInfo {
    branch_id: u32,
    name: &'static str,
}

const UPGRADE_INFO: [UpgradeInfo; MAX_NETWORK_UPGRADES] = [
    UpgradeInfo { branch_id: 0, name: "Sprout" },
    UpgradeInfo { branch_id: 0x7473_6554, name: "Test dummy" },
    UpgradeInfo { branch_id: 0x5ba8_1b19, name: "Overwinter" },
    UpgradeInfo { branch_id: 0x76b8_09bb, name: "Sapling" },
];

/// Height at which an upgrade takes effect.
///
/// `always()` is active from genesis; `never()` is never reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Activation(u64);

impl Activation {
    const ALWAYS: u64 = 0;
    const NEVER: u64 = u64::MAX;

    pub const fn at(height: u64) -> Self {
        Self(height)
    }

    pub const fn always() -> Self {
        Self(Self::ALWAYS)
    }

    pub const fn never() -> Self {
        Self(Self::NEVER)
    }

    pub fn is_never(self) -> bool {
        self.0 == Self::NEVER
    }

    /// Concrete activation height, `None` when never scheduled.
    pub fn height(self) -> Option<u64> {
        (!self.is_never()).then_some(self.0)
    }

    pub fn is_active(self, height: u64) -> bool {
        !self.is_never() && height >= self.0
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.height() {
            None => f.write_str("never"),
            Some(0) => f.write_str("always"),
            Some(h) => write!(f, "{}", h),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetworkUpgrade {
    pub protocol_version: u32,
    pub activation: Activation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UpgradeState {
    Disabled,
    Pending,
    Active,
}

/// Activation schedule of every upgrade on one network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeTable {
    upgrades: [NetworkUpgrade; MAX_NETWORK_UPGRADES],
}

impl UpgradeTable {
    pub fn new(upgrades: [NetworkUpgrade; MAX_NETWORK_UPGRADES]) -> Self {
        Self { upgrades }
    }

    pub fn get(&self, idx: UpgradeIndex) -> &NetworkUpgrade {
        &self.upgrades[idx as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (UpgradeIndex, &NetworkUpgrade)> {
        UpgradeIndex::ALL.into_iter().zip(self.upgrades.iter())
    }

    /// Replace an activation height. The base epoch is fixed.
    ///
    /// Only reachable through `NetworkProfile::update_upgrade`, which
    /// checks that the network allows it.
    pub(crate) fn set_activation(&mut self, idx: UpgradeIndex, activation: Activation) -> Result<(), ParamsError> {
        if idx == UpgradeIndex::BaseSprout {
            return Err(ParamsError::UpgradeIndexNotOverridable(idx));
        }
        self.upgrades[idx as usize].activation = activation;
        Ok(())
    }

    pub fn state(&self, height: u64, idx: UpgradeIndex) -> UpgradeState {
        let activation = self.get(idx).activation;
        if activation.is_never() {
            UpgradeState::Disabled
        } else if activation.is_active(height) {
            UpgradeState::Active
        } else {
            UpgradeState::Pending
        }
    }

    pub fn is_active(&self, height: u64, idx: UpgradeIndex) -> bool {
        self.state(height, idx) == UpgradeState::Active
    }

    /// True only at the exact height the upgrade activates. Upgrades active
    /// from genesis have no activation block.
    pub fn is_activation_height(&self, height: u64, idx: UpgradeIndex) -> bool {
        if idx == UpgradeIndex::BaseSprout {
            return false;
        }
        matches!(self.get(idx).activation.height(), Some(h) if h == height && h != 0)
    }

    /// Latest upgrade active at `height`.
    pub fn current_epoch(&self, height: u64) -> UpgradeIndex {
        UpgradeIndex::ALL
            .into_iter()
            .rev()
            .find(|idx| self.is_active(height, *idx))
            .unwrap_or(UpgradeIndex::BaseSprout)
    }

    pub fn current_epoch_branch_id(&self, height: u64) -> u32 {
        self.current_epoch(height).branch_id()
    }

    /// Lowest activation height strictly above `height`, if one is scheduled.
    pub fn next_activation_height(&self, height: u64) -> Option<u64> {
        self.iter()
            .skip(1)
            .filter_map(|(_, nu)| nu.activation.height())
            .filter(|h| *h > height)
            .min()
    }
}
