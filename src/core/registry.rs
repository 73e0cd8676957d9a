//! Process-wide active network profile.
//!
//! Selected exactly once at startup, before any validation or mining code
//! runs. Overrides are applied to the owned profile before it is installed,
//! so everything that can observe the profile sees it fully built.

use once_cell::sync::OnceCell;

use crate::core::params::{NetworkKind, NetworkProfile};
use crate::core::upgrades::{Activation, UpgradeIndex};
use crate::error::ParamsError;

/// Startup options applied while selecting a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectOptions {
    /// Force coinbase protection on regtest
    pub regtest_protect_coinbase: bool,
    /// Activation height overrides; only regtest accepts them
    pub upgrade_overrides: Vec<(UpgradeIndex, Activation)>,
}

/// Single-assignment holder for the active profile.
pub struct Registry {
    current: OnceCell<NetworkProfile>,
}

impl Registry {
    pub const fn new() -> Self {
        Self { current: OnceCell::new() }
    }

    /// Build `kind`, apply `options`, and install it.
    pub fn select(&self, kind: NetworkKind, options: &SelectOptions) -> Result<&NetworkProfile, ParamsError> {
        if let Some(active) = self.current.get() {
            return Err(ParamsError::AlreadySelected(active.kind));
        }

        let mut profile = NetworkProfile::new(kind)?;

        if options.regtest_protect_coinbase && kind == NetworkKind::Regtest {
            profile.set_coinbase_must_be_protected();
            tracing::warn!("⚠️  regtest coinbase protection forced on");
        }
        for (idx, activation) in &options.upgrade_overrides {
            profile.update_upgrade(*idx, *activation)?;
        }

        let mut installed = false;
        let active = self.current.get_or_init(|| {
            installed = true;
            profile
        });
        if !installed {
            // Lost a race with a concurrent selection
            return Err(ParamsError::AlreadySelected(active.kind));
        }

        tracing::info!(
            "🔗 Selected {} network (genesis {})",
            active.kind,
            crate::core::types::hash256_to_hex(&active.genesis_hash())
        );
        Ok(active)
    }

    pub fn get(&self) -> Result<&NetworkProfile, ParamsError> {
        self.current.get().ok_or(ParamsError::NotSelected)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

static ACTIVE: Registry = Registry::new();

/// Select the process-wide network. Fails if one is already selected.
pub fn select_params(kind: NetworkKind, options: &SelectOptions) -> Result<&'static NetworkProfile, ParamsError> {
    ACTIVE.select(kind, options)
}

/// The active network profile.
pub fn params() -> Result<&'static NetworkProfile, ParamsError> {
    ACTIVE.get()
}
