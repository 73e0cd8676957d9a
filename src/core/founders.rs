//! Founders reward address rotation.
//!
//! The reward period `1..=last_height` is split across the rotation:
//! `interval = (last_height + len) / len`, `index = height / interval`.
//! The index never decreases with height and the last address is reached
//! by the last reward height. When `last_height` is not a multiple of the
//! rotation length the final interval is shorter than the others; that
//! split is consensus and must stay as is.

use crate::core::params::NetworkKind;
use crate::core::script::Script;
use crate::crypto::address::{decode_destination, Base58Prefixes};
use crate::error::ParamsError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundersReward {
    addresses: Vec<&'static str>,
    /// P2SH script of each address, same order
    scripts: Vec<Script>,
    last_height: u64,
}

impl FoundersReward {
    /// Validate the rotation against the reward period and decode every
    /// address. Each address must be a script (multisig) address.
    pub fn new(
        network: NetworkKind,
        addresses: &[&'static str],
        last_height: u64,
        prefixes: &Base58Prefixes,
    ) -> Result<Self, ParamsError> {
        if addresses.is_empty() {
            return Err(ParamsError::FoundersRotationEmpty { network });
        }
        if addresses.len() as u64 > last_height {
            return Err(ParamsError::FoundersRotationTooLong {
                network,
                addresses: addresses.len(),
                last_height,
            });
        }

        let mut scripts = Vec::with_capacity(addresses.len());
        for address in addresses {
            let dest = decode_destination(address, prefixes).map_err(|e| ParamsError::InvalidFoundersAddress {
                network,
                address: address.to_string(),
                reason: e.to_string(),
            })?;
            if !dest.is_script() {
                return Err(ParamsError::InvalidFoundersAddress {
                    network,
                    address: address.to_string(),
                    reason: "not a script address".to_string(),
                });
            }
            scripts.push(dest.script_pubkey());
        }

        Ok(Self { addresses: addresses.to_vec(), scripts, last_height })
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn last_height(&self) -> u64 {
        self.last_height
    }

    pub fn addresses(&self) -> &[&'static str] {
        &self.addresses
    }

    /// Blocks paying each address (the last one may get fewer).
    pub fn address_change_interval(&self) -> u64 {
        let len = self.addresses.len() as u64;
        (self.last_height + len) / len
    }

    /// Rotation index for `height`.
    ///
    /// # Panics
    /// If `height` is 0 or beyond the last founders reward height.
    pub fn index_at_height(&self, height: u64) -> usize {
        assert!(
            height > 0 && height <= self.last_height,
            "founders reward queried at height {} outside 1..={}",
            height,
            self.last_height
        );
        (height / self.address_change_interval()) as usize
    }

    pub fn address_at_height(&self, height: u64) -> &'static str {
        self.addresses[self.index_at_height(height)]
    }

    pub fn script_at_height(&self, height: u64) -> &Script {
        &self.scripts[self.index_at_height(height)]
    }

    /// # Panics
    /// If `index` is outside the rotation.
    pub fn address_at_index(&self, index: usize) -> &'static str {
        assert!(
            index < self.addresses.len(),
            "founders address index {} outside rotation of {}",
            index,
            self.addresses.len()
        );
        self.addresses[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::params::{MAIN_BASE58_PREFIXES, TEST_BASE58_PREFIXES, TEST_FOUNDERS_ADDRESSES};

    fn three_way(last_height: u64) -> FoundersReward {
        FoundersReward::new(
            NetworkKind::Test,
            &TEST_FOUNDERS_ADDRESSES[..3],
            last_height,
            &TEST_BASE58_PREFIXES,
        )
        .unwrap()
    }

    #[test]
    fn test_uneven_split_keeps_short_final_interval() {
        let fr = three_way(10);
        assert_eq!(fr.address_change_interval(), 4);
        let indexes: Vec<usize> = (1..=10).map(|h| fr.index_at_height(h)).collect();
        assert_eq!(indexes, vec![0, 0, 0, 1, 1, 1, 1, 2, 2, 2]);
    }

    #[test]
    fn test_even_split_never_overflows_rotation() {
        // 9 / 3 divides evenly; the index must still stay below 3
        let fr = three_way(9);
        assert_eq!(fr.address_change_interval(), 4);
        assert_eq!(fr.index_at_height(9), 2);
    }

    #[test]
    fn test_index_monotonic_and_bounded() {
        let fr = three_way(1_000);
        let mut prev = 0;
        for h in 1..=1_000 {
            let i = fr.index_at_height(h);
            assert!(i >= prev, "index decreased at height {}", h);
            assert!(i < fr.len());
            prev = i;
        }
        assert_eq!(prev, fr.len() - 1);
    }

    #[test]
    fn test_script_matches_address() {
        let fr = three_way(10);
        assert_eq!(fr.address_at_height(1), TEST_FOUNDERS_ADDRESSES[0]);
        assert_eq!(
            hex::encode(fr.script_at_height(1)),
            "a914ef775f1f997f122a062fff1a2d7443abd1f9c64287"
        );
        assert_eq!(fr.address_at_index(2), TEST_FOUNDERS_ADDRESSES[2]);
    }

    #[test]
    #[should_panic(expected = "outside 1..=10")]
    fn test_height_zero_panics() {
        three_way(10).index_at_height(0);
    }

    #[test]
    #[should_panic(expected = "outside 1..=10")]
    fn test_height_past_period_panics() {
        three_way(10).address_at_height(11);
    }

    #[test]
    #[should_panic(expected = "outside rotation")]
    fn test_index_out_of_range_panics() {
        three_way(10).address_at_index(3);
    }

    #[test]
    fn test_rotation_longer_than_period_rejected() {
        let err = FoundersReward::new(
            NetworkKind::Test,
            &TEST_FOUNDERS_ADDRESSES[..3],
            2,
            &TEST_BASE58_PREFIXES,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ParamsError::FoundersRotationTooLong { network: NetworkKind::Test, addresses: 3, last_height: 2 }
        );
    }

    #[test]
    fn test_empty_rotation_rejected() {
        let err = FoundersReward::new(NetworkKind::Main, &[], 100, &MAIN_BASE58_PREFIXES).unwrap_err();
        assert_eq!(err, ParamsError::FoundersRotationEmpty { network: NetworkKind::Main });
    }

    #[test]
    fn test_pubkey_address_rejected() {
        let err = FoundersReward::new(
            NetworkKind::Main,
            &["t1HsdDMzmJfq4vc7T17XYjEkLMLvbgM1fCi"],
            100,
            &MAIN_BASE58_PREFIXES,
        )
        .unwrap_err();
        assert!(matches!(err, ParamsError::InvalidFoundersAddress { ref reason, .. } if reason == "not a script address"));
    }

    #[test]
    fn test_wrong_network_address_rejected() {
        let err = FoundersReward::new(NetworkKind::Main, &TEST_FOUNDERS_ADDRESSES[..1], 100, &MAIN_BASE58_PREFIXES)
            .unwrap_err();
        assert!(matches!(err, ParamsError::InvalidFoundersAddress { .. }));
    }
}
