//! Address kinds, per-network encoding prefixes, and base58check decoding.

use serde::Serialize;
use thiserror::Error;

use crate::core::script::{self, Script};

/// Kinds of base58check-encoded data, each with its own version prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Base58Type {
    PubkeyAddress,
    ScriptAddress,
    SecretKey,
    ExtPublicKey,
    ExtSecretKey,
    ZcPaymentAddress,
    ZcViewingKey,
    ZcSpendingKey,
}

/// Kinds of bech32-encoded shielded keys and addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Bech32Type {
    SaplingPaymentAddress,
    SaplingFullViewingKey,
    SaplingIncomingViewingKey,
    SaplingSpendingKey,
}

/// Version prefixes, indexed by [`Base58Type`] declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Base58Prefixes([&'static [u8]; 8]);

impl Base58Prefixes {
    pub const fn new(prefixes: [&'static [u8]; 8]) -> Self {
        Self(prefixes)
    }

    pub fn get(&self, kind: Base58Type) -> &'static [u8] {
        self.0[kind as usize]
    }
}

/// Human-readable parts, indexed by [`Bech32Type`] declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bech32Hrps([&'static str; 4]);

impl Bech32Hrps {
    pub const fn new(hrps: [&'static str; 4]) -> Self {
        Self(hrps)
    }

    pub fn get(&self, kind: Bech32Type) -> &'static str {
        self.0[kind as usize]
    }
}

/// A transparent payment destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    KeyId([u8; 20]),
    ScriptId([u8; 20]),
}

impl Destination {
    pub fn script_pubkey(&self) -> Script {
        match self {
            Destination::KeyId(id) => script::script_p2pkh(id),
            Destination::ScriptId(id) => script::script_p2sh(id),
        }
    }

    pub fn is_script(&self) -> bool {
        matches!(self, Destination::ScriptId(_))
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("bad base58check encoding: {0}")]
    Encoding(String),
    #[error("version prefix does not match a transparent address on this network")]
    UnknownPrefix,
    #[error("payload is {0} bytes, expected 20")]
    BadLength(usize),
}

/// Decode a transparent address using the network's prefixes.
pub fn decode_destination(address: &str, prefixes: &Base58Prefixes) -> Result<Destination, AddressError> {
    let data = bs58::decode(address)
        .with_check(None)
        .into_vec()
        .map_err(|e| AddressError::Encoding(e.to_string()))?;

    let kinds: [(Base58Type, fn([u8; 20]) -> Destination); 2] = [
        (Base58Type::PubkeyAddress, Destination::KeyId),
        (Base58Type::ScriptAddress, Destination::ScriptId),
    ];
    for (kind, make) in kinds {
        if let Some(payload) = data.strip_prefix(prefixes.get(kind)) {
            let id: [u8; 20] = payload
                .try_into()
                .map_err(|_| AddressError::BadLength(payload.len()))?;
            return Ok(make(id));
        }
    }
    Err(AddressError::UnknownPrefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAIN: Base58Prefixes = Base58Prefixes::new([
        &[0x1C, 0xB8],
        &[0x1C, 0xBD],
        &[0x80],
        &[0x04, 0x88, 0xB2, 0x1E],
        &[0x04, 0x88, 0xAD, 0xE4],
        &[0x16, 0x9A],
        &[0xA8, 0xAB, 0xD3],
        &[0xAB, 0x36],
    ]);

    #[test]
    fn test_decode_script_address() {
        let dest = decode_destination("t3SAe5q2qTaZyFvQwGDTRLYGVtNpzhi9EyG", &MAIN).unwrap();
        assert!(dest.is_script());
        assert_eq!(
            hex::encode(dest.script_pubkey()),
            "a91453686718fd3a1cce89ebbaba3493e982ba6e789987"
        );
    }

    #[test]
    fn test_wrong_network_prefix_rejected() {
        // testnet script address under mainnet prefixes
        let err = decode_destination("t2UNzUUx8mWBCRYPRezvA363EYXyEpHokyi", &MAIN).unwrap_err();
        assert_eq!(err, AddressError::UnknownPrefix);
    }

    #[test]
    fn test_bad_checksum_rejected() {
        let err = decode_destination("t3SAe5q2qTaZyFvQwGDTRLYGVtNpzhi9EyH", &MAIN).unwrap_err();
        assert!(matches!(err, AddressError::Encoding(_)));
    }

    #[test]
    fn test_prefix_lookup() {
        assert_eq!(MAIN.get(Base58Type::SecretKey), &[0x80]);
        assert_eq!(MAIN.get(Base58Type::ZcViewingKey), &[0xA8, 0xAB, 0xD3]);
    }
}
