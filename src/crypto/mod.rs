//! Hash primitives and address decoding.

use sha2::{Digest, Sha256};

use crate::core::types::Hash256;

pub mod address;

/// Double SHA-256, used for txids, block hashes and base58 checksums.
pub fn double_sha256(data: &[u8]) -> Hash256 {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    let mut out = [0u8; 32];
    out.copy_from_slice(&second);
    out
}
