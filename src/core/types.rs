use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::script::Script;
use crate::crypto::double_sha256;
use crate::error::ParamsError;

/// A 32-byte hash in internal (little-endian) byte order.
pub type Hash256 = [u8; 32];

/// Null hash (all zeros) used for genesis block's prev_hash
pub const NULL_HASH: Hash256 = [0u8; 32];

/// Monetary amount in base units.
pub type Amount = i64;

/// Base unit denomination (like satoshis for Bitcoin)
pub const COIN: Amount = 100_000_000;

/// Parse a uint256 literal written in display order (most significant byte
/// first), optionally `0x`-prefixed and shorter than 64 digits.
pub fn hash256_from_hex(input: &str) -> Result<Hash256, ParamsError> {
    let digits = input.trim();
    let digits = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(digits);
    if digits.is_empty() || digits.len() > 64 {
        return Err(ParamsError::InvalidHex(input.to_string()));
    }
    let padded = format!("{:0>64}", digits);
    let mut bytes = [0u8; 32];
    hex::decode_to_slice(&padded, &mut bytes).map_err(|_| ParamsError::InvalidHex(input.to_string()))?;
    bytes.reverse();
    Ok(bytes)
}

/// Render a hash in display order.
pub fn hash256_to_hex(hash: &Hash256) -> String {
    let mut display = *hash;
    display.reverse();
    hex::encode(display)
}

/// Append a compact-size length prefix.
pub fn write_compact_size(buf: &mut Vec<u8>, n: u64) {
    if n < 0xfd {
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(0xfd);
        buf.extend_from_slice(&(n as u16).to_le_bytes());
    } else if n <= 0xffff_ffff {
        buf.push(0xfe);
        buf.extend_from_slice(&(n as u32).to_le_bytes());
    } else {
        buf.push(0xff);
        buf.extend_from_slice(&n.to_le_bytes());
    }
}

fn write_bytes(buf: &mut Vec<u8>, data: &[u8]) {
    write_compact_size(buf, data.len() as u64);
    buf.extend_from_slice(data);
}

// ─── Transaction Types ───────────────────────────────────────────────

/// Represents a reference to a previous transaction output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct OutPoint {
    pub txid: Hash256,
    pub vout: u32,
}

impl OutPoint {
    /// The outpoint a coinbase input spends.
    pub fn null() -> Self {
        OutPoint { txid: NULL_HASH, vout: u32::MAX }
    }

    pub fn is_null(&self) -> bool {
        self.txid == NULL_HASH && self.vout == u32::MAX
    }
}

/// Transaction input
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TxInput {
    pub previous_output: OutPoint,
    pub script_sig: Script,
    pub sequence: u32,
}

/// Transaction output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TxOutput {
    pub value: Amount,
    pub script_pubkey: Script,
}

/// A transparent (version 1) transaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    pub version: i32,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
    pub lock_time: u32,
}

impl Transaction {
    /// Create a coinbase transaction with one input carrying `script_sig`
    /// and one output paying `value` to `script_pubkey`.
    pub fn new_coinbase(script_sig: Script, value: Amount, script_pubkey: Script) -> Self {
        Transaction {
            version: 1,
            inputs: vec![TxInput {
                previous_output: OutPoint::null(),
                script_sig,
                sequence: u32::MAX,
            }],
            outputs: vec![TxOutput { value, script_pubkey }],
            lock_time: 0,
        }
    }

    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].previous_output.is_null()
    }

    pub fn total_output(&self) -> Amount {
        self.outputs.iter().map(|o| o.value).sum()
    }

    /// Consensus encoding of a version 1 transaction.
    ///
    /// version || vin || vout || lock_time
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(256);
        buf.extend_from_slice(&self.version.to_le_bytes());

        write_compact_size(&mut buf, self.inputs.len() as u64);
        for input in &self.inputs {
            buf.extend_from_slice(&input.previous_output.txid);
            buf.extend_from_slice(&input.previous_output.vout.to_le_bytes());
            write_bytes(&mut buf, &input.script_sig);
            buf.extend_from_slice(&input.sequence.to_le_bytes());
        }

        write_compact_size(&mut buf, self.outputs.len() as u64);
        for output in &self.outputs {
            buf.extend_from_slice(&output.value.to_le_bytes());
            write_bytes(&mut buf, &output.script_pubkey);
        }

        buf.extend_from_slice(&self.lock_time.to_le_bytes());
        buf
    }

    /// Transaction id (double SHA-256 of the consensus encoding)
    pub fn txid(&self) -> Hash256 {
        double_sha256(&self.serialize())
    }
}

// ─── Block Types ─────────────────────────────────────────────────────

/// Block header with an Equihash solution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockHeader {
    pub version: i32,
    pub prev_hash: Hash256,
    pub merkle_root: Hash256,
    /// Reserved commitment field, zero in genesis blocks
    pub reserved: Hash256,
    pub time: u32,
    /// Compact-encoded difficulty target
    pub bits: u32,
    pub nonce: Hash256,
    pub solution: Vec<u8>,
}

impl BlockHeader {
    /// Consensus encoding, solution included.
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(140 + 3 + self.solution.len());
        buf.extend_from_slice(&self.version.to_le_bytes());
        buf.extend_from_slice(&self.prev_hash);
        buf.extend_from_slice(&self.merkle_root);
        buf.extend_from_slice(&self.reserved);
        buf.extend_from_slice(&self.time.to_le_bytes());
        buf.extend_from_slice(&self.bits.to_le_bytes());
        buf.extend_from_slice(&self.nonce);
        write_bytes(&mut buf, &self.solution);
        buf
    }

    /// Block hash (double SHA-256 of the full header)
    pub fn hash(&self) -> Hash256 {
        double_sha256(&self.serialize())
    }
}

/// A complete block
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Block {
    pub header: BlockHeader,
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Compute the merkle root from the block's transactions
    pub fn compute_merkle_root(&self) -> Hash256 {
        if self.transactions.is_empty() {
            return NULL_HASH;
        }

        let mut hashes: Vec<Hash256> = self.transactions.iter().map(|tx| tx.txid()).collect();

        while hashes.len() > 1 {
            if hashes.len() % 2 != 0 {
                let last = hashes[hashes.len() - 1];
                hashes.push(last);
            }

            hashes = hashes
                .chunks(2)
                .map(|pair| {
                    let mut combined = [0u8; 64];
                    combined[..32].copy_from_slice(&pair[0]);
                    combined[32..].copy_from_slice(&pair[1]);
                    double_sha256(&combined)
                })
                .collect();
        }

        hashes[0]
    }

    pub fn hash(&self) -> Hash256 {
        self.header.hash()
    }
}

impl fmt::Display for BlockHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Block [{}] ver={} bits={:#010x} time={}",
            hash256_to_hex(&self.hash()),
            self.version,
            self.bits,
            self.time,
        )
    }
}
