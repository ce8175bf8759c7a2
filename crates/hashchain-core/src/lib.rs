pub mod chain;
pub mod constants;
pub mod error;
pub mod validate;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};

pub use chain::Chain;
pub use error::{ChainError, MalformedBlock, Rejection, RejectionKind};

/// A single record in the chain, bound to its predecessor through `previous_hash`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub index: u64,
    pub hash: String,
    pub previous_hash: String,
    pub data: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl Block {
    /// Build a block whose `hash` is computed from the other fields.
    pub fn new(index: u64, previous_hash: &str, timestamp: u64, data: &str) -> Self {
        Self {
            index,
            hash: calculate_hash(index, previous_hash, timestamp, data),
            previous_hash: previous_hash.to_string(),
            data: data.to_string(),
            timestamp,
        }
    }

    /// Recompute the content hash from the stored fields, ignoring `self.hash`.
    pub fn computed_hash(&self) -> String {
        calculate_hash(self.index, &self.previous_hash, self.timestamp, &self.data)
    }

    /// Convert an untyped value (e.g. one element of a JSON chain dump) into a block.
    pub fn from_value(value: &Value) -> Result<Self, MalformedBlock> {
        if let Some(reason) = value_structure_fault(value) {
            return Err(MalformedBlock(reason));
        }
        serde_json::from_value(value.clone()).map_err(|_| MalformedBlock("not a block object"))
    }
}

/// Canonical byte encoding fed to the hash function.
///
/// Integers are fixed-width little endian and both strings carry a u64 length
/// prefix, so distinct `(index, previous_hash, timestamp, data)` tuples never
/// share an encoding.
pub fn hash_bytes(index: u64, previous_hash: &str, timestamp: u64, data: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(8 + 8 + 8 + previous_hash.len() + 8 + data.len());
    bytes.extend_from_slice(&index.to_le_bytes());
    bytes.extend_from_slice(&timestamp.to_le_bytes());
    bytes.extend_from_slice(&(previous_hash.len() as u64).to_le_bytes());
    bytes.extend_from_slice(previous_hash.as_bytes());
    bytes.extend_from_slice(&(data.len() as u64).to_le_bytes());
    bytes.extend_from_slice(data.as_bytes());
    bytes
}

/// SHA-256 over [`hash_bytes`], as lowercase hex.
pub fn calculate_hash(index: u64, previous_hash: &str, timestamp: u64, data: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(hash_bytes(index, previous_hash, timestamp, data));
    hex::encode(hasher.finalize())
}

/// Shape check for a typed block.
///
/// The field types are fixed by [`Block`] itself, so any block that exists is
/// well formed. Hash correctness is left to [`validate::check_next_block`];
/// untyped input goes through [`validate_structure_value`].
pub fn validate_structure(_block: &Block) -> bool {
    true
}

/// Shape check for an untyped block: `index` a non-negative integer, `timestamp`
/// an integer, and `hash`, `previousHash` and `data` strings.
pub fn validate_structure_value(value: &Value) -> bool {
    value_structure_fault(value).is_none()
}

fn value_structure_fault(value: &Value) -> Option<&'static str> {
    let Some(obj) = value.as_object() else {
        return Some("not an object");
    };
    if !obj.get("index").is_some_and(Value::is_u64) {
        return Some("index is not a non-negative integer");
    }
    if !obj.get("hash").is_some_and(Value::is_string) {
        return Some("hash is not a string");
    }
    if !obj.get("previousHash").is_some_and(Value::is_string) {
        return Some("previousHash is not a string");
    }
    // Block timestamps are unsigned, so negative integers are rejected here too.
    if !obj.get("timestamp").is_some_and(Value::is_u64) {
        return Some("timestamp is not a non-negative integer");
    }
    if !obj.get("data").is_some_and(Value::is_string) {
        return Some("data is not a string");
    }
    None
}

/// Current wall-clock time in milliseconds; 0 if the clock is before the epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
