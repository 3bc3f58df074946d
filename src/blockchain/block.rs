use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::transaction::Transaction;

/// `previous_hash` of the block at height 0.
pub const GENESIS_PREVIOUS_HASH: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

/// A single block in the chain holding an ordered list of transactions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub height: u64,
    pub hash: String,
    pub previous_hash: String,
    pub timestamp: i64, // Unix millis (UTC)
    pub nonce: u64,     // simulation artifact, never checked
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Create a block and seal its hash.
    pub fn new(
        height: u64,
        previous_hash: String,
        timestamp: i64,
        nonce: u64,
        transactions: Vec<Transaction>,
    ) -> Self {
        let mut block = Self {
            height,
            hash: String::new(),
            previous_hash,
            timestamp,
            nonce,
            transactions,
        };
        block.hash = block.compute_hash();
        block
    }

    /// Compute the SHA-256 hash of this block using its fields
    /// (excluding the `hash` field itself). Transactions are serialized
    /// as JSON and included in the preimage.
    pub fn compute_hash(&self) -> String {
        let txs_json = serde_json::to_string(&self.transactions).expect("serialize txs");
        let preimage = format!(
            "{}:{}:{}:{}:{}",
            self.height, self.timestamp, self.previous_hash, self.nonce, txs_json
        );
        let mut hasher = Sha256::new();
        hasher.update(preimage.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// The cached `hash` still matches the content. (Does NOT check linkage.)
    pub fn is_sealed(&self) -> bool {
        self.hash == self.compute_hash()
    }
}
