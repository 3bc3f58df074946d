use serde::Serialize;

/// Signature carried by minting transactions in place of a real one.
pub const REWARD_SIGNATURE: &str = "MINING_REWARD";

/// A value transfer. `from_address == None` marks a minting reward.
///
/// Immutable once built: the pool may drop it (when it is mined) and a block
/// may hold it, but nothing edits it in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub from_address: Option<String>,
    pub to_address: String,
    pub amount: f64,
    /// Unix timestamp in milliseconds (UTC)
    pub timestamp: i64,
    /// Opaque; never verified.
    pub signature: String,
}

impl Transaction {
    /// Build the sender-less transaction that mints `amount` to `to_address`.
    pub fn reward(id: String, to_address: String, amount: f64, timestamp: i64) -> Self {
        Self {
            id,
            from_address: None,
            to_address,
            amount,
            timestamp,
            signature: REWARD_SIGNATURE.to_string(),
        }
    }

    pub fn is_reward(&self) -> bool {
        self.from_address.is_none()
    }

    /// True when `address` is the sender or the recipient.
    pub fn touches(&self, address: &str) -> bool {
        self.to_address == address || self.from_address.as_deref() == Some(address)
    }

    /// Read-side projection with the derived USD value.
    pub fn record(&self, coin_value_usd: f64) -> TransactionRecord {
        TransactionRecord {
            tx: self.clone(),
            value_usd: self.amount * coin_value_usd,
            block_height: None,
            pending: false,
        }
    }
}

/// A transaction as returned to callers: the stored fields plus where it
/// lives (block height or pending) and its current USD value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    #[serde(flatten)]
    pub tx: Transaction,
    #[serde(rename = "valueUSD")]
    pub value_usd: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_height: Option<u64>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub pending: bool,
}

impl TransactionRecord {
    pub fn confirmed(mut self, height: u64) -> Self {
        self.block_height = Some(height);
        self.pending = false;
        self
    }

    pub fn pending(mut self) -> Self {
        self.block_height = None;
        self.pending = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer(from: &str, to: &str) -> Transaction {
        Transaction {
            id: "tx-1".into(),
            from_address: Some(from.into()),
            to_address: to.into(),
            amount: 2.5,
            timestamp: 1_000,
            signature: "sig".into(),
        }
    }

    #[test]
    fn reward_has_no_sender_and_sentinel_signature() {
        let tx = Transaction::reward("r".into(), "miner".into(), 50.0, 7);
        assert!(tx.is_reward());
        assert_eq!(tx.signature, REWARD_SIGNATURE);
        assert!(tx.touches("miner"));
    }

    #[test]
    fn touches_sender_and_recipient_only() {
        let tx = transfer("a", "b");
        assert!(tx.touches("a"));
        assert!(tx.touches("b"));
        assert!(!tx.touches("c"));
    }

    #[test]
    fn record_serializes_camel_case_with_usd_value() {
        let rec = transfer("a", "b").record(150.0).confirmed(3);
        let json = serde_json::to_value(&rec).expect("serialize");
        assert_eq!(json["fromAddress"], "a");
        assert_eq!(json["toAddress"], "b");
        assert_eq!(json["valueUSD"], 375.0);
        assert_eq!(json["blockHeight"], 3);
        assert!(json.get("pending").is_none());

        let json = serde_json::to_value(transfer("a", "b").record(1.0).pending()).expect("json");
        assert_eq!(json["pending"], true);
        assert!(json.get("blockHeight").is_none());
    }
}
