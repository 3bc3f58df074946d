use serde::Serialize;

use super::Ledger;
use super::request::{Page, TxFilter};
use crate::blockchain::Block;
use crate::error::{LedgerError, Result};
use crate::transaction::TransactionRecord;

/// Headline numbers for the whole ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerInfo {
    pub block_count: usize,
    pub transaction_count: usize,
    pub pending_count: usize,
    pub wallet_count: usize,
    pub difficulty: u32,
    #[serde(rename = "coinValueUSD")]
    pub coin_value_usd: f64,
    pub current_supply: f64,
    pub max_supply: f64,
    pub market_cap: f64,
}

/// Newest first. The sort is stable, so ties keep their source order.
fn newest_first(records: &mut [TransactionRecord]) {
    records.sort_by(|a, b| b.tx.timestamp.cmp(&a.tx.timestamp));
}

impl Ledger {
    pub fn info(&self) -> LedgerInfo {
        LedgerInfo {
            block_count: self.chain.len(),
            transaction_count: self.chain.transaction_count(),
            pending_count: self.pending.len(),
            wallet_count: self.wallets.len(),
            difficulty: self.config.difficulty,
            coin_value_usd: self.supply.coin_value_usd(),
            current_supply: self.supply.current_supply(),
            max_supply: self.supply.max_supply(),
            market_cap: self.supply.market_cap(),
        }
    }

    /// Blocks by height, highest first.
    pub fn list_blocks(&self, page: Page) -> Vec<Block> {
        page.slice(self.chain.blocks().iter().rev().cloned())
    }

    /// All-digit ids are heights; anything else is matched against hashes.
    pub fn get_block(&self, height_or_hash: &str) -> Result<Block> {
        let id = height_or_hash.trim();
        let block = if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) {
            id.parse::<u64>().ok().and_then(|h| self.chain.get(h))
        } else {
            self.chain.find_by_hash(id)
        };
        block
            .cloned()
            .ok_or_else(|| LedgerError::not_found("Block not found"))
    }

    fn confirmed_records(&self) -> impl Iterator<Item = TransactionRecord> + '_ {
        let price = self.supply.coin_value_usd();
        self.chain.blocks().iter().flat_map(move |block| {
            block
                .transactions
                .iter()
                .map(move |tx| tx.record(price).confirmed(block.height))
        })
    }

    fn pending_records(&self) -> impl Iterator<Item = TransactionRecord> + '_ {
        let price = self.supply.coin_value_usd();
        self.pending.iter().map(move |tx| tx.record(price).pending())
    }

    /// Mined transactions (with their block height) or the pending pool.
    pub fn list_transactions(&self, page: Page, filter: TxFilter) -> Vec<TransactionRecord> {
        let mut records: Vec<TransactionRecord> = match filter {
            TxFilter::All => self.confirmed_records().collect(),
            TxFilter::Pending => self.pending_records().collect(),
        };
        newest_first(&mut records);
        page.slice(records)
    }

    /// Look in the pending pool first, then in the blocks.
    pub fn get_transaction(&self, id: &str) -> Result<TransactionRecord> {
        let price = self.supply.coin_value_usd();
        if let Some(tx) = self.pending.get(id) {
            return Ok(tx.record(price).pending());
        }
        self.chain
            .blocks()
            .iter()
            .find_map(|block| {
                block
                    .transactions
                    .iter()
                    .find(|tx| tx.id == id)
                    .map(|tx| tx.record(price).confirmed(block.height))
            })
            .ok_or_else(|| LedgerError::not_found("Transaction not found"))
    }

    /// Confirmed and pending transactions sent from or to `address`.
    pub fn address_transactions(&self, address: &str) -> Vec<TransactionRecord> {
        let mut records: Vec<TransactionRecord> = self
            .confirmed_records()
            .chain(self.pending_records())
            .filter(|r| r.tx.touches(address))
            .collect();
        newest_first(&mut records);
        records
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::config::{LedgerConfig, SeedConfig};
    use crate::ledger::request::NewTransfer;

    fn busy_ledger() -> (Ledger, String, String) {
        let mut ledger = empty_ledger();
        let a = fund(&mut ledger, "a", 100.0);
        let b = fund(&mut ledger, "b", 0.0);
        for i in 0..3 {
            ledger
                .create_transaction(NewTransfer::new(&a, &b, 1.0 + i as f64))
                .expect("transfer");
        }
        ledger.mine(&a).expect("mine");
        ledger
            .create_transaction(NewTransfer::new(&b, &a, 1.0))
            .expect("transfer");
        (ledger, a, b)
    }

    #[test]
    fn info_reports_counts_and_market_cap() {
        let (ledger, _, _) = busy_ledger();
        let info = ledger.info();
        assert_eq!(info.block_count, 2);
        assert_eq!(info.transaction_count, 4);
        assert_eq!(info.pending_count, 1);
        assert_eq!(info.wallet_count, 2);
        assert_eq!(info.difficulty, 4);
        assert_eq!(info.current_supply, 150.0);
        assert_eq!(info.market_cap, 150.0 * 150.0);

        let json = serde_json::to_value(&info).expect("json");
        assert_eq!(json["coinValueUSD"], 150.0);
        assert_eq!(json["blockCount"], 2);
    }

    #[test]
    fn blocks_are_listed_highest_first_with_paging() {
        let ledger = ledger_with(LedgerConfig {
            seed: SeedConfig::default(),
            ..LedgerConfig::default()
        });
        let heights: Vec<u64> = ledger
            .list_blocks(Page::new(Some(3), Some(1)))
            .iter()
            .map(|b| b.height)
            .collect();
        assert_eq!(heights, vec![8, 7, 6]);
        assert_eq!(ledger.list_blocks(Page::default()).len(), 10);
        assert!(ledger.list_blocks(Page::new(None, Some(10))).is_empty());
    }

    #[test]
    fn block_lookup_by_height_or_hash() {
        let (ledger, _, _) = busy_ledger();
        let tip = ledger.chain().last_block().clone();

        assert_eq!(ledger.get_block("1"), Ok(tip.clone()));
        assert_eq!(ledger.get_block(&tip.hash), Ok(tip));
        assert!(matches!(ledger.get_block("7"), Err(LedgerError::NotFound(_))));
        assert!(matches!(ledger.get_block("deadbeef"), Err(LedgerError::NotFound(_))));
        assert!(matches!(
            ledger.get_block("99999999999999999999999"),
            Err(LedgerError::NotFound(_))
        ));
    }

    #[test]
    fn transaction_listing_filters() {
        let (ledger, _, _) = busy_ledger();
        let page = Page::new(Some(100), None);

        let pending = ledger.list_transactions(page, TxFilter::Pending);
        assert_eq!(pending.len(), 1);
        assert!(pending.iter().all(|r| r.pending));

        let confirmed = ledger.list_transactions(page, TxFilter::All);
        assert_eq!(confirmed.len(), 4);
        assert!(confirmed.iter().all(|r| r.block_height == Some(1) && !r.pending));
        assert!(confirmed.windows(2).all(|w| w[0].tx.timestamp >= w[1].tx.timestamp));

        assert_eq!(ledger.list_transactions(Page::new(Some(2), None), TxFilter::All).len(), 2);
    }

    #[test]
    fn default_listing_leaves_out_pending_transfers() {
        let mut ledger = empty_ledger();
        let a = fund(&mut ledger, "a", 100.0);
        let b = fund(&mut ledger, "b", 0.0);
        ledger
            .create_transaction(NewTransfer::new(&a, &b, 5.0))
            .expect("transfer");

        assert!(ledger.list_transactions(Page::default(), TxFilter::default()).is_empty());
        let pending = ledger.list_transactions(Page::default(), TxFilter::Pending);
        assert_eq!(pending.len(), 1);
        assert!(pending[0].pending);
    }

    #[test]
    fn transaction_lookup_checks_pool_then_blocks() {
        let (ledger, _, _) = busy_ledger();
        let pending_id = ledger.pending().iter().next().expect("pending").id.clone();
        let mined_id = ledger.chain().last_block().transactions[1].id.clone();

        assert!(ledger.get_transaction(&pending_id).expect("pending").pending);
        let mined = ledger.get_transaction(&mined_id).expect("mined");
        assert_eq!(mined.block_height, Some(1));
        assert!(!mined.pending);
        assert!(matches!(ledger.get_transaction("nope"), Err(LedgerError::NotFound(_))));
    }

    #[test]
    fn address_history_includes_confirmed_and_pending() {
        let (ledger, a, b) = busy_ledger();
        // 3 transfers + reward + pending return transfer
        assert_eq!(ledger.address_transactions(&a).len(), 5);
        // 3 received + pending outgoing
        let history = ledger.address_transactions(&b);
        assert_eq!(history.len(), 4);
        assert_eq!(history.iter().filter(|r| r.pending).count(), 1);
        assert!(history.iter().all(|r| r.tx.touches(&b)));
        assert!(ledger.address_transactions("stranger").is_empty());
    }
}
