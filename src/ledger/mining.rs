use log::{debug, info, warn};
use serde::Serialize;
use std::collections::HashSet;

use super::{Ledger, now_millis};
use crate::blockchain::Block;
use crate::error::{LedgerError, Result};
use crate::transaction::Transaction;

/// Outcome of a successful [`Ledger::mine`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MineResult {
    pub success: bool,
    pub block: Block,
    pub reward: f64,
    pub miner_balance: f64,
    pub current_supply: f64,
    pub remaining_to_mine: f64,
}

impl Ledger {
    /// Seal a block holding a minting reward plus the oldest pending
    /// transactions (up to `max_txs_per_block`), in pool order.
    ///
    /// - Refuses once the supply cap is reached; the reward is otherwise
    ///   `min(block_reward, max_supply - current_supply)`.
    /// - Appending the block, crediting the miner, bumping the supply and
    ///   draining the pool happen together, after every check has passed.
    pub fn mine(&mut self, miner_address: &str) -> Result<MineResult> {
        let miner_address = miner_address.trim();
        if miner_address.is_empty() {
            return Err(LedgerError::validation("Miner address is required"));
        }

        if self.supply.is_exhausted() {
            warn!(
                "MINER - refused: supply cap {} reached",
                self.supply.max_supply()
            );
            return Err(LedgerError::SupplyCapReached);
        }

        let reward = self.supply.next_reward();
        if reward <= 0.0 {
            warn!("MINER - refused: no reward left to mint");
            return Err(LedgerError::NoRewardAvailable);
        }

        if !self.wallets.contains(miner_address) {
            return Err(LedgerError::not_found("Miner wallet not found"));
        }

        let now = now_millis();
        let reward_tx = Transaction::reward(
            self.ids.next_id(),
            miner_address.to_string(),
            reward,
            now,
        );
        if self.pending.contains(&reward_tx.id) || self.confirmed_ids.contains(&reward_tx.id)
        {
            return Err(LedgerError::DuplicateTransaction(reward_tx.id));
        }

        let mut txs = Vec::with_capacity(1 + self.config.max_txs_per_block);
        txs.push(reward_tx);
        txs.extend(self.pending.oldest(self.config.max_txs_per_block));

        let nonce = self.ids.next_nonce();
        let block = self.chain.next_block(now, nonce, txs);

        // Commit.
        let block = self
            .chain
            .append(block)
            .map_err(|e| LedgerError::InvalidBlock(e.to_string()))?
            .clone();

        let miner_balance = match self.wallets.get_mut(miner_address) {
            Some(miner) => {
                miner.balance += reward;
                miner.balance
            }
            None => 0.0,
        };
        self.supply.issue(reward);

        let included: HashSet<&str> =
            block.transactions.iter().map(|t| t.id.as_str()).collect();
        let removed = self.pending.remove_ids(&included);
        self.confirmed_ids
            .extend(block.transactions.iter().map(|t| t.id.clone()));
        debug!(
            "Pending pool drained: removed {}, {} left",
            removed,
            self.pending.len()
        );

        info!(
            "MINER - sealed block #{} (hash={}, reward={}, txs={}, supply={})",
            block.height,
            block.hash,
            reward,
            block.transactions.len(),
            self.supply.current_supply()
        );

        Ok(MineResult {
            success: true,
            reward,
            miner_balance,
            current_supply: self.supply.current_supply(),
            remaining_to_mine: self.supply.remaining(),
            block,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::config::LedgerConfig;
    use crate::ledger::request::{NewTransfer, NewWallet};

    #[test]
    fn mining_rewards_miner_and_extends_chain() {
        let mut ledger = empty_ledger();
        let miner = fund(&mut ledger, "miner", 100.0);
        let tip = ledger.chain().last_block().hash.clone();

        let res = ledger.mine(&miner).expect("mine");

        assert!(res.success);
        assert_eq!(res.reward, 50.0);
        assert_eq!(res.miner_balance, 150.0);
        assert_eq!(res.current_supply, 150.0);
        assert_eq!(res.remaining_to_mine, 100_000_000.0 - 150.0);
        assert_eq!(res.block.height, 1);
        assert_eq!(res.block.previous_hash, tip);
        assert_eq!(res.block.transactions.len(), 1);

        let reward = &res.block.transactions[0];
        assert!(reward.is_reward());
        assert_eq!(reward.signature, crate::transaction::REWARD_SIGNATURE);
        assert_eq!(reward.to_address, miner);
        assert_eq!(reward.amount, 50.0);
        assert_invariants(&ledger);
    }

    #[test]
    fn reward_is_clamped_then_cap_is_terminal() {
        let mut ledger = ledger_with(LedgerConfig {
            max_supply: 110.0,
            ..config()
        });
        let miner = fund(&mut ledger, "miner", 100.0);
        assert_eq!(ledger.supply().current_supply(), ledger.supply().max_supply() - 10.0);

        let res = ledger.mine(&miner).expect("mine");
        assert_eq!(res.reward, 10.0);
        assert_eq!(ledger.supply().current_supply(), ledger.supply().max_supply());
        assert_eq!(res.remaining_to_mine, 0.0);

        let len = ledger.chain().len();
        let err = ledger.mine(&miner);
        assert_eq!(err, Err(LedgerError::SupplyCapReached));
        assert_eq!(ledger.chain().len(), len);
        assert_invariants(&ledger);
    }

    #[test]
    fn block_takes_five_oldest_pending_in_order() {
        let mut ledger = empty_ledger();
        let a = fund(&mut ledger, "a", 100.0);
        let b = fund(&mut ledger, "b", 0.0);
        let mut ids = Vec::new();
        for i in 0..7 {
            let rec = ledger
                .create_transaction(NewTransfer::new(&a, &b, 1.0 + i as f64))
                .expect("transfer");
            ids.push(rec.tx.id);
        }

        let res = ledger.mine(&b).expect("mine");

        let in_block: Vec<_> = res.block.transactions.iter().map(|t| t.id.clone()).collect();
        assert_eq!(in_block.len(), 6);
        assert!(res.block.transactions[0].is_reward());
        assert_eq!(&in_block[1..], &ids[..5]);
        let left: Vec<_> = ledger.pending().iter().map(|t| t.id.clone()).collect();
        assert_eq!(left, ids[5..].to_vec());
    }

    #[test]
    fn each_transaction_is_mined_once() {
        let mut ledger = empty_ledger();
        let a = fund(&mut ledger, "a", 100.0);
        let b = fund(&mut ledger, "b", 0.0);
        for _ in 0..12 {
            ledger
                .create_transaction(NewTransfer::new(&a, &b, 1.0))
                .expect("transfer");
        }
        for _ in 0..4 {
            ledger.mine(&a).expect("mine");
        }

        assert!(ledger.pending().is_empty());
        let mut seen = HashSet::new();
        for block in ledger.chain().blocks() {
            for tx in &block.transactions {
                assert!(seen.insert(tx.id.clone()), "tx {} mined twice", tx.id);
            }
        }
        // 4 rewards + 12 transfers
        assert_eq!(seen.len(), 16);
        assert_invariants(&ledger);
    }

    #[test]
    fn mining_does_not_reapply_transfers() {
        let mut ledger = empty_ledger();
        let a = fund(&mut ledger, "a", 100.0);
        let b = fund(&mut ledger, "b", 0.0);
        ledger
            .create_transaction(NewTransfer::new(&a, &b, 25.0))
            .expect("transfer");

        let miner = fund(&mut ledger, "miner", 0.0);
        ledger.mine(&miner).expect("mine");

        assert_eq!(ledger.wallets().get(&a).map(|w| w.balance), Some(75.0));
        assert_eq!(ledger.wallets().get(&b).map(|w| w.balance), Some(25.0));
    }

    #[test]
    fn unknown_miner_and_blank_address_fail_cleanly() {
        let mut ledger = empty_ledger();
        assert!(matches!(ledger.mine(""), Err(LedgerError::Validation(_))));
        assert!(matches!(ledger.mine("nobody"), Err(LedgerError::NotFound(_))));
        assert_eq!(ledger.chain().len(), 1);
        assert_eq!(ledger.supply().current_supply(), 0.0);
    }

    #[test]
    fn zero_block_reward_reports_no_reward() {
        let mut ledger = ledger_with(LedgerConfig {
            block_reward: 0.0,
            ..config()
        });
        let miner = fund(&mut ledger, "miner", 1.0);
        assert_eq!(ledger.mine(&miner), Err(LedgerError::NoRewardAvailable));
    }

    #[test]
    fn supply_never_exceeds_cap_over_many_operations() {
        let mut ledger = ledger_with(LedgerConfig {
            max_supply: 1_000.0,
            block_reward: 70.0,
            ..config()
        });
        let miner = fund(&mut ledger, "miner", 100.0);
        let other = fund(&mut ledger, "other", 100.0);

        let mut mined = 0;
        for round in 0..40 {
            if round % 3 == 0 {
                let _ = ledger.create_wallet(NewWallet::new(format!("w{round}"), None));
            }
            let _ = ledger.create_transaction(NewTransfer::new(&miner, &other, 3.0));
            if ledger.mine(&miner).is_ok() {
                mined += 1;
            }
            assert_invariants(&ledger);
        }

        assert!(mined > 0);
        assert_eq!(ledger.supply().current_supply(), 1_000.0);
        assert_eq!(ledger.mine(&miner), Err(LedgerError::SupplyCapReached));
    }
}
