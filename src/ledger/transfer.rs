use log::{debug, info, warn};

use super::request::NewTransfer;
use super::{Ledger, now_millis};
use crate::error::{LedgerError, Result};
use crate::transaction::{Transaction, TransactionRecord};

impl Ledger {
    /// Move `amount` from sender to recipient and queue the transfer.
    ///
    /// Balances change right away; mining later only confirms the record.
    /// A recipient without a wallet gets the amount parked until one is
    /// registered for that address.
    pub fn create_transaction(&mut self, req: NewTransfer) -> Result<TransactionRecord> {
        req.validate()?;

        let sender = self
            .wallets
            .get(&req.from_address)
            .ok_or_else(|| LedgerError::not_found("Sender wallet not found"))?;

        if sender.encrypted && !req.has_password() {
            warn!("transfer from {} rejected: password required", sender.address);
            return Err(LedgerError::Auth(
                "Password required for encrypted wallet".to_string(),
            ));
        }

        if sender.balance < req.amount {
            warn!(
                "transfer from {} rejected: balance {} < amount {}",
                sender.address, sender.balance, req.amount
            );
            return Err(LedgerError::InsufficientFunds {
                needed: req.amount,
                available: sender.balance,
            });
        }

        let tx = Transaction {
            id: self.ids.next_id(),
            from_address: Some(req.from_address),
            to_address: req.to_address,
            amount: req.amount,
            timestamp: now_millis(),
            signature: self.ids.next_signature(),
        };
        self.apply_transfer(tx.clone())?;

        info!(
            "TX - {} queued: {} -> {} amount={} (pool size {})",
            tx.id,
            tx.from_address.as_deref().unwrap_or_default(),
            tx.to_address,
            tx.amount,
            self.pending.len()
        );
        Ok(tx.record(self.supply.coin_value_usd()).pending())
    }

    /// Debit, credit and enqueue. A transaction id is applied at most once:
    /// one already pending or confirmed is refused before any balance moves.
    fn apply_transfer(&mut self, tx: Transaction) -> Result<()> {
        if self.pending.contains(&tx.id) || self.confirmed_ids.contains(&tx.id) {
            return Err(LedgerError::DuplicateTransaction(tx.id));
        }
        let from = tx
            .from_address
            .as_deref()
            .ok_or_else(|| LedgerError::validation("transfer requires a sender"))?;

        let sender = self
            .wallets
            .get_mut(from)
            .ok_or_else(|| LedgerError::not_found("Sender wallet not found"))?;
        if sender.balance < tx.amount {
            return Err(LedgerError::InsufficientFunds {
                needed: tx.amount,
                available: sender.balance,
            });
        }
        sender.balance -= tx.amount;

        match self.wallets.get_mut(&tx.to_address) {
            Some(recipient) => recipient.balance += tx.amount,
            None => {
                *self.unclaimed.entry(tx.to_address.clone()).or_insert(0.0) += tx.amount;
                debug!(
                    "TX - {} recipient {} has no wallet, parked {}",
                    tx.id, tx.to_address, tx.amount
                );
            }
        }

        self.pending.push(tx);
        Ok(())
    }
}
