use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Ledger;
use crate::blockchain::{Block, Blockchain, GENESIS_PREVIOUS_HASH};
use crate::config::SeedConfig;
use crate::error::{LedgerError, Result};
use crate::transaction::Transaction;
use crate::wallet::{IdGenerator, Wallet};

const BLOCK_SPACING_MS: i64 = 10 * 60 * 1000;
const DAY_MS: i64 = 24 * 60 * 60 * 1000;
const HOUR_MS: i64 = 60 * 60 * 1000;

fn random_tx(
    ids: &mut dyn IdGenerator,
    rng: &mut StdRng,
    sender: bool,
    max_age_ms: i64,
    now: i64,
) -> Transaction {
    Transaction {
        id: ids.next_id(),
        from_address: sender.then(|| ids.next_id()),
        to_address: ids.next_id(),
        amount: rng.gen_range(0.0..100.0),
        timestamp: now - rng.gen_range(0..max_age_ms),
        signature: ids.next_signature(),
    }
}

/// A run of historical blocks ending ten minutes before `now`, each holding
/// one to five transactions, the first of them sender-less.
pub(super) fn seed_chain(
    cfg: &SeedConfig,
    ids: &mut dyn IdGenerator,
    now: i64,
) -> Result<Blockchain> {
    let mut rng = StdRng::seed_from_u64(ids.next_nonce());
    let blocks = cfg.blocks.max(1) as i64;

    let mut chain: Option<Blockchain> = None;
    for i in 0..blocks {
        let tx_count = rng.gen_range(1..=5);
        let txs: Vec<Transaction> = (0..tx_count)
            .map(|j| random_tx(ids, &mut rng, j != 0, DAY_MS, now))
            .collect();
        let timestamp = now - (blocks - i) * BLOCK_SPACING_MS;
        let nonce = rng.gen_range(0..100_000);

        chain = Some(match chain {
            None => Blockchain::with_genesis(Block::new(
                0,
                GENESIS_PREVIOUS_HASH.to_string(),
                timestamp,
                nonce,
                txs,
            ))
            .map_err(|e| LedgerError::InvalidBlock(e.to_string()))?,
            Some(mut bc) => {
                let block = bc.next_block(timestamp, nonce, txs);
                bc.append(block)
                    .map_err(|e| LedgerError::InvalidBlock(e.to_string()))?;
                bc
            }
        });
    }
    chain.ok_or_else(|| LedgerError::InvalidBlock("seed produced no blocks".into()))
}

impl Ledger {
    /// Pending pool between unknown addresses, a large primary wallet and a
    /// few small ones. Balances go through the normal grant path so the
    /// supply counter equals their sum.
    pub(super) fn seed_state(&mut self, now: i64) -> Result<()> {
        let cfg = self.config.seed.clone();
        let mut rng = StdRng::seed_from_u64(self.ids.next_nonce());

        for _ in 0..cfg.pending {
            let tx = random_tx(self.ids.as_mut(), &mut rng, true, HOUR_MS, now);
            self.pending.push(tx);
        }

        let primary = Wallet {
            name: "My Primary Wallet".to_string(),
            address: self.ids.next_id(),
            private_key: None,
            balance: 0.0,
            encrypted: false,
            is_user_wallet: true,
        };
        self.register_wallet(primary, cfg.primary_balance)?;

        for i in 0..cfg.extra_wallets {
            let wallet = Wallet {
                name: format!("Wallet {}", i + 1),
                address: self.ids.next_id(),
                private_key: None,
                balance: 0.0,
                encrypted: i % 2 == 0,
                is_user_wallet: false,
            };
            let balance = rng.gen_range(1000.0..2000.0);
            self.register_wallet(wallet, balance)?;
        }
        Ok(())
    }
}
