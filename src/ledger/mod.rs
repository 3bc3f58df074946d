//! The ledger state machine.
//!
//! [`Ledger`] owns the chain, the pending pool, the wallet registry and the
//! supply counters. Every operation takes `&self` or `&mut self`, checks all
//! of its preconditions first and only then commits, so a caller holding the
//! ledger behind one lock never observes a half-applied change.

pub mod mining;
pub mod query;
pub mod request;
mod seed;
pub mod supply;
pub mod transfer;
pub mod wallets;

use chrono::Utc;
use log::{debug, info};
use std::collections::{HashMap, HashSet};

use crate::blockchain::Blockchain;
use crate::config::LedgerConfig;
use crate::error::{LedgerError, Result};
use crate::transaction::PendingPool;
use crate::wallet::{IdGenerator, RandomIds, Wallet, WalletRegistry};

pub use mining::MineResult;
pub use query::LedgerInfo;
pub use request::{ImportWallet, NewTransfer, NewWallet, Page, TxFilter};
pub use supply::SupplyState;

pub struct Ledger {
    chain: Blockchain,
    pending: PendingPool,
    wallets: WalletRegistry,
    supply: SupplyState,
    config: LedgerConfig,
    /// Transfers sent to addresses with no wallet yet, paid out on registration.
    unclaimed: HashMap<String, f64>,
    /// Ids of every transaction that made it into a block.
    confirmed_ids: HashSet<String>,
    ids: Box<dyn IdGenerator + Send>,
}

impl Ledger {
    /// Ledger backed by OS randomness.
    pub fn new(config: LedgerConfig) -> Result<Self> {
        Self::with_ids(config, Box::new(RandomIds::new()))
    }

    /// Ledger using the given id source; seeds it when the config asks to.
    pub fn with_ids(config: LedgerConfig, mut ids: Box<dyn IdGenerator + Send>) -> Result<Self> {
        config.validate().map_err(LedgerError::Validation)?;

        let now = now_millis();
        let chain = if config.seed.enabled {
            seed::seed_chain(&config.seed, ids.as_mut(), now)?
        } else {
            Blockchain::new(now, ids.next_nonce())
        };
        let confirmed_ids = chain
            .blocks()
            .iter()
            .flat_map(|b| b.transactions.iter().map(|t| t.id.clone()))
            .collect();

        let mut ledger = Self {
            chain,
            pending: PendingPool::new(),
            wallets: WalletRegistry::new(),
            supply: SupplyState::new(&config),
            config,
            unclaimed: HashMap::new(),
            confirmed_ids,
            ids,
        };

        if ledger.config.seed.enabled {
            ledger.seed_state(now)?;
            info!(
                "Ledger initialized with {} coins in circulation",
                ledger.supply.current_supply()
            );
            info!("Coin value: ${} USD per coin", ledger.supply.coin_value_usd());
            info!("Total market cap: ${} USD", ledger.supply.market_cap());
        }
        Ok(ledger)
    }

    pub fn chain(&self) -> &Blockchain {
        &self.chain
    }

    pub fn pending(&self) -> &PendingPool {
        &self.pending
    }

    pub fn wallets(&self) -> &WalletRegistry {
        &self.wallets
    }

    pub fn supply(&self) -> &SupplyState {
        &self.supply
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Value parked for an address that has no wallet yet.
    pub fn unclaimed(&self, address: &str) -> f64 {
        self.unclaimed.get(address).copied().unwrap_or(0.0)
    }

    /// Add `wallet` to the registry, granting up to `requested_grant` new
    /// coins (clamped to the remaining supply) plus any parked transfers.
    /// Returns the stored wallet.
    fn register_wallet(&mut self, mut wallet: Wallet, requested_grant: f64) -> Result<Wallet> {
        if self.wallets.contains(&wallet.address) {
            return Err(LedgerError::WalletExists(wallet.address));
        }

        let grant = self.supply.clamp(requested_grant);
        if grant < requested_grant {
            debug!(
                "grant for {} clamped by supply cap: {} -> {}",
                wallet.address, requested_grant, grant
            );
        }
        let parked = self.unclaimed(&wallet.address);
        wallet.balance += grant + parked;

        let stored = self
            .wallets
            .insert(wallet)
            .map_err(|w| LedgerError::WalletExists(w.address))?
            .clone();

        self.supply.issue(grant);
        if parked > 0.0 {
            self.unclaimed.remove(&stored.address);
            debug!("released {} parked coins to {}", parked, stored.address);
        }
        Ok(stored)
    }
}

pub(crate) fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
