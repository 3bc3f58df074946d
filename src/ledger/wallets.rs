use log::{info, warn};

use super::Ledger;
use super::request::{ImportWallet, NewWallet};
use crate::error::{LedgerError, Result};
use crate::wallet::{Wallet, WalletView};

/// Fresh keys tried before giving up on finding an unused address.
const MAX_KEY_ATTEMPTS: usize = 16;

impl Ledger {
    /// Create a wallet with a fresh key pair and the creation grant
    /// (clamped to the remaining supply).
    pub fn create_wallet(&mut self, req: NewWallet) -> Result<Wallet> {
        if let Err(e) = req.validate() {
            warn!("create_wallet rejected: {e}");
            return Err(e);
        }

        let encrypted = req.encrypted();
        let (private_key, address) = self.fresh_key()?;
        let wallet = Wallet {
            name: req.name,
            address,
            private_key: Some(private_key),
            balance: 0.0,
            encrypted,
            is_user_wallet: false,
        };
        let stored = self.register_wallet(wallet, self.config.create_grant)?;
        info!(
            "WALLET - created {} ({:?}) balance={} supply={}",
            stored.address,
            stored.name,
            stored.balance,
            self.supply.current_supply()
        );
        Ok(stored)
    }

    /// Register the wallet owning `private_key`. The address is derived from
    /// the key, so importing the same key twice is refused.
    pub fn import_wallet(&mut self, req: ImportWallet) -> Result<Wallet> {
        if let Err(e) = req.validate() {
            warn!("import_wallet rejected: {e}");
            return Err(e);
        }

        let encrypted = req.encrypted();
        let address = self.ids.derive_address(&req.private_key);
        if self.wallets.contains(&address) {
            warn!("import_wallet rejected: {address} already registered");
            return Err(LedgerError::WalletExists(address));
        }

        let wallet = Wallet {
            name: req.name,
            address,
            private_key: Some(req.private_key),
            balance: 0.0,
            encrypted,
            is_user_wallet: false,
        };
        let stored = self.register_wallet(wallet, self.config.import_grant)?;
        info!(
            "WALLET - imported {} ({:?}) balance={} supply={}",
            stored.address,
            stored.name,
            stored.balance,
            self.supply.current_supply()
        );
        Ok(stored)
    }

    pub fn get_wallet(&self, address: &str) -> Result<WalletView> {
        self.wallets
            .get(address)
            .map(|w| w.view(self.supply.coin_value_usd()))
            .ok_or_else(|| LedgerError::not_found("Address not found"))
    }

    /// All wallets in registration order, with their USD value.
    pub fn list_wallets(&self) -> Vec<WalletView> {
        let price = self.supply.coin_value_usd();
        self.wallets.iter().map(|w| w.view(price)).collect()
    }

    fn fresh_key(&mut self) -> Result<(String, String)> {
        let mut address = String::new();
        for _ in 0..MAX_KEY_ATTEMPTS {
            let key = self.ids.next_private_key();
            address = self.ids.derive_address(&key);
            if !self.wallets.contains(&address) {
                return Ok((key, address));
            }
        }
        Err(LedgerError::WalletExists(address))
    }
}
