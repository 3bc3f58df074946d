pub mod keys;

use serde::Serialize;
use std::collections::HashMap;

pub use keys::{IdGenerator, RandomIds, SequentialIds, derive_address};

/// A named balance holder. The address never changes once assigned.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub name: String,
    pub address: String,
    /// Only wallets created or imported through the ledger carry one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    pub balance: f64,
    /// Spending requires a password when set.
    pub encrypted: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_user_wallet: bool,
}

impl Wallet {
    /// Listing projection: derived USD value, private key withheld.
    pub fn view(&self, coin_value_usd: f64) -> WalletView {
        WalletView {
            name: self.name.clone(),
            address: self.address.clone(),
            private_key: None,
            balance: self.balance,
            encrypted: self.encrypted,
            is_user_wallet: self.is_user_wallet,
            value_usd: self.balance * coin_value_usd,
        }
    }

    /// Same as [`Wallet::view`] but including the private key, for the
    /// response that hands a freshly created or imported wallet to its owner.
    pub fn owner_view(&self, coin_value_usd: f64) -> WalletView {
        WalletView {
            private_key: self.private_key.clone(),
            ..self.view(coin_value_usd)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletView {
    pub name: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    pub balance: f64,
    pub encrypted: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_user_wallet: bool,
    #[serde(rename = "valueUSD")]
    pub value_usd: f64,
}

/// Wallets keyed by address, remembering registration order for listings.
#[derive(Debug, Default)]
pub struct WalletRegistry {
    wallets: Vec<Wallet>,
    by_address: HashMap<String, usize>,
}

impl WalletRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a wallet. Refuses a second wallet for the same address.
    pub fn insert(&mut self, wallet: Wallet) -> Result<&Wallet, Wallet> {
        if self.by_address.contains_key(&wallet.address) {
            return Err(wallet);
        }
        let idx = self.wallets.len();
        self.by_address.insert(wallet.address.clone(), idx);
        self.wallets.push(wallet);
        Ok(&self.wallets[idx])
    }

    pub fn get(&self, address: &str) -> Option<&Wallet> {
        self.by_address.get(address).map(|&i| &self.wallets[i])
    }

    pub fn get_mut(&mut self, address: &str) -> Option<&mut Wallet> {
        let idx = *self.by_address.get(address)?;
        self.wallets.get_mut(idx)
    }

    pub fn contains(&self, address: &str) -> bool {
        self.by_address.contains_key(address)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Wallet> {
        self.wallets.iter()
    }

    pub fn len(&self) -> usize {
        self.wallets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wallets.is_empty()
    }

    pub fn total_balance(&self) -> f64 {
        self.wallets.iter().map(|w| w.balance).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallet(name: &str, address: &str, balance: f64) -> Wallet {
        Wallet {
            name: name.into(),
            address: address.into(),
            private_key: Some("secret".into()),
            balance,
            encrypted: false,
            is_user_wallet: false,
        }
    }

    #[test]
    fn one_wallet_per_address() {
        let mut reg = WalletRegistry::new();
        assert!(reg.insert(wallet("a", "addr-1", 1.0)).is_ok());
        assert!(reg.insert(wallet("b", "addr-1", 2.0)).is_err());
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get("addr-1").map(|w| w.name.as_str()), Some("a"));
    }

    #[test]
    fn iter_keeps_registration_order() {
        let mut reg = WalletRegistry::new();
        for (i, addr) in ["z", "a", "m"].iter().enumerate() {
            reg.insert(wallet(&format!("w{i}"), addr, i as f64)).expect("insert");
        }
        let order: Vec<_> = reg.iter().map(|w| w.address.as_str()).collect();
        assert_eq!(order, vec!["z", "a", "m"]);
        assert_eq!(reg.total_balance(), 3.0);
    }

    #[test]
    fn view_hides_private_key_but_owner_view_shows_it() {
        let w = wallet("a", "addr", 2.0);
        let json = serde_json::to_value(w.view(150.0)).expect("json");
        assert!(json.get("privateKey").is_none());
        assert_eq!(json["valueUSD"], 300.0);

        let json = serde_json::to_value(w.owner_view(150.0)).expect("json");
        assert_eq!(json["privateKey"], "secret");
    }
}
