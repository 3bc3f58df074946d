//! Simulated coin ledger: a block chain, a pending pool and wallets with a
//! hard cap on total issued supply, served over a small JSON API.

pub mod api;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod ledger;
pub mod transaction;
pub mod wallet;

pub use error::{LedgerError, Result};
pub use ledger::Ledger;
