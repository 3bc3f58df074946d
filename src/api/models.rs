use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::ledger::{ImportWallet, Ledger, NewTransfer, NewWallet};

/// Shared application state: the whole ledger behind one lock, so each
/// request's read or mutation runs alone.
pub struct AppState {
    ledger: Mutex<Ledger>,
}

impl AppState {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            ledger: Mutex::new(ledger),
        }
    }

    /// Lock the ledger for one operation. Operations never leave partial
    /// state behind, so a poisoned lock is still safe to reuse.
    pub fn ledger(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/* ---------- Query Models ---------- */

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TransactionsQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/* ---------- Request Models ---------- */

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateWalletRequest {
    pub name: String,
    pub password: Option<String>,
}

impl From<CreateWalletRequest> for NewWallet {
    fn from(req: CreateWalletRequest) -> Self {
        NewWallet::new(req.name, req.password)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportWalletRequest {
    pub private_key: String,
    pub name: String,
    pub password: Option<String>,
}

impl From<ImportWalletRequest> for ImportWallet {
    fn from(req: ImportWalletRequest) -> Self {
        ImportWallet {
            private_key: req.private_key,
            name: req.name,
            password: req.password,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateTransactionRequest {
    pub from_address: String,
    pub to_address: String,
    pub amount: f64,
    pub password: Option<String>,
}

impl From<CreateTransactionRequest> for NewTransfer {
    fn from(req: CreateTransactionRequest) -> Self {
        NewTransfer {
            from_address: req.from_address,
            to_address: req.to_address,
            amount: req.amount,
            password: req.password,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MineRequest {
    pub miner_address: String,
}

/* ---------- Response Models ---------- */

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}
