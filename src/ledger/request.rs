//! Typed inputs of the mutating operations, checked once on entry.

use std::str::FromStr;

use crate::error::{LedgerError, Result};

pub const DEFAULT_PAGE_LIMIT: usize = 10;
pub const MAX_PAGE_LIMIT: usize = 100;

fn password_given(password: &Option<String>) -> bool {
    password.as_deref().is_some_and(|p| !p.is_empty())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewWallet {
    pub name: String,
    pub password: Option<String>,
}

impl NewWallet {
    pub fn new(name: impl Into<String>, password: Option<String>) -> Self {
        Self {
            name: name.into(),
            password,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(LedgerError::validation("Wallet name is required"));
        }
        Ok(())
    }

    pub fn encrypted(&self) -> bool {
        password_given(&self.password)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportWallet {
    pub private_key: String,
    pub name: String,
    pub password: Option<String>,
}

impl ImportWallet {
    /// The key is used byte for byte; only an all-blank key is refused.
    pub fn validate(&self) -> Result<()> {
        if self.private_key.trim().is_empty() || self.name.is_empty() {
            return Err(LedgerError::validation(
                "Private key and name are required",
            ));
        }
        Ok(())
    }

    pub fn encrypted(&self) -> bool {
        password_given(&self.password)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewTransfer {
    pub from_address: String,
    pub to_address: String,
    pub amount: f64,
    pub password: Option<String>,
}

impl NewTransfer {
    pub fn new(from: impl Into<String>, to: impl Into<String>, amount: f64) -> Self {
        Self {
            from_address: from.into(),
            to_address: to.into(),
            amount,
            password: None,
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.from_address.trim().is_empty() || self.to_address.trim().is_empty() {
            return Err(LedgerError::validation(
                "From address, to address, and amount are required",
            ));
        }
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(LedgerError::validation("amount must be a positive number"));
        }
        Ok(())
    }

    pub fn has_password(&self) -> bool {
        password_given(&self.password)
    }
}

/// Which transactions a listing covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TxFilter {
    /// Every transaction mined into a block.
    #[default]
    All,
    /// Only the pending pool.
    Pending,
}

impl FromStr for TxFilter {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" | "all" | "confirmed" => Ok(TxFilter::All),
            "pending" => Ok(TxFilter::Pending),
            other => Err(LedgerError::validation(format!(
                "unknown transaction type {other:?} (expected all or pending)"
            ))),
        }
    }
}

/// Offset/limit window. A zero or missing limit means the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: usize,
    pub offset: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}

impl Page {
    pub fn new(limit: Option<usize>, offset: Option<usize>) -> Self {
        let limit = match limit {
            None | Some(0) => DEFAULT_PAGE_LIMIT,
            Some(n) => n.min(MAX_PAGE_LIMIT),
        };
        Self {
            limit,
            offset: offset.unwrap_or(0),
        }
    }

    pub fn slice<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset)
            .take(self.limit)
            .collect()
    }
}
