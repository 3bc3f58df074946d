use thiserror::Error;

/// Every way a ledger operation can be refused.
///
/// Operations check all preconditions before touching state, so an `Err`
/// always means the ledger is exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Auth(String),

    #[error("insufficient funds: needed {needed}, available {available}")]
    InsufficientFunds { needed: f64, available: f64 },

    #[error("mining cap reached: the maximum supply has been issued")]
    SupplyCapReached,

    #[error("no rewards available: all coins have been mined")]
    NoRewardAvailable,

    #[error("wallet already exists for address {0}")]
    WalletExists(String),

    #[error("transaction {0} has already been recorded")]
    DuplicateTransaction(String),

    #[error("invalid block: {0}")]
    InvalidBlock(String),
}

impl LedgerError {
    /// Short machine-readable kind, used by the HTTP layer.
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerError::Validation(_) => "validation_error",
            LedgerError::NotFound(_) => "not_found",
            LedgerError::Auth(_) => "auth_error",
            LedgerError::InsufficientFunds { .. } => "insufficient_funds",
            LedgerError::SupplyCapReached => "supply_cap_reached",
            LedgerError::NoRewardAvailable => "no_reward_available",
            LedgerError::WalletExists(_) => "wallet_exists",
            LedgerError::DuplicateTransaction(_) => "duplicate_transaction",
            LedgerError::InvalidBlock(_) => "invalid_block",
        }
    }

    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        LedgerError::Validation(msg.into())
    }

    pub(crate) fn not_found(msg: impl Into<String>) -> Self {
        LedgerError::NotFound(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
