use log::warn;
use std::env;
use std::str::FromStr;

/// Default cap on cumulative issued coins.
pub const DEFAULT_MAX_SUPPLY: f64 = 100_000_000.0;

/// Fixed coin price in USD.
pub const DEFAULT_COIN_VALUE_USD: f64 = 150.0;

/// Coins minted per block (before clamping to the cap).
pub const DEFAULT_BLOCK_REWARD: f64 = 50.0;

/// Reported difficulty; mining does no proof-of-work.
pub const DEFAULT_DIFFICULTY: u32 = 4;

/// Starting balance for wallets created by the ledger.
pub const DEFAULT_CREATE_GRANT: f64 = 100.0;

/// Starting balance for imported wallets.
pub const DEFAULT_IMPORT_GRANT: f64 = 500.0;

/// Pending transactions bundled into one block besides the reward.
pub const DEFAULT_MAX_TXS_PER_BLOCK: usize = 5;

/// Economic and seeding parameters of a ledger instance.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerConfig {
    pub max_supply: f64,
    pub coin_value_usd: f64,
    pub block_reward: f64,
    pub difficulty: u32,
    pub create_grant: f64,
    pub import_grant: f64,
    pub max_txs_per_block: usize,
    pub seed: SeedConfig,
}

/// What the ledger is pre-populated with on start-up.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedConfig {
    pub enabled: bool,
    pub blocks: usize,
    pub pending: usize,
    pub primary_balance: f64,
    pub extra_wallets: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            blocks: 10,
            pending: 3,
            primary_balance: 10_000_000.0,
            extra_wallets: 2,
        }
    }
}

impl SeedConfig {
    /// Genesis block only, no wallets, empty pool.
    pub fn empty() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_supply: DEFAULT_MAX_SUPPLY,
            coin_value_usd: DEFAULT_COIN_VALUE_USD,
            block_reward: DEFAULT_BLOCK_REWARD,
            difficulty: DEFAULT_DIFFICULTY,
            create_grant: DEFAULT_CREATE_GRANT,
            import_grant: DEFAULT_IMPORT_GRANT,
            max_txs_per_block: DEFAULT_MAX_TXS_PER_BLOCK,
            seed: SeedConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl LedgerConfig {
    /// Read from the process environment (after `.env` has been loaded).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; missing or unparseable keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Self::default();
        Self {
            max_supply: parse_or(&lookup, "MAX_SUPPLY", d.max_supply),
            coin_value_usd: parse_or(&lookup, "COIN_VALUE_USD", d.coin_value_usd),
            block_reward: parse_or(&lookup, "BLOCK_REWARD", d.block_reward),
            difficulty: parse_or(&lookup, "DIFFICULTY", d.difficulty),
            create_grant: parse_or(&lookup, "CREATE_GRANT", d.create_grant),
            import_grant: parse_or(&lookup, "IMPORT_GRANT", d.import_grant),
            max_txs_per_block: parse_or(&lookup, "MAX_TXS_PER_BLOCK", d.max_txs_per_block),
            seed: SeedConfig {
                enabled: parse_or(&lookup, "SEED_DATA", d.seed.enabled),
                ..d.seed
            },
        }
    }

    /// Reject amounts the supply arithmetic cannot work with. Grants and
    /// rewards above the cap are fine: they are clamped when applied.
    pub fn validate(&self) -> Result<(), String> {
        let amounts = [
            ("max_supply", self.max_supply),
            ("coin_value_usd", self.coin_value_usd),
            ("block_reward", self.block_reward),
            ("create_grant", self.create_grant),
            ("import_grant", self.import_grant),
            ("seed.primary_balance", self.seed.primary_balance),
        ];
        for (name, v) in amounts {
            if !v.is_finite() || v < 0.0 {
                return Err(format!("{name} must be a finite, non-negative number"));
            }
        }
        Ok(())
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(d.host),
            port: parse_or(&lookup, "PORT", d.port),
        }
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("config: ignoring unparseable {key}={raw:?}, using {default:?}");
            default
        }),
    }
}
