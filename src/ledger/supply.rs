use crate::config::LedgerConfig;

/// Supply counters and price, owned by one ledger instance.
///
/// `current_supply` only grows, and only through [`SupplyState::issue`],
/// which never lets it pass `max_supply`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupplyState {
    current_supply: f64,
    max_supply: f64,
    coin_value_usd: f64,
    block_reward: f64,
}

impl SupplyState {
    pub fn new(config: &LedgerConfig) -> Self {
        Self {
            current_supply: 0.0,
            max_supply: config.max_supply,
            coin_value_usd: config.coin_value_usd,
            block_reward: config.block_reward,
        }
    }

    pub fn current_supply(&self) -> f64 {
        self.current_supply
    }

    pub fn max_supply(&self) -> f64 {
        self.max_supply
    }

    pub fn coin_value_usd(&self) -> f64 {
        self.coin_value_usd
    }

    pub fn remaining(&self) -> f64 {
        (self.max_supply - self.current_supply).max(0.0)
    }

    pub fn is_exhausted(&self) -> bool {
        self.current_supply >= self.max_supply
    }

    /// Largest part of `requested` that can still be issued.
    pub fn clamp(&self, requested: f64) -> f64 {
        requested.min(self.remaining()).max(0.0)
    }

    /// Reward for the next block: the block reward, clamped to what is left.
    pub fn next_reward(&self) -> f64 {
        self.clamp(self.block_reward)
    }

    pub fn market_cap(&self) -> f64 {
        self.current_supply * self.coin_value_usd
    }

    /// Record newly granted coins. Callers pass a value obtained from
    /// [`SupplyState::clamp`]; rounding can never push past the cap.
    pub(crate) fn issue(&mut self, amount: f64) {
        self.current_supply = (self.current_supply + amount).min(self.max_supply);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supply(max: f64, reward: f64) -> SupplyState {
        SupplyState::new(&LedgerConfig {
            max_supply: max,
            block_reward: reward,
            ..LedgerConfig::default()
        })
    }

    #[test]
    fn clamp_never_exceeds_remaining() {
        let mut s = supply(100.0, 50.0);
        s.issue(90.0);
        assert_eq!(s.remaining(), 10.0);
        assert_eq!(s.clamp(500.0), 10.0);
        assert_eq!(s.next_reward(), 10.0);
        assert_eq!(s.clamp(3.0), 3.0);
    }

    #[test]
    fn issue_stops_at_cap() {
        let mut s = supply(100.0, 50.0);
        s.issue(s.clamp(70.0));
        s.issue(s.clamp(70.0));
        assert_eq!(s.current_supply(), 100.0);
        assert!(s.is_exhausted());
        assert_eq!(s.next_reward(), 0.0);
    }

    #[test]
    fn market_cap_uses_coin_price() {
        let mut s = supply(1_000.0, 50.0);
        s.issue(10.0);
        assert_eq!(s.market_cap(), 10.0 * s.coin_value_usd());
    }
}
