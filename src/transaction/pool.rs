use std::collections::HashSet;

use super::model::Transaction;

/// Unconfirmed transactions in arrival order.
///
/// Mining consumes from the front, so the oldest entries are always the
/// first to be confirmed.
#[derive(Debug, Default)]
pub struct PendingPool {
    txs: Vec<Transaction>,
}

impl PendingPool {
    pub fn new() -> Self {
        Self { txs: Vec::new() }
    }

    pub fn push(&mut self, tx: Transaction) {
        self.txs.push(tx);
    }

    /// Clones of the `n` oldest transactions, in pool order.
    pub fn oldest(&self, n: usize) -> Vec<Transaction> {
        self.txs.iter().take(n).cloned().collect()
    }

    /// Drop every transaction whose id is in `ids`. Returns how many went.
    pub fn remove_ids(&mut self, ids: &HashSet<&str>) -> usize {
        let before = self.txs.len();
        self.txs.retain(|t| !ids.contains(t.id.as_str()));
        before - self.txs.len()
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.txs.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.txs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.txs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.txs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(id: &str) -> Transaction {
        Transaction {
            id: id.into(),
            from_address: Some("from".into()),
            to_address: "to".into(),
            amount: 1.0,
            timestamp: 0,
            signature: String::new(),
        }
    }

    #[test]
    fn oldest_keeps_insertion_order() {
        let mut pool = PendingPool::new();
        for id in ["a", "b", "c"] {
            pool.push(tx(id));
        }
        let ids: Vec<_> = pool.oldest(2).into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(pool.oldest(10).len(), 3);
    }

    #[test]
    fn remove_ids_only_drops_matches() {
        let mut pool = PendingPool::new();
        for id in ["a", "b", "c"] {
            pool.push(tx(id));
        }
        let ids: HashSet<&str> = ["a", "c", "zzz"].into_iter().collect();
        assert_eq!(pool.remove_ids(&ids), 2);
        assert_eq!(pool.len(), 1);
        assert!(pool.contains("b"));
        assert!(!pool.contains("a"));
    }
}
