use super::Block;
use super::block::GENESIS_PREVIOUS_HASH;
use crate::transaction::Transaction;

/// Append-only, in-memory chain of blocks. Never empty.
#[derive(Debug)]
pub struct Blockchain {
    chain: Vec<Block>,
}

impl Blockchain {
    /// Initialize a new chain holding only a genesis block.
    pub fn new(timestamp: i64, nonce: u64) -> Self {
        Self {
            chain: vec![Block::new(
                0,
                GENESIS_PREVIOUS_HASH.to_string(),
                timestamp,
                nonce,
                Vec::new(),
            )],
        }
    }

    /// Initialize a chain with a prebuilt genesis block.
    pub fn with_genesis(genesis: Block) -> Result<Self, &'static str> {
        if genesis.height != 0 || genesis.previous_hash != GENESIS_PREVIOUS_HASH {
            return Err("genesis must be height 0 with the sentinel previous hash");
        }
        Ok(Self {
            chain: vec![genesis],
        })
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> &Block {
        // `chain` is built non-empty and only ever grows.
        &self.chain[self.chain.len() - 1]
    }

    /// Build (but do not append) the block that would come next.
    /// The timestamp is clamped so it never goes backwards.
    pub fn next_block(&self, timestamp: i64, nonce: u64, transactions: Vec<Transaction>) -> Block {
        let last = self.last_block();
        Block::new(
            self.chain.len() as u64,
            last.hash.clone(),
            timestamp.max(last.timestamp),
            nonce,
            transactions,
        )
    }

    /// Append a block built on top of the current tip.
    pub fn append(&mut self, block: Block) -> Result<&Block, &'static str> {
        let last = self.last_block();
        if block.height != self.chain.len() as u64 {
            return Err("block height does not extend the chain");
        }
        if block.previous_hash != last.hash {
            return Err("block does not link to the current tip");
        }
        if block.timestamp < last.timestamp {
            return Err("block timestamp goes backwards");
        }
        if !block.is_sealed() {
            return Err("block hash does not match its content");
        }
        self.chain.push(block);
        Ok(self.last_block())
    }

    /// Validate the entire chain: dense heights, linkage and hashes.
    pub fn is_valid_chain(&self) -> bool {
        let genesis = &self.chain[0];
        if genesis.height != 0
            || genesis.previous_hash != GENESIS_PREVIOUS_HASH
            || !genesis.is_sealed()
        {
            return false;
        }

        self.chain.windows(2).all(|pair| {
            let (prev, current) = (&pair[0], &pair[1]);
            current.height == prev.height + 1
                && current.previous_hash == prev.hash
                && current.timestamp >= prev.timestamp
                && current.is_sealed()
        })
    }

    pub fn get(&self, height: u64) -> Option<&Block> {
        self.chain.get(usize::try_from(height).ok()?)
    }

    pub fn find_by_hash(&self, hash: &str) -> Option<&Block> {
        self.chain.iter().find(|b| b.hash == hash)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.chain
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn transaction_count(&self) -> usize {
        self.chain.iter().map(|b| b.transactions.len()).sum()
    }
}
