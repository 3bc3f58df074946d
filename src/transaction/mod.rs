pub mod model;
pub mod pool;

pub use model::{REWARD_SIGNATURE, Transaction, TransactionRecord};
pub use pool::PendingPool;
