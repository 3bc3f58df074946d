pub mod block;
pub mod model;

pub use block::{Block, GENESIS_PREVIOUS_HASH};
pub use model::Blockchain;
