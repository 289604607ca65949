//! Domain records: assets, operations and kill-chain stages.

mod asset;
mod kill_chain;
mod operation;

pub use asset::Asset;
pub use kill_chain::{KillChainStep, NOT_APPLICABLE};
pub use operation::Operation;
