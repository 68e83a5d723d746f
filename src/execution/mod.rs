//! Order execution
//!
//! Bracket construction from planned child orders and the engine seam. The
//! paper engine is the only implementation in-tree; live connectivity plugs
//! in behind the same trait.

mod paper;
mod types;

pub use paper::PaperEngine;
pub use types::{BracketOrder, Fill, OrderId};

use async_trait::async_trait;

/// Trait for order submission backends
#[async_trait]
pub trait ExecutionEngine: Send + Sync {
    /// Submit a bracket (entry + linked protective stop)
    async fn place_bracket(&self, order: &BracketOrder) -> anyhow::Result<OrderId>;
    /// All fills recorded so far
    async fn get_fills(&self) -> anyhow::Result<Vec<Fill>>;
}
