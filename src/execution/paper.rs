//! Paper execution engine

use super::{BracketOrder, ExecutionEngine, Fill, OrderId};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Paper engine: every bracket fills immediately at its entry limit.
pub struct PaperEngine {
    fills: Arc<RwLock<Vec<Fill>>>,
}

impl PaperEngine {
    /// Create a new paper engine
    pub fn new() -> Self {
        Self {
            fills: Arc::new(RwLock::new(vec![])),
        }
    }
}

impl Default for PaperEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExecutionEngine for PaperEngine {
    async fn place_bracket(&self, order: &BracketOrder) -> anyhow::Result<OrderId> {
        let order_id = OrderId::new_v4();

        let fill = Fill {
            order_id,
            symbol: order.symbol.clone(),
            side: order.side,
            price: order.entry_limit,
            qty: order.qty,
            timestamp: chrono::Utc::now(),
        };

        let mut fills = self.fills.write().await;
        fills.push(fill);

        tracing::info!(
            ?order_id,
            symbol = %order.symbol,
            qty = order.qty,
            "paper bracket filled at entry limit"
        );
        Ok(order_id)
    }

    async fn get_fills(&self) -> anyhow::Result<Vec<Fill>> {
        let fills = self.fills.read().await;
        Ok(fills.clone())
    }
}
