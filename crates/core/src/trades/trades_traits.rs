//! Trade repository and service traits.
//!
//! These traits define the contract for trade operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::trades_model::{NewTrade, Trade, TradeUpdate};
use crate::errors::Result;

/// Trait defining the contract for Trade repository operations.
///
/// Writes are last-writer-wins; there is no optimistic concurrency token.
#[async_trait]
pub trait TradeRepositoryTrait: Send + Sync {
    /// Lists all trades, newest-created first.
    fn list(&self) -> Result<Vec<Trade>>;

    /// Creates a new trade with status `open`.
    async fn create(&self, new_trade: NewTrade) -> Result<Trade>;

    /// Applies a partial update.
    ///
    /// Fails with `TradeError::NotFound` when the id is absent.
    async fn update(&self, trade_id: i64, update: TradeUpdate) -> Result<Trade>;

    /// Deletes a trade.
    ///
    /// Fails with `TradeError::NotFound` when the id is absent.
    async fn delete(&self, trade_id: i64) -> Result<()>;
}

/// Trait defining the contract for Trade service operations.
#[async_trait]
pub trait TradeServiceTrait: Send + Sync {
    fn list_trades(&self) -> Result<Vec<Trade>>;

    /// Lists trades that are not yet executed (open and canceled).
    fn list_unexecuted_trades(&self) -> Result<Vec<Trade>>;

    async fn create_trade(&self, new_trade: NewTrade) -> Result<Trade>;

    async fn update_trade(&self, trade_id: i64, update: TradeUpdate) -> Result<Trade>;

    async fn mark_executed(&self, trade_id: i64) -> Result<Trade>;

    async fn delete_trade(&self, trade_id: i64) -> Result<()>;
}
