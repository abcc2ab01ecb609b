use log::debug;
use std::sync::Arc;

use super::trades_model::{NewTrade, Trade, TradeStatus, TradeUpdate};
use super::trades_traits::{TradeRepositoryTrait, TradeServiceTrait};
use crate::errors::Result;
use tradechat_market_data::normalize_symbol;

/// Service for managing trades
pub struct TradeService {
    repository: Arc<dyn TradeRepositoryTrait>,
}

impl TradeService {
    pub fn new(repository: Arc<dyn TradeRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl TradeServiceTrait for TradeService {
    fn list_trades(&self) -> Result<Vec<Trade>> {
        self.repository.list()
    }

    fn list_unexecuted_trades(&self) -> Result<Vec<Trade>> {
        Ok(self
            .repository
            .list()?
            .into_iter()
            .filter(|trade| trade.status != TradeStatus::Executed)
            .collect())
    }

    /// Normalizes the symbol, validates, then stores the trade as `open`
    async fn create_trade(&self, new_trade: NewTrade) -> Result<Trade> {
        let new_trade = NewTrade {
            symbol: normalize_symbol(&new_trade.symbol),
            note: new_trade.note.filter(|n| !n.trim().is_empty()),
            ..new_trade
        };
        new_trade.validate()?;
        debug!(
            "Creating trade: {} {} {} @ {}",
            new_trade.side, new_trade.quantity, new_trade.symbol, new_trade.price
        );
        self.repository.create(new_trade).await
    }

    async fn update_trade(&self, trade_id: i64, update: TradeUpdate) -> Result<Trade> {
        let update = TradeUpdate {
            symbol: update.symbol.as_deref().map(normalize_symbol),
            ..update
        };
        update.validate()?;
        self.repository.update(trade_id, update).await
    }

    async fn mark_executed(&self, trade_id: i64) -> Result<Trade> {
        self.repository
            .update(trade_id, TradeUpdate::status(TradeStatus::Executed))
            .await
    }

    async fn delete_trade(&self, trade_id: i64) -> Result<()> {
        self.repository.delete(trade_id).await
    }
}
