//! In-memory trade repository shared by the core unit tests.

use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime, Utc};
use std::sync::RwLock;

use super::{NewTrade, Trade, TradeError, TradeRepositoryTrait, TradeStatus, TradeUpdate};
use crate::errors::Result;

#[derive(Default)]
pub struct InMemoryTradeRepository {
    trades: RwLock<Vec<Trade>>,
}

impl InMemoryTradeRepository {
    /// Each created trade gets a strictly later timestamp so ordering is stable.
    fn timestamp(&self, seq: i64) -> NaiveDateTime {
        Utc::now().naive_utc() + Duration::seconds(seq)
    }
}

#[async_trait]
impl TradeRepositoryTrait for InMemoryTradeRepository {
    fn list(&self) -> Result<Vec<Trade>> {
        let mut trades = self.trades.read().unwrap().clone();
        trades.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(trades)
    }

    async fn create(&self, new_trade: NewTrade) -> Result<Trade> {
        let mut trades = self.trades.write().unwrap();
        let id = trades.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let now = self.timestamp(id);
        let trade = Trade {
            id,
            symbol: new_trade.symbol,
            side: new_trade.side,
            quantity: new_trade.quantity,
            price: new_trade.price,
            status: TradeStatus::Open,
            note: new_trade.note,
            created_at: now,
            updated_at: now,
        };
        trades.push(trade.clone());
        Ok(trade)
    }

    async fn update(&self, trade_id: i64, update: TradeUpdate) -> Result<Trade> {
        let mut trades = self.trades.write().unwrap();
        let trade = trades
            .iter_mut()
            .find(|t| t.id == trade_id)
            .ok_or(TradeError::NotFound(trade_id))?;
        if let Some(symbol) = update.symbol {
            trade.symbol = symbol;
        }
        if let Some(side) = update.side {
            trade.side = side;
        }
        if let Some(quantity) = update.quantity {
            trade.quantity = quantity;
        }
        if let Some(price) = update.price {
            trade.price = price;
        }
        if let Some(status) = update.status {
            trade.status = status;
        }
        if update.note.is_some() {
            trade.note = update.note;
        }
        trade.updated_at = Utc::now().naive_utc();
        Ok(trade.clone())
    }

    async fn delete(&self, trade_id: i64) -> Result<()> {
        let mut trades = self.trades.write().unwrap();
        let before = trades.len();
        trades.retain(|t| t.id != trade_id);
        if trades.len() == before {
            return Err(TradeError::NotFound(trade_id).into());
        }
        Ok(())
    }
}
