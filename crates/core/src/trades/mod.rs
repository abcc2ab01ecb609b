//! Trades module - domain models, services, and traits.

mod trades_errors;
mod trades_model;
mod trades_service;
mod trades_traits;

#[cfg(test)]
pub(crate) mod testing;

pub use trades_errors::TradeError;
pub use trades_model::{NewTrade, Trade, TradeSide, TradeStatus, TradeUpdate};
pub use trades_service::TradeService;
pub use trades_traits::{TradeRepositoryTrait, TradeServiceTrait};
