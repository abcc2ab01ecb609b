//! Trading assistant core - trade ledger, intent parsing and the ask orchestrator.
//!
//! This crate is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate. Prices come from a
//! [`tradechat_market_data::MarketDataProvider`] chosen at startup.

pub mod assistant;
pub mod errors;
pub mod trades;

pub use assistant::{parse_intent, AskResponse, AssistantService, AssistantServiceTrait, Intent};
pub use trades::{
    NewTrade, Trade, TradeError, TradeRepositoryTrait, TradeService, TradeServiceTrait, TradeSide,
    TradeStatus, TradeUpdate,
};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
