//! SQLite storage implementation for trades.

mod model;
mod repository;

pub use model::{NewTradeDB, TradeChangesetDB, TradeDB};
pub use repository::TradeRepository;
