use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TradeError {
    #[error("Trade {0} not found")]
    NotFound(i64),

    #[error("Invalid trade side: {0}")]
    InvalidSide(String),

    #[error("Invalid trade status: {0}")]
    InvalidStatus(String),
}
