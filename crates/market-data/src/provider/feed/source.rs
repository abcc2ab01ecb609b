use async_trait::async_trait;

use crate::errors::MarketDataError;

/// Ways of extracting a price for one provider symbol, cheapest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Fast summary price field
    Summary,
    /// Fuller metadata / info document
    Info,
    /// Most recent close of a short price history
    History,
}

impl Strategy {
    /// Evaluation order for a single candidate.
    pub const ALL: [Strategy; 3] = [Strategy::Summary, Strategy::Info, Strategy::History];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Summary => "summary",
            Strategy::Info => "info",
            Strategy::History => "history",
        }
    }
}

/// A price as reported by a source, before validation.
#[derive(Clone, Debug, PartialEq)]
pub struct PricePoint {
    pub price: f64,
    pub currency: Option<String>,
}

impl PricePoint {
    pub fn new(price: f64, currency: Option<String>) -> Self {
        Self { price, currency }
    }
}

/// A remote source able to price a provider symbol with each [`Strategy`].
#[async_trait]
pub trait PriceSource: Send + Sync {
    fn id(&self) -> &'static str;

    /// One attempt at `strategy` for `provider_symbol`, without retries.
    async fn fetch(
        &self,
        strategy: Strategy,
        provider_symbol: &str,
    ) -> Result<PricePoint, MarketDataError>;
}
