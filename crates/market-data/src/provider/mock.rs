//! Mock provider returning a fixed synthetic quote for any symbol.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::cache::TtlCache;
use crate::errors::MarketDataError;
use crate::models::Quote;
use crate::provider::MarketDataProvider;
use crate::symbols::normalize_symbol;

const MOCK_PRICE: f64 = 1234.56;
const MOCK_CURRENCY: &str = "USD";

/// Offline provider for demos and tests.
pub struct MockProvider {
    cache: Arc<TtlCache<Quote>>,
}

impl MockProvider {
    pub fn new(cache: Arc<TtlCache<Quote>>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl MarketDataProvider for MockProvider {
    fn id(&self) -> &'static str {
        "MOCK"
    }

    async fn get_price(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let symbol = normalize_symbol(symbol);
        let cache_key = format!("mock:{}", symbol);
        if let Some(quote) = self.cache.get(&cache_key) {
            debug!("Cache hit for {}", cache_key);
            return Ok(quote);
        }

        let quote = Quote::new(
            symbol.clone(),
            symbol,
            MOCK_PRICE,
            Some(MOCK_CURRENCY.to_string()),
        )
        .with_note("mock")
        .with_raw(json!({ "source": "mock" }));
        self.cache.set(cache_key, quote.clone());
        Ok(quote)
    }
}
