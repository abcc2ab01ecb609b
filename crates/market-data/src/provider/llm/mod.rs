//! LLM-backed price provider.
//!
//! Asks a text-completion backend for the latest level of a symbol and
//! extracts a price from whatever comes back. Results are advisory only.

mod backend;
mod parse;

pub use backend::{CompletionBackend, CompletionRequest, OpenAiBackend};
pub use parse::parse_price_response;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use crate::cache::TtlCache;
use crate::errors::MarketDataError;
use crate::models::{is_usable_price, Quote};
use crate::provider::MarketDataProvider;
use crate::symbols::normalize_symbol;

const SYSTEM_PROMPT: &str = "You are a financial data retriever. Return ONLY valid JSON with keys: \
'price' (float) and 'currency' (string or null). Do not include any other keys or text.";

const ADVISORY_NOTE: &str = "via OpenAI (advisory, not an authoritative market feed)";

pub struct LlmProvider {
    backend: Arc<dyn CompletionBackend>,
    cache: Arc<TtlCache<Quote>>,
}

impl LlmProvider {
    pub fn new(backend: Arc<dyn CompletionBackend>, cache: Arc<TtlCache<Quote>>) -> Self {
        Self { backend, cache }
    }

    fn build_request(symbol: &str, json_mode: bool) -> CompletionRequest {
        CompletionRequest {
            system: SYSTEM_PROMPT.to_string(),
            user: format!(
                "Find the latest market level (most recent price) of {}. \
Use a reputable public source. Output strictly as JSON.",
                symbol
            ),
            temperature: 0.0,
            json_mode,
        }
    }

    /// JSON mode first; any failure there gets exactly one unconstrained retry.
    async fn complete(&self, symbol: &str) -> Result<String, MarketDataError> {
        match self.backend.complete(&Self::build_request(symbol, true)).await {
            Ok(text) => Ok(text),
            Err(e) => {
                warn!(
                    "JSON-mode completion failed for {}: {}. Retrying without JSON mode",
                    symbol, e
                );
                self.backend
                    .complete(&Self::build_request(symbol, false))
                    .await
            }
        }
    }
}

#[async_trait]
impl MarketDataProvider for LlmProvider {
    fn id(&self) -> &'static str {
        "OPENAI"
    }

    async fn get_price(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let symbol = normalize_symbol(symbol);
        let cache_key = format!("llm:{}", symbol);
        if let Some(quote) = self.cache.get(&cache_key) {
            debug!("Cache hit for {}", cache_key);
            return Ok(quote);
        }

        let text = self.complete(&symbol).await?;
        let (price, currency) = parse_price_response(&text)?;
        if !is_usable_price(price) {
            return Err(MarketDataError::UpstreamParseFailure(format!(
                "unusable price {} for {}",
                price, symbol
            )));
        }

        let quote = Quote::new(symbol.clone(), format!("openai:{}", symbol), price, currency)
            .with_note(ADVISORY_NOTE)
            .with_raw(json!({ "response": text }));
        self.cache.set(cache_key, quote.clone());
        Ok(quote)
    }
}
