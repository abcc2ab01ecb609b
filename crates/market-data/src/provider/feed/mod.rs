//! Multi-source feed: the primary real-data provider.
//!
//! For a logical symbol the feed walks its [`CandidateTable`] entry in order.
//! Each candidate is priced by trying every [`Strategy`] in turn, and each
//! strategy gets [`RetryPolicy::max_attempts`] attempts with linear backoff.
//! The first usable price wins and is cached under `feed:<SYMBOL>`.

mod source;

pub use source::{PricePoint, PriceSource, Strategy};

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::cache::TtlCache;
use crate::errors::MarketDataError;
use crate::models::{is_usable_price, Quote};
use crate::provider::MarketDataProvider;
use crate::symbols::{normalize_symbol, CandidateTable};

/// Per-strategy retry budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts per strategy before moving on (at least one is always made)
    pub max_attempts: u32,
    /// Sleep after failed attempt `n` is `backoff_base * n`
    pub backoff_base: Duration,
}

impl RetryPolicy {
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff_base * attempt
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            backoff_base: Duration::from_millis(1200),
        }
    }
}

pub struct MultiSourceFeed {
    source: Arc<dyn PriceSource>,
    candidates: Arc<CandidateTable>,
    cache: Arc<TtlCache<Quote>>,
    retry: RetryPolicy,
}

impl MultiSourceFeed {
    pub fn new(
        source: Arc<dyn PriceSource>,
        candidates: Arc<CandidateTable>,
        cache: Arc<TtlCache<Quote>>,
    ) -> Self {
        Self {
            source,
            candidates,
            cache,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Price one provider symbol, short-circuiting on the first strategy
    /// that yields a usable price.
    async fn resolve_candidate(&self, provider_symbol: &str) -> Result<PricePoint, MarketDataError> {
        let mut last_error: Option<MarketDataError> = None;

        for strategy in Strategy::ALL {
            match self.try_strategy(strategy, provider_symbol).await {
                Ok(point) => return Ok(point),
                Err(e) => {
                    debug!(
                        "{} lookup failed for {}: {}, trying next",
                        strategy.as_str(),
                        provider_symbol,
                        e
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| self.no_price(provider_symbol)))
    }

    async fn try_strategy(
        &self,
        strategy: Strategy,
        provider_symbol: &str,
    ) -> Result<PricePoint, MarketDataError> {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let error = match self.source.fetch(strategy, provider_symbol).await {
                Ok(point) if is_usable_price(point.price) => return Ok(point),
                Ok(_) => self.no_price(provider_symbol),
                Err(e) => e,
            };

            if attempt >= max_attempts {
                return Err(error);
            }

            let delay = self.retry.delay_for(attempt);
            debug!(
                "Attempt {}/{} of {} lookup for {} failed: {}; retrying in {:?}",
                attempt,
                max_attempts,
                strategy.as_str(),
                provider_symbol,
                error,
                delay
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    fn no_price(&self, provider_symbol: &str) -> MarketDataError {
        MarketDataError::NoPrice {
            provider: self.source.id().to_string(),
            symbol: provider_symbol.to_string(),
        }
    }
}

#[async_trait]
impl MarketDataProvider for MultiSourceFeed {
    fn id(&self) -> &'static str {
        "FEED"
    }

    async fn get_price(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let logical = normalize_symbol(symbol);
        let cache_key = format!("feed:{}", logical);
        if let Some(quote) = self.cache.get(&cache_key) {
            debug!("Cache hit for {}", cache_key);
            return Ok(quote);
        }

        if logical.is_empty() {
            return Err(MarketDataError::SymbolNotResolvable {
                symbol: symbol.trim().to_string(),
                message: "symbol is empty after normalization".to_string(),
            });
        }

        let mut last_error: Option<MarketDataError> = None;

        for candidate in self.candidates.candidates_for(&logical).iter() {
            match self.resolve_candidate(&candidate.provider_symbol).await {
                Ok(point) => {
                    debug!(
                        "Priced {} via {} ({})",
                        logical, candidate.provider_symbol, candidate.note
                    );
                    let quote = Quote::new(
                        logical.clone(),
                        candidate.provider_symbol.clone(),
                        point.price,
                        point.currency,
                    )
                    .with_note(candidate.note.clone());
                    self.cache.set(cache_key, quote.clone());
                    return Ok(quote);
                }
                Err(e) => {
                    debug!(
                        "Candidate {} failed for {}: {}",
                        candidate.provider_symbol, logical, e
                    );
                    last_error = Some(e);
                }
            }
        }

        let message = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no candidates".to_string());
        warn!("All candidates exhausted for {}: {}", logical, message);
        Err(MarketDataError::SymbolNotResolvable {
            symbol: logical,
            message,
        })
    }
}
