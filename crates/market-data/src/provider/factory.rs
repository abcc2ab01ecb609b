//! Provider selection.
//!
//! The provider is chosen once, at startup, from configuration. Selecting
//! the LLM provider without a credential fails here rather than on the
//! first request.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::cache::TtlCache;
use crate::errors::MarketDataError;
use crate::models::Quote;
use crate::provider::feed::{MultiSourceFeed, RetryPolicy};
use crate::provider::llm::{LlmProvider, OpenAiBackend};
use crate::provider::mock::MockProvider;
use crate::provider::yahoo::YahooPriceSource;
use crate::provider::MarketDataProvider;
use crate::symbols::CandidateTable;

pub const DEFAULT_MODEL_NAME: &str = "gpt-4o-mini";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderKind {
    Mock,
    Llm,
    Feed,
}

impl ProviderKind {
    /// `mock`, `openai`/`llm`, anything else is the multi-source feed.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "mock" => Self::Mock,
            "openai" | "llm" => Self::Llm,
            _ => Self::Feed,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ProviderSettings {
    pub kind: ProviderKind,
    pub model_name: String,
    pub api_key: Option<String>,
    pub feed_backoff: Duration,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            kind: ProviderKind::Feed,
            model_name: DEFAULT_MODEL_NAME.to_string(),
            api_key: None,
            feed_backoff: RetryPolicy::default().backoff_base,
        }
    }
}

/// Build the configured provider around a shared quote cache.
pub fn get_provider(
    settings: &ProviderSettings,
    cache: Arc<TtlCache<Quote>>,
    candidates: Arc<CandidateTable>,
) -> Result<Arc<dyn MarketDataProvider>, MarketDataError> {
    let provider: Arc<dyn MarketDataProvider> = match settings.kind {
        ProviderKind::Mock => Arc::new(MockProvider::new(cache)),
        ProviderKind::Llm => {
            let api_key = settings
                .api_key
                .as_deref()
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .ok_or_else(|| MarketDataError::CredentialMissing("OPENAI".to_string()))?;
            let backend = OpenAiBackend::new(api_key, settings.model_name.clone())?;
            Arc::new(LlmProvider::new(Arc::new(backend), cache))
        }
        ProviderKind::Feed => {
            let source = YahooPriceSource::new()?;
            let retry = RetryPolicy {
                backoff_base: settings.feed_backoff,
                ..RetryPolicy::default()
            };
            Arc::new(MultiSourceFeed::new(Arc::new(source), candidates, cache).with_retry_policy(retry))
        }
    };

    info!("Using market data provider {}", provider.id());
    Ok(provider)
}
