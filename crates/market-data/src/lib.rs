//! Trading assistant market data crate.
//!
//! Resolves a *logical* symbol (what the user typed, e.g. `SX5E`) into a [`Quote`]
//! from one of several interchangeable providers.
//!
//! # Architecture
//!
//! ```text
//!  user text ──> normalize_symbol ──> MarketDataProvider::get_price
//!                                          │
//!          ┌───────────────────────────────┼─────────────────────────┐
//!          v                               v                         v
//!    MockProvider                  MultiSourceFeed                LlmProvider
//!                          CandidateTable -> PriceSource      CompletionBackend
//!                          (summary, info, history, retried)  (JSON mode, fallback)
//!          └───────────────────────────────┼─────────────────────────┘
//!                                          v
//!                                   TtlCache<Quote>
//! ```
//!
//! The provider variant is chosen once through [`get_provider`] and every variant
//! memoizes its answers in a caller-owned [`TtlCache`].

pub mod cache;
pub mod errors;
pub mod models;
pub mod provider;
pub mod symbols;

pub use cache::{Clock, SystemClock, TtlCache, DEFAULT_QUOTE_TTL};
pub use errors::MarketDataError;
pub use models::Quote;
pub use provider::factory::{get_provider, ProviderKind, ProviderSettings, DEFAULT_MODEL_NAME};
pub use provider::feed::{MultiSourceFeed, PricePoint, PriceSource, RetryPolicy, Strategy};
pub use provider::llm::{
    parse_price_response, CompletionBackend, CompletionRequest, LlmProvider, OpenAiBackend,
};
pub use provider::mock::MockProvider;
pub use provider::yahoo::YahooPriceSource;
pub use provider::MarketDataProvider;
pub use symbols::{normalize_symbol, Candidate, CandidateTable, SymbolCatalog};
