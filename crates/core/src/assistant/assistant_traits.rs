use async_trait::async_trait;

use super::assistant_model::AskResponse;
use crate::errors::Result;
use tradechat_market_data::SymbolCatalog;

/// Single entry point for free-text requests.
#[async_trait]
pub trait AssistantServiceTrait: Send + Sync {
    /// Classify `text` and carry out the request.
    ///
    /// Price lookups fail with `Error::MarketData` once the provider has
    /// exhausted its options; trade mutations on an unknown id fail with
    /// `TradeError::NotFound`. An unrecognized request is not an error.
    async fn ask(&self, text: &str) -> Result<AskResponse>;

    /// Logical symbols with their candidate provider symbols.
    fn list_symbols(&self) -> SymbolCatalog;
}
