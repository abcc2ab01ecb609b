//! Market data provider trait definitions.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::Quote;

/// Trait for market data providers.
///
/// Implementations receive the raw logical symbol, normalize it themselves
/// and memoize successful quotes in their cache.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use tradechat_market_data::{MarketDataError, MarketDataProvider, Quote};
///
/// struct FixedProvider;
///
/// #[async_trait]
/// impl MarketDataProvider for FixedProvider {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     async fn get_price(&self, symbol: &str) -> Result<Quote, MarketDataError> {
///         Ok(Quote::new(symbol, symbol, 1.0, None))
///     }
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider, used for logging.
    fn id(&self) -> &'static str;

    /// Fetch the latest quote for a logical symbol.
    ///
    /// Retries and fallbacks are handled inside the provider; the error
    /// returned here is final.
    async fn get_price(&self, symbol: &str) -> Result<Quote, MarketDataError>;
}
