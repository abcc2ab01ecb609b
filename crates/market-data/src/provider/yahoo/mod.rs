//! Yahoo Finance price source.
//!
//! Prices a provider symbol (e.g. `^STOXX50E`, `FEZ`) three ways:
//! - summary: `regularMarketPrice` from the chart API metadata
//! - info: the quoteSummary `price`/`summaryDetail` modules (crumb authenticated)
//! - history: the last close of a 5 day, hourly series

mod models;

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use reqwest::header;
use tracing::debug;
use urlencoding::encode;
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::is_usable_price;
use crate::provider::feed::{PricePoint, PriceSource, Strategy};

use models::{YahooChartResponse, YahooQuoteSummaryResponse};

const PROVIDER_ID: &str = "YAHOO";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const HISTORY_INTERVAL: &str = "1h";
const HISTORY_RANGE: &str = "5d";

// ============================================================================
// Crumb/Cookie Authentication
// ============================================================================

/// Cached Yahoo authentication data
#[derive(Debug, Clone)]
struct CrumbData {
    cookie: String,
    crumb: String,
}

// ============================================================================
// Yahoo Price Source
// ============================================================================

pub struct YahooPriceSource {
    client: reqwest::Client,
    connector: yahoo::YahooConnector,
    crumb: RwLock<Option<CrumbData>>,
}

impl YahooPriceSource {
    pub fn new() -> Result<Self, MarketDataError> {
        let connector = yahoo::YahooConnector::new().map_err(|e| {
            MarketDataError::provider(
                PROVIDER_ID,
                format!("Failed to initialize Yahoo connector: {}", e),
            )
        })?;
        Ok(Self {
            client: reqwest::Client::new(),
            connector,
            crumb: RwLock::new(None),
        })
    }

    // ========================================================================
    // Crumb/Cookie Authentication
    // ========================================================================

    /// Ensure we have a valid Yahoo authentication crumb.
    async fn ensure_crumb(&self) -> Result<CrumbData, MarketDataError> {
        let cached = self
            .crumb
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match cached {
            Some(crumb) => Ok(crumb),
            None => self.fetch_crumb().await,
        }
    }

    /// Fetch a new Yahoo authentication crumb.
    async fn fetch_crumb(&self) -> Result<CrumbData, MarketDataError> {
        // Step 1: Get cookie from fc.yahoo.com
        let response = self
            .client
            .get("https://fc.yahoo.com")
            .send()
            .await
            .map_err(|e| MarketDataError::provider(PROVIDER_ID, format!("Failed to get cookie: {}", e)))?;

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.split_once(';').map(|(v, _)| v.to_string()))
            .ok_or_else(|| MarketDataError::provider(PROVIDER_ID, "Failed to parse Yahoo cookie"))?;

        // Step 2: Get crumb using cookie
        let crumb = self
            .client
            .get("https://query1.finance.yahoo.com/v1/test/getcrumb")
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::COOKIE, &cookie)
            .send()
            .await
            .map_err(|e| MarketDataError::provider(PROVIDER_ID, format!("Failed to get crumb: {}", e)))?
            .text()
            .await
            .map_err(|e| MarketDataError::provider(PROVIDER_ID, format!("Failed to read crumb: {}", e)))?;

        let crumb_data = CrumbData { cookie, crumb };
        *self.crumb.write().unwrap_or_else(PoisonError::into_inner) = Some(crumb_data.clone());
        Ok(crumb_data)
    }

    /// Clear the cached crumb (used when authentication fails)
    fn clear_crumb(&self) {
        *self.crumb.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    // ========================================================================
    // Strategies
    // ========================================================================

    /// Fast path: the chart API metadata block carries the live price.
    async fn fetch_summary(&self, symbol: &str) -> Result<PricePoint, MarketDataError> {
        let url = format!(
            "https://query1.finance.yahoo.com/v8/finance/chart/{}?range=1d&interval=1d",
            encode(symbol)
        );

        let response = self
            .client
            .get(&url)
            .header(header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MarketDataError::provider(
                PROVIDER_ID,
                format!("Chart request for {} returned {}", symbol, response.status()),
            ));
        }

        let data: YahooChartResponse = response.json().await.map_err(|e| {
            MarketDataError::provider(PROVIDER_ID, format!("Failed to parse chart response: {}", e))
        })?;

        let meta = data
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .map(|result| result.meta)
            .ok_or_else(|| self.no_price(symbol))?;

        let price = meta
            .regular_market_price
            .ok_or_else(|| self.no_price(symbol))?;

        Ok(PricePoint::new(price, meta.currency))
    }

    /// Fuller info document from the quoteSummary API.
    async fn fetch_info(&self, symbol: &str) -> Result<PricePoint, MarketDataError> {
        let crumb = self.ensure_crumb().await?;

        let url = format!(
            "https://query1.finance.yahoo.com/v10/finance/quoteSummary/{}?modules=price,summaryDetail&crumb={}",
            encode(symbol),
            encode(&crumb.crumb)
        );

        let response = self
            .client
            .get(&url)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::COOKIE, &crumb.cookie)
            .send()
            .await
            .map_err(|e| {
                MarketDataError::provider(PROVIDER_ID, format!("Info request failed: {}", e))
            })?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            self.clear_crumb();
            return Err(MarketDataError::provider(
                PROVIDER_ID,
                "Yahoo authentication expired",
            ));
        }

        let data: YahooQuoteSummaryResponse = response.json().await.map_err(|e| {
            MarketDataError::provider(PROVIDER_ID, format!("Failed to parse info response: {}", e))
        })?;

        let result = data
            .quote_summary
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| self.no_price(symbol))?;

        let price = result.price().ok_or_else(|| self.no_price(symbol))?;
        Ok(PricePoint::new(price, result.currency()))
    }

    /// Last resort: most recent close of a short hourly history.
    async fn fetch_history(&self, symbol: &str) -> Result<PricePoint, MarketDataError> {
        let response = self
            .connector
            .get_quote_range(symbol, HISTORY_INTERVAL, HISTORY_RANGE)
            .await
            .map_err(|e| MarketDataError::provider(PROVIDER_ID, e.to_string()))?;

        let quotes = response
            .quotes()
            .map_err(|e| MarketDataError::provider(PROVIDER_ID, e.to_string()))?;

        let close = quotes
            .iter()
            .rev()
            .map(|q| q.close)
            .find(|close| is_usable_price(*close))
            .ok_or_else(|| self.no_price(symbol))?;

        // The history series carries no currency we trust
        Ok(PricePoint::new(close, None))
    }

    fn no_price(&self, symbol: &str) -> MarketDataError {
        MarketDataError::NoPrice {
            provider: PROVIDER_ID.to_string(),
            symbol: symbol.to_string(),
        }
    }
}

#[async_trait]
impl PriceSource for YahooPriceSource {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch(
        &self,
        strategy: Strategy,
        provider_symbol: &str,
    ) -> Result<PricePoint, MarketDataError> {
        debug!(
            "Fetching {} price for {} from Yahoo",
            strategy.as_str(),
            provider_symbol
        );
        match strategy {
            Strategy::Summary => self.fetch_summary(provider_symbol).await,
            Strategy::Info => self.fetch_info(provider_symbol).await,
            Strategy::History => self.fetch_history(provider_symbol).await,
        }
    }
}
