//! Yahoo Finance API response models.
//!
//! Only the fields needed to extract a price and its currency are modelled.

use serde::Deserialize;

/// Response wrapper for the v8 chart API
#[derive(Debug, Deserialize)]
pub struct YahooChartResponse {
    pub chart: YahooChart,
}

#[derive(Debug, Deserialize)]
pub struct YahooChart {
    #[serde(default)]
    pub result: Option<Vec<YahooChartResult>>,
}

#[derive(Debug, Deserialize)]
pub struct YahooChartResult {
    pub meta: YahooChartMeta,
}

/// Summary fields carried in the chart metadata block
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooChartMeta {
    pub currency: Option<String>,
    pub regular_market_price: Option<f64>,
}

/// Main response wrapper for quoteSummary API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooQuoteSummaryResponse {
    pub quote_summary: YahooQuoteSummary,
}

/// Quote summary container
#[derive(Debug, Deserialize)]
pub struct YahooQuoteSummary {
    #[serde(default)]
    pub result: Option<Vec<YahooQuoteSummaryResult>>,
}

/// Individual result from quoteSummary API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooQuoteSummaryResult {
    pub price: Option<YahooPriceData>,
    pub summary_detail: Option<YahooSummaryDetail>,
}

/// Price module of the quoteSummary API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooPriceData {
    pub currency: Option<String>,
    pub regular_market_price: Option<YahooPriceDetail>,
}

/// summaryDetail module of the quoteSummary API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooSummaryDetail {
    pub currency: Option<String>,
    pub previous_close: Option<YahooPriceDetail>,
}

/// Price detail with raw and formatted values.
/// Yahoo sends `{}` when no data is available.
#[derive(Debug, Deserialize, Clone)]
pub struct YahooPriceDetail {
    pub raw: Option<f64>,
}

impl YahooQuoteSummaryResult {
    /// Regular market price, falling back to the previous close.
    pub fn price(&self) -> Option<f64> {
        self.price
            .as_ref()
            .and_then(|p| p.regular_market_price.as_ref())
            .and_then(|d| d.raw)
            .or_else(|| {
                self.summary_detail
                    .as_ref()
                    .and_then(|d| d.previous_close.as_ref())
                    .and_then(|d| d.raw)
            })
    }

    pub fn currency(&self) -> Option<String> {
        self.price
            .as_ref()
            .and_then(|p| p.currency.clone())
            .or_else(|| self.summary_detail.as_ref().and_then(|d| d.currency.clone()))
    }
}
