//! Trade domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::trades_errors::TradeError;
use crate::{errors::ValidationError, Error, Result};

/// Serialized lowercase; any casing is accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "buy",
            TradeSide::Sell => "sell",
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeSide {
    type Err = TradeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(TradeSide::Buy),
            "sell" => Ok(TradeSide::Sell),
            _ => Err(TradeError::InvalidSide(s.to_string())),
        }
    }
}

impl TryFrom<String> for TradeSide {
    type Error = TradeError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

/// Lifecycle of a trade. New trades always start `Open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum TradeStatus {
    #[default]
    Open,
    Executed,
    Canceled,
}

impl TradeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeStatus::Open => "open",
            TradeStatus::Executed => "executed",
            TradeStatus::Canceled => "canceled",
        }
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeStatus {
    type Err = TradeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(TradeStatus::Open),
            "executed" => Ok(TradeStatus::Executed),
            "canceled" => Ok(TradeStatus::Canceled),
            _ => Err(TradeError::InvalidStatus(s.to_string())),
        }
    }
}

impl TryFrom<String> for TradeStatus {
    type Error = TradeError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

/// Domain model representing a trade in the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: i64,
    pub symbol: String,
    pub side: TradeSide,
    pub quantity: f64,
    pub price: f64,
    pub status: TradeStatus,
    pub note: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTrade {
    pub symbol: String,
    pub side: TradeSide,
    pub quantity: f64,
    pub price: f64,
    #[serde(default)]
    pub note: Option<String>,
}

impl NewTrade {
    /// Validates the new trade data.
    pub fn validate(&self) -> Result<()> {
        validate_symbol(&self.symbol)?;
        validate_positive("quantity", self.quantity)?;
        validate_positive("price", self.price)?;
        Ok(())
    }
}

/// Partial update of an existing trade. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeUpdate {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub side: Option<TradeSide>,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub status: Option<TradeStatus>,
    #[serde(default)]
    pub note: Option<String>,
}

impl TradeUpdate {
    pub fn status(status: TradeStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Validates the fields present in the patch.
    pub fn validate(&self) -> Result<()> {
        if let Some(symbol) = &self.symbol {
            validate_symbol(symbol)?;
        }
        if let Some(quantity) = self.quantity {
            validate_positive("quantity", quantity)?;
        }
        if let Some(price) = self.price {
            validate_positive("price", price)?;
        }
        Ok(())
    }
}

fn validate_symbol(symbol: &str) -> Result<()> {
    if symbol.trim().is_empty() {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Trade symbol cannot be empty".to_string(),
        )));
    }
    Ok(())
}

fn validate_positive(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Trade {} must be a positive number, got {}",
            field, value
        ))));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_trade(quantity: f64, price: f64) -> NewTrade {
        NewTrade {
            symbol: "SX5E".to_string(),
            side: TradeSide::Buy,
            quantity,
            price,
            note: None,
        }
    }

    #[test]
    fn test_side_and_status_round_trip_through_text() {
        assert_eq!("BUY".parse::<TradeSide>().unwrap(), TradeSide::Buy);
        assert_eq!("sell".parse::<TradeSide>().unwrap(), TradeSide::Sell);
        assert!("hold".parse::<TradeSide>().is_err());

        assert_eq!("executed".parse::<TradeStatus>().unwrap(), TradeStatus::Executed);
        assert_eq!(TradeStatus::Canceled.to_string(), "canceled");
        assert!("done".parse::<TradeStatus>().is_err());
    }

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_value(TradeSide::Sell).unwrap();
        assert_eq!(json, serde_json::json!("sell"));
        let json = serde_json::to_value(TradeStatus::Open).unwrap();
        assert_eq!(json, serde_json::json!("open"));
    }

    #[test]
    fn test_deserializes_any_casing() {
        let trade: NewTrade = serde_json::from_str(
            r#"{"symbol": "SX5E", "side": "BUY", "quantity": 1, "price": 2}"#,
        )
        .unwrap();
        assert_eq!(trade.side, TradeSide::Buy);

        let update: TradeUpdate = serde_json::from_str(r#"{"status": "Executed"}"#).unwrap();
        assert_eq!(update.status, Some(TradeStatus::Executed));

        assert!(serde_json::from_str::<TradeSide>(r#""hold""#).is_err());
    }

    #[test]
    fn test_new_trade_validation() {
        assert!(new_trade(10.0, 4200.0).validate().is_ok());
        assert!(new_trade(0.0, 4200.0).validate().is_err());
        assert!(new_trade(10.0, -1.0).validate().is_err());
        assert!(new_trade(f64::NAN, 4200.0).validate().is_err());

        let mut trade = new_trade(1.0, 1.0);
        trade.symbol = "  ".to_string();
        assert!(trade.validate().is_err());
    }

    #[test]
    fn test_update_validates_present_fields_only() {
        assert!(TradeUpdate::default().validate().is_ok());
        assert!(TradeUpdate::status(TradeStatus::Executed).validate().is_ok());

        let update = TradeUpdate {
            price: Some(0.0),
            ..TradeUpdate::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_update_deserializes_partial_body() {
        let update: TradeUpdate = serde_json::from_str(r#"{"status": "executed"}"#).unwrap();
        assert_eq!(update, TradeUpdate::status(TradeStatus::Executed));
    }
}
