use serde::{Deserialize, Serialize};

/// Market data quote for a logical symbol.
///
/// Produced once by a provider call and then only cloned out of the cache,
/// never mutated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Logical symbol the user asked for (e.g. SX5E)
    pub symbol: String,

    /// Symbol actually queried (e.g. ^STOXX50E, FEZ, openai:SX5E)
    pub provider_symbol: String,

    /// Last price, always positive and finite
    pub price: f64,

    /// Quote currency when the provider reported one
    pub currency: Option<String>,

    /// Free-form note about where the price came from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Raw provider payload, when worth keeping
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<serde_json::Value>,
}

impl Quote {
    /// Create a new quote with minimal required fields
    pub fn new(
        symbol: impl Into<String>,
        provider_symbol: impl Into<String>,
        price: f64,
        currency: Option<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            provider_symbol: provider_symbol.into(),
            price,
            currency: currency.and_then(clean_currency),
            note: None,
            raw: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_raw(mut self, raw: serde_json::Value) -> Self {
        self.raw = Some(raw);
        self
    }
}

/// A price is usable when it is a positive, finite number.
pub fn is_usable_price(price: f64) -> bool {
    price.is_finite() && price > 0.0
}

/// Blank currency strings are reported as absent.
pub(crate) fn clean_currency(currency: String) -> Option<String> {
    let trimmed = currency.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usable_price() {
        assert!(is_usable_price(4210.5));
        assert!(!is_usable_price(0.0));
        assert!(!is_usable_price(-1.0));
        assert!(!is_usable_price(f64::NAN));
        assert!(!is_usable_price(f64::INFINITY));
    }

    #[test]
    fn test_blank_currency_is_dropped() {
        let quote = Quote::new("SX5E", "FEZ", 52.1, Some("  ".to_string()));
        assert_eq!(quote.currency, None);

        let quote = Quote::new("SX5E", "FEZ", 52.1, Some(" USD ".to_string()));
        assert_eq!(quote.currency.as_deref(), Some("USD"));
    }

    #[test]
    fn test_serialize_skips_empty_optionals() {
        let quote = Quote::new("SPX", "^GSPC", 5000.0, None);
        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["provider_symbol"], "^GSPC");
        assert!(json["currency"].is_null());
        assert!(json.get("note").is_none());
        assert!(json.get("raw").is_none());
    }
}
