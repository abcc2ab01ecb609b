//! Extraction of a price from free-form model output.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::errors::MarketDataError;
use crate::models::clean_currency;

lazy_static! {
    static ref NUMBER_RE: Regex = Regex::new(r"([0-9][0-9,_.]*)").unwrap();
    static ref CURRENCY_RE: Regex = Regex::new(r"(?i)\b(USD|EUR|GBP|CHF)\b").unwrap();
}

/// Pull `(price, currency)` out of a model response.
///
/// A JSON object with a `price` key (number or numeric string) wins. Anything
/// else falls back to the first numeric run in the text, with a currency code if
/// one of the recognized ones appears.
pub fn parse_price_response(text: &str) -> Result<(f64, Option<String>), MarketDataError> {
    if let Some(parsed) = parse_json(text) {
        return Ok(parsed);
    }

    // Only the first numeric run counts; a malformed one is a failure
    let price = NUMBER_RE
        .captures(text)
        .and_then(|caps| {
            let digits: String = caps[1].chars().filter(|c| *c != ',' && *c != '_').collect();
            digits.trim_end_matches('.').parse::<f64>().ok()
        })
        .ok_or_else(|| MarketDataError::UpstreamParseFailure(truncate(text)))?;

    let currency = CURRENCY_RE
        .captures(text)
        .map(|caps| caps[1].to_ascii_uppercase());

    Ok((price, currency))
}

fn parse_json(text: &str) -> Option<(f64, Option<String>)> {
    let value: Value = serde_json::from_str(text.trim()).ok()?;
    let price = match value.get("price")? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    let currency = value
        .get("currency")
        .and_then(Value::as_str)
        .and_then(|c| clean_currency(c.to_string()));
    Some((price, currency))
}

fn truncate(text: &str) -> String {
    const MAX: usize = 200;
    match text.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_number() {
        let (price, currency) = parse_price_response(r#"{"price": 4250.5, "currency": "EUR"}"#).unwrap();
        assert_eq!(price, 4250.5);
        assert_eq!(currency.as_deref(), Some("EUR"));
    }

    #[test]
    fn test_json_numeric_string_and_blank_currency() {
        let (price, currency) =
            parse_price_response(r#"{"price": "18000.25", "currency": "  "}"#).unwrap();
        assert_eq!(price, 18000.25);
        assert_eq!(currency, None);

        let (_, currency) = parse_price_response(r#"{"price": 1, "currency": null}"#).unwrap();
        assert_eq!(currency, None);
    }

    #[test]
    fn test_prose_fallback() {
        let (price, currency) = parse_price_response("The price is about 4,250 USD today").unwrap();
        assert_eq!(price, 4250.0);
        assert_eq!(currency.as_deref(), Some("USD"));
    }

    #[test]
    fn test_prose_currency_is_uppercased() {
        let (price, currency) = parse_price_response("roughly 1_234.5 chf").unwrap();
        assert_eq!(price, 1234.5);
        assert_eq!(currency.as_deref(), Some("CHF"));
    }

    #[test]
    fn test_json_without_price_falls_back_to_text() {
        let (price, currency) = parse_price_response(r#"{"level": 5012}"#).unwrap();
        assert_eq!(price, 5012.0);
        assert_eq!(currency, None);
    }

    #[test]
    fn test_malformed_first_number_is_parse_failure() {
        let err = parse_price_response("Version 1.2.3 says the index is at 4250 EUR").unwrap_err();
        assert!(matches!(err, MarketDataError::UpstreamParseFailure(_)));
    }

    #[test]
    fn test_sentence_final_period_is_ignored() {
        let (price, _) = parse_price_response("It closed at 5012.").unwrap();
        assert_eq!(price, 5012.0);
    }

    #[test]
    fn test_no_number_is_parse_failure() {
        let err = parse_price_response("I cannot browse the web.").unwrap_err();
        assert!(matches!(err, MarketDataError::UpstreamParseFailure(_)));
    }
}
