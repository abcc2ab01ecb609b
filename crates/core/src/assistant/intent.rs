//! Rule-based intent classification for free-text requests.
//!
//! Rules are tried in a fixed order and the first one that matches wins.
//! Matching is a case-insensitive substring search, so a rule may match
//! anywhere in the text.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::trades::TradeSide;

lazy_static! {
    static ref PRICE_RE: Regex =
        Regex::new(r"(?i)(price|level|market\s*value|value)\s+of\s+(?P<sym>[A-Za-z0-9^._-]+)")
            .unwrap();
    static ref PRICE_QUESTION_RE: Regex = Regex::new(
        r"(?i)what\s+is\s+the\s+(current\s+)?(price|value|level)\s+of\s+(?P<sym>[A-Za-z0-9^._-]+)\??"
    )
    .unwrap();
    static ref ADD_TRADE_RE: Regex = Regex::new(
        r"(?i)(?P<side>buy|sell)\s+(?P<qty>[0-9.]+)\s+(?P<sym>[A-Za-z0-9^._-]+)\s+@\s*(?P<price>[0-9.]+)"
    )
    .unwrap();
    static ref MARK_EXECUTED_RE: Regex =
        Regex::new(r"(?i)(mark|set)\s+trade\s+(?P<id>\d+)\s+(executed|done)").unwrap();
    static ref CANCEL_TRADE_RE: Regex =
        Regex::new(r"(?i)(cancel|remove|delete)\s+trade\s+(?P<id>\d+)").unwrap();
    static ref LIST_TRADES_RE: Regex = Regex::new(r"(?i)(list|show)\s+(open\s+)?trades").unwrap();
}

/// What the user asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Price {
        symbol: String,
    },
    AddTrade {
        side: TradeSide,
        quantity: f64,
        symbol: String,
        price: f64,
    },
    MarkExecuted {
        id: i64,
    },
    CancelTrade {
        id: i64,
    },
    ListTrades,
    Unknown,
}

impl Intent {
    /// Wire name reported back to the caller.
    pub fn name(&self) -> &'static str {
        match self {
            Intent::Price { .. } => "price",
            Intent::AddTrade { .. } => "add_trade",
            Intent::MarkExecuted { .. } => "mark_executed",
            Intent::CancelTrade { .. } => "cancel_trade",
            Intent::ListTrades => "list_trades",
            Intent::Unknown => "unknown",
        }
    }
}

/// Classify `text`. Never fails: anything unrecognized is [`Intent::Unknown`].
///
/// A rule whose captured number does not parse (e.g. `1.2.3` as a quantity)
/// counts as not matching and the cascade continues.
pub fn parse_intent(text: &str) -> Intent {
    let text = text.trim();

    parse_price(text)
        .or_else(|| parse_add_trade(text))
        .or_else(|| parse_trade_id(&MARK_EXECUTED_RE, text).map(|id| Intent::MarkExecuted { id }))
        .or_else(|| parse_trade_id(&CANCEL_TRADE_RE, text).map(|id| Intent::CancelTrade { id }))
        .or_else(|| LIST_TRADES_RE.is_match(text).then_some(Intent::ListTrades))
        .unwrap_or(Intent::Unknown)
}

fn parse_price(text: &str) -> Option<Intent> {
    let caps = PRICE_RE
        .captures(text)
        .or_else(|| PRICE_QUESTION_RE.captures(text))?;
    Some(Intent::Price {
        symbol: upper_symbol(&caps),
    })
}

fn parse_add_trade(text: &str) -> Option<Intent> {
    let caps = ADD_TRADE_RE.captures(text)?;
    // Side comes from the matched span itself, not from the start of the text
    let side = if caps["side"].eq_ignore_ascii_case("buy") {
        TradeSide::Buy
    } else {
        TradeSide::Sell
    };
    Some(Intent::AddTrade {
        side,
        quantity: caps["qty"].parse().ok()?,
        symbol: upper_symbol(&caps),
        price: caps["price"].parse().ok()?,
    })
}

fn parse_trade_id(re: &Regex, text: &str) -> Option<i64> {
    re.captures(text)?["id"].parse().ok()
}

fn upper_symbol(caps: &Captures<'_>) -> String {
    caps["sym"].to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_price_phrasings() {
        for text in [
            "price of SX5E",
            "What's the level of sx5e",
            "market value of sx5e",
            "marketvalue of SX5E please",
            "what is the current price of SX5E?",
        ] {
            assert_eq!(
                parse_intent(text),
                Intent::Price {
                    symbol: "SX5E".to_string()
                },
                "{text}"
            );
        }
        assert_eq!(
            parse_intent("value of ^stoxx50e"),
            Intent::Price {
                symbol: "^STOXX50E".to_string()
            }
        );
    }

    #[test]
    fn test_add_trade() {
        assert_eq!(
            parse_intent("buy 10 SX5E @ 4200"),
            Intent::AddTrade {
                side: TradeSide::Buy,
                quantity: 10.0,
                symbol: "SX5E".to_string(),
                price: 4200.0,
            }
        );
        assert_eq!(
            parse_intent("please SELL 2.5 dax @15000.5 now"),
            Intent::AddTrade {
                side: TradeSide::Sell,
                quantity: 2.5,
                symbol: "DAX".to_string(),
                price: 15000.5,
            }
        );
    }

    #[test]
    fn test_side_ignores_leading_words() {
        // "buy" at the start of the text but the trade itself is a sell
        assert!(matches!(
            parse_intent("buyers beware: sell 3 CAC @ 7000"),
            Intent::AddTrade {
                side: TradeSide::Sell,
                ..
            }
        ));
    }

    #[test]
    fn test_unparseable_quantity_falls_through() {
        assert_eq!(parse_intent("buy 1.2.3 SX5E @ 10"), Intent::Unknown);
    }

    #[test]
    fn test_trade_mutations() {
        assert_eq!(
            parse_intent("mark trade 3 executed"),
            Intent::MarkExecuted { id: 3 }
        );
        assert_eq!(parse_intent("Set Trade 12 done"), Intent::MarkExecuted { id: 12 });
        assert_eq!(parse_intent("cancel trade 7"), Intent::CancelTrade { id: 7 });
        assert_eq!(parse_intent("please delete trade 8"), Intent::CancelTrade { id: 8 });
        assert_eq!(parse_intent("remove trade 9"), Intent::CancelTrade { id: 9 });
    }

    #[test]
    fn test_list_trades() {
        assert_eq!(parse_intent("list trades"), Intent::ListTrades);
        assert_eq!(parse_intent("Show open trades"), Intent::ListTrades);
    }

    #[test]
    fn test_rule_order() {
        // Price wins over everything that follows it
        assert_eq!(
            parse_intent("price of DAX then buy 1 DAX @ 1"),
            Intent::Price {
                symbol: "DAX".to_string()
            }
        );
        // Mark wins over list
        assert_eq!(
            parse_intent("show trades and mark trade 1 done"),
            Intent::MarkExecuted { id: 1 }
        );
    }

    #[test]
    fn test_unknown() {
        assert_eq!(parse_intent(""), Intent::Unknown);
        assert_eq!(parse_intent("hello there"), Intent::Unknown);
        assert_eq!(parse_intent("mark trade x executed"), Intent::Unknown);
    }

    #[test]
    fn test_names() {
        assert_eq!(Intent::ListTrades.name(), "list_trades");
        assert_eq!(Intent::CancelTrade { id: 1 }.name(), "cancel_trade");
        assert_eq!(Intent::Unknown.name(), "unknown");
    }

    proptest! {
        #[test]
        fn prop_side_follows_matched_span(
            prefix in "[a-z]{0,8}",
            side in prop::sample::select(vec!["buy", "sell", "BUY", "Sell", "bUy"]),
            qty in 1u32..10_000,
            sym in "[A-Z]{1,5}",
            price in 1u32..100_000,
        ) {
            let text = format!("{} {} {} {} @ {}", prefix, side, qty, sym, price);
            match parse_intent(&text) {
                Intent::AddTrade { side: parsed, quantity, symbol, price: parsed_price } => {
                    let expected = if side.to_ascii_lowercase().starts_with("buy") {
                        TradeSide::Buy
                    } else {
                        TradeSide::Sell
                    };
                    prop_assert_eq!(parsed, expected);
                    prop_assert_eq!(quantity, qty as f64);
                    prop_assert_eq!(symbol, sym);
                    prop_assert_eq!(parsed_price, price as f64);
                }
                other => prop_assert!(false, "unexpected intent {:?}", other),
            }
        }
    }
}
