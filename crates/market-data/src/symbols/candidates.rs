use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

/// Note attached to the last-resort candidate of an unmapped symbol.
const AS_IS_NOTE: &str = "as-is";

/// Built-in logical symbol → provider symbol fallbacks, in priority order.
pub const DEFAULT_CANDIDATES: &[(&str, &[(&str, &str)])] = &[
    (
        "SX5E",
        &[
            ("^STOXX50E", "Yahoo index primary"),
            ("^STOXX50", "Yahoo index alt"),
            ("FEZ", "ETF proxy: SPDR EURO STOXX 50"),
            ("EZU", "ETF proxy: iShares MSCI EMU"),
        ],
    ),
    ("SX7E", &[("^SX7E", "Yahoo index primary")]),
    (
        "DAX",
        &[
            ("^GDAXI", "Yahoo index primary"),
            ("DAX", "ETF proxy: iShares DAX"),
        ],
    ),
    ("CAC", &[("^FCHI", "Yahoo index primary")]),
    ("IBEX", &[("^IBEX", "Yahoo index primary")]),
    ("AEX", &[("^AEX", "Yahoo index primary")]),
    ("FTSE", &[("^FTSE", "Yahoo index primary")]),
    ("SMI", &[("^SSMI", "Yahoo index primary")]),
    ("MIB", &[("FTSEMIB.MI", "Yahoo index primary")]),
    (
        "SPX",
        &[("^GSPC", "Yahoo index primary"), ("SPY", "ETF proxy")],
    ),
    (
        "NDX",
        &[("^NDX", "Yahoo index primary"), ("QQQ", "ETF proxy")],
    ),
];

/// One fallback option for a logical symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub provider_symbol: String,
    pub note: String,
}

impl Candidate {
    pub fn new(provider_symbol: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            provider_symbol: provider_symbol.into(),
            note: note.into(),
        }
    }
}

/// Static mapping from logical symbol to ordered provider candidates.
///
/// Candidate order is priority order: the first one that prices wins.
#[derive(Clone, Debug)]
pub struct CandidateTable {
    entries: HashMap<String, Vec<Candidate>>,
}

/// Listing of the table for callers: sorted logical symbols plus their
/// candidate provider symbols in priority order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SymbolCatalog {
    pub supported: Vec<String>,
    pub mapping: BTreeMap<String, Vec<String>>,
}

impl CandidateTable {
    pub fn new<I, C>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, C)>,
        C: IntoIterator<Item = Candidate>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(symbol, candidates)| (symbol, candidates.into_iter().collect()))
                .collect(),
        }
    }

    /// Candidates for `symbol`, or the symbol itself as the only candidate
    /// when the table has no entry for it.
    pub fn candidates_for(&self, symbol: &str) -> Cow<'_, [Candidate]> {
        match self.entries.get(symbol) {
            Some(candidates) if !candidates.is_empty() => Cow::Borrowed(candidates.as_slice()),
            _ => Cow::Owned(vec![Candidate::new(symbol, AS_IS_NOTE)]),
        }
    }

    pub fn catalog(&self) -> SymbolCatalog {
        let mapping: BTreeMap<String, Vec<String>> = self
            .entries
            .iter()
            .map(|(symbol, candidates)| {
                (
                    symbol.clone(),
                    candidates
                        .iter()
                        .map(|c| c.provider_symbol.clone())
                        .collect(),
                )
            })
            .collect();
        SymbolCatalog {
            supported: mapping.keys().cloned().collect(),
            mapping,
        }
    }
}

impl Default for CandidateTable {
    fn default() -> Self {
        Self::new(DEFAULT_CANDIDATES.iter().map(|(symbol, candidates)| {
            (
                symbol.to_string(),
                candidates
                    .iter()
                    .map(|(provider_symbol, note)| Candidate::new(*provider_symbol, *note))
                    .collect::<Vec<_>>(),
            )
        }))
    }
}
