//! Symbol handling: text normalization and logical → provider symbol candidates.

mod candidates;
mod normalize;

pub use candidates::{Candidate, CandidateTable, SymbolCatalog, DEFAULT_CANDIDATES};
pub use normalize::normalize_symbol;
