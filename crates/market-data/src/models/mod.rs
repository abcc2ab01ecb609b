//! Market data models
//!
//! - `quote` - The quote returned by every provider (Quote)

mod quote;

pub(crate) use quote::clean_currency;
pub use quote::{is_usable_price, Quote};
