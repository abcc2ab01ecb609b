//! Market data provider abstractions and implementations.
//!
//! This module contains:
//! - The `MarketDataProvider` trait that all providers implement
//! - `mock`: fixed synthetic quotes, no network
//! - `feed`: multi-source feed walking the candidate table with retries
//! - `yahoo`: the Yahoo Finance price source used by the feed
//! - `llm`: quotes requested from a generative text backend
//! - `factory`: selects one provider from configuration

mod traits;

pub mod factory;
pub mod feed;
pub mod llm;
pub mod mock;
pub mod yahoo;

pub use traits::MarketDataProvider;
