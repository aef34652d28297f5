//! ProcPlan Market Data Crate
//!
//! Fetches live prices for tradable symbols from an external market data
//! provider.
//!
//! # Overview
//!
//! - [`Symbol`] classifies a raw ticker once, as a forex pair or an equity
//! - [`MarketDataProvider`] isolates the remote API ([`AlphaVantageProvider`])
//! - [`RateLimiter`] spaces every outbound call globally
//! - [`QuoteFetcher`] combines the two
//!
//! ```text
//! Symbol --> QuoteFetcher --> RateLimiter (wait) --> Provider --> Quote
//! ```

pub mod errors;
pub mod models;
pub mod provider;
pub mod registry;

pub use errors::MarketDataError;
pub use models::{Currency, Quote, Symbol, Ticker};
pub use provider::alpha_vantage::AlphaVantageProvider;
pub use provider::MarketDataProvider;
pub use registry::{QuoteFetcher, RateLimiter};
