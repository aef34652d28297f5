//! Market data provider abstractions and implementations.
//!
//! Providers receive an already classified [`Symbol`](crate::models::Symbol);
//! deciding which symbol to price happens in the pricing pipeline, not here.

mod traits;

pub mod alpha_vantage;

pub use traits::MarketDataProvider;
