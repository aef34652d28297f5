//! Provider call orchestration.
//!
//! - A single global rate limiter shared by every quote call
//! - The quote fetcher that applies it before delegating to the provider

mod quote_fetcher;
mod rate_limiter;

pub use quote_fetcher::QuoteFetcher;
pub use rate_limiter::RateLimiter;
