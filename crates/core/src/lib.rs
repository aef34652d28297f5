//! ProcPlan Core - material price resolution.
//!
//! Turns free-text material names into market prices by way of reference
//! tables, a matching capability and a rate-limited quote fetcher. Language
//! model integration lives in `procplan-ai`; this crate only defines the
//! [`MaterialMatcher`](pricing::MaterialMatcher) seam it plugs into.

pub mod constants;
pub mod errors;
pub mod pricing;
pub mod reference;

pub use errors::Error;
pub use errors::Result;
pub use errors::ValidationError;
