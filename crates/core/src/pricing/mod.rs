//! Material pricing.
//!
//! - [`cache`] - time-bounded price cache
//! - [`matcher`] - matching capability consumed by the pipeline
//! - [`service`] - the resolution pipeline
//! - [`config`] - pipeline tunables
//! - [`model`] - resolved quote types

pub mod cache;
pub mod config;
pub mod matcher;
pub mod model;
pub mod service;


pub use cache::QuoteCache;
pub use config::PricingConfig;
pub use matcher::{FakeMaterialMatcher, MaterialMatcher};
pub use model::{MaterialQuote, ResolutionSource};
pub use service::{PricingService, PricingServiceTrait};
