//! Pricing domain models.

use rust_decimal::Decimal;
use serde::Serialize;

/// Which pipeline stage produced a price.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    Cache,
    Commodity,
    Manufacturer,
    DirectTable,
    Similarity,
    Default,
}

/// Resolved price for one material.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MaterialQuote {
    pub material: String,
    pub price: Decimal,
    pub source: ResolutionSource,
    /// Symbol that was priced; `None` for cache hits and default prices.
    pub symbol: Option<String>,
}

impl MaterialQuote {
    pub fn new(material: &str, price: Decimal, source: ResolutionSource) -> Self {
        Self {
            material: material.to_string(),
            price,
            source,
            symbol: None,
        }
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn is_default(&self) -> bool {
        self.source == ResolutionSource::Default
    }
}
