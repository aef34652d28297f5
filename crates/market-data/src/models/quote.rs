use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::symbol::Symbol;

/// Latest price for a symbol as reported by a provider.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Quote {
    /// The symbol that was priced
    pub symbol: Symbol,

    /// Latest trade price or exchange rate
    pub price: Decimal,

    /// Quote currency
    pub currency: String,

    /// When the quote was received
    pub timestamp: DateTime<Utc>,

    /// Provider that produced the quote (ALPHA_VANTAGE, ...)
    pub source: String,
}

impl Quote {
    pub fn new(symbol: Symbol, price: Decimal, currency: String, source: String) -> Self {
        Self {
            symbol,
            price,
            currency,
            timestamp: Utc::now(),
            source,
        }
    }
}
