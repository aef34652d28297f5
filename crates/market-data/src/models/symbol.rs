use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::types::{Currency, Ticker};

/// Marker that opens every foreign-exchange style symbol (XAUUSD, XAGUSD, ...).
const FOREX_MARKER: char = 'X';

/// Length of a base + quote currency pair.
const FOREX_SYMBOL_LEN: usize = 6;

/// A tradable instrument, classified once at resolution time.
///
/// The provider dispatches on the variant instead of re-inspecting the string:
/// forex pairs go to the exchange-rate endpoint, everything else to the
/// latest-trade quote endpoint.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Symbol {
    /// Currency-pair style symbol priced as an exchange rate (e.g. XAU -> USD).
    Forex { base: Currency, quote: Currency },

    /// Equity or commodity ticker priced from its latest trade.
    Equity { ticker: Ticker },
}

impl Symbol {
    /// Classify a raw provider symbol.
    ///
    /// A symbol is a forex pair when it is six ASCII letters, starts with the
    /// `X` marker and ends with the pricing currency. The base currency is the
    /// first three characters; the quote currency is always `pricing_currency`.
    pub fn classify(raw: &str, pricing_currency: &str) -> Self {
        let raw = raw.trim();
        let upper = raw.to_ascii_uppercase();
        let currency = pricing_currency.trim().to_ascii_uppercase();

        let is_forex = upper.len() == FOREX_SYMBOL_LEN
            && upper.chars().all(|c| c.is_ascii_alphabetic())
            && upper.starts_with(FOREX_MARKER)
            && upper.ends_with(&currency);

        if is_forex {
            Self::Forex {
                base: Cow::Owned(upper[..3].to_string()),
                quote: Cow::Owned(currency),
            }
        } else {
            Self::Equity {
                ticker: Arc::from(raw),
            }
        }
    }

    /// Create an equity symbol without classification.
    pub fn equity(ticker: &str) -> Self {
        Self::Equity {
            ticker: Arc::from(ticker),
        }
    }

    pub fn is_forex(&self) -> bool {
        matches!(self, Self::Forex { .. })
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forex { base, quote } => write!(f, "{}{}", base, quote),
            Self::Equity { ticker } => write!(f, "{}", ticker),
        }
    }
}
