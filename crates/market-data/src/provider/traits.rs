//! Market data provider trait definitions.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{Quote, Symbol};

/// Trait for market data providers.
///
/// Implement this trait to add support for a new market data source. The
/// provider is only responsible for talking to the remote API; rate limiting
/// is applied by [`QuoteFetcher`](crate::registry::QuoteFetcher).
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use procplan_market_data::{MarketDataError, MarketDataProvider, Quote, Symbol};
///
/// struct MyProvider;
///
/// #[async_trait]
/// impl MarketDataProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     async fn get_latest_quote(&self, symbol: &Symbol) -> Result<Quote, MarketDataError> {
///         // ... call the remote API
///     }
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "ALPHA_VANTAGE". Used for logging.
    fn id(&self) -> &'static str;

    /// Fetch the latest price for a symbol.
    ///
    /// Implementations dispatch on the [`Symbol`] variant: forex pairs are
    /// priced as exchange rates, equities from their latest trade.
    async fn get_latest_quote(&self, symbol: &Symbol) -> Result<Quote, MarketDataError>;
}
