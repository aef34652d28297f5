//! Rate-limited access to the quote provider.

use std::sync::Arc;

use log::{debug, warn};

use super::rate_limiter::RateLimiter;
use crate::errors::MarketDataError;
use crate::models::{Quote, Symbol};
use crate::provider::MarketDataProvider;

/// Fetches latest quotes, passing every call through the shared [`RateLimiter`].
///
/// The fetcher does not retry: callers decide whether a failure moves them to
/// another symbol or to a fallback price.
pub struct QuoteFetcher {
    provider: Arc<dyn MarketDataProvider>,
    limiter: Arc<RateLimiter>,
}

impl QuoteFetcher {
    pub fn new(provider: Arc<dyn MarketDataProvider>, limiter: Arc<RateLimiter>) -> Self {
        Self { provider, limiter }
    }

    pub fn provider_id(&self) -> &'static str {
        self.provider.id()
    }

    /// Fetch the latest quote for `symbol`.
    ///
    /// Forex pairs and equities are dispatched by the provider according to the
    /// [`Symbol`] variant.
    pub async fn fetch(&self, symbol: &Symbol) -> Result<Quote, MarketDataError> {
        self.limiter.acquire().await;

        debug!("Fetching {} from {}", symbol, self.provider.id());

        match self.provider.get_latest_quote(symbol).await {
            Ok(quote) => Ok(quote),
            Err(e) if e.is_throttled() => {
                warn!(
                    "Provider {} throttled request for {}: {}",
                    self.provider.id(),
                    symbol,
                    e
                );
                Err(e)
            }
            Err(e) => {
                debug!("Fetch for {} failed: {}", symbol, e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::time::Instant;

    /// Records which symbol was requested and when.
    struct RecordingProvider {
        calls: Mutex<Vec<(String, Instant)>>,
    }

    impl RecordingProvider {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl MarketDataProvider for RecordingProvider {
        fn id(&self) -> &'static str {
            "RECORDING"
        }

        async fn get_latest_quote(&self, symbol: &Symbol) -> Result<Quote, MarketDataError> {
            self.calls
                .lock()
                .unwrap()
                .push((symbol.to_string(), Instant::now()));

            match symbol {
                Symbol::Forex { quote, .. } => Ok(Quote::new(
                    symbol.clone(),
                    dec!(2300.5),
                    quote.to_string(),
                    "RECORDING".to_string(),
                )),
                Symbol::Equity { ticker } if ticker.as_ref() == "BUSY" => {
                    Err(MarketDataError::RateLimited {
                        provider: "RECORDING".to_string(),
                    })
                }
                Symbol::Equity { .. } => Ok(Quote::new(
                    symbol.clone(),
                    dec!(42),
                    "USD".to_string(),
                    "RECORDING".to_string(),
                )),
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_passes_symbol_to_provider() {
        let provider = Arc::new(RecordingProvider::new());
        let fetcher = QuoteFetcher::new(
            provider.clone(),
            Arc::new(RateLimiter::new(Duration::ZERO)),
        );

        let quote = fetcher
            .fetch(&Symbol::classify("XAUUSD", "USD"))
            .await
            .unwrap();
        assert_eq!(quote.price, dec!(2300.5));
        assert_eq!(quote.currency, "USD");

        let quote = fetcher.fetch(&Symbol::equity("LYB")).await.unwrap();
        assert_eq!(quote.price, dec!(42));

        let calls = provider.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, "XAUUSD");
        assert_eq!(calls[1].0, "LYB");
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetches_are_spaced_by_limiter() {
        let provider = Arc::new(RecordingProvider::new());
        let fetcher = QuoteFetcher::new(
            provider.clone(),
            Arc::new(RateLimiter::new(Duration::from_secs(12))),
        );

        fetcher.fetch(&Symbol::equity("AA")).await.unwrap();
        fetcher.fetch(&Symbol::equity("GLW")).await.unwrap();

        let calls = provider.calls.lock().unwrap();
        assert!(calls[1].1 - calls[0].1 >= Duration::from_secs(12));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_fetch_still_consumes_slot() {
        let provider = Arc::new(RecordingProvider::new());
        let fetcher = QuoteFetcher::new(
            provider.clone(),
            Arc::new(RateLimiter::new(Duration::from_secs(12))),
        );

        let result = fetcher.fetch(&Symbol::equity("BUSY")).await;
        assert!(matches!(result, Err(MarketDataError::RateLimited { .. })));

        fetcher.fetch(&Symbol::equity("AA")).await.unwrap();

        let calls = provider.calls.lock().unwrap();
        assert!(calls[1].1 - calls[0].1 >= Duration::from_secs(12));
    }
}
