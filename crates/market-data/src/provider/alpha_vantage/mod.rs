//! Alpha Vantage market data provider implementation.
//!
//! This module prices symbols from the Alpha Vantage API:
//! - Forex pairs via the CURRENCY_EXCHANGE_RATE endpoint
//! - Equities and commodity tickers via the GLOBAL_QUOTE endpoint
//!
//! Note: Alpha Vantage free tier is limited to 5 API calls per minute.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::MarketDataError;
use crate::models::{Quote, Symbol};
use crate::provider::MarketDataProvider;

const BASE_URL: &str = "https://www.alphavantage.co/query";
const PROVIDER_ID: &str = "ALPHA_VANTAGE";

/// Alpha Vantage market data provider.
pub struct AlphaVantageProvider {
    client: Client,
    api_key: String,
}

// ============================================================================
// Response structures for Alpha Vantage API
// ============================================================================

/// CURRENCY_EXCHANGE_RATE response for forex pairs
#[derive(Debug, Deserialize)]
struct ExchangeRateResponse {
    #[serde(rename = "Realtime Currency Exchange Rate")]
    exchange_rate: Option<ExchangeRate>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExchangeRate {
    #[serde(rename = "5. Exchange Rate")]
    rate: Option<String>,
}

/// GLOBAL_QUOTE response for equities
#[derive(Debug, Deserialize)]
struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    global_quote: Option<GlobalQuote>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

/// Unknown symbols come back as an empty `"Global Quote": {}` object,
/// so every field is optional.
#[derive(Debug, Deserialize)]
struct GlobalQuote {
    #[serde(rename = "05. price")]
    price: Option<String>,
}

// ============================================================================
// AlphaVantageProvider implementation
// ============================================================================

impl AlphaVantageProvider {
    /// Create a new Alpha Vantage provider with the given API key.
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, api_key }
    }

    /// Make a request to the Alpha Vantage API.
    async fn fetch(&self, params: &[(&str, &str)]) -> Result<String, MarketDataError> {
        let mut all_params: Vec<(&str, &str)> = params.to_vec();
        all_params.push(("apikey", &self.api_key));

        let url = reqwest::Url::parse_with_params(BASE_URL, &all_params).map_err(|e| {
            MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to build URL: {}", e),
            }
        })?;

        debug!(
            "Alpha Vantage request: {}",
            url.as_str().replace(&self.api_key, "***")
        );

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if !status.is_success() {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        response
            .text()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            })
    }

    /// Check for API-level errors in the response.
    fn check_api_error(
        error_message: &Option<String>,
        note: &Option<String>,
        information: &Option<String>,
    ) -> Result<(), MarketDataError> {
        if let Some(ref msg) = error_message {
            if msg.contains("Invalid API call") || msg.contains("not found") {
                return Err(MarketDataError::SymbolNotFound(msg.clone()));
            }
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: msg.clone(),
            });
        }

        // "Note" usually indicates rate limiting
        if let Some(ref msg) = note {
            if msg.contains("API call frequency") || msg.contains("rate limit") {
                return Err(MarketDataError::RateLimited {
                    provider: PROVIDER_ID.to_string(),
                });
            }
            warn!("Alpha Vantage note: {}", msg);
        }

        if let Some(ref msg) = information {
            if msg.contains("API call frequency") || msg.contains("rate limit") {
                return Err(MarketDataError::RateLimited {
                    provider: PROVIDER_ID.to_string(),
                });
            }
            warn!("Alpha Vantage info: {}", msg);
        }

        Ok(())
    }

    /// Parse a strictly positive price.
    fn parse_price(raw: &str, symbol: &Symbol) -> Result<Decimal, MarketDataError> {
        let price = Decimal::from_str(raw.trim()).map_err(|e| {
            MarketDataError::ValidationFailed {
                message: format!("Unparsable price '{}' for {}: {}", raw, symbol, e),
            }
        })?;

        if price <= Decimal::ZERO {
            return Err(MarketDataError::ValidationFailed {
                message: format!("Non-positive price {} for {}", price, symbol),
            });
        }

        Ok(price)
    }

    fn parse_response<T: serde::de::DeserializeOwned>(text: &str) -> Result<T, MarketDataError> {
        serde_json::from_str(text).map_err(|e| MarketDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message: format!("Failed to parse response: {}", e),
        })
    }

    /// Extract the exchange rate from a CURRENCY_EXCHANGE_RATE body.
    fn parse_exchange_rate(text: &str, symbol: &Symbol) -> Result<Decimal, MarketDataError> {
        let response: ExchangeRateResponse = Self::parse_response(text)?;

        Self::check_api_error(
            &response.error_message,
            &response.note,
            &response.information,
        )?;

        let raw = response
            .exchange_rate
            .and_then(|r| r.rate)
            .ok_or_else(|| MarketDataError::SymbolNotFound(format!("No rate for {}", symbol)))?;

        Self::parse_price(&raw, symbol)
    }

    /// Extract the latest trade price from a GLOBAL_QUOTE body.
    fn parse_global_quote(text: &str, symbol: &Symbol) -> Result<Decimal, MarketDataError> {
        let response: GlobalQuoteResponse = Self::parse_response(text)?;

        Self::check_api_error(
            &response.error_message,
            &response.note,
            &response.information,
        )?;

        let raw = response
            .global_quote
            .and_then(|q| q.price)
            .ok_or_else(|| {
                MarketDataError::SymbolNotFound(format!("No quote data for symbol: {}", symbol))
            })?;

        Self::parse_price(&raw, symbol)
    }

    /// Price a forex pair using the CURRENCY_EXCHANGE_RATE endpoint.
    async fn fetch_exchange_rate(
        &self,
        symbol: &Symbol,
        from: &str,
        to: &str,
    ) -> Result<Quote, MarketDataError> {
        let params = [
            ("function", "CURRENCY_EXCHANGE_RATE"),
            ("from_currency", from),
            ("to_currency", to),
        ];

        let text = self.fetch(&params).await?;
        let price = Self::parse_exchange_rate(&text, symbol)?;

        debug!("Alpha Vantage: {}/{} rate {}", from, to, price);

        Ok(Quote::new(
            symbol.clone(),
            price,
            to.to_string(),
            PROVIDER_ID.to_string(),
        ))
    }

    /// Price an equity using the GLOBAL_QUOTE endpoint.
    async fn fetch_global_quote(
        &self,
        symbol: &Symbol,
        ticker: &str,
    ) -> Result<Quote, MarketDataError> {
        let params = [("function", "GLOBAL_QUOTE"), ("symbol", ticker)];

        let text = self.fetch(&params).await?;
        let price = Self::parse_global_quote(&text, symbol)?;

        debug!("Alpha Vantage: {} last trade {}", ticker, price);

        // GLOBAL_QUOTE does not report a currency; US listings trade in USD
        Ok(Quote::new(
            symbol.clone(),
            price,
            "USD".to_string(),
            PROVIDER_ID.to_string(),
        ))
    }
}

// ============================================================================
// MarketDataProvider trait implementation
// ============================================================================

#[async_trait]
impl MarketDataProvider for AlphaVantageProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_latest_quote(&self, symbol: &Symbol) -> Result<Quote, MarketDataError> {
        if self.api_key.trim().is_empty() {
            return Err(MarketDataError::MissingApiKey(PROVIDER_ID.to_string()));
        }

        match symbol {
            Symbol::Forex { base, quote } => self.fetch_exchange_rate(symbol, base, quote).await,
            Symbol::Equity { ticker } => self.fetch_global_quote(symbol, ticker).await,
        }
    }
}
