//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur while fetching a quote from a provider.
///
/// None of these are surfaced to API callers: the pricing pipeline treats every
/// variant as a fetch failure and moves to its next fallback.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The requested symbol was not found by the provider.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The provider rate limited the request (HTTP 429 or a throttling note).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider answered, but the price could not be used.
    #[error("Validation failed: {message}")]
    ValidationFailed {
        /// Description of the validation failure
        message: String,
    },

    /// No API key was configured for a provider that requires one.
    #[error("Missing API key for provider {0}")]
    MissingApiKey(String),
}

impl MarketDataError {
    /// Whether the failure came from provider throttling rather than the symbol itself.
    pub fn is_throttled(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throttled_classification() {
        let error = MarketDataError::RateLimited {
            provider: "ALPHA_VANTAGE".to_string(),
        };
        assert!(error.is_throttled());

        let error = MarketDataError::Timeout {
            provider: "ALPHA_VANTAGE".to_string(),
        };
        assert!(error.is_throttled());

        let error = MarketDataError::SymbolNotFound("NOPE".to_string());
        assert!(!error.is_throttled());
    }

    #[test]
    fn test_error_display() {
        let error = MarketDataError::SymbolNotFound("INVALID".to_string());
        assert_eq!(format!("{}", error), "Symbol not found: INVALID");

        let error = MarketDataError::RateLimited {
            provider: "ALPHA_VANTAGE".to_string(),
        };
        assert_eq!(format!("{}", error), "Rate limited: ALPHA_VANTAGE");

        let error = MarketDataError::ProviderError {
            provider: "ALPHA_VANTAGE".to_string(),
            message: "API key invalid".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Provider error: ALPHA_VANTAGE - API key invalid"
        );
    }
}
