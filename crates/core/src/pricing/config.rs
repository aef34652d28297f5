use std::time::Duration;

use rust_decimal::Decimal;

use crate::constants::{
    DEFAULT_CACHE_EXPIRY_SECS, DEFAULT_MANUFACTURER_COUNT, DEFAULT_PRICE,
    DEFAULT_RATE_LIMIT_DELAY_SECS, PRICING_CURRENCY,
};
use crate::errors::{Error, Result};

/// Tunables for the pricing pipeline.
#[derive(Clone, Debug)]
pub struct PricingConfig {
    /// Maximum age of a cached price.
    pub cache_expiry: Duration,
    /// Minimum spacing between provider calls.
    pub rate_limit_delay: Duration,
    /// Manufacturer candidates requested per material.
    pub manufacturer_count: usize,
    /// Price used when every stage fails.
    pub default_price: Decimal,
    /// Quote currency for forex-style symbols.
    pub pricing_currency: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            cache_expiry: Duration::from_secs(DEFAULT_CACHE_EXPIRY_SECS),
            rate_limit_delay: Duration::from_secs(DEFAULT_RATE_LIMIT_DELAY_SECS),
            manufacturer_count: DEFAULT_MANUFACTURER_COUNT,
            default_price: DEFAULT_PRICE,
            pricing_currency: PRICING_CURRENCY.to_string(),
        }
    }
}

impl PricingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.cache_expiry.is_zero() {
            return Err(Error::InvalidConfigValue(
                "cache expiry must be greater than zero".to_string(),
            ));
        }
        if self.manufacturer_count == 0 {
            return Err(Error::InvalidConfigValue(
                "manufacturer count must be at least 1".to_string(),
            ));
        }
        if self.default_price <= Decimal::ZERO {
            return Err(Error::InvalidConfigValue(
                "default price must be positive".to_string(),
            ));
        }
        if self.pricing_currency.trim().len() != 3 {
            return Err(Error::InvalidConfigValue(format!(
                "pricing currency '{}' is not a 3-letter code",
                self.pricing_currency
            )));
        }
        Ok(())
    }
}
