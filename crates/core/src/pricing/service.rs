//! Material price resolution pipeline.
//!
//! For each material the stages below run in order, stopping at the first
//! success:
//!
//! 1. Cache hit
//! 2. Commodity symbol chosen by the matcher (display name must equal the material)
//! 3. Listed manufacturers chosen by the matcher, tried in order
//! 4. Direct symbol table
//! 5. Most similar direct-table material chosen by the matcher
//! 6. Default price
//!
//! A failed fetch for a commodity, direct-table or similarity symbol ends in
//! the default price. Manufacturer candidates are the exception: when every
//! candidate fails the pipeline continues with the direct table.

use async_trait::async_trait;
use log::{debug, info, warn};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

use procplan_market_data::{QuoteFetcher, Symbol};

use super::cache::QuoteCache;
use super::config::PricingConfig;
use super::matcher::MaterialMatcher;
use super::model::{MaterialQuote, ResolutionSource};
use crate::errors::{Result, ValidationError};
use crate::reference::{CompanyEntry, ReferenceTables};

/// Trait for resolving material prices.
#[async_trait]
pub trait PricingServiceTrait: Send + Sync {
    /// Resolve a price for every material, in input order.
    ///
    /// Fails only when `materials` is empty. Duplicate materials appear once
    /// in the result.
    async fn resolve_prices(&self, materials: &[String]) -> Result<HashMap<String, Decimal>>;

    /// Resolve a single material. Never fails; falls back to the default price.
    async fn resolve_quote(&self, material: &str) -> MaterialQuote;
}

pub struct PricingService {
    tables: Arc<ReferenceTables>,
    cache: QuoteCache,
    matcher: Arc<dyn MaterialMatcher>,
    fetcher: Arc<QuoteFetcher>,
    config: PricingConfig,
}

impl PricingService {
    pub fn new(
        tables: Arc<ReferenceTables>,
        matcher: Arc<dyn MaterialMatcher>,
        fetcher: Arc<QuoteFetcher>,
        config: PricingConfig,
    ) -> Self {
        Self {
            tables,
            cache: QuoteCache::new(config.cache_expiry),
            matcher,
            fetcher,
            config,
        }
    }

    pub fn cache(&self) -> &QuoteCache {
        &self.cache
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    fn default_quote(&self, material: &str) -> MaterialQuote {
        info!(
            "No price found for '{}', using default {}",
            material, self.config.default_price
        );
        MaterialQuote::new(material, self.config.default_price, ResolutionSource::Default)
    }

    /// Fetch `raw_symbol` and cache the result under `material`.
    async fn try_fetch(
        &self,
        material: &str,
        raw_symbol: &str,
        source: ResolutionSource,
    ) -> Option<MaterialQuote> {
        let symbol = Symbol::classify(raw_symbol, &self.config.pricing_currency);

        match self.fetcher.fetch(&symbol).await {
            Ok(quote) => {
                self.cache.put(material, quote.price);
                info!(
                    "Resolved '{}' via {:?} symbol {}: {}",
                    material, source, symbol, quote.price
                );
                Some(
                    MaterialQuote::new(material, quote.price, source)
                        .with_symbol(symbol.to_string()),
                )
            }
            Err(e) => {
                warn!(
                    "Failed to fetch {} for '{}' ({:?}): {}",
                    symbol, material, source, e
                );
                None
            }
        }
    }

    async fn price_symbol(
        &self,
        material: &str,
        raw_symbol: &str,
        source: ResolutionSource,
    ) -> MaterialQuote {
        match self.try_fetch(material, raw_symbol, source).await {
            Some(quote) => quote,
            None => self.default_quote(material),
        }
    }

    /// Try each manufacturer in order until one fetch succeeds.
    async fn price_manufacturers(
        &self,
        material: &str,
        candidates: &[CompanyEntry],
    ) -> Option<MaterialQuote> {
        for (attempt, company) in candidates.iter().enumerate() {
            debug!(
                "Trying manufacturer {}/{} for '{}': {} ({})",
                attempt + 1,
                candidates.len(),
                material,
                company.name,
                company.symbol
            );
            if let Some(quote) = self
                .try_fetch(material, &company.symbol, ResolutionSource::Manufacturer)
                .await
            {
                return Some(quote);
            }
        }

        warn!(
            "All {} manufacturer candidates failed for '{}'",
            candidates.len(),
            material
        );
        None
    }

    async fn commodity_symbol(&self, material: &str) -> Option<String> {
        debug!("Trying commodity match for '{}'", material);
        let commodities = &self.tables.commodities;
        let symbol = self.matcher.match_commodity(material, commodities).await?;

        if commodities.accepts(&symbol, material) {
            Some(symbol)
        } else {
            warn!(
                "Rejected commodity match {} for '{}': display name differs",
                symbol, material
            );
            None
        }
    }

    async fn manufacturer_candidates(&self, material: &str) -> Vec<CompanyEntry> {
        if self.tables.companies.is_empty() {
            debug!(
                "Company directory empty, skipping manufacturer match for '{}'",
                material
            );
            return Vec::new();
        }

        debug!("Trying manufacturer match for '{}'", material);
        self.matcher
            .match_manufacturers(
                material,
                &self.tables.companies,
                self.config.manufacturer_count,
            )
            .await
    }

    async fn similar_symbol(&self, material: &str) -> Option<(String, String)> {
        debug!("Trying similarity match for '{}'", material);
        let keys = self.tables.direct_symbols.keys();
        let similar = self.matcher.match_similar(material, &keys).await?;

        match self.tables.direct_symbols.lookup(&similar) {
            Some(symbol) => Some((similar, symbol.to_string())),
            None => {
                warn!(
                    "Similarity match '{}' for '{}' is not in the direct symbol table",
                    similar, material
                );
                None
            }
        }
    }
}

#[async_trait]
impl PricingServiceTrait for PricingService {
    async fn resolve_prices(&self, materials: &[String]) -> Result<HashMap<String, Decimal>> {
        if materials.is_empty() {
            return Err(ValidationError::EmptyMaterials.into());
        }

        let mut prices = HashMap::with_capacity(materials.len());
        for material in materials {
            let quote = self.resolve_quote(material).await;
            prices.insert(material.clone(), quote.price);
        }
        Ok(prices)
    }

    async fn resolve_quote(&self, material: &str) -> MaterialQuote {
        if let Some(price) = self.cache.get(material) {
            debug!("Cache hit for '{}': {}", material, price);
            return MaterialQuote::new(material, price, ResolutionSource::Cache);
        }

        if let Some(symbol) = self.commodity_symbol(material).await {
            return self
                .price_symbol(material, &symbol, ResolutionSource::Commodity)
                .await;
        }

        let manufacturers = self.manufacturer_candidates(material).await;
        if !manufacturers.is_empty() {
            if let Some(quote) = self.price_manufacturers(material, &manufacturers).await {
                return quote;
            }
        }

        if let Some(symbol) = self.tables.direct_symbols.lookup(material) {
            debug!("Direct symbol {} for '{}'", symbol, material);
            return self
                .price_symbol(material, symbol, ResolutionSource::DirectTable)
                .await;
        }

        if let Some((similar, symbol)) = self.similar_symbol(material).await {
            debug!(
                "'{}' is similar to '{}', using symbol {}",
                material, similar, symbol
            );
            return self
                .price_symbol(material, &symbol, ResolutionSource::Similarity)
                .await;
        }

        self.default_quote(material)
    }
}
