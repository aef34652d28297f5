//! Material matching capability.
//!
//! The pipeline asks a matcher three kinds of question. Implementations fail
//! closed: any transport error or unusable answer becomes "no match".

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::reference::{CommodityTable, CompanyDirectory, CompanyEntry};

// ============================================================================
// Matcher Trait
// ============================================================================

#[async_trait]
pub trait MaterialMatcher: Send + Sync {
    /// Pick the commodity symbol for `material`, if any.
    ///
    /// The returned symbol is only a selection; the pipeline still checks that
    /// its display name equals the material.
    async fn match_commodity(&self, material: &str, commodities: &CommodityTable)
        -> Option<String>;

    /// Up to `count` listed companies producing `material`, best first.
    ///
    /// Every returned entry comes from `companies`.
    async fn match_manufacturers(
        &self,
        material: &str,
        companies: &CompanyDirectory,
        count: usize,
    ) -> Vec<CompanyEntry>;

    /// The candidate most similar to `material`. Must be one of `candidates`.
    async fn match_similar(&self, material: &str, candidates: &[&str]) -> Option<String>;
}

// ============================================================================
// Fake Matcher for Testing
// ============================================================================

/// A scripted matcher returning fixed answers keyed by material.
///
/// Call counters let tests assert which stages ran.
#[derive(Default)]
pub struct FakeMaterialMatcher {
    commodities: HashMap<String, String>,
    manufacturers: HashMap<String, Vec<CompanyEntry>>,
    similar: HashMap<String, String>,
    commodity_calls: AtomicUsize,
    manufacturer_calls: AtomicUsize,
    similarity_calls: AtomicUsize,
}

impl FakeMaterialMatcher {
    /// A matcher that never matches anything.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_commodity(mut self, material: &str, symbol: &str) -> Self {
        self.commodities
            .insert(material.to_string(), symbol.to_string());
        self
    }

    /// Script manufacturer answers as `(symbol, name)` pairs.
    pub fn with_manufacturers(mut self, material: &str, companies: &[(&str, &str)]) -> Self {
        let entries = companies
            .iter()
            .map(|(symbol, name)| CompanyEntry {
                symbol: symbol.to_string(),
                name: name.to_string(),
            })
            .collect();
        self.manufacturers.insert(material.to_string(), entries);
        self
    }

    pub fn with_similar(mut self, material: &str, similar: &str) -> Self {
        self.similar
            .insert(material.to_string(), similar.to_string());
        self
    }

    pub fn commodity_calls(&self) -> usize {
        self.commodity_calls.load(Ordering::SeqCst)
    }

    pub fn manufacturer_calls(&self) -> usize {
        self.manufacturer_calls.load(Ordering::SeqCst)
    }

    pub fn similarity_calls(&self) -> usize {
        self.similarity_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MaterialMatcher for FakeMaterialMatcher {
    async fn match_commodity(
        &self,
        material: &str,
        _commodities: &CommodityTable,
    ) -> Option<String> {
        self.commodity_calls.fetch_add(1, Ordering::SeqCst);
        self.commodities.get(material).cloned()
    }

    async fn match_manufacturers(
        &self,
        material: &str,
        _companies: &CompanyDirectory,
        count: usize,
    ) -> Vec<CompanyEntry> {
        self.manufacturer_calls.fetch_add(1, Ordering::SeqCst);
        self.manufacturers
            .get(material)
            .map(|entries| entries.iter().take(count).cloned().collect())
            .unwrap_or_default()
    }

    async fn match_similar(&self, material: &str, candidates: &[&str]) -> Option<String> {
        self.similarity_calls.fetch_add(1, Ordering::SeqCst);
        self.similar
            .get(material)
            .filter(|answer| candidates.contains(&answer.as_str()))
            .cloned()
    }
}
