//! Language-model backed material matcher.
//!
//! Implements [`MaterialMatcher`] over a [`CompletionBackend`]. Each call kind
//! keeps its own memo table keyed by material. Validated answers, including a
//! validated "no match", are memoized; transport failures are not, so the next
//! request for the same material asks the model again.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use log::{debug, info, warn};

use procplan_core::pricing::MaterialMatcher;
use procplan_core::reference::{CommodityTable, CompanyDirectory, CompanyEntry};

use crate::backend::CompletionBackend;
use crate::error::AiError;
use crate::parsing::{parse_commodity_answer, parse_manufacturer_lines, parse_similarity_answer};
use crate::prompts::{commodity_prompt, manufacturer_prompt, similarity_prompt, PromptPair};

pub struct LlmMaterialMatcher {
    backend: Arc<dyn CompletionBackend>,
    commodity_memo: DashMap<String, Option<String>>,
    manufacturer_memo: DashMap<String, Vec<CompanyEntry>>,
    similarity_memo: DashMap<String, Option<String>>,
}

impl LlmMaterialMatcher {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            backend,
            commodity_memo: DashMap::new(),
            manufacturer_memo: DashMap::new(),
            similarity_memo: DashMap::new(),
        }
    }

    async fn ask(&self, kind: &str, material: &str, prompt: PromptPair) -> Result<String, AiError> {
        let answer = self.backend.complete(&prompt.system, &prompt.user).await;
        match &answer {
            Ok(raw) => debug!("LLM {} answer for '{}': {}", kind, material, raw.trim()),
            Err(e) => warn!("LLM {} match failed for '{}': {}", kind, material, e),
        }
        answer
    }
}

#[async_trait]
impl MaterialMatcher for LlmMaterialMatcher {
    async fn match_commodity(
        &self,
        material: &str,
        commodities: &CommodityTable,
    ) -> Option<String> {
        if let Some(memo) = self.commodity_memo.get(material) {
            return memo.clone();
        }

        let prompt = commodity_prompt(material, commodities);
        let raw = self.ask("commodity", material, prompt).await.ok()?;
        let symbol = parse_commodity_answer(&raw, commodities);

        self.commodity_memo
            .insert(material.to_string(), symbol.clone());
        symbol
    }

    async fn match_manufacturers(
        &self,
        material: &str,
        companies: &CompanyDirectory,
        count: usize,
    ) -> Vec<CompanyEntry> {
        if let Some(memo) = self.manufacturer_memo.get(material) {
            return memo.iter().take(count).cloned().collect();
        }

        let prompt = manufacturer_prompt(material, companies, count);
        let Ok(raw) = self.ask("manufacturer", material, prompt).await else {
            return Vec::new();
        };

        let mut matched = Vec::new();
        for name in parse_manufacturer_lines(&raw, count) {
            match companies.resolve(&name) {
                Some(entry) => {
                    debug!(
                        "Manufacturer '{}' resolved to {} ({})",
                        name, entry.name, entry.symbol
                    );
                    matched.push(entry.clone());
                }
                None => warn!("No listed company matches manufacturer '{}'", name),
            }
        }

        info!(
            "Found {} manufacturers for '{}': {:?}",
            matched.len(),
            material,
            matched.iter().map(|e| e.symbol.as_str()).collect::<Vec<_>>()
        );

        self.manufacturer_memo
            .insert(material.to_string(), matched.clone());
        matched
    }

    async fn match_similar(&self, material: &str, candidates: &[&str]) -> Option<String> {
        if let Some(memo) = self.similarity_memo.get(material) {
            return memo.clone();
        }

        let prompt = similarity_prompt(material, candidates);
        let raw = self.ask("similarity", material, prompt).await.ok()?;
        let similar = parse_similarity_answer(&raw, candidates);

        self.similarity_memo
            .insert(material.to_string(), similar.clone());
        similar
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::FakeCompletionBackend;

    fn matcher_with(backend: &Arc<FakeCompletionBackend>) -> LlmMaterialMatcher {
        LlmMaterialMatcher::new(backend.clone())
    }

    #[tokio::test]
    async fn test_commodity_match_is_memoized() {
        let backend = Arc::new(FakeCompletionBackend::new().with_response("XAUUSD"));
        let matcher = matcher_with(&backend);
        let table = CommodityTable::standard();

        assert_eq!(
            matcher.match_commodity("Gold", &table).await,
            Some("XAUUSD".to_string())
        );
        assert_eq!(
            matcher.match_commodity("Gold", &table).await,
            Some("XAUUSD".to_string())
        );
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_validated_no_match_is_memoized() {
        let backend = Arc::new(FakeCompletionBackend::new().with_response("NO_MATCH"));
        let matcher = matcher_with(&backend);
        let table = CommodityTable::standard();

        assert!(matcher.match_commodity("Steel", &table).await.is_none());
        assert!(matcher.match_commodity("Steel", &table).await.is_none());
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_memoized() {
        let backend = Arc::new(
            FakeCompletionBackend::new()
                .with_failure("connection refused")
                .with_response("XAGUSD"),
        );
        let matcher = matcher_with(&backend);
        let table = CommodityTable::standard();

        assert!(matcher.match_commodity("Silver", &table).await.is_none());
        assert_eq!(
            matcher.match_commodity("Silver", &table).await,
            Some("XAGUSD".to_string())
        );
        assert_eq!(backend.call_count(), 2);
    }

    #[tokio::test]
    async fn test_unknown_commodity_symbol_fails_closed() {
        let backend = Arc::new(FakeCompletionBackend::new().with_response("STEEL_HRC"));
        let matcher = matcher_with(&backend);

        assert!(matcher
            .match_commodity("Steel", &CommodityTable::standard())
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_manufacturers_resolved_against_directory() {
        let backend = Arc::new(FakeCompletionBackend::new().with_response(
            "Alcoa Corporation, AA\nMade Up Metals, MUM\nCentury Aluminum Company, CENX\nKaiser Aluminum, KALU",
        ));
        let matcher = matcher_with(&backend);
        let companies = CompanyDirectory::from_pairs([
            ("AA", "Alcoa Corporation Common Stock"),
            ("CENX", "Century Aluminum Company Common Stock"),
            ("KALU", "Kaiser Aluminum Corporation Common Stock"),
        ]);

        let matched = matcher
            .match_manufacturers("Aluminum", &companies, 3)
            .await;

        // Only the first three lines are considered; the unlisted one is dropped
        let symbols: Vec<_> = matched.iter().map(|e| e.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AA", "CENX"]);

        // Memoized
        let again = matcher
            .match_manufacturers("Aluminum", &companies, 3)
            .await;
        assert_eq!(again, matched);
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_manufacturer_symbol_comes_from_directory() {
        let backend = Arc::new(FakeCompletionBackend::new().with_response("Dow Inc., DOWX"));
        let matcher = matcher_with(&backend);
        let companies = CompanyDirectory::from_pairs([("DOW", "Dow Inc.")]);

        let matched = matcher.match_manufacturers("Plastic", &companies, 3).await;
        assert_eq!(matched[0].symbol, "DOW");
    }

    #[tokio::test]
    async fn test_manufacturer_failure_yields_empty() {
        let backend = Arc::new(FakeCompletionBackend::new().with_failure("timeout"));
        let matcher = matcher_with(&backend);
        let companies = CompanyDirectory::from_pairs([("DOW", "Dow Inc.")]);

        assert!(matcher
            .match_manufacturers("Plastic", &companies, 3)
            .await
            .is_empty());
    }

    #[tokio::test]
    async fn test_similarity_must_be_candidate() {
        let backend = Arc::new(
            FakeCompletionBackend::new()
                .with_response("Steel")
                .with_response("Titanium"),
        );
        let matcher = matcher_with(&backend);
        let candidates = ["Steel", "Copper"];

        assert_eq!(
            matcher.match_similar("Stainless Steel", &candidates).await,
            Some("Steel".to_string())
        );
        assert!(matcher.match_similar("Titanium Alloy", &candidates).await.is_none());

        // Both outcomes memoized
        matcher.match_similar("Stainless Steel", &candidates).await;
        matcher.match_similar("Titanium Alloy", &candidates).await;
        assert_eq!(backend.call_count(), 2);
    }
}
