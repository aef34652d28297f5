//! Item decomposition into priced materials.
//!
//! Asks the model for the material breakdown of a manufactured item and parses
//! the `Material, percentage` lines it returns. Percentages are reported as
//! given and are not renormalized.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::backend::CompletionBackend;
use crate::error::AiError;
use crate::parsing::{clean_fragment, strip_enumeration};
use crate::prompts::{composition_prompt, MAX_COMPONENTS};

/// One material share of an item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialComponent {
    pub material: String,
    pub percentage: f64,
}

impl MaterialComponent {
    pub fn new(material: &str, percentage: f64) -> Self {
        Self {
            material: material.to_string(),
            percentage,
        }
    }
}

// ============================================================================
// Composition Service Trait
// ============================================================================

#[async_trait]
pub trait CompositionServiceTrait: Send + Sync {
    /// Break `item` into materials, in the order the model listed them.
    async fn decompose(&self, item: &str) -> Result<Vec<MaterialComponent>, AiError>;
}

// ============================================================================
// Composition Service Implementation
// ============================================================================

pub struct CompositionService {
    backend: Arc<dyn CompletionBackend>,
}

impl CompositionService {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl CompositionServiceTrait for CompositionService {
    async fn decompose(&self, item: &str) -> Result<Vec<MaterialComponent>, AiError> {
        let item = item.trim();
        if item.is_empty() {
            return Err(AiError::invalid_input("Item name must not be blank"));
        }

        let prompt = composition_prompt(item);
        let raw = self.backend.complete(&prompt.system, &prompt.user).await?;
        debug!("Composition answer for '{}': {}", item, raw);

        let components = parse_components(&raw);
        if components.is_empty() {
            return Err(AiError::invalid_response(format!(
                "No material components found for '{}'",
                item
            )));
        }
        Ok(components)
    }
}

/// Parse `Material, percentage` lines. Malformed lines are skipped.
pub fn parse_components(raw: &str) -> Vec<MaterialComponent> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let parsed = parse_component_line(line);
            if parsed.is_none() {
                warn!("Skipping invalid composition line: {}", line);
            }
            parsed
        })
        .take(MAX_COMPONENTS)
        .collect()
}

fn parse_component_line(line: &str) -> Option<MaterialComponent> {
    let line = strip_enumeration(line);
    let (material, percentage) = line.rsplit_once(',').or_else(|| line.rsplit_once(':'))?;

    let material = clean_fragment(material);
    if material.is_empty() {
        return None;
    }

    let percentage = clean_fragment(percentage);
    let percentage: f64 = percentage.trim_end_matches('%').trim().parse().ok()?;
    if !percentage.is_finite() || percentage < 0.0 {
        return None;
    }

    Some(MaterialComponent {
        material,
        percentage,
    })
}

// ============================================================================
// Fake Service for Testing
// ============================================================================

/// Returns a fixed component list for every non-blank item.
pub struct FakeCompositionService {
    pub components: Vec<MaterialComponent>,
}

impl FakeCompositionService {
    pub fn with_components(components: &[(&str, f64)]) -> Self {
        Self {
            components: components
                .iter()
                .map(|(material, percentage)| MaterialComponent::new(material, *percentage))
                .collect(),
        }
    }
}

#[async_trait]
impl CompositionServiceTrait for FakeCompositionService {
    async fn decompose(&self, item: &str) -> Result<Vec<MaterialComponent>, AiError> {
        if item.trim().is_empty() {
            return Err(AiError::invalid_input("Item name must not be blank"));
        }
        Ok(self.components.clone())
    }
}
