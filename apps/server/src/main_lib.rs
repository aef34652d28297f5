use std::sync::Arc;

use crate::config::Config;
use procplan_ai::{
    CompositionService, CompositionServiceTrait, LlmMaterialMatcher, RigCompletionBackend,
};
use procplan_core::{
    pricing::{PricingService, PricingServiceTrait},
    reference::ReferenceTables,
};
use procplan_market_data::{AlphaVantageProvider, QuoteFetcher, RateLimiter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub pricing_service: Arc<dyn PricingServiceTrait>,
    pub composition_service: Arc<dyn CompositionServiceTrait>,
}

impl AppState {
    pub fn new(
        pricing_service: Arc<dyn PricingServiceTrait>,
        composition_service: Arc<dyn CompositionServiceTrait>,
    ) -> Self {
        Self {
            pricing_service,
            composition_service,
        }
    }
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    config.pricing.validate()?;

    let tables = Arc::new(ReferenceTables::with_listings(&config.listings_dir));
    tracing::info!(
        "Reference tables ready: {} commodities, {} listed companies, {} direct symbols",
        tables.commodities.len(),
        tables.companies.len(),
        tables.direct_symbols.len()
    );

    let backend = Arc::new(RigCompletionBackend::new(config.llm.clone()));
    tracing::info!(
        "Using LLM provider {} model {}",
        config.llm.provider_id,
        config.llm.model_id
    );
    let matcher = Arc::new(LlmMaterialMatcher::new(backend.clone()));

    let provider = Arc::new(AlphaVantageProvider::new(
        config.alpha_vantage_api_key.clone(),
    ));
    let limiter = Arc::new(RateLimiter::new(config.pricing.rate_limit_delay));
    let fetcher = Arc::new(QuoteFetcher::new(provider, limiter));

    let pricing_service = Arc::new(PricingService::new(
        tables,
        matcher,
        fetcher,
        config.pricing.clone(),
    ));
    let composition_service = Arc::new(CompositionService::new(backend));

    Ok(Arc::new(AppState::new(pricing_service, composition_service)))
}
