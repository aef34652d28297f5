use std::{net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use anyhow::Context;
use procplan_ai::LlmConfig;
use procplan_core::{
    constants::{
        DEFAULT_CACHE_EXPIRY_SECS, DEFAULT_MANUFACTURER_COUNT, DEFAULT_PRICE,
        DEFAULT_RATE_LIMIT_DELAY_SECS, PRICING_CURRENCY,
    },
    pricing::PricingConfig,
};

/// Alpha Vantage's public demo key; only prices a handful of symbols.
const DEMO_API_KEY: &str = "demo";

pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub alpha_vantage_api_key: String,
    pub listings_dir: PathBuf,
    pub pricing: PricingConfig,
    pub llm: LlmConfig,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = env_or("PROCPLAN_LISTEN_ADDR", "0.0.0.0:8080")?;
        let cors_allow = std::env::var("PROCPLAN_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = env_or("PROCPLAN_REQUEST_TIMEOUT_MS", "120000")?;

        let alpha_vantage_api_key = match std::env::var("ALPHA_VANTAGE_API_KEY") {
            Ok(key) if !key.trim().is_empty() => key,
            _ => {
                tracing::warn!("ALPHA_VANTAGE_API_KEY not set, using the demo key");
                DEMO_API_KEY.to_string()
            }
        };
        let listings_dir =
            PathBuf::from(std::env::var("PROCPLAN_LISTINGS_DIR").unwrap_or_else(|_| "info".into()));

        let pricing = PricingConfig {
            cache_expiry: Duration::from_secs(env_or(
                "PROCPLAN_CACHE_EXPIRY_SECS",
                &DEFAULT_CACHE_EXPIRY_SECS.to_string(),
            )?),
            rate_limit_delay: Duration::from_secs(env_or(
                "PROCPLAN_RATE_LIMIT_DELAY_SECS",
                &DEFAULT_RATE_LIMIT_DELAY_SECS.to_string(),
            )?),
            manufacturer_count: env_or(
                "PROCPLAN_MANUFACTURER_COUNT",
                &DEFAULT_MANUFACTURER_COUNT.to_string(),
            )?,
            default_price: env_or("PROCPLAN_DEFAULT_PRICE", &DEFAULT_PRICE.to_string())?,
            pricing_currency: PRICING_CURRENCY.to_string(),
        };

        let llm = LlmConfig {
            provider_id: std::env::var("PROCPLAN_LLM_PROVIDER").unwrap_or_else(|_| "ollama".into()),
            model_id: std::env::var("PROCPLAN_LLM_MODEL").unwrap_or_else(|_| "llama2".into()),
            base_url: Some(
                std::env::var("PROCPLAN_LLM_BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:11434".into()),
            ),
            api_key: std::env::var("PROCPLAN_LLM_API_KEY").ok(),
            temperature: 0.0,
        };

        Ok(Self {
            listen_addr,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            alpha_vantage_api_key,
            listings_dir,
            pricing,
            llm,
        })
    }
}

/// Read and parse an environment variable, falling back to `default`.
fn env_or<T>(key: &str, default: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = std::env::var(key).unwrap_or_else(|_| default.to_string());
    raw.trim()
        .parse()
        .with_context(|| format!("Invalid {}: '{}'", key, raw))
}
