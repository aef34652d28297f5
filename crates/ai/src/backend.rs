//! Completion backends.
//!
//! A backend turns a system prompt plus a user prompt into the model's raw
//! text answer. [`RigCompletionBackend`] talks to a real provider through
//! rig-core; [`FakeCompletionBackend`] replays scripted answers in tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use log::debug;
use reqwest::Client as HttpClient;
use rig::{
    client::{CompletionClient, Nothing},
    completion::Prompt,
    providers::{anthropic, gemini, groq, ollama, openai},
};

use crate::error::AiError;

// ============================================================================
// Backend Trait
// ============================================================================

#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send one prompt and return the raw answer text.
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, AiError>;
}

// ============================================================================
// Rig Backend
// ============================================================================

/// Provider selection for the rig-backed backend.
#[derive(Clone, Debug)]
pub struct LlmConfig {
    /// One of `ollama`, `openai`, `anthropic`, `groq`, `gemini`.
    pub provider_id: String,
    pub model_id: String,
    /// Only used by ollama.
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub temperature: f64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider_id: "ollama".to_string(),
            model_id: "llama2".to_string(),
            base_url: Some("http://localhost:11434".to_string()),
            api_key: None,
            temperature: 0.0,
        }
    }
}

/// Completion backend built on rig-core agents.
pub struct RigCompletionBackend {
    config: LlmConfig,
}

impl RigCompletionBackend {
    pub fn new(config: LlmConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn api_key(&self) -> Result<String, AiError> {
        self.config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AiError::MissingApiKey(self.config.provider_id.clone()))
    }
}

/// Build a deterministic agent on `$client` and send the prompt.
macro_rules! prompt_agent {
    ($client:expr, $config:expr, $system:expr, $prompt:expr) => {
        $client
            .agent(&$config.model_id)
            .preamble($system)
            .temperature($config.temperature)
            .build()
            .prompt($prompt)
            .await
            .map_err(|e| AiError::Provider(e.to_string()))
    };
}

#[async_trait]
impl CompletionBackend for RigCompletionBackend {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, AiError> {
        let config = &self.config;
        debug!(
            "Prompting provider {} model {}",
            config.provider_id, config.model_id
        );

        match config.provider_id.as_str() {
            "ollama" => {
                let mut builder = ollama::Client::<HttpClient>::builder().api_key(Nothing);
                if let Some(url) = &config.base_url {
                    builder = builder.base_url(url);
                }
                let client = builder
                    .build()
                    .map_err(|e| AiError::Provider(e.to_string()))?;
                prompt_agent!(client, config, system, prompt)
            }
            "anthropic" => {
                let key = self.api_key()?;
                let client: anthropic::Client<HttpClient> =
                    anthropic::Client::new(&key).map_err(|e| AiError::Provider(e.to_string()))?;
                prompt_agent!(client, config, system, prompt)
            }
            "gemini" | "google" => {
                let key = self.api_key()?;
                let client: gemini::Client<HttpClient> =
                    gemini::Client::new(&key).map_err(|e| AiError::Provider(e.to_string()))?;
                prompt_agent!(client, config, system, prompt)
            }
            "groq" => {
                let key = self.api_key()?;
                let client: groq::Client<HttpClient> =
                    groq::Client::new(&key).map_err(|e| AiError::Provider(e.to_string()))?;
                prompt_agent!(client, config, system, prompt)
            }
            "openai" => {
                let key = self.api_key()?;
                let client: openai::Client<HttpClient> =
                    openai::Client::new(&key).map_err(|e| AiError::Provider(e.to_string()))?;
                prompt_agent!(client, config, system, prompt)
            }
            other => Err(AiError::InvalidInput(format!(
                "Unsupported LLM provider: {}",
                other
            ))),
        }
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================

/// Replays scripted answers in order and records every prompt it receives.
///
/// `Err` entries are returned as provider errors. Once the script runs out
/// every call fails.
#[derive(Default)]
pub struct FakeCompletionBackend {
    responses: Mutex<VecDeque<Result<String, String>>>,
    prompts: Mutex<Vec<(String, String)>>,
}

impl FakeCompletionBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful answer.
    pub fn with_response(self, answer: &str) -> Self {
        self.push(Ok(answer.to_string()));
        self
    }

    /// Queue a provider failure.
    pub fn with_failure(self, message: &str) -> Self {
        self.push(Err(message.to_string()));
        self
    }

    fn push(&self, entry: Result<String, String>) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push_back(entry);
        }
    }

    /// Every `(system, prompt)` pair received so far.
    pub fn prompts(&self) -> Vec<(String, String)> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.prompts().len()
    }
}

#[async_trait]
impl CompletionBackend for FakeCompletionBackend {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, AiError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push((system.to_string(), prompt.to_string()));
        }

        let next = self
            .responses
            .lock()
            .ok()
            .and_then(|mut responses| responses.pop_front());

        match next {
            Some(Ok(answer)) => Ok(answer),
            Some(Err(message)) => Err(AiError::Provider(message)),
            None => Err(AiError::Provider("no scripted response".to_string())),
        }
    }
}
