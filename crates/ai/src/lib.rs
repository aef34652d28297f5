//! ProcPlan AI - language model integration using rig-core.
//!
//! # Architecture
//!
//! - `backend`: completion backends (rig-core providers, scripted fake)
//! - `prompts`: strict-format prompts for matching and decomposition
//! - `parsing`: validation of raw model answers
//! - `matcher`: memoizing [`LlmMaterialMatcher`] for the pricing pipeline
//! - `composition`: item -> material breakdown
//!
//! # Example
//!
//! ```ignore
//! use procplan_ai::{LlmConfig, LlmMaterialMatcher, RigCompletionBackend};
//!
//! let backend = Arc::new(RigCompletionBackend::new(LlmConfig::default()));
//! let matcher = LlmMaterialMatcher::new(backend.clone());
//! let composition = CompositionService::new(backend);
//! ```

pub mod backend;
pub mod composition;
pub mod error;
pub mod matcher;
pub mod parsing;
pub mod prompts;

pub use backend::{CompletionBackend, FakeCompletionBackend, LlmConfig, RigCompletionBackend};
pub use composition::{
    CompositionService, CompositionServiceTrait, FakeCompositionService, MaterialComponent,
};
pub use error::AiError;
pub use matcher::LlmMaterialMatcher;
