//! Core error types for ProcPlan.
//!
//! Only input validation reaches API callers. Missing reference data, rejected
//! matcher output and failed quote fetches are absorbed by the pricing pipeline
//! and never surface as errors.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the core crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to load configuration: {0}")]
    ConfigIO(String),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),
}

/// Validation errors for user input.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("At least one material is required")]
    EmptyMaterials,

    #[error("Item name must not be blank")]
    BlankItem,
}

impl Error {
    /// Whether this error was caused by the caller's input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}
