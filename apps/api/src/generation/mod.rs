// AI generation contract layer.
// Flow: Prompt Library → Invoker (provider call + extraction) → Validator → Fallback policy.
// All provider calls go through llm_client::CompletionProvider.

use serde::Serialize;
use thiserror::Error;

use crate::prompts::PromptError;

pub mod extract;
pub mod fallback;
pub mod invoker;
pub mod service;
#[cfg(test)]
pub mod testing;
pub mod validator;

pub use fallback::FallbackPolicy;
pub use service::{Generated, Generator};

/// Why a generation attempt produced no usable output.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GenerationError {
    #[error("LLM provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("model response contained no structured output")]
    NoStructuredOutput,

    #[error("model returned malformed JSON: {0}")]
    MalformedJson(String),

    #[error("model output does not match the schema: {0}")]
    SchemaViolation(String),

    #[error("prompt construction failed: {0}")]
    Prompt(#[from] PromptError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationErrorKind {
    ProviderUnavailable,
    NoStructuredOutput,
    MalformedJson,
    SchemaViolation,
    Prompt,
}

impl GenerationError {
    pub fn kind(&self) -> GenerationErrorKind {
        match self {
            GenerationError::ProviderUnavailable(_) => GenerationErrorKind::ProviderUnavailable,
            GenerationError::NoStructuredOutput => GenerationErrorKind::NoStructuredOutput,
            GenerationError::MalformedJson(_) => GenerationErrorKind::MalformedJson,
            GenerationError::SchemaViolation(_) => GenerationErrorKind::SchemaViolation,
            GenerationError::Prompt(_) => GenerationErrorKind::Prompt,
        }
    }
}

/// Where a validated output came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputSource {
    Model,
    Mock,
}
