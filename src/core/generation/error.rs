//! Generation Error Types
//!
//! The five failure kinds of a generation round trip, and the uniform
//! "generation failed" wrapper surfaced to callers.

use super::types::GenerationMode;
use super::validator::ResponseError;
use crate::core::llm::ClientError;
use crate::core::selection::SelectionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationError {
    /// Selection rejected before any request was issued.
    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("Empty response from AI")]
    EmptyResponse,

    #[error("Failed to parse generated content: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("{0}")]
    Validation(String),

    /// Transport or service failure.
    #[error(transparent)]
    Service(ClientError),
}

impl From<ClientError> for GenerationError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::EmptyResponse => GenerationError::EmptyResponse,
            other => GenerationError::Service(other),
        }
    }
}

impl From<ResponseError> for GenerationError {
    fn from(err: ResponseError) -> Self {
        match err {
            ResponseError::Parse(e) => GenerationError::Parse(e),
            ResponseError::Validation(reason) => GenerationError::Validation(reason),
        }
    }
}

impl GenerationError {
    /// Short kind label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::Selection(_) => "selection",
            GenerationError::EmptyResponse => "empty_response",
            GenerationError::Parse(_) => "parse",
            GenerationError::Validation(_) => "validation",
            GenerationError::Service(_) => "service",
        }
    }
}

/// Uniform failure surfaced at the orchestration boundary.
#[derive(Error, Debug)]
#[error("Failed to generate {}. Please try again. Details: {source}", .mode.content_noun())]
pub struct GenerationFailed {
    pub mode: GenerationMode,
    #[source]
    pub source: GenerationError,
}

impl GenerationFailed {
    pub fn new(mode: GenerationMode, source: impl Into<GenerationError>) -> Self {
        Self {
            mode,
            source: source.into(),
        }
    }
}
