//! LLM Client Module
//!
//! The generative service boundary: a request carrying instruction text, a
//! response schema and a sampling temperature goes in, raw structured text
//! comes out.
//!
//! # Module Structure
//!
//! - `google`: Gemini `generateContent` client (API key based)
//! - `retry`: timeout and bounded exponential backoff around any client

pub mod google;
pub mod retry;

pub use google::GoogleClient;
pub use retry::{RetryPolicy, RetryingClient};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure talking to the service.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Service returned no text, or only whitespace.
    #[error("Empty response from AI")]
    EmptyResponse,

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

impl ClientError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Http(_) | ClientError::Timeout(_) => true,
            ClientError::Api { status, .. } => *status == 429 || *status >= 500,
            ClientError::EmptyResponse => false,
        }
    }
}

// ============================================================================
// Request Types
// ============================================================================

/// A single generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub instruction: String,
    /// Structural contract the response must follow.
    pub schema: serde_json::Value,
    /// Sampling temperature in `[0, 1]`.
    pub temperature: f32,
}

impl GenerationRequest {
    pub fn new(instruction: impl Into<String>, schema: serde_json::Value, temperature: f32) -> Self {
        Self {
            instruction: instruction.into(),
            schema,
            temperature: temperature.clamp(0.0, 1.0),
        }
    }
}

// ============================================================================
// Client Trait
// ============================================================================

/// A generative service. Implementations are stateless per call and safe to
/// share across sessions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Identifier used in logs.
    fn id(&self) -> &str;

    /// Issue one request and return the raw response text.
    ///
    /// Blank text is reported as [`ClientError::EmptyResponse`].
    async fn generate(&self, request: GenerationRequest) -> Result<String>;
}

#[async_trait]
impl<T: GenerationClient + ?Sized> GenerationClient for std::sync::Arc<T> {
    fn id(&self) -> &str {
        (**self).id()
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String> {
        (**self).generate(request).await
    }
}
