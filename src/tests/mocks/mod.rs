//! Mock implementations for testing
//!
//! Stand-ins for the generative service so orchestration can be tested
//! without network access:
//! - `MockGenerationClient`: mockall expectations on the real trait
//! - `ScriptedClient`: replays a fixed sequence of outcomes
//! - `GatedClient`: blocks each call until released, for in-flight tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::core::llm::{ClientError, GenerationClient, GenerationRequest, Result};

// ============================================================================
// Generation Client Mock
// ============================================================================

pub use crate::core::llm::MockGenerationClient;

impl MockGenerationClient {
    /// A mock answering every call with `raw`.
    pub fn replying(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let mut mock = Self::new();
        mock.expect_id().return_const("mock".to_string());
        mock.expect_generate().returning(move |_| Ok(raw.clone()));
        mock
    }
}

// ============================================================================
// Scripted Client
// ============================================================================

/// Plays back queued outcomes in order, then reports empty responses.
pub struct ScriptedClient {
    outcomes: Mutex<VecDeque<Result<String>>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<GenerationRequest>>,
    delay: Option<Duration>,
}

impl ScriptedClient {
    pub fn new(outcomes: impl IntoIterator<Item = Result<String>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    /// Sleep for `delay` before answering each call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationClient for ScriptedClient {
    fn id(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ClientError::EmptyResponse))
    }
}

// ============================================================================
// Gated Client
// ============================================================================

/// Holds every call until [`GatedClient::release`] is called.
pub struct GatedClient {
    raw: String,
    entered: Notify,
    gate: Notify,
}

impl GatedClient {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            entered: Notify::new(),
            gate: Notify::new(),
        }
    }

    /// Resolves once a call is waiting at the gate.
    pub async fn wait_entered(&self) {
        self.entered.notified().await;
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl GenerationClient for GatedClient {
    fn id(&self) -> &str {
        "gated"
    }

    async fn generate(&self, _request: GenerationRequest) -> Result<String> {
        self.entered.notify_one();
        self.gate.notified().await;
        Ok(self.raw.clone())
    }
}
