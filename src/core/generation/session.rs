//! Generation Session
//!
//! One user's selection and current result, with at most one generation in
//! flight. Starting a generation discards the previous result before the
//! request is sent; a failure leaves the result empty and the selection
//! untouched.

use super::{generate_content, GeneratedContent, GenerationFailed};
use crate::core::export::{self, ExportSink, ExportStatus};
use crate::core::llm::GenerationClient;
use crate::core::selection::{SelectionAction, SelectionState};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("A generation is already in progress")]
    Busy,

    #[error(transparent)]
    Failed(#[from] GenerationFailed),
}

#[derive(Debug, Default)]
struct SessionState {
    selection: SelectionState,
    content: Option<GeneratedContent>,
    last_error: Option<String>,
}

/// Clears the busy flag on every exit path, including cancellation.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct GenerationSession {
    client: Arc<dyn GenerationClient>,
    state: RwLock<SessionState>,
    busy: AtomicBool,
}

impl GenerationSession {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self::with_selection(client, SelectionState::default())
    }

    pub fn with_selection(client: Arc<dyn GenerationClient>, selection: SelectionState) -> Self {
        Self {
            client,
            state: RwLock::new(SessionState {
                selection,
                ..SessionState::default()
            }),
            busy: AtomicBool::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub async fn selection(&self) -> SelectionState {
        self.state.read().await.selection.clone()
    }

    pub async fn content(&self) -> Option<GeneratedContent> {
        self.state.read().await.content.clone()
    }

    pub async fn last_error(&self) -> Option<String> {
        self.state.read().await.last_error.clone()
    }

    /// Apply a user action to the selection and return the new state.
    pub async fn dispatch(&self, action: SelectionAction) -> SelectionState {
        let mut state = self.state.write().await;
        state.selection = state.selection.apply(action);
        state.selection.clone()
    }

    /// Discard the result and error, and clear the selection.
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        state.selection = state.selection.apply(SelectionAction::Reset);
        state.content = None;
        state.last_error = None;
    }

    /// Generate content for the current selection.
    ///
    /// Fails with [`SessionError::Busy`] while another generation is in
    /// flight, without touching the current result.
    pub async fn generate(&self) -> Result<GeneratedContent, SessionError> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!("Generation requested while another is in flight");
            return Err(SessionError::Busy);
        }
        let _guard = BusyGuard(&self.busy);

        let selection = {
            let mut state = self.state.write().await;
            state.content = None;
            state.last_error = None;
            state.selection.clone()
        };

        let outcome = generate_content(self.client.as_ref(), &selection).await;

        let mut state = self.state.write().await;
        match outcome {
            Ok(content) => {
                state.content = Some(content.clone());
                Ok(content)
            }
            Err(failed) => {
                state.last_error = Some(failed.to_string());
                Err(SessionError::Failed(failed))
            }
        }
    }

    /// Canonical export text of the current result, if any.
    pub async fn export_text(&self) -> Option<String> {
        self.state
            .read()
            .await
            .content
            .as_ref()
            .map(|content| export::serialize(&content.result, &content.context))
    }

    /// Hand the export text to `sink`. Returns `None` when there is nothing
    /// to export.
    pub async fn export_to(&self, sink: &dyn ExportSink) -> Option<ExportStatus> {
        let text = self.export_text().await?;
        Some(export::export_with(sink, &text))
    }
}
