//! Content Generation
//!
//! Turns a validated selection into a mode-specific request, sends it to a
//! [`GenerationClient`], and validates the structured response into a
//! [`ResultModel`].
//!
//! # Module Structure
//!
//! - `types`: mode, difficulty and language enums
//! - `prompt`: instruction text per mode
//! - `schema`: response contracts per mode
//! - `validator`: parsing and structural validation
//! - `session`: single-flight orchestration over a selection and result
//! - `error`: failure taxonomy

pub mod error;
pub mod prompt;
pub mod schema;
pub mod session;
pub mod types;
pub mod validator;

pub use error::{GenerationError, GenerationFailed};
pub use prompt::build_prompt;
pub use schema::schema_for;
pub use session::{GenerationSession, SessionError};
pub use types::{Difficulty, GenerationMode, Language};

use crate::core::export::ExportContext;
use crate::core::llm::{GenerationClient, GenerationRequest};
use crate::core::models::ResultModel;
use crate::core::selection::{SelectionState, ValidSelection};
use serde::{Deserialize, Serialize};

/// A validated result together with the context it was generated for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub result: ResultModel,
    pub context: ExportContext,
}

/// Assemble the service request for `selection`.
pub fn build_request(selection: &ValidSelection) -> GenerationRequest {
    GenerationRequest::new(
        build_prompt(selection),
        schema_for(selection.mode),
        selection.mode.temperature(),
    )
}

/// Run one request-scoped generation round trip.
///
/// Every failure is reported as the uniform [`GenerationFailed`].
pub async fn generate_content(
    client: &dyn GenerationClient,
    selection: &SelectionState,
) -> Result<GeneratedContent, GenerationFailed> {
    let mode = selection.mode;
    run(client, selection).await.map_err(|source| {
        tracing::error!(mode = %mode, kind = source.kind(), error = %source, "Generation failed");
        GenerationFailed::new(mode, source)
    })
}

async fn run(
    client: &dyn GenerationClient,
    selection: &SelectionState,
) -> Result<GeneratedContent, GenerationError> {
    let valid = selection.validate()?;
    let request = build_request(&valid);

    tracing::info!(
        client = client.id(),
        mode = %valid.mode,
        subject = %valid.subject,
        chapter = valid.scope.label(),
        temperature = request.temperature,
        "Starting generation"
    );

    let raw = client.generate(request).await?;
    let result = validator::validate(valid.mode, &raw).map_err(|err| {
        tracing::warn!(mode = %valid.mode, error = %err, "Response failed validation");
        err
    })?;

    if let ResultModel::Mcq(items) = &result {
        if items.len() != usize::from(valid.question_count) {
            tracing::warn!(
                requested = valid.question_count,
                received = items.len(),
                "Service returned a different number of questions"
            );
        }
    }

    tracing::info!(mode = %valid.mode, "Generation finished");
    Ok(GeneratedContent {
        result,
        context: ExportContext::from(&valid),
    })
}
