//! Generation Round Trip Tests

use mockall::predicate::function;

use crate::core::catalog::Subject;
use crate::core::generation::types::GenerationMode;
use crate::core::generation::{generate_content, GenerationError};
use crate::core::llm::{ClientError, GenerationRequest};
use crate::core::models::ResultModel;
use crate::core::selection::{SelectionAction, SelectionState};
use crate::tests::common::*;
use crate::tests::mocks::MockGenerationClient;

#[tokio::test]
async fn test_mcq_round_trip() {
    let mut client = MockGenerationClient::new();
    client.expect_id().return_const("mock".to_string());
    client
        .expect_generate()
        .with(function(|req: &GenerationRequest| {
            req.instruction.contains("Generate exactly 3 unique MCQ(s).")
                && (req.temperature - 0.8).abs() < f32::EPSILON
        }))
        .times(1)
        .returning(|_| Ok(mcq_list_json(3)));

    let selection = generatable_selection(GenerationMode::Mcq)
        .apply(SelectionAction::SetQuestionCount(3));
    let content = generate_content(&client, &selection).await.unwrap();

    assert!(matches!(content.result, ResultModel::Mcq(ref items) if items.len() == 3));
    assert_eq!(content.context.subject, Subject::Physics);
    assert_eq!(content.context.chapter, "All Chapters");
}

#[tokio::test]
async fn test_invalid_selection_never_calls_client() {
    let mut client = MockGenerationClient::new();
    client.expect_id().return_const("mock".to_string());
    client.expect_generate().never();

    let selection = SelectionState::default().apply(SelectionAction::SetMode(GenerationMode::StudyGuide));
    let failed = generate_content(&client, &selection).await.unwrap_err();

    assert!(matches!(failed.source, GenerationError::Selection(_)));
    assert_eq!(
        failed.to_string(),
        "Failed to generate study guide. Please try again. Details: \
         Please select a specific chapter to generate a Study Guide."
    );
}

#[tokio::test]
async fn test_empty_response_is_wrapped() {
    let mut client = MockGenerationClient::new();
    client.expect_id().return_const("mock".to_string());
    client
        .expect_generate()
        .returning(|_| Err(ClientError::EmptyResponse));

    let selection = generatable_selection(GenerationMode::Subjective);
    let failed = generate_content(&client, &selection).await.unwrap_err();

    assert!(matches!(failed.source, GenerationError::EmptyResponse));
    assert_eq!(
        failed.to_string(),
        "Failed to generate questions. Please try again. Details: Empty response from AI"
    );
}

#[tokio::test]
async fn test_malformed_json_is_parse_failure() {
    let client = MockGenerationClient::replying("{ this is not json");
    let selection = generatable_selection(GenerationMode::Mcq);
    let failed = generate_content(&client, &selection).await.unwrap_err();
    assert_eq!(failed.source.kind(), "parse");
}

#[tokio::test]
async fn test_shape_mismatch_is_validation_failure() {
    let client = MockGenerationClient::replying(subjective_json(10, 6, 3));
    let selection = generatable_selection(GenerationMode::Subjective);
    let failed = generate_content(&client, &selection).await.unwrap_err();
    assert_eq!(failed.source.kind(), "validation");
    assert!(failed.to_string().contains("Details: Expected exactly 4 long answer"));
}

#[tokio::test]
async fn test_service_error_is_wrapped() {
    let mut client = MockGenerationClient::new();
    client.expect_id().return_const("mock".to_string());
    client.expect_generate().returning(|_| {
        Err(ClientError::Api {
            status: 500,
            message: "internal".to_string(),
        })
    });

    let selection = generatable_selection(GenerationMode::StudyGuide);
    let failed = generate_content(&client, &selection).await.unwrap_err();
    assert_eq!(failed.source.kind(), "service");
    assert!(failed.to_string().starts_with("Failed to generate study guide."));
}

#[tokio::test]
async fn test_concept_map_context_uses_chapter() {
    let client = MockGenerationClient::replying(concept_map_json(&concept_chain(3)));
    let selection = SelectionState::default().apply_all([
        SelectionAction::SetMode(GenerationMode::ConceptMap),
        SelectionAction::SetSubject(Subject::Biology),
    ]);
    let content = generate_content(&client, &selection).await.unwrap();
    assert_eq!(content.context.chapter, "Life Processes");
    assert_eq!(content.result.mode(), GenerationMode::ConceptMap);
}

#[tokio::test]
async fn test_count_mismatch_still_succeeds() {
    let client = MockGenerationClient::replying(mcq_list_json(2));
    let selection = generatable_selection(GenerationMode::Mcq)
        .apply(SelectionAction::SetQuestionCount(4));
    let content = generate_content(&client, &selection).await.unwrap();
    assert!(matches!(content.result, ResultModel::Mcq(ref items) if items.len() == 2));
}
