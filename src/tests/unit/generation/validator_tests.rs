//! Response Validator Tests

use rstest::rstest;
use serde_json::{json, Value};

use crate::core::generation::types::GenerationMode;
use crate::core::generation::validator::{validate, ResponseError};
use crate::core::models::{ConceptMapNode, GuideSection, ResultModel, MAX_CONCEPT_MAP_DEPTH};
use crate::tests::common::*;

fn validation_message(mode: GenerationMode, raw: &str) -> String {
    match validate(mode, raw) {
        Err(ResponseError::Validation(reason)) => reason,
        other => panic!("expected validation error, got {other:?}"),
    }
}

fn single_mcq(mutate: impl FnOnce(&mut Value)) -> String {
    let mut mcq = mcq_json("Which is a vector?", "B");
    mutate(&mut mcq);
    json!([mcq]).to_string()
}

// =============================================================================
// MCQ
// =============================================================================

#[test]
fn test_accepts_well_formed_mcqs() {
    let ResultModel::Mcq(items) = validate(GenerationMode::Mcq, &mcq_list_json(5)).unwrap() else {
        panic!("expected MCQ result");
    };
    assert_eq!(items.len(), 5);
    for mcq in &items {
        assert_eq!(mcq.options.len(), 4);
        assert_eq!(mcq.distractors.len(), 3);
        assert!(mcq.correct_option().is_some());
    }
}

#[test]
fn test_rejects_three_options() {
    let raw = single_mcq(|mcq| {
        mcq["options"].as_array_mut().unwrap().pop();
    });
    let reason = validation_message(GenerationMode::Mcq, &raw);
    assert_eq!(reason, "Question 1 is invalid: expected 4 options, found 3");
}

#[test]
fn test_empty_question_counts_as_missing() {
    let raw = single_mcq(|mcq| mcq["question"] = json!(""));
    assert_eq!(
        validation_message(GenerationMode::Mcq, &raw),
        "Generated data is missing required fields: question."
    );
}

#[rstest]
#[case::blank_question(0, "question", "Question 2 is invalid: question text is empty")]
#[case::blank_option(2, "text", "Question 2 is invalid: option 'C' has no text")]
fn test_rejects_blank_text_in_later_items(
    #[case] option: usize,
    #[case] field: &str,
    #[case] expected: &str,
) {
    let mut second = mcq_json("Which is a scalar?", "A");
    if field == "question" {
        second["question"] = json!("   ");
    } else {
        second["options"][option]["text"] = json!(" ");
    }
    let raw = json!([mcq_json("Which is a vector?", "B"), second]).to_string();
    assert_eq!(validation_message(GenerationMode::Mcq, &raw), expected);
}

#[test]
fn test_rejects_duplicate_option_ids() {
    let raw = single_mcq(|mcq| mcq["options"][3]["id"] = json!("A"));
    assert!(validation_message(GenerationMode::Mcq, &raw).contains("not unique"));
}

#[test]
fn test_rejects_unknown_correct_option() {
    let raw = single_mcq(|mcq| mcq["answer"]["correctOptionId"] = json!("E"));
    assert!(validation_message(GenerationMode::Mcq, &raw).contains("'E' is not one of the options"));
}

#[test]
fn test_rejects_distractor_for_correct_option() {
    let raw = single_mcq(|mcq| mcq["distractors"][0]["optionId"] = json!("B"));
    assert!(validation_message(GenerationMode::Mcq, &raw).contains("is the correct option"));
}

#[test]
fn test_rejects_missing_distractor() {
    let raw = single_mcq(|mcq| {
        mcq["distractors"].as_array_mut().unwrap().pop();
    });
    assert!(validation_message(GenerationMode::Mcq, &raw).contains("expected 3 distractors"));
}

#[test]
fn test_rejects_duplicate_distractor() {
    let raw = single_mcq(|mcq| mcq["distractors"][1]["optionId"] = json!("A"));
    assert!(validation_message(GenerationMode::Mcq, &raw).contains("duplicate distractor"));
}

#[test]
fn test_invalid_later_question_is_named() {
    let mut items: Value = serde_json::from_str(&mcq_list_json(3)).unwrap();
    items[2]["answer"]["correctOptionId"] = json!("Z");
    let reason = validation_message(GenerationMode::Mcq, &items.to_string());
    assert!(reason.starts_with("Question 3 is invalid"));
}

#[test]
fn test_wrong_field_type_is_validation_error() {
    let raw = single_mcq(|mcq| mcq["options"] = json!("A, B, C, D"));
    assert!(matches!(
        validate(GenerationMode::Mcq, &raw),
        Err(ResponseError::Validation(_))
    ));
}

// =============================================================================
// Subjective
// =============================================================================

#[test]
fn test_accepts_exact_bucket_sizes() {
    let ResultModel::Subjective(set) =
        validate(GenerationMode::Subjective, &subjective_json(10, 6, 4)).unwrap()
    else {
        panic!("expected subjective result");
    };
    assert_eq!(set.very_short_answer.len(), 10);
    assert_eq!(set.short_answer.len(), 6);
    assert_eq!(set.long_answer.len(), 4);
}

#[rstest]
#[case(9, 6, 4, "Expected exactly 10 very short answer questions, found 9.")]
#[case(10, 7, 4, "Expected exactly 6 short answer questions, found 7.")]
#[case(10, 6, 0, "Expected exactly 4 long answer questions, found 0.")]
fn test_rejects_wrong_bucket_sizes(
    #[case] very_short: usize,
    #[case] short: usize,
    #[case] long: usize,
    #[case] expected: &str,
) {
    let raw = subjective_json(very_short, short, long);
    assert_eq!(validation_message(GenerationMode::Subjective, &raw), expected);
}

// =============================================================================
// Study Guide
// =============================================================================

#[test]
fn test_study_guide_sections_take_item_shape() {
    let ResultModel::StudyGuide(guide) =
        validate(GenerationMode::StudyGuide, &study_guide_json()).unwrap()
    else {
        panic!("expected study guide");
    };
    assert!(matches!(guide.summary, GuideSection::StringList(ref items) if items.len() == 2));
    let GuideSection::TermDefinitionList(concepts) = &guide.difficult_concepts else {
        panic!("expected term/definition list");
    };
    assert_eq!(concepts[0].term, "Series vs parallel");
    assert!(concepts[0].definition.starts_with("In series"));
}

#[test]
fn test_study_guide_missing_section_named() {
    let mut guide: Value = serde_json::from_str(&study_guide_json()).unwrap();
    guide.as_object_mut().unwrap().remove("examTips");
    let reason = validation_message(GenerationMode::StudyGuide, &guide.to_string());
    assert!(reason.ends_with("examTips."));
}

#[test]
fn test_study_guide_entry_without_definition_rejected() {
    let mut guide: Value = serde_json::from_str(&study_guide_json()).unwrap();
    guide["keywords"] = json!([{ "term": "Ohm" }]);
    assert!(validation_message(GenerationMode::StudyGuide, &guide.to_string())
        .contains("'keywords'"));
}

// =============================================================================
// Concept Map
// =============================================================================

#[test]
fn test_concept_map_at_max_depth_accepted() {
    let root = concept_chain(MAX_CONCEPT_MAP_DEPTH);
    let result = validate(GenerationMode::ConceptMap, &concept_map_json(&root)).unwrap();
    assert_eq!(result, ResultModel::ConceptMap(root));
}

#[test]
fn test_concept_map_beyond_max_depth_rejected() {
    let root = concept_chain(MAX_CONCEPT_MAP_DEPTH + 1);
    let reason = validation_message(GenerationMode::ConceptMap, &concept_map_json(&root));
    assert_eq!(reason, "Concept map exceeds 4 levels.");
}

#[test]
fn test_single_node_map_accepted() {
    let raw = r#"{"concept": "Electricity", "children": []}"#;
    let result = validate(GenerationMode::ConceptMap, raw).unwrap();
    assert_eq!(result, ResultModel::ConceptMap(ConceptMapNode::leaf("Electricity")));
}

#[test]
fn test_empty_root_concept_rejected() {
    let raw = r#"{"concept": "  ", "children": []}"#;
    assert_eq!(
        validation_message(GenerationMode::ConceptMap, raw),
        "Concept map root has an empty concept."
    );
}

#[test]
fn test_nested_children_may_be_omitted() {
    let raw = r#"{"concept": "Root", "children": [{"concept": "Leaf"}]}"#;
    let result = validate(GenerationMode::ConceptMap, raw).unwrap();
    let ResultModel::ConceptMap(root) = result else {
        panic!("expected concept map");
    };
    assert_eq!(root.depth(), 2);
}

// =============================================================================
// Mode Mismatch
// =============================================================================

#[test]
fn test_payload_for_other_mode_rejected() {
    assert!(validate(GenerationMode::Subjective, &mcq_list_json(2)).is_err());
    assert!(validate(GenerationMode::Mcq, &study_guide_json()).is_err());
}
