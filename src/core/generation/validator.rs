//! Response Validator
//!
//! Parses raw service text and checks it against the shape expected for the
//! active mode. Beyond top-level key presence, every structural invariant is
//! enforced here: MCQ option/distractor coverage, exact subjective bucket
//! sizes, and concept map depth.

use crate::core::generation::types::GenerationMode;
use crate::core::models::{
    ConceptMapNode, GuideSection, Mcq, ResultModel, StudyGuide, SubjectiveSet, TermDefinition,
    MAX_CONCEPT_MAP_DEPTH,
};
use serde_json::{Map, Value};
use std::collections::HashSet;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ResponseError>;

#[derive(Error, Debug)]
pub enum ResponseError {
    /// Raw text is not well-formed JSON.
    #[error("Failed to parse generated content: {0}")]
    Parse(#[source] serde_json::Error),

    /// JSON is well-formed but does not match the expected shape.
    #[error("{0}")]
    Validation(String),
}

impl ResponseError {
    fn invalid(reason: impl Into<String>) -> Self {
        ResponseError::Validation(reason.into())
    }
}

/// Parse and validate `raw` as the result shape for `mode`.
pub fn validate(mode: GenerationMode, raw: &str) -> Result<ResultModel> {
    let value: Value = serde_json::from_str(raw.trim()).map_err(ResponseError::Parse)?;
    let result = match mode {
        GenerationMode::Mcq => ResultModel::Mcq(validate_mcqs(value)?),
        GenerationMode::Subjective => ResultModel::Subjective(validate_subjective(value)?),
        GenerationMode::StudyGuide => ResultModel::StudyGuide(validate_study_guide(value)?),
        GenerationMode::ConceptMap => ResultModel::ConceptMap(validate_concept_map(value)?),
    };
    Ok(result)
}

fn missing_keys<'a>(object: &Map<String, Value>, keys: &[&'a str]) -> Vec<&'a str> {
    keys.iter()
        .copied()
        .filter(|key| object.get(*key).map_or(true, Value::is_null))
        .collect()
}

fn decode<T: serde::de::DeserializeOwned>(value: Value, what: &str) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| ResponseError::invalid(format!("Generated {what} has an unexpected shape: {e}")))
}

// ============================================================================
// MCQ
// ============================================================================

const MCQ_FIELDS: [&str; 4] = ["question", "options", "answer", "distractors"];

fn validate_mcqs(value: Value) -> Result<Vec<Mcq>> {
    let Some(items) = value.as_array() else {
        return Err(ResponseError::invalid(
            "Generated data is not an array of questions.",
        ));
    };
    let Some(first) = items.first() else {
        return Err(ResponseError::invalid("Generated data contains no questions."));
    };
    let missing: Vec<&str> = match first.as_object() {
        Some(object) => MCQ_FIELDS
            .iter()
            .copied()
            .filter(|key| match object.get(*key) {
                None | Some(Value::Null) => true,
                Some(Value::String(text)) => text.is_empty(),
                Some(_) => false,
            })
            .collect(),
        None => MCQ_FIELDS.to_vec(),
    };
    if !missing.is_empty() {
        return Err(ResponseError::invalid(format!(
            "Generated data is missing required fields: {}.",
            missing.join(", ")
        )));
    }

    let mcqs: Vec<Mcq> = decode(value, "question list")?;
    for (index, mcq) in mcqs.iter().enumerate() {
        check_mcq(mcq).map_err(|reason| {
            ResponseError::invalid(format!("Question {} is invalid: {reason}", index + 1))
        })?;
    }
    Ok(mcqs)
}

/// Option ids must be 4 unique values, the correct id one of them, and the
/// distractors exactly the other three.
fn check_mcq(mcq: &Mcq) -> std::result::Result<(), String> {
    if mcq.question.trim().is_empty() {
        return Err("question text is empty".to_string());
    }
    if mcq.options.len() != 4 {
        return Err(format!("expected 4 options, found {}", mcq.options.len()));
    }
    if let Some(blank) = mcq.options.iter().find(|o| o.text.trim().is_empty()) {
        return Err(format!("option '{}' has no text", blank.id));
    }
    let ids: HashSet<&str> = mcq.options.iter().map(|o| o.id.as_str()).collect();
    if ids.len() != mcq.options.len() {
        return Err("option ids are not unique".to_string());
    }
    let correct = mcq.answer.correct_option_id.as_str();
    if !ids.contains(correct) {
        return Err(format!("correct option '{correct}' is not one of the options"));
    }

    let mut seen = HashSet::new();
    for distractor in &mcq.distractors {
        let id = distractor.option_id.as_str();
        if id == correct {
            return Err(format!("distractor '{id}' is the correct option"));
        }
        if !ids.contains(id) {
            return Err(format!("distractor '{id}' is not one of the options"));
        }
        if !seen.insert(id) {
            return Err(format!("duplicate distractor '{id}'"));
        }
    }
    if seen.len() != ids.len() - 1 {
        return Err(format!(
            "expected 3 distractors, found {}",
            mcq.distractors.len()
        ));
    }
    Ok(())
}

// ============================================================================
// Subjective
// ============================================================================

fn validate_subjective(value: Value) -> Result<SubjectiveSet> {
    let complete = value
        .as_object()
        .is_some_and(|o| missing_keys(o, &["veryShortAnswer", "shortAnswer", "longAnswer"]).is_empty());
    if !complete {
        return Err(ResponseError::invalid(
            "Generated data is missing required question categories.",
        ));
    }

    let set: SubjectiveSet = decode(value, "question set")?;
    let buckets = [
        ("very short answer", set.very_short_answer.len(), SubjectiveSet::VERY_SHORT_COUNT),
        ("short answer", set.short_answer.len(), SubjectiveSet::SHORT_COUNT),
        ("long answer", set.long_answer.len(), SubjectiveSet::LONG_COUNT),
    ];
    for (name, actual, expected) in buckets {
        if actual != expected {
            return Err(ResponseError::invalid(format!(
                "Expected exactly {expected} {name} questions, found {actual}."
            )));
        }
    }
    Ok(set)
}

// ============================================================================
// Study Guide
// ============================================================================

#[derive(Clone, Copy)]
enum SectionShape {
    Strings,
    Pairs,
}

fn validate_study_guide(value: Value) -> Result<StudyGuide> {
    let Some(object) = value.as_object() else {
        return Err(ResponseError::invalid(
            "Generated data is missing required study guide sections.",
        ));
    };
    let keys = ["summary", "keywords", "difficultConcepts", "commonMistakes", "examTips"];
    let missing = missing_keys(object, &keys);
    if !missing.is_empty() {
        return Err(ResponseError::invalid(format!(
            "Generated data is missing required study guide sections: {}.",
            missing.join(", ")
        )));
    }

    let section = |key: &str, expected: SectionShape| guide_section(key, &object[key], expected);
    Ok(StudyGuide {
        summary: section("summary", SectionShape::Strings)?,
        keywords: section("keywords", SectionShape::Pairs)?,
        difficult_concepts: section("difficultConcepts", SectionShape::Pairs)?,
        common_mistakes: section("commonMistakes", SectionShape::Strings)?,
        exam_tips: section("examTips", SectionShape::Strings)?,
    })
}

/// Decide a section's variant from its first item; an empty list takes the
/// section's usual shape.
fn guide_section(key: &str, value: &Value, expected: SectionShape) -> Result<GuideSection> {
    let Some(items) = value.as_array() else {
        return Err(ResponseError::invalid(format!(
            "Study guide section '{key}' is not a list."
        )));
    };
    let shape = match items.first() {
        Some(Value::String(_)) => SectionShape::Strings,
        Some(Value::Object(_)) => SectionShape::Pairs,
        Some(_) => {
            return Err(ResponseError::invalid(format!(
                "Study guide section '{key}' holds unsupported items."
            )))
        }
        None => expected,
    };

    match shape {
        SectionShape::Strings => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    ResponseError::invalid(format!(
                        "Study guide section '{key}' mixes text and structured items."
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(GuideSection::StringList),
        SectionShape::Pairs => items
            .iter()
            .map(|item| term_definition(key, item))
            .collect::<Result<Vec<_>>>()
            .map(GuideSection::TermDefinitionList),
    }
}

/// Label aliases `term` then `concept`; body aliases `definition` then
/// `explanation`.
fn term_definition(key: &str, item: &Value) -> Result<TermDefinition> {
    let field = |names: [&str; 2]| {
        names
            .iter()
            .find_map(|name| item.get(*name).and_then(Value::as_str))
            .map(str::to_string)
    };
    match (field(["term", "concept"]), field(["definition", "explanation"])) {
        (Some(term), Some(definition)) => Ok(TermDefinition { term, definition }),
        _ => Err(ResponseError::invalid(format!(
            "Study guide section '{key}' has an entry without a term and definition."
        ))),
    }
}

// ============================================================================
// Concept Map
// ============================================================================

fn validate_concept_map(value: Value) -> Result<ConceptMapNode> {
    let complete = value
        .as_object()
        .is_some_and(|o| missing_keys(o, &["concept", "children"]).is_empty());
    if !complete {
        return Err(ResponseError::invalid(
            "Generated data is missing required concept map fields.",
        ));
    }

    let root: ConceptMapNode = decode(value, "concept map")?;

    // Iterative walk; the decoded depth is untrusted.
    let mut stack = vec![(&root, 1usize)];
    while let Some((node, depth)) = stack.pop() {
        if node.concept.trim().is_empty() {
            return Err(ResponseError::invalid(if depth == 1 {
                "Concept map root has an empty concept.".to_string()
            } else {
                format!("Concept map has an empty concept at level {depth}.")
            }));
        }
        if depth > MAX_CONCEPT_MAP_DEPTH {
            return Err(ResponseError::invalid(format!(
                "Concept map exceeds {MAX_CONCEPT_MAP_DEPTH} levels."
            )));
        }
        stack.extend(node.children.iter().map(|child| (child, depth + 1)));
    }
    Ok(root)
}
