//! Response Schema Registry
//!
//! Structural contracts passed to the service as `responseSchema`, in the
//! Gemini OpenAPI subset (`OBJECT`, `ARRAY`, `STRING`).

use crate::core::generation::types::GenerationMode;
use crate::core::models::MAX_CONCEPT_MAP_DEPTH;
use serde_json::{json, Value};

/// Response MIME type requested for every mode.
pub const RESPONSE_MIME_TYPE: &str = "application/json";

/// Structural contract for `mode`.
pub fn schema_for(mode: GenerationMode) -> Value {
    match mode {
        GenerationMode::Mcq => json!({
            "type": "ARRAY",
            "items": mcq_schema(),
        }),
        GenerationMode::Subjective => subjective_set_schema(),
        GenerationMode::StudyGuide => study_guide_schema(),
        GenerationMode::ConceptMap => concept_map_schema(),
    }
}

fn string(description: &str) -> Value {
    json!({ "type": "STRING", "description": description })
}

fn mcq_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "question": string("The main body of the multiple-choice question. It should be innovative and test higher-order thinking skills."),
            "options": {
                "type": "ARRAY",
                "description": "An array of exactly 4 potential answers.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": string("A unique identifier for the option: 'A', 'B', 'C' or 'D'."),
                        "text": string("The text of the answer option."),
                    },
                    "required": ["id", "text"],
                },
            },
            "answer": {
                "type": "OBJECT",
                "description": "The correct answer and its detailed explanation.",
                "properties": {
                    "correctOptionId": string("The 'id' of the correct option."),
                    "explanation": string("A detailed, step-by-step explanation of why this option is the correct answer."),
                },
                "required": ["correctOptionId", "explanation"],
            },
            "distractors": {
                "type": "ARRAY",
                "description": "Explanations for why each of the 3 incorrect options is wrong.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "optionId": string("The 'id' of an incorrect option."),
                        "explanation": string("The misconception or error that makes this option incorrect."),
                    },
                    "required": ["optionId", "explanation"],
                },
            },
        },
        "required": ["question", "options", "answer", "distractors"],
    })
}

fn subjective_question_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "question": string("The main body of the subjective question."),
            "answer": string("A detailed answer following the length constraints. The answer must start with 'Answer :'."),
        },
        "required": ["question", "answer"],
    })
}

fn subjective_set_schema() -> Value {
    let bucket = |description: &str| {
        json!({
            "type": "ARRAY",
            "description": description,
            "items": subjective_question_schema(),
        })
    };
    json!({
        "type": "OBJECT",
        "properties": {
            "veryShortAnswer": bucket("An array of exactly 10 very short answer questions."),
            "shortAnswer": bucket("An array of exactly 6 short answer questions."),
            "longAnswer": bucket("An array of exactly 4 long answer questions."),
        },
        "required": ["veryShortAnswer", "shortAnswer", "longAnswer"],
    })
}

fn study_guide_schema() -> Value {
    let string_list = |description: &str| {
        json!({
            "type": "ARRAY",
            "description": description,
            "items": { "type": "STRING" },
        })
    };
    let pair_list = |description: &str, label: &str, body: &str| {
        json!({
            "type": "ARRAY",
            "description": description,
            "items": {
                "type": "OBJECT",
                "properties": {
                    label: { "type": "STRING" },
                    body: { "type": "STRING" },
                },
                "required": [label, body],
            },
        })
    };
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": string_list("A concise summary of the chapter's main topics, as a list of bullet points."),
            "keywords": pair_list("Important terms from the chapter, each with a clear and simple definition.", "term", "definition"),
            "difficultConcepts": pair_list("Concepts students often find difficult, explained simply.", "concept", "explanation"),
            "commonMistakes": string_list("Common mistakes or misconceptions about this chapter."),
            "examTips": string_list("Actionable tips for studying this chapter and answering exam questions."),
        },
        "required": ["summary", "keywords", "difficultConcepts", "commonMistakes", "examTips"],
    })
}

/// Concept map contract nested to [`MAX_CONCEPT_MAP_DEPTH`] levels.
///
/// The deepest level's children carry only a `concept`.
fn concept_map_schema() -> Value {
    let mut node = json!({
        "type": "OBJECT",
        "properties": { "concept": { "type": "STRING" } },
    });
    for _ in 1..MAX_CONCEPT_MAP_DEPTH - 1 {
        node = json!({
            "type": "OBJECT",
            "properties": {
                "concept": { "type": "STRING" },
                "children": { "type": "ARRAY", "items": node },
            },
            "required": ["concept"],
        });
    }
    json!({
        "type": "OBJECT",
        "properties": {
            "concept": string("The root concept of the map."),
            "children": {
                "type": "ARRAY",
                "description": "Child nodes.",
                "items": node,
            },
        },
        "required": ["concept", "children"],
    })
}
