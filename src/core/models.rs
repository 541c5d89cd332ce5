//! Generated Content Models
//!
//! Validated result shapes for the four generation modes. Field names follow
//! the camelCase contract requested from the generative service.

use crate::core::generation::types::GenerationMode;
use serde::{Deserialize, Serialize};

/// Fixed literal that subjective answers are expected to begin with.
pub const ANSWER_PREFIX: &str = "Answer :";

/// Option ids in the order the service is asked to label them.
pub const OPTION_IDS: [&str; 4] = ["A", "B", "C", "D"];

// ============================================================================
// MCQ
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McqOption {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McqAnswer {
    pub correct_option_id: String,
    pub explanation: String,
}

/// Explanation attached to an incorrect option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Distractor {
    pub option_id: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mcq {
    pub question: String,
    pub options: Vec<McqOption>,
    pub answer: McqAnswer,
    pub distractors: Vec<Distractor>,
}

impl Mcq {
    pub fn option(&self, id: &str) -> Option<&McqOption> {
        self.options.iter().find(|o| o.id == id)
    }

    pub fn correct_option(&self) -> Option<&McqOption> {
        self.option(&self.answer.correct_option_id)
    }

    /// Explanation for `option_id`: the answer record for the correct option,
    /// the matching distractor otherwise.
    pub fn explanation_for(&self, option_id: &str) -> Option<&str> {
        if option_id == self.answer.correct_option_id {
            return Some(&self.answer.explanation);
        }
        self.distractors
            .iter()
            .find(|d| d.option_id == option_id)
            .map(|d| d.explanation.as_str())
    }
}

// ============================================================================
// Subjective
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectiveQuestion {
    pub question: String,
    pub answer: String,
}

impl SubjectiveQuestion {
    /// Answer text without the leading [`ANSWER_PREFIX`], if present.
    pub fn answer_body(&self) -> &str {
        self.answer
            .strip_prefix(ANSWER_PREFIX)
            .map(str::trim_start)
            .unwrap_or(&self.answer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectiveSet {
    pub very_short_answer: Vec<SubjectiveQuestion>,
    pub short_answer: Vec<SubjectiveQuestion>,
    pub long_answer: Vec<SubjectiveQuestion>,
}

impl SubjectiveSet {
    pub const VERY_SHORT_COUNT: usize = 10;
    pub const SHORT_COUNT: usize = 6;
    pub const LONG_COUNT: usize = 4;
}

// ============================================================================
// Study Guide
// ============================================================================

/// A labelled entry: keyword/definition or concept/explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermDefinition {
    pub term: String,
    pub definition: String,
}

/// One study guide section, shape fixed when the response is validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum GuideSection {
    StringList(Vec<String>),
    TermDefinitionList(Vec<TermDefinition>),
}

impl GuideSection {
    pub fn len(&self) -> usize {
        match self {
            GuideSection::StringList(items) => items.len(),
            GuideSection::TermDefinitionList(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyGuide {
    pub summary: GuideSection,
    pub keywords: GuideSection,
    pub difficult_concepts: GuideSection,
    pub common_mistakes: GuideSection,
    pub exam_tips: GuideSection,
}

impl StudyGuide {
    /// Sections with their export titles, in export order.
    pub fn sections(&self) -> [(&'static str, &GuideSection); 5] {
        [
            ("Chapter Summary", &self.summary),
            ("Keywords & Definitions", &self.keywords),
            ("Difficult Concepts Explained", &self.difficult_concepts),
            ("Common Mistakes to Avoid", &self.common_mistakes),
            ("Exam Tips", &self.exam_tips),
        ]
    }
}

// ============================================================================
// Concept Map
// ============================================================================

/// Maximum concept map depth, root counted as level 1.
pub const MAX_CONCEPT_MAP_DEPTH: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptMapNode {
    pub concept: String,
    #[serde(default)]
    pub children: Vec<ConceptMapNode>,
}

impl ConceptMapNode {
    pub fn leaf(concept: impl Into<String>) -> Self {
        Self {
            concept: concept.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(concept: impl Into<String>, children: Vec<ConceptMapNode>) -> Self {
        Self {
            concept: concept.into(),
            children,
        }
    }

    /// Tree depth with this node counted as level 1.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(Self::depth).max().unwrap_or(0)
    }
}

// ============================================================================
// Result Model
// ============================================================================

/// Exactly one validated result shape, matching the mode that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultModel {
    Mcq(Vec<Mcq>),
    Subjective(SubjectiveSet),
    StudyGuide(StudyGuide),
    ConceptMap(ConceptMapNode),
}

impl ResultModel {
    pub fn mode(&self) -> GenerationMode {
        match self {
            ResultModel::Mcq(_) => GenerationMode::Mcq,
            ResultModel::Subjective(_) => GenerationMode::Subjective,
            ResultModel::StudyGuide(_) => GenerationMode::StudyGuide,
            ResultModel::ConceptMap(_) => GenerationMode::ConceptMap,
        }
    }
}
