//! Export Serialization
//!
//! Deterministic plain-text rendering of a [`ResultModel`] for copy/export,
//! plus the sinks that receive it.

use crate::core::catalog::Subject;
use crate::core::models::{
    ConceptMapNode, GuideSection, Mcq, ResultModel, StudyGuide, SubjectiveQuestion,
    SubjectiveSet, ANSWER_PREFIX, MAX_CONCEPT_MAP_DEPTH,
};
use crate::core::selection::ValidSelection;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::PathBuf;
use thiserror::Error;

pub const GUIDE_TITLE: &str = "Om's Science scholarship Guide";
pub const NO_EXPLANATION: &str = "No explanation provided.";

const DIVIDER: &str = "----------------------------------------";
const HEAVY_DIVIDER: &str = "========================================";

/// Selection details printed in export headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportContext {
    pub subject: Subject,
    pub chapter: String,
}

impl From<&ValidSelection> for ExportContext {
    fn from(selection: &ValidSelection) -> Self {
        Self {
            subject: selection.subject,
            chapter: selection.scope.label().to_string(),
        }
    }
}

/// Render `result` as canonical export text.
pub fn serialize(result: &ResultModel, context: &ExportContext) -> String {
    let text = match result {
        ResultModel::Mcq(items) => mcq_text(items),
        ResultModel::Subjective(set) => subjective_text(set),
        ResultModel::StudyGuide(guide) => study_guide_text(guide, context),
        ResultModel::ConceptMap(root) => concept_map_text(root, context),
    };
    text.trim().to_string()
}

// ============================================================================
// MCQ
// ============================================================================

fn mcq_text(items: &[Mcq]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(index, mcq)| mcq_block(index + 1, mcq))
        .collect::<Vec<_>>()
        .join(&format!("\n{HEAVY_DIVIDER}\n"))
}

fn mcq_block(number: usize, mcq: &Mcq) -> String {
    let options = mcq
        .options
        .iter()
        .map(|o| format!("{}. {}", o.id, o.text))
        .collect::<Vec<_>>()
        .join("\n");

    let correct_id = &mcq.answer.correct_option_id;
    let correct_text = mcq.correct_option().map_or("N/A", |o| o.text.as_str());

    let explanations = mcq
        .options
        .iter()
        .map(|o| {
            let verdict = if &o.id == correct_id { "Correct" } else { "Incorrect" };
            let explanation = mcq.explanation_for(&o.id).unwrap_or(NO_EXPLANATION);
            format!("Option {} ({verdict}):\n{explanation}", o.id)
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "\n{DIVIDER}\nQuestion {number}\n{DIVIDER}\n\n{question}\n\nOptions:\n{options}\n\n\
         --- Solution ---\nCorrect Answer: {correct_id}. {correct_text}\n\n\
         --- Detailed Explanations ---\n{explanations}\n",
        question = mcq.question,
    )
}

// ============================================================================
// Subjective
// ============================================================================

fn subjective_text(set: &SubjectiveSet) -> String {
    let mut text = format!("{GUIDE_TITLE}\n{HEAVY_DIVIDER}\n");
    let sections = [
        ("Very Short Answer Questions", &set.very_short_answer),
        ("Short Answer Questions", &set.short_answer),
        ("Long Answer Questions", &set.long_answer),
    ];
    for (title, questions) in sections {
        if questions.is_empty() {
            continue;
        }
        let _ = write!(text, "\n--- {title} ---\n");
        let body = questions
            .iter()
            .enumerate()
            .map(|(i, q)| format!("\nQ{}: {}\n{}", i + 1, q.question, answer_line(q)))
            .collect::<Vec<_>>()
            .join("\n");
        text.push_str(&body);
    }
    text
}

/// Answer text as generated. A space is inserted only when the prefix runs
/// straight into the body.
fn answer_line(question: &SubjectiveQuestion) -> String {
    match question.answer.strip_prefix(ANSWER_PREFIX) {
        Some(rest) if rest.starts_with(|c: char| !c.is_whitespace()) => {
            format!("{ANSWER_PREFIX} {rest}")
        }
        _ => question.answer.clone(),
    }
}

// ============================================================================
// Study Guide
// ============================================================================

fn study_guide_text(guide: &StudyGuide, context: &ExportContext) -> String {
    let mut text = format!(
        "{GUIDE_TITLE} - Study Guide\nSubject: {} | Chapter: {}\n{HEAVY_DIVIDER}\n",
        context.subject, context.chapter
    );
    for (title, section) in guide.sections() {
        let _ = write!(text, "\n--- {title} ---\n\n");
        text.push_str(&guide_section_text(section));
    }
    text
}

fn guide_section_text(section: &GuideSection) -> String {
    match section {
        GuideSection::StringList(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| format!("{}. {item}", i + 1))
            .collect::<Vec<_>>()
            .join("\n"),
        GuideSection::TermDefinitionList(items) => items
            .iter()
            .map(|item| format!("{}\n{}", item.term, item.definition))
            .collect::<Vec<_>>()
            .join("\n\n"),
    }
}

// ============================================================================
// Concept Map
// ============================================================================

fn concept_map_text(root: &ConceptMapNode, context: &ExportContext) -> String {
    let mut text = format!("Concept Map for {}\n{HEAVY_DIVIDER}\n", context.chapter);
    write_node(&mut text, root, 1);
    text
}

/// Pre-order dump; nodes below the depth cap are not rendered.
fn write_node(out: &mut String, node: &ConceptMapNode, depth: usize) {
    if depth > MAX_CONCEPT_MAP_DEPTH {
        return;
    }
    let indent = "  ".repeat(depth - 1);
    let _ = writeln!(out, "{indent}- {}", node.concept);
    for child in &node.children {
        write_node(out, child, depth + 1);
    }
}

// ============================================================================
// Export Sinks
// ============================================================================

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write export to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write export to stdout: {0}")]
    Stdout(#[source] std::io::Error),
}

/// Outcome reported back to the user after an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStatus {
    Copied,
    Failed(String),
}

impl ExportStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ExportStatus::Copied => "Copied!",
            ExportStatus::Failed(_) => "Failed to copy",
        }
    }
}

/// Destination for export text.
pub trait ExportSink: Send + Sync {
    fn export(&self, text: &str) -> Result<(), ExportError>;
}

/// Writes export text to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl ExportSink for StdoutSink {
    fn export(&self, text: &str) -> Result<(), ExportError> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{text}").map_err(ExportError::Stdout)?;
        stdout.flush().map_err(ExportError::Stdout)
    }
}

/// Writes export text to a file, replacing its contents.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ExportSink for FileSink {
    fn export(&self, text: &str) -> Result<(), ExportError> {
        std::fs::write(&self.path, text).map_err(|source| ExportError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// Send `text` to `sink` and report the outcome.
pub fn export_with(sink: &dyn ExportSink, text: &str) -> ExportStatus {
    match sink.export(text) {
        Ok(()) => {
            tracing::info!(bytes = text.len(), "Export written");
            ExportStatus::Copied
        }
        Err(e) => {
            tracing::error!(error = %e, "Export failed");
            ExportStatus::Failed(e.to_string())
        }
    }
}
