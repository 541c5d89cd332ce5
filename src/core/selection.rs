//! Selection State
//!
//! The user's generation configuration as an immutable value type. All
//! changes go through [`SelectionState::apply`], which enforces the
//! cross-field rules (subject changes reset difficulty and chapter; switching
//! into a chapter-scoped mode picks a default chapter).

use crate::core::catalog::{is_concrete_chapter, Subject, ALL_CHAPTERS};
use crate::core::generation::types::{Difficulty, GenerationMode, Language};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_QUESTION_COUNT: u8 = 1;
pub const MAX_QUESTION_COUNT: u8 = 20;

// ============================================================================
// Error Types
// ============================================================================

/// Reasons a selection cannot be turned into a generation request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Please select a subject.")]
    MissingSubject,

    #[error("Please select a difficulty to generate {mode} questions.")]
    MissingDifficulty { mode: GenerationMode },

    #[error("Please select a specific chapter to generate a {mode}.")]
    ChapterRequired { mode: GenerationMode },
}

// ============================================================================
// Actions
// ============================================================================

/// A single user edit to the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionAction {
    SetSubject(Subject),
    SetChapter(String),
    SetDifficulty(Difficulty),
    SetLanguage(Language),
    SetMode(GenerationMode),
    SetQuestionCount(u8),
    /// Clears subject, difficulty and chapter. Language, mode and count stay.
    Reset,
}

// ============================================================================
// State
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub subject: Option<Subject>,
    /// `None`, the `"All Chapters"` sentinel, or a catalog chapter.
    pub chapter: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub language: Language,
    pub mode: GenerationMode,
    pub question_count: u8,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            subject: None,
            chapter: None,
            difficulty: None,
            language: Language::default(),
            mode: GenerationMode::default(),
            question_count: MIN_QUESTION_COUNT,
        }
    }
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `action` and return the resulting state.
    pub fn apply(&self, action: SelectionAction) -> SelectionState {
        let mut next = self.clone();
        match action {
            SelectionAction::SetSubject(subject) => {
                next.subject = Some(subject);
                next.difficulty = None;
                next.chapter = Some(if next.mode.is_chapter_scoped() {
                    subject.first_chapter().to_string()
                } else {
                    ALL_CHAPTERS.to_string()
                });
            }
            SelectionAction::SetChapter(chapter) => {
                if next.chapter_options().iter().any(|c| *c == chapter) {
                    next.chapter = Some(chapter);
                } else {
                    tracing::warn!(
                        chapter = %chapter,
                        subject = ?next.subject,
                        "Ignoring chapter not offered for the current selection"
                    );
                }
            }
            SelectionAction::SetDifficulty(difficulty) => {
                next.difficulty = Some(difficulty);
            }
            SelectionAction::SetLanguage(language) => {
                next.language = language;
            }
            SelectionAction::SetMode(mode) => {
                next.mode = mode;
                if mode.is_chapter_scoped() && !is_concrete_chapter(next.chapter.as_deref()) {
                    if let Some(subject) = next.subject {
                        next.chapter = Some(subject.first_chapter().to_string());
                    }
                }
            }
            SelectionAction::SetQuestionCount(count) => {
                next.question_count = count.clamp(MIN_QUESTION_COUNT, MAX_QUESTION_COUNT);
            }
            SelectionAction::Reset => {
                next.subject = None;
                next.difficulty = None;
                next.chapter = None;
            }
        }
        next
    }

    /// Apply several actions in order.
    pub fn apply_all(&self, actions: impl IntoIterator<Item = SelectionAction>) -> SelectionState {
        actions
            .into_iter()
            .fold(self.clone(), |state, action| state.apply(action))
    }

    /// Whether the generate action should be enabled.
    pub fn can_generate(&self) -> bool {
        let chapter_ok =
            !self.mode.is_chapter_scoped() || is_concrete_chapter(self.chapter.as_deref());
        let difficulty_ok = self.mode == GenerationMode::Mcq
            || self.difficulty.is_some()
            || self.mode.is_chapter_scoped();
        self.subject.is_some() && difficulty_ok && chapter_ok
    }

    /// Chapters selectable for the current subject and mode.
    ///
    /// Chapter-scoped modes only offer concrete chapters; other modes lead
    /// with the `"All Chapters"` sentinel.
    pub fn chapter_options(&self) -> Vec<&'static str> {
        let Some(subject) = self.subject else {
            return Vec::new();
        };
        let mut options = Vec::with_capacity(subject.chapters().len() + 1);
        if !self.mode.is_chapter_scoped() {
            options.push(ALL_CHAPTERS);
        }
        options.extend_from_slice(subject.chapters());
        options
    }

    /// Check the selection and freeze it into a [`ValidSelection`].
    ///
    /// The chapter requirement is checked first so that a chapter-scoped mode
    /// always reports it by name.
    pub fn validate(&self) -> Result<ValidSelection, SelectionError> {
        if self.mode.is_chapter_scoped() && !is_concrete_chapter(self.chapter.as_deref()) {
            return Err(SelectionError::ChapterRequired { mode: self.mode });
        }
        let subject = self.subject.ok_or(SelectionError::MissingSubject)?;
        if self.mode == GenerationMode::Subjective && self.difficulty.is_none() {
            return Err(SelectionError::MissingDifficulty { mode: self.mode });
        }

        let scope = match self.chapter.as_deref() {
            Some(chapter) if is_concrete_chapter(Some(chapter)) => {
                ChapterScope::Chapter(chapter.to_string())
            }
            _ => ChapterScope::AllChapters,
        };

        Ok(ValidSelection {
            subject,
            scope,
            difficulty: self.difficulty,
            language: self.language,
            mode: self.mode,
            question_count: self.question_count.clamp(MIN_QUESTION_COUNT, MAX_QUESTION_COUNT),
        })
    }
}

// ============================================================================
// Validated Selection
// ============================================================================

/// Chapter restriction of a validated selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChapterScope {
    AllChapters,
    Chapter(String),
}

impl ChapterScope {
    pub fn chapter(&self) -> Option<&str> {
        match self {
            ChapterScope::AllChapters => None,
            ChapterScope::Chapter(name) => Some(name),
        }
    }

    /// Display label; the sentinel for an unrestricted scope.
    pub fn label(&self) -> &str {
        self.chapter().unwrap_or(ALL_CHAPTERS)
    }
}

/// A selection that passed [`SelectionState::validate`].
///
/// Chapter-scoped modes always carry [`ChapterScope::Chapter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidSelection {
    pub subject: Subject,
    pub scope: ChapterScope,
    pub difficulty: Option<Difficulty>,
    pub language: Language,
    pub mode: GenerationMode,
    pub question_count: u8,
}
