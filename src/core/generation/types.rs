//! Generation Parameter Types
//!
//! Mode, difficulty and language enums shared by the selection reducer,
//! prompt builder and schema registry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Generation Mode
// ============================================================================

/// Content shape requested from the generative service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GenerationMode {
    #[default]
    Mcq,
    Subjective,
    StudyGuide,
    ConceptMap,
}

impl GenerationMode {
    pub const ALL: [GenerationMode; 4] = [
        GenerationMode::Mcq,
        GenerationMode::Subjective,
        GenerationMode::StudyGuide,
        GenerationMode::ConceptMap,
    ];

    /// Modes that need a single concrete chapter.
    pub fn is_chapter_scoped(self) -> bool {
        matches!(self, GenerationMode::StudyGuide | GenerationMode::ConceptMap)
    }

    /// Sampling temperature sent with the request.
    ///
    /// Question modes run hotter for variety; structural modes run cooler.
    pub fn temperature(self) -> f32 {
        match self {
            GenerationMode::Mcq => 0.8,
            GenerationMode::Subjective => 0.7,
            GenerationMode::StudyGuide => 0.6,
            GenerationMode::ConceptMap => 0.5,
        }
    }

    /// Noun used in the uniform failure message.
    pub fn content_noun(self) -> &'static str {
        match self {
            GenerationMode::Mcq | GenerationMode::Subjective => "questions",
            GenerationMode::StudyGuide => "study guide",
            GenerationMode::ConceptMap => "concept map",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GenerationMode::Mcq => "MCQ",
            GenerationMode::Subjective => "Subjective",
            GenerationMode::StudyGuide => "Study Guide",
            GenerationMode::ConceptMap => "Concept Map",
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "mcq" => Ok(GenerationMode::Mcq),
            "subjective" => Ok(GenerationMode::Subjective),
            "studyguide" => Ok(GenerationMode::StudyGuide),
            "conceptmap" => Ok(GenerationMode::ConceptMap),
            _ => Err(format!("unknown mode '{}'", s.trim())),
        }
    }
}

// ============================================================================
// Difficulty
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    /// Mixed set: roughly 50% Easy, 25% Medium, 25% Hard.
    Hybrid,
}

impl Difficulty {
    pub fn is_hybrid(self) -> bool {
        self == Difficulty::Hybrid
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Hybrid => "Hybrid",
        }
    }

    /// Label used on the prompt's "Difficulty:" line.
    pub fn prompt_label(self) -> &'static str {
        match self {
            Difficulty::Hybrid => "Hybrid (50% Easy, 25% Medium, 25% Hard)",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "hybrid" => Ok(Difficulty::Hybrid),
            other => Err(format!("unknown difficulty '{other}'")),
        }
    }
}

// ============================================================================
// Language
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Odia,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Odia => "Odia",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "odia" | "or" => Ok(Language::Odia),
            other => Err(format!("unknown language '{other}'")),
        }
    }
}
