//! Chapter Catalog
//!
//! Static CBSE Class X science chapter lists. Order matters: the first
//! chapter of a subject is the default for chapter-scoped modes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentinel chapter value meaning "no chapter restriction".
pub const ALL_CHAPTERS: &str = "All Chapters";

const PHYSICS_CHAPTERS: &[&str] = &[
    "Light – Reflection and Refraction",
    "The Human Eye and the Colourful World",
    "Electricity",
    "Magnetic Effects of Electric Current",
];

const CHEMISTRY_CHAPTERS: &[&str] = &[
    "Chemical Reactions and Equations",
    "Acids, Bases and Salts",
    "Metals and Non-metals",
    "Carbon and its Compounds",
];

const BIOLOGY_CHAPTERS: &[&str] = &[
    "Life Processes",
    "Control and Co-ordination",
    "How do Organisms Reproduce?",
    "Heredity",
    "Our Environment",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    Physics,
    Chemistry,
    Biology,
}

impl Subject {
    pub const ALL: [Subject; 3] = [Subject::Physics, Subject::Chemistry, Subject::Biology];

    /// Ordered, non-empty chapter list for this subject.
    pub fn chapters(self) -> &'static [&'static str] {
        match self {
            Subject::Physics => PHYSICS_CHAPTERS,
            Subject::Chemistry => CHEMISTRY_CHAPTERS,
            Subject::Biology => BIOLOGY_CHAPTERS,
        }
    }

    pub fn first_chapter(self) -> &'static str {
        self.chapters()[0]
    }

    pub fn has_chapter(self, chapter: &str) -> bool {
        self.chapters().contains(&chapter)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Subject::Physics => "Physics",
            Subject::Chemistry => "Chemistry",
            Subject::Biology => "Biology",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subject {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "physics" => Ok(Subject::Physics),
            "chemistry" => Ok(Subject::Chemistry),
            "biology" => Ok(Subject::Biology),
            other => Err(format!("unknown subject '{other}'")),
        }
    }
}

/// True when `chapter` names a concrete chapter rather than the sentinel.
pub fn is_concrete_chapter(chapter: Option<&str>) -> bool {
    matches!(chapter, Some(c) if c != ALL_CHAPTERS)
}
