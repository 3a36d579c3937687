use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::CoreError;

/// Difficulty level of a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "Beginner"),
            Difficulty::Intermediate => write!(f, "Intermediate"),
            Difficulty::Advanced => write!(f, "Advanced"),
        }
    }
}

/// Catalog filter: every lesson, or only one difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DifficultyFilter {
    #[default]
    All,
    Only(Difficulty),
}

impl DifficultyFilter {
    /// Filter buttons in display order.
    pub const OPTIONS: [DifficultyFilter; 4] = [
        DifficultyFilter::All,
        DifficultyFilter::Only(Difficulty::Beginner),
        DifficultyFilter::Only(Difficulty::Intermediate),
        DifficultyFilter::Only(Difficulty::Advanced),
    ];

    #[must_use]
    pub fn matches(&self, difficulty: Difficulty) -> bool {
        match self {
            DifficultyFilter::All => true,
            DifficultyFilter::Only(d) => *d == difficulty,
        }
    }
}

impl std::fmt::Display for DifficultyFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DifficultyFilter::All => write!(f, "All"),
            DifficultyFilter::Only(d) => write!(f, "{d}"),
        }
    }
}

impl FromStr for DifficultyFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(DifficultyFilter::All),
            "beginner" => Ok(DifficultyFilter::Only(Difficulty::Beginner)),
            "intermediate" => Ok(DifficultyFilter::Only(Difficulty::Intermediate)),
            "advanced" => Ok(DifficultyFilter::Only(Difficulty::Advanced)),
            other => Err(CoreError::ValidationError(format!(
                "Unknown difficulty filter '{other}'"
            ))),
        }
    }
}

/// One lesson in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub duration_minutes: u32,
    pub difficulty: Difficulty,

    /// Completion percentage, 0..=100
    pub progress: u8,

    pub language: String,
    pub completed: bool,
}

impl Lesson {
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.progress > 0 && !self.completed
    }

    #[must_use]
    pub fn is_not_started(&self) -> bool {
        self.progress == 0
    }
}

/// Progress counts across the whole catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LessonStats {
    pub completed: usize,
    pub in_progress: usize,
    pub not_started: usize,
    pub total: usize,
}
