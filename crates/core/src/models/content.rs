use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use super::badge::Badge;
use super::lesson::Lesson;
use super::profile::{LearningGoal, UserProfile};
use super::quiz::Question;
use super::quote::QuoteBoard;

const BUNDLED_COURSE: &str = include_str!("../../data/course.json");

/// All static course data the app is configured with: lessons, quiz
/// questions, the quote board, badges and the learner profile.
///
/// Nothing in the services embeds this data; swap in a different
/// `CourseContent` to point the app at another data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseContent {
    pub lessons: Vec<Lesson>,
    pub questions: Vec<Question>,
    pub quotes: QuoteBoard,
    pub badges: Vec<Badge>,
    pub profile: UserProfile,
    #[serde(default)]
    pub goals: Vec<LearningGoal>,
}

impl CourseContent {
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let content: CourseContent = serde_json::from_str(json)?;
        content.validate()?;
        Ok(content)
    }

    /// The default course shipped with the crate.
    pub fn bundled() -> Result<Self, CoreError> {
        Self::from_json(BUNDLED_COURSE)
    }

    /// Structural checks serde can't express.
    pub fn validate(&self) -> Result<(), CoreError> {
        for question in &self.questions {
            if question.correct_option().is_none() {
                return Err(CoreError::ValidationError(format!(
                    "Question {} has no correct option",
                    question.id
                )));
            }
        }
        if let Some(lesson) = self.lessons.iter().find(|l| l.progress > 100) {
            return Err(CoreError::ValidationError(format!(
                "Lesson {} has progress {} (max 100)",
                lesson.id, lesson.progress
            )));
        }
        Ok(())
    }
}
