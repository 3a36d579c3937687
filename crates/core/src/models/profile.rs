use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Learner profile and headline statistics shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub join_date: NaiveDate,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub lessons_completed: u32,
    pub quizzes_completed: u32,
    /// Average quiz score in percent
    pub average_quiz_score: u32,
}

/// A personal learning target with its progress bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningGoal {
    pub title: String,
    /// Percent complete, 0..=100
    pub progress: u8,
    pub target: String,
    pub deadline: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Lesson,
    Quiz,
    Trade,
    Achievement,
}

/// One entry in the recent-activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityItem {
    pub kind: ActivityKind,
    pub title: String,
    pub at: DateTime<Utc>,
}
