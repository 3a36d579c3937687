use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Category of an achievement badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeKind {
    Achievement,
    Streak,
    Milestone,
    Special,
}

impl std::fmt::Display for BadgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BadgeKind::Achievement => write!(f, "Achievement"),
            BadgeKind::Streak => write!(f, "Streak"),
            BadgeKind::Milestone => write!(f, "Milestone"),
            BadgeKind::Special => write!(f, "Special"),
        }
    }
}

/// An achievement badge, either earned or still in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub title: String,
    pub description: String,
    pub kind: BadgeKind,
    pub earned: bool,

    #[serde(default)]
    pub earned_date: Option<NaiveDate>,

    /// Current progress toward the badge (unearned badges only)
    #[serde(default)]
    pub progress: f64,

    /// Progress needed to earn the badge
    #[serde(default = "default_max_progress")]
    pub max_progress: f64,
}

fn default_max_progress() -> f64 {
    100.0
}

impl Badge {
    /// `progress / max_progress × 100`, or 0 when there is no target.
    /// Not clamped: progress past the target reads above 100.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        if self.max_progress > 0.0 {
            self.progress / self.max_progress * 100.0
        } else {
            0.0
        }
    }
}
