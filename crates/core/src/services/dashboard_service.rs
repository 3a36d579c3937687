use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::badge::Badge;
use crate::models::profile::{ActivityItem, ActivityKind, LearningGoal, UserProfile};
use crate::models::trade::{TradeAction, TradeRecord};

/// Maximum entries in the recent-activity feed.
pub const RECENT_ACTIVITY_LIMIT: usize = 10;

/// Everything the progress dashboard renders.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub profile: UserProfile,
    pub earned_badges: Vec<Badge>,
    pub in_progress_badges: Vec<Badge>,
    pub goals: Vec<LearningGoal>,
    pub recent_activity: Vec<ActivityItem>,
}

/// Builds the dashboard view from profile data and trade history.
pub struct DashboardService;

impl DashboardService {
    pub fn new() -> Self {
        Self
    }

    /// Assemble the dashboard. `extra_activity` (lessons, quizzes, badges)
    /// is merged with the trade history, newest first.
    pub fn build(
        &self,
        profile: &UserProfile,
        badges: &[Badge],
        goals: &[LearningGoal],
        history: &[TradeRecord],
        extra_activity: &[ActivityItem],
    ) -> DashboardView {
        let (earned, in_progress) = Self::partition_badges(badges);

        let mut recent_activity: Vec<ActivityItem> = history
            .iter()
            .map(Self::trade_activity)
            .chain(extra_activity.iter().cloned())
            .collect();
        recent_activity.sort_by(|a, b| b.at.cmp(&a.at));
        recent_activity.truncate(RECENT_ACTIVITY_LIMIT);

        DashboardView {
            profile: profile.clone(),
            earned_badges: earned,
            in_progress_badges: in_progress,
            goals: goals.to_vec(),
            recent_activity,
        }
    }

    /// Split badges into (earned, not yet earned), keeping source order.
    pub fn partition_badges(badges: &[Badge]) -> (Vec<Badge>, Vec<Badge>) {
        badges.iter().cloned().partition(|b| b.earned)
    }

    /// "Bought 10 shares of AAPL"
    pub fn trade_activity(record: &TradeRecord) -> ActivityItem {
        let verb = match record.action {
            TradeAction::Buy => "Bought",
            TradeAction::Sell => "Sold",
        };
        let noun = if record.quantity == 1 { "share" } else { "shares" };
        ActivityItem {
            kind: ActivityKind::Trade,
            title: format!("{verb} {} {noun} of {}", record.quantity, record.symbol),
            at: record.executed_at,
        }
    }
}

impl Default for DashboardService {
    fn default() -> Self {
        Self::new()
    }
}

/// Coarse "time ago" label ("just now", "2 hours ago", "1 day ago").
pub fn relative_time(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - at;
    let (n, unit) = if elapsed.num_minutes() < 1 {
        return "just now".to_string();
    } else if elapsed.num_hours() < 1 {
        (elapsed.num_minutes(), "minute")
    } else if elapsed.num_days() < 1 {
        (elapsed.num_hours(), "hour")
    } else if elapsed.num_weeks() < 1 {
        (elapsed.num_days(), "day")
    } else {
        (elapsed.num_weeks(), "week")
    };
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}
