use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Destructive,
}

/// A transient, dismissible message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(title: impl Into<String>, description: impl Into<String>, severity: Severity) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            severity,
        }
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Success)
    }

    /// Translate an error into the wording the user sees.
    pub fn from_error(err: &CoreError) -> Self {
        let (title, description) = match err {
            CoreError::ValidationError(msg) => ("Invalid Trade", msg.clone()),
            CoreError::InvalidQuantity(_) => {
                ("Invalid Quantity", "Quantity must be greater than 0.".to_string())
            }
            CoreError::InvalidPrice(_) => ("Invalid Trade", "Price must be greater than 0.".to_string()),
            CoreError::UnknownSymbol(symbol) => {
                ("Invalid Trade", format!("{symbol} is not available for trading."))
            }
            CoreError::InsufficientFunds { .. } => (
                "Insufficient Funds",
                "You don't have enough balance for this trade.".to_string(),
            ),
            CoreError::InsufficientShares { .. } => (
                "Insufficient Shares",
                "You don't have enough shares to sell.".to_string(),
            ),
            CoreError::Remote { message, .. } => ("Trade Failed", message.clone()),
            CoreError::Network(_) => (
                "Connection Error",
                "Could not connect to the backend.".to_string(),
            ),
            CoreError::Api { provider, .. } => {
                ("Market Data Unavailable", format!("{provider} did not return a quote."))
            }
            CoreError::InvalidOption(_) | CoreError::QuizCompleted => {
                ("Quiz", err.to_string())
            }
            CoreError::Serialization(_) | CoreError::Deserialization(_) | CoreError::Config(_) => {
                ("Something Went Wrong", err.to_string())
            }
        };
        Self::new(title, description, Severity::Destructive)
    }
}

/// Queue of notifications currently on screen.
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    active: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a notification; returns its id for later dismissal.
    pub fn push(&mut self, notification: Notification) -> Uuid {
        let id = notification.id;
        self.active.push(notification);
        id
    }

    /// Dismiss by id. Returns `false` if it was already gone.
    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.active.len();
        self.active.retain(|n| n.id != id);
        self.active.len() != before
    }

    #[must_use]
    pub fn active(&self) -> &[Notification] {
        &self.active
    }

    #[must_use]
    pub fn latest(&self) -> Option<&Notification> {
        self.active.last()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}
