use rust_decimal::Decimal;
use thiserror::Error;

/// Unified error type for the entire finlearn-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Validation ──────────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(Decimal),

    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("Unknown answer option '{0}'")]
    InvalidOption(String),

    #[error("Quiz already completed; reset to start again")]
    QuizCompleted,

    // ── Business Rules ──────────────────────────────────────────────
    #[error("Insufficient funds: trade costs {required}, available balance is {available}")]
    InsufficientFunds {
        required: Decimal,
        available: Decimal,
    },

    #[error("Insufficient shares of {symbol}: requested {requested}, held {held}")]
    InsufficientShares {
        symbol: String,
        requested: u64,
        held: u64,
    },

    // ── API / Network ───────────────────────────────────────────────
    #[error("Remote rejected request ({status}): {message}")]
    Remote { status: u16, message: String },

    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    // ── Data / Config ───────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Broad class of a failure, used to decide how it is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rejected before any network call or mutation (bad input).
    Validation,
    /// Input was well-formed but a ledger rule refused it.
    BusinessRule,
    /// The backend or a data provider failed or refused.
    Remote,
    /// Bad configuration or data files.
    Internal,
}

impl CoreError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CoreError::ValidationError(_)
            | CoreError::InvalidQuantity(_)
            | CoreError::InvalidPrice(_)
            | CoreError::UnknownSymbol(_)
            | CoreError::InvalidOption(_)
            | CoreError::QuizCompleted => ErrorCategory::Validation,
            CoreError::InsufficientFunds { .. } | CoreError::InsufficientShares { .. } => {
                ErrorCategory::BusinessRule
            }
            CoreError::Remote { .. } | CoreError::Api { .. } | CoreError::Network(_) => {
                ErrorCategory::Remote
            }
            CoreError::Serialization(_) | CoreError::Deserialization(_) | CoreError::Config(_) => {
                ErrorCategory::Internal
            }
        }
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<url::ParseError> for CoreError {
    fn from(e: url::ParseError) -> Self {
        CoreError::Config(format!("Invalid URL: {e}"))
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors carry the full URL; drop the query string.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
