use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::CoreError;
use super::ledger::DEFAULT_STARTING_BALANCE;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

const ENV_BACKEND_URL: &str = "FINLEARN_BACKEND_URL";
const ENV_USER_ID: &str = "FINLEARN_USER_ID";
const ENV_PORTFOLIO_MODE: &str = "FINLEARN_PORTFOLIO_MODE";

/// Where portfolio state lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortfolioMode {
    /// The trading backend owns the ledger.
    #[default]
    Remote,
    /// In-memory ledger, no network (offline/demo).
    Local,
}

impl std::fmt::Display for PortfolioMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortfolioMode::Remote => write!(f, "remote"),
            PortfolioMode::Local => write!(f, "local"),
        }
    }
}

impl FromStr for PortfolioMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "remote" => Ok(PortfolioMode::Remote),
            "local" | "demo" | "offline" => Ok(PortfolioMode::Local),
            other => Err(CoreError::Config(format!("Unknown portfolio mode '{other}'"))),
        }
    }
}

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub portfolio_mode: PortfolioMode,

    /// Base URL of the trading backend (no trailing slash needed)
    pub backend_url: String,

    /// Account id sent to the backend
    pub user_id: u64,

    /// Opening cash for the local ledger
    pub starting_balance: Decimal,

    /// How many quotes the market watch panel shows
    pub market_watch_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            portfolio_mode: PortfolioMode::default(),
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            user_id: 1,
            starting_balance: DEFAULT_STARTING_BALANCE,
            market_watch_size: 5,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)
            .map_err(|e| CoreError::Config(format!("Invalid settings JSON: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &str) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Apply `FINLEARN_*` environment variables on top of these settings.
    pub fn with_env_overrides(self) -> Result<Self, CoreError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup (the environment, in
    /// production). Unset keys leave the current value alone.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BACKEND_URL) {
            self.backend_url = url;
        }
        if let Some(raw) = lookup(ENV_USER_ID) {
            self.user_id = raw
                .trim()
                .parse()
                .map_err(|_| CoreError::Config(format!("{ENV_USER_ID} must be a number, got '{raw}'")))?;
        }
        if let Some(mode) = lookup(ENV_PORTFOLIO_MODE) {
            self.portfolio_mode = mode.parse()?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.starting_balance < Decimal::ZERO {
            return Err(CoreError::Config(format!(
                "Starting balance must not be negative (got {})",
                self.starting_balance
            )));
        }
        if self.user_id == 0 {
            return Err(CoreError::Config("User id must be positive".into()));
        }
        let url = url::Url::parse(&self.backend_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CoreError::Config(format!(
                "Backend URL must be http(s), got '{}'",
                self.backend_url
            )));
        }
        Ok(())
    }
}
