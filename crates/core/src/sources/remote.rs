use async_trait::async_trait;
use reqwest::{Client, Response};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::errors::CoreError;
use crate::models::holding::HoldingView;
use crate::models::ledger::PortfolioSnapshot;
use crate::models::quote::QuoteBoard;
use crate::models::settings::{PortfolioMode, Settings};
use crate::models::trade::TradeOrder;
use super::traits::PortfolioSource;

/// Shown when the backend rejects a request without a `message`.
pub const GENERIC_FAILURE: &str = "An error occurred.";

/// Thin client for the trading backend.
///
/// Endpoints:
/// - `POST /buy`, `POST /sell` with `{user_id, ticker, quantity}`
/// - `GET /portfolio/{user_id}`
///
/// The backend prices and records trades; this type never computes ledger
/// state itself. No retries, no timeouts beyond the client defaults.
pub struct RemotePortfolio {
    client: Client,
    base_url: Url,
    user_id: u64,
    /// Display names for tickers; the backend only returns symbols
    names: QuoteBoard,
}

// ── Backend wire types ──────────────────────────────────────────────

#[derive(Serialize)]
struct TradeBody<'a> {
    user_id: u64,
    ticker: &'a str,
    quantity: u64,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// `GET /portfolio/{user_id}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteSnapshot {
    pub cash_balance: Decimal,
    #[serde(default)]
    pub stocks: Vec<RemoteStock>,
    #[serde(default)]
    pub total_portfolio_value: Option<Decimal>,
    #[serde(default)]
    pub total_stocks_value: Option<Decimal>,
    #[serde(default)]
    pub total_portfolio_pnl: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteStock {
    pub ticker: String,
    pub quantity: u64,
    pub current_price: Decimal,
    pub market_value: Decimal,
    pub avg_price: Decimal,
    pub pnl: Decimal,
    pub pnl_percent: Decimal,
}

impl RemoteSnapshot {
    /// Project the backend's view onto a `PortfolioSnapshot`.
    ///
    /// Per-holding figures are taken as reported. The backend's totals are
    /// only cross-checked: the snapshot always derives its own.
    pub fn into_snapshot(self, names: &QuoteBoard) -> PortfolioSnapshot {
        let holdings = self
            .stocks
            .into_iter()
            .map(|s| {
                let symbol = s.ticker.to_uppercase();
                let name = names
                    .get(&symbol)
                    .map(|q| q.name.clone())
                    .unwrap_or_else(|| symbol.clone());
                HoldingView {
                    symbol,
                    name,
                    quantity: s.quantity,
                    avg_price: s.avg_price,
                    current_price: s.current_price,
                    market_value: s.market_value,
                    pnl: s.pnl,
                    pnl_percent: s.pnl_percent,
                }
            })
            .collect();

        let snapshot = PortfolioSnapshot {
            cash_balance: self.cash_balance,
            holdings,
        };

        let checks = [
            ("total_stocks_value", self.total_stocks_value, snapshot.total_holdings_value()),
            ("total_portfolio_pnl", self.total_portfolio_pnl, snapshot.total_pnl()),
            ("total_portfolio_value", self.total_portfolio_value, snapshot.total_portfolio_value()),
        ];
        for (field, reported, derived) in checks {
            if let Some(reported) = reported {
                if reported.round_dp(2) != derived.round_dp(2) {
                    warn!(field, %reported, %derived, "backend total disagrees with holdings");
                }
            }
        }

        snapshot
    }
}

impl RemotePortfolio {
    pub fn new(base_url: &str, user_id: u64) -> Result<Self, CoreError> {
        let mut base_url = Url::parse(base_url)?;
        // Url::join replaces the last path segment unless the base ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            client: Client::new(),
            base_url,
            user_id,
            names: QuoteBoard::default(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, CoreError> {
        Self::new(&settings.backend_url, settings.user_id)
    }

    /// Use `quotes` to label holdings with display names.
    pub fn with_names(mut self, quotes: QuoteBoard) -> Self {
        self.names = quotes;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, CoreError> {
        Ok(self.base_url.join(path)?)
    }

    /// Turn a non-2xx response into `CoreError::Remote`.
    async fn reject(resp: Response) -> CoreError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE.to_string());
        warn!(status, %message, "backend rejected request");
        CoreError::Remote { status, message }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PortfolioSource for RemotePortfolio {
    fn name(&self) -> &str {
        "Trading backend"
    }

    fn mode(&self) -> PortfolioMode {
        PortfolioMode::Remote
    }

    async fn snapshot(&self) -> Result<PortfolioSnapshot, CoreError> {
        let url = self.endpoint(&format!("portfolio/{}", self.user_id))?;
        debug!(%url, "fetching portfolio");

        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(Self::reject(resp).await);
        }
        let remote: RemoteSnapshot = resp
            .json()
            .await
            .map_err(|e| CoreError::Deserialization(format!("Invalid portfolio response: {e}")))?;

        Ok(remote.into_snapshot(&self.names))
    }

    async fn execute(&mut self, order: &TradeOrder) -> Result<(), CoreError> {
        if order.quantity == 0 {
            return Err(CoreError::InvalidQuantity(
                "Quantity must be greater than 0.".into(),
            ));
        }
        let url = self.endpoint(order.action.endpoint())?;
        let body = TradeBody {
            user_id: self.user_id,
            ticker: &order.symbol,
            quantity: order.quantity,
        };
        info!(%url, ticker = %order.symbol, quantity = order.quantity, "sending {} request", order.action.endpoint());

        let resp = self.client.post(url).json(&body).send().await?;
        if !resp.status().is_success() {
            return Err(Self::reject(resp).await);
        }
        Ok(())
    }

    fn update_quotes(&mut self, quotes: &QuoteBoard) {
        self.names = quotes.clone();
    }
}
