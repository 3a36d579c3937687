// ═══════════════════════════════════════════════════════════════════
// Shared test helpers — in-process stand-in for the trading backend
// ═══════════════════════════════════════════════════════════════════

#![allow(dead_code)]

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub struct Position {
    pub quantity: u64,
    pub avg_price: Decimal,
}

/// Minimal backend: one user, fixed prices, numbers on the wire as JSON
/// floats like a typical Python/JS server.
#[derive(Debug)]
pub struct BackendState {
    pub user_id: u64,
    pub cash: Decimal,
    pub prices: HashMap<String, Decimal>,
    pub positions: Vec<(String, Position)>,
    /// Every request path the backend has seen, in order
    pub requests: Vec<String>,
    /// Report this instead of the real total_portfolio_value
    pub skew_total: Option<Decimal>,
}

impl BackendState {
    pub fn new() -> Self {
        let mut prices = HashMap::new();
        prices.insert("AAPL".to_string(), dec!(175.43));
        prices.insert("MSFT".to_string(), dec!(378.85));
        prices.insert("TSLA".to_string(), dec!(248.42));
        Self {
            user_id: 1,
            cash: dec!(10000),
            prices,
            positions: Vec::new(),
            requests: Vec::new(),
            skew_total: None,
        }
    }
}

pub type Shared = Arc<Mutex<BackendState>>;

#[derive(Deserialize)]
struct TradeBody {
    user_id: u64,
    ticker: String,
    quantity: u64,
}

fn num(d: Decimal) -> Value {
    json!(d.to_f64().unwrap_or_default())
}

async fn buy(State(state): State<Shared>, Json(body): Json<TradeBody>) -> (StatusCode, Json<Value>) {
    let mut s = state.lock().unwrap();
    s.requests.push("/buy".into());
    if body.user_id != s.user_id {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "User not found" })));
    }
    let Some(price) = s.prices.get(&body.ticker).copied() else {
        // No message field: client should fall back to its generic text.
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "bad ticker" })));
    };
    let cost = price * Decimal::from(body.quantity);
    if cost > s.cash {
        return (StatusCode::BAD_REQUEST, Json(json!({ "message": "Insufficient funds" })));
    }
    s.cash -= cost;
    match s.positions.iter_mut().find(|(t, _)| *t == body.ticker) {
        Some((_, p)) => {
            let total = p.quantity + body.quantity;
            p.avg_price = (p.avg_price * Decimal::from(p.quantity) + cost) / Decimal::from(total);
            p.quantity = total;
        }
        None => s.positions.push((
            body.ticker.clone(),
            Position {
                quantity: body.quantity,
                avg_price: price,
            },
        )),
    }
    (StatusCode::OK, Json(json!({ "message": "ok" })))
}

async fn sell(State(state): State<Shared>, Json(body): Json<TradeBody>) -> (StatusCode, Json<Value>) {
    let mut s = state.lock().unwrap();
    s.requests.push("/sell".into());
    let Some(price) = s.prices.get(&body.ticker).copied() else {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "bad ticker" })));
    };
    let Some(idx) = s.positions.iter().position(|(t, _)| *t == body.ticker) else {
        return (StatusCode::BAD_REQUEST, Json(json!({ "message": "You do not own this stock" })));
    };
    if s.positions[idx].1.quantity < body.quantity {
        return (StatusCode::BAD_REQUEST, Json(json!({ "message": "Not enough shares" })));
    }
    s.cash += price * Decimal::from(body.quantity);
    s.positions[idx].1.quantity -= body.quantity;
    if s.positions[idx].1.quantity == 0 {
        s.positions.remove(idx);
    }
    (StatusCode::OK, Json(json!({ "message": "ok" })))
}

async fn portfolio(State(state): State<Shared>, Path(user_id): Path<u64>) -> (StatusCode, Json<Value>) {
    let mut s = state.lock().unwrap();
    s.requests.push(format!("/portfolio/{user_id}"));
    if user_id != s.user_id {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "User not found" })));
    }
    let mut stocks = Vec::new();
    let mut total_value = Decimal::ZERO;
    let mut total_pnl = Decimal::ZERO;
    for (ticker, p) in &s.positions {
        let current = s.prices[ticker];
        let value = current * Decimal::from(p.quantity);
        let pnl = value - p.avg_price * Decimal::from(p.quantity);
        total_value += value;
        total_pnl += pnl;
        stocks.push(json!({
            "ticker": ticker,
            "quantity": p.quantity,
            "current_price": num(current),
            "market_value": num(value),
            "avg_price": num(p.avg_price.round_dp(2)),
            "pnl": num(pnl.round_dp(2)),
            "pnl_percent": num(((current - p.avg_price) / p.avg_price * dec!(100)).round_dp(2)),
        }));
    }
    let total = s.skew_total.unwrap_or(s.cash + total_value);
    (
        StatusCode::OK,
        Json(json!({
            "cash_balance": num(s.cash),
            "stocks": stocks,
            "total_portfolio_value": num(total),
            "total_stocks_value": num(total_value),
            "total_portfolio_pnl": num(total_pnl.round_dp(2)),
        })),
    )
}

/// Start the fake backend on an ephemeral port.
/// Returns its base URL and a handle on its state.
pub async fn spawn_backend() -> (String, Shared) {
    let state: Shared = Arc::new(Mutex::new(BackendState::new()));
    let app = Router::new()
        .route("/buy", post(buy))
        .route("/sell", post(sell))
        .route("/portfolio/:user_id", get(portfolio))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), state)
}

/// A base URL nothing listens on.
pub async fn dead_backend_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
