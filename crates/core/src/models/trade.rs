use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;
use super::ledger::PortfolioSnapshot;
use super::quote::QuoteBoard;

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    Buy,
    Sell,
}

impl TradeAction {
    /// Past-tense verb used in confirmations ("bought", "sold").
    pub fn past_tense(&self) -> &'static str {
        match self {
            TradeAction::Buy => "bought",
            TradeAction::Sell => "sold",
        }
    }

    /// Backend endpoint path segment.
    pub fn endpoint(&self) -> &'static str {
        match self {
            TradeAction::Buy => "buy",
            TradeAction::Sell => "sell",
        }
    }
}

impl std::fmt::Display for TradeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeAction::Buy => write!(f, "Buy"),
            TradeAction::Sell => write!(f, "Sell"),
        }
    }
}

/// A priced trade, ready to apply to a ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRequest {
    pub action: TradeAction,
    pub symbol: String,
    pub quantity: u64,
    /// Execution price per share
    pub price: Decimal,
}

impl TradeRequest {
    pub fn new(action: TradeAction, symbol: impl Into<String>, quantity: u64, price: Decimal) -> Self {
        Self {
            action,
            symbol: symbol.into().to_uppercase(),
            quantity,
            price,
        }
    }

    pub fn buy(symbol: impl Into<String>, quantity: u64, price: Decimal) -> Self {
        Self::new(TradeAction::Buy, symbol, quantity, price)
    }

    pub fn sell(symbol: impl Into<String>, quantity: u64, price: Decimal) -> Self {
        Self::new(TradeAction::Sell, symbol, quantity, price)
    }

    /// `price × quantity`, or `None` if it does not fit in a `Decimal`.
    #[must_use]
    pub fn total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

/// An unpriced order as the user submits it. The executing portfolio
/// source decides the price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeOrder {
    pub action: TradeAction,
    pub symbol: String,
    pub quantity: u64,
}

impl TradeOrder {
    pub fn new(action: TradeAction, symbol: impl Into<String>, quantity: u64) -> Self {
        Self {
            action,
            symbol: symbol.into().to_uppercase(),
            quantity,
        }
    }

    /// Attach an execution price.
    pub fn priced(&self, price: Decimal) -> TradeRequest {
        TradeRequest::new(self.action, self.symbol.clone(), self.quantity, price)
    }
}

/// An executed order and the portfolio fetched afterwards.
///
/// The order has already been applied when this exists; `snapshot` is
/// an error only if the follow-up fetch failed.
#[derive(Debug)]
pub struct TradeOutcome {
    pub order: TradeOrder,
    pub snapshot: Result<PortfolioSnapshot, CoreError>,
}

/// Raw simulator form input: an action, an optional stock selection and
/// the quantity exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeForm {
    pub action: TradeAction,
    pub symbol: Option<String>,
    pub quantity: String,
}

impl TradeForm {
    pub fn new(action: TradeAction, symbol: Option<&str>, quantity: impl Into<String>) -> Self {
        Self {
            action,
            symbol: symbol.map(str::to_string),
            quantity: quantity.into(),
        }
    }

    /// Check the form before anything leaves the client.
    ///
    /// Runs `parse` and then, for a buy, rejects an estimated cost above
    /// `balance`.
    pub fn validate(&self, quotes: &QuoteBoard, balance: Decimal) -> Result<TradeOrder, CoreError> {
        let order = self.parse(quotes)?;
        Self::check_affordable(&order, quotes, balance)?;
        Ok(order)
    }

    /// Structural checks only: a known stock is selected and the quantity
    /// is a positive whole number.
    pub fn parse(&self, quotes: &QuoteBoard) -> Result<TradeOrder, CoreError> {
        let symbol = self
            .symbol
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty() && quotes.get(s).is_some());
        let raw_qty = self.quantity.trim();

        let symbol = match symbol {
            Some(s) if !raw_qty.is_empty() => s,
            _ => {
                return Err(CoreError::ValidationError(
                    "Please select a stock and enter quantity.".into(),
                ))
            }
        };

        let qty: i64 = raw_qty
            .parse()
            .map_err(|_| CoreError::InvalidQuantity(format!("'{raw_qty}' is not a whole number")))?;
        if qty <= 0 {
            return Err(CoreError::InvalidQuantity(
                "Quantity must be greater than 0.".into(),
            ));
        }

        Ok(TradeOrder::new(self.action, symbol, qty as u64))
    }

    /// For buys, the order's cost at the board price must fit in `balance`.
    /// Sells always pass; the portfolio source checks share counts.
    pub fn check_affordable(
        order: &TradeOrder,
        quotes: &QuoteBoard,
        balance: Decimal,
    ) -> Result<(), CoreError> {
        if order.action != TradeAction::Buy {
            return Ok(());
        }
        let price = quotes
            .price_of(&order.symbol)
            .ok_or_else(|| CoreError::UnknownSymbol(order.symbol.clone()))?;
        let required = price
            .checked_mul(Decimal::from(order.quantity))
            .unwrap_or(Decimal::MAX);
        if required > balance {
            return Err(CoreError::InsufficientFunds {
                required,
                available: balance,
            });
        }
        Ok(())
    }
}

/// A trade that was executed against the local ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub id: Uuid,
    pub executed_at: DateTime<Utc>,
    pub action: TradeAction,
    pub symbol: String,
    pub quantity: u64,
    pub price: Decimal,
}

impl TradeRecord {
    pub fn from_request(request: &TradeRequest, executed_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            executed_at,
            action: request.action,
            symbol: request.symbol.clone(),
            quantity: request.quantity,
            price: request.price,
        }
    }

    #[must_use]
    pub fn total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}
