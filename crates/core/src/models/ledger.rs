use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::holding::{Holding, HoldingView};
use super::quote::QuoteBoard;
use super::trade::TradeRecord;

/// Starting cash for a fresh paper-trading account.
pub const DEFAULT_STARTING_BALANCE: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Client-side record of cash and holdings.
///
/// Invariants maintained by `LedgerService`:
/// - at most one holding per symbol, in first-purchase order;
/// - no holding has zero quantity;
/// - cash never goes negative through a buy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    pub cash_balance: Decimal,
    pub holdings: Vec<Holding>,

    /// Executed trades, oldest first
    #[serde(default)]
    pub history: Vec<TradeRecord>,
}

impl Ledger {
    pub fn new(starting_balance: Decimal) -> Self {
        Self {
            cash_balance: starting_balance,
            holdings: Vec::new(),
            history: Vec::new(),
        }
    }

    #[must_use]
    pub fn holding(&self, symbol: &str) -> Option<&Holding> {
        let upper = symbol.to_uppercase();
        self.holdings.iter().find(|h| h.symbol == upper)
    }

    /// Shares held of `symbol` (0 when not held).
    #[must_use]
    pub fn shares_of(&self, symbol: &str) -> u64 {
        self.holding(symbol).map_or(0, |h| h.quantity)
    }

    /// Refresh every holding's current price from `quotes`.
    /// Holdings whose symbol is missing from the board keep their last price.
    pub fn mark_to_market(&mut self, quotes: &QuoteBoard) {
        for holding in &mut self.holdings {
            if let Some(price) = quotes.price_of(&holding.symbol) {
                holding.current_price = price;
            }
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> PortfolioSnapshot {
        PortfolioSnapshot {
            cash_balance: self.cash_balance,
            holdings: self.holdings.iter().map(Holding::to_view).collect(),
        }
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(DEFAULT_STARTING_BALANCE)
    }
}

/// Read-only view of a portfolio, from either the local ledger or the backend.
///
/// Totals are computed on every call and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub cash_balance: Decimal,
    pub holdings: Vec<HoldingView>,
}

impl PortfolioSnapshot {
    /// Sum of all holdings' market value.
    #[must_use]
    pub fn total_holdings_value(&self) -> Decimal {
        self.holdings.iter().map(|h| h.market_value).sum()
    }

    /// Sum of all holdings' unrealized P&L.
    #[must_use]
    pub fn total_pnl(&self) -> Decimal {
        self.holdings.iter().map(|h| h.pnl).sum()
    }

    /// Cash plus holdings value.
    #[must_use]
    pub fn total_portfolio_value(&self) -> Decimal {
        self.cash_balance + self.total_holdings_value()
    }

    /// Total P&L relative to the cost basis of the holdings
    /// (`total_pnl / (holdings_value − total_pnl) × 100`).
    #[must_use]
    pub fn total_pnl_percent(&self) -> Decimal {
        let cost = self.total_holdings_value() - self.total_pnl();
        if self.holdings.is_empty() || cost.is_zero() {
            return Decimal::ZERO;
        }
        self.total_pnl() / cost * Decimal::ONE_HUNDRED
    }

    #[must_use]
    pub fn holding(&self, symbol: &str) -> Option<&HoldingView> {
        let upper = symbol.to_uppercase();
        self.holdings.iter().find(|h| h.symbol == upper)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }
}
