use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A position in one stock, as kept by the local ledger.
///
/// Only the inputs are stored; market value and P&L are derived on read.
/// A holding never has zero quantity; it is removed from the ledger instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Ticker symbol, uppercased
    pub symbol: String,

    /// Display name copied from the quote at purchase time
    pub name: String,

    /// Number of shares held (always > 0)
    pub quantity: u64,

    /// Weighted-average purchase price of the shares currently held
    pub avg_price: Decimal,

    /// Latest market price, mirrored from the quote board
    pub current_price: Decimal,
}

impl Holding {
    /// `quantity × current_price`
    #[must_use]
    pub fn market_value(&self) -> Decimal {
        Decimal::from(self.quantity) * self.current_price
    }

    /// `quantity × avg_price`
    #[must_use]
    pub fn cost_basis(&self) -> Decimal {
        Decimal::from(self.quantity) * self.avg_price
    }

    /// Unrealized profit/loss against the shares still held.
    #[must_use]
    pub fn pnl(&self) -> Decimal {
        self.market_value() - self.cost_basis()
    }

    /// `(current − avg) / avg × 100`; zero when the average price is zero.
    #[must_use]
    pub fn pnl_percent(&self) -> Decimal {
        if self.avg_price.is_zero() {
            return Decimal::ZERO;
        }
        (self.current_price - self.avg_price) / self.avg_price * Decimal::ONE_HUNDRED
    }

    /// Freeze the derived fields into a display row.
    #[must_use]
    pub fn to_view(&self) -> HoldingView {
        HoldingView {
            symbol: self.symbol.clone(),
            name: self.name.clone(),
            quantity: self.quantity,
            avg_price: self.avg_price,
            current_price: self.current_price,
            market_value: self.market_value(),
            pnl: self.pnl(),
            pnl_percent: self.pnl_percent(),
        }
    }
}

/// One row of a portfolio snapshot.
///
/// For the local ledger the derived fields are computed from a `Holding`;
/// for the remote backend they are whatever the server reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingView {
    pub symbol: String,
    pub name: String,
    pub quantity: u64,
    pub avg_price: Decimal,
    pub current_price: Decimal,
    pub market_value: Decimal,
    pub pnl: Decimal,
    pub pnl_percent: Decimal,
}

impl HoldingView {
    #[must_use]
    pub fn is_profitable(&self) -> bool {
        self.pnl >= Decimal::ZERO
    }
}
