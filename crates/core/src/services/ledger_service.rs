use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::errors::CoreError;
use crate::models::holding::Holding;
use crate::models::ledger::Ledger;
use crate::models::quote::{QuoteBoard, StockQuote};
use crate::models::trade::{TradeAction, TradeRecord, TradeRequest};

/// Applies buy/sell trades to a `Ledger`.
///
/// Pure business logic, no I/O. Every check runs before the first write,
/// so a rejected trade leaves the ledger untouched.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Apply one trade and return the record appended to the ledger history.
    ///
    /// Checks, in order:
    /// 1. quantity is positive, price is positive, symbol is on the board;
    /// 2. a buy costs no more than the cash balance;
    /// 3. a sell does not exceed the shares held.
    ///
    /// Holdings are marked at the board's price, not the execution price.
    pub fn apply_trade(
        &self,
        ledger: &mut Ledger,
        request: &TradeRequest,
        quotes: &QuoteBoard,
    ) -> Result<TradeRecord, CoreError> {
        let fill = match self.validate(ledger, request, quotes) {
            Ok(fill) => fill,
            Err(e) => {
                warn!(
                    action = %request.action,
                    symbol = %request.symbol,
                    quantity = request.quantity,
                    error = %e,
                    "trade rejected"
                );
                return Err(e);
            }
        };

        Self::apply_fill(ledger, fill);

        let record = TradeRecord::from_request(request, Utc::now());
        ledger.history.push(record.clone());

        info!(
            action = %request.action,
            symbol = %request.symbol,
            quantity = request.quantity,
            price = %request.price,
            cash = %ledger.cash_balance,
            "trade applied"
        );
        Ok(record)
    }

    /// Run every precondition and compute the post-trade state without
    /// touching the ledger. All arithmetic is checked here.
    fn validate<'q>(
        &self,
        ledger: &Ledger,
        request: &TradeRequest,
        quotes: &'q QuoteBoard,
    ) -> Result<Fill<'q>, CoreError> {
        if request.quantity == 0 {
            return Err(CoreError::InvalidQuantity(
                "Quantity must be greater than 0.".into(),
            ));
        }
        if request.price <= Decimal::ZERO {
            return Err(CoreError::InvalidPrice(request.price));
        }
        let quote = quotes
            .get(&request.symbol)
            .ok_or_else(|| CoreError::UnknownSymbol(request.symbol.clone()))?;

        let (held, held_avg) = ledger
            .holding(&request.symbol)
            .map_or((0, Decimal::ZERO), |h| (h.quantity, h.avg_price));

        match request.action {
            TradeAction::Buy => {
                // A total past Decimal::MAX is more than any balance.
                let required = request.total().ok_or(CoreError::InsufficientFunds {
                    required: Decimal::MAX,
                    available: ledger.cash_balance,
                })?;
                if required > ledger.cash_balance {
                    return Err(CoreError::InsufficientFunds {
                        required,
                        available: ledger.cash_balance,
                    });
                }
                let quantity = held.checked_add(request.quantity).ok_or_else(|| {
                    CoreError::InvalidQuantity(format!(
                        "Position in {} cannot exceed {} shares",
                        quote.symbol,
                        u64::MAX
                    ))
                })?;
                let avg_price = if held == 0 {
                    request.price
                } else {
                    Self::weighted_average(held_avg, held, request.price, request.quantity)
                        .ok_or(CoreError::InvalidPrice(request.price))?
                };
                let cash_balance = ledger
                    .cash_balance
                    .checked_sub(required)
                    .ok_or(CoreError::InvalidPrice(request.price))?;
                Ok(Fill {
                    quote,
                    cash_balance,
                    quantity,
                    avg_price,
                })
            }
            TradeAction::Sell => {
                if held < request.quantity {
                    return Err(CoreError::InsufficientShares {
                        symbol: request.symbol.clone(),
                        requested: request.quantity,
                        held,
                    });
                }
                let cash_balance = request
                    .total()
                    .and_then(|proceeds| ledger.cash_balance.checked_add(proceeds))
                    .ok_or(CoreError::InvalidPrice(request.price))?;
                Ok(Fill {
                    quote,
                    cash_balance,
                    quantity: held - request.quantity,
                    avg_price: held_avg,
                })
            }
        }
    }

    /// Write a validated fill. Cannot fail.
    fn apply_fill(ledger: &mut Ledger, fill: Fill<'_>) {
        ledger.cash_balance = fill.cash_balance;
        let quote = fill.quote;

        match ledger.holdings.iter().position(|h| h.symbol == quote.symbol) {
            Some(idx) if fill.quantity == 0 => {
                ledger.holdings.remove(idx);
                debug!(symbol = %quote.symbol, "closed holding");
            }
            Some(idx) => {
                let holding = &mut ledger.holdings[idx];
                holding.quantity = fill.quantity;
                holding.avg_price = fill.avg_price;
                holding.current_price = quote.price;
                debug!(symbol = %holding.symbol, quantity = holding.quantity, avg = %holding.avg_price, "updated holding");
            }
            None => {
                ledger.holdings.push(Holding {
                    symbol: quote.symbol.clone(),
                    name: quote.name.clone(),
                    quantity: fill.quantity,
                    avg_price: fill.avg_price,
                    current_price: quote.price,
                });
                debug!(symbol = %quote.symbol, "opened holding");
            }
        }
    }

    /// `(avg₁·q₁ + p₂·q₂) / (q₁ + q₂)`, or `None` on overflow.
    /// Zero when both quantities are zero.
    pub fn weighted_average(
        avg: Decimal,
        quantity: u64,
        price: Decimal,
        added: u64,
    ) -> Option<Decimal> {
        let total = quantity.checked_add(added)?;
        if total == 0 {
            return Some(Decimal::ZERO);
        }
        let held = avg.checked_mul(Decimal::from(quantity))?;
        let bought = price.checked_mul(Decimal::from(added))?;
        held.checked_add(bought)?.checked_div(Decimal::from(total))
    }
}

/// Post-trade state of the traded symbol and the cash balance.
struct Fill<'q> {
    quote: &'q StockQuote,
    cash_balance: Decimal,
    /// Resulting holding quantity; 0 closes the position
    quantity: u64,
    avg_price: Decimal,
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}
