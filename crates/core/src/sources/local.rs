use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::CoreError;
use crate::models::ledger::{Ledger, PortfolioSnapshot};
use crate::models::quote::QuoteBoard;
use crate::models::settings::PortfolioMode;
use crate::models::trade::{TradeOrder, TradeRecord};
use crate::services::ledger_service::LedgerService;
use super::traits::PortfolioSource;

/// In-memory paper-trading account. Orders fill at the quote board's price.
pub struct LocalPortfolio {
    ledger: Ledger,
    quotes: QuoteBoard,
    service: LedgerService,
}

impl LocalPortfolio {
    pub fn new(starting_balance: Decimal, quotes: QuoteBoard) -> Self {
        Self::from_ledger(Ledger::new(starting_balance), quotes)
    }

    pub fn from_ledger(mut ledger: Ledger, quotes: QuoteBoard) -> Self {
        ledger.mark_to_market(&quotes);
        Self {
            ledger,
            quotes,
            service: LedgerService::new(),
        }
    }

    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    #[must_use]
    pub fn quotes(&self) -> &QuoteBoard {
        &self.quotes
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PortfolioSource for LocalPortfolio {
    fn name(&self) -> &str {
        "Local ledger"
    }

    fn mode(&self) -> PortfolioMode {
        PortfolioMode::Local
    }

    async fn snapshot(&self) -> Result<PortfolioSnapshot, CoreError> {
        Ok(self.ledger.snapshot())
    }

    async fn execute(&mut self, order: &TradeOrder) -> Result<(), CoreError> {
        if order.quantity == 0 {
            return Err(CoreError::InvalidQuantity(
                "Quantity must be greater than 0.".into(),
            ));
        }
        let price = self
            .quotes
            .price_of(&order.symbol)
            .ok_or_else(|| CoreError::UnknownSymbol(order.symbol.clone()))?;
        self.service
            .apply_trade(&mut self.ledger, &order.priced(price), &self.quotes)?;
        Ok(())
    }

    fn update_quotes(&mut self, quotes: &QuoteBoard) {
        self.quotes = quotes.clone();
        self.ledger.mark_to_market(quotes);
    }

    fn history(&self) -> &[TradeRecord] {
        &self.ledger.history
    }
}
