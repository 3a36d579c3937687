use tracing::{debug, warn};

use crate::models::quote::{QuoteBoard, StockQuote};
use crate::providers::traits::QuoteProvider;

/// Summary of a board refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshReport {
    pub updated: Vec<String>,
    /// Symbols whose fetch failed; their previous quote was kept
    pub stale: Vec<String>,
}

/// Produces new quote boards from a provider.
pub struct QuoteService;

impl QuoteService {
    pub fn new() -> Self {
        Self
    }

    /// Fetch every symbol on `board` from `provider` and return a new board
    /// in the same order. A failed symbol keeps its old quote.
    pub async fn refresh(
        &self,
        board: &QuoteBoard,
        provider: &dyn QuoteProvider,
    ) -> (QuoteBoard, RefreshReport) {
        let mut report = RefreshReport::default();
        let mut quotes = Vec::with_capacity(board.len());

        for quote in board.quotes() {
            match provider.fetch_quote(&quote.symbol).await {
                Ok(tick) => {
                    debug!(symbol = %quote.symbol, price = %tick.price, "quote refreshed");
                    quotes.push(StockQuote {
                        price: tick.price,
                        change_pct: tick.change_pct,
                        ..quote.clone()
                    });
                    report.updated.push(quote.symbol.clone());
                }
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        symbol = %quote.symbol,
                        error = %e,
                        "quote refresh failed, keeping previous price"
                    );
                    quotes.push(quote.clone());
                    report.stale.push(quote.symbol.clone());
                }
            }
        }

        (QuoteBoard::new(quotes), report)
    }
}

impl Default for QuoteService {
    fn default() -> Self {
        Self::new()
    }
}
