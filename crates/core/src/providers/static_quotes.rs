use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::quote::{QuoteBoard, QuoteTick};
use super::traits::QuoteProvider;

/// Serves prices from a fixed board. Used for the demo/offline mode and
/// wherever deterministic prices are needed.
pub struct StaticQuoteProvider {
    board: QuoteBoard,
}

impl StaticQuoteProvider {
    pub fn new(board: QuoteBoard) -> Self {
        Self { board }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl QuoteProvider for StaticQuoteProvider {
    fn name(&self) -> &str {
        "Static"
    }

    async fn fetch_quote(&self, symbol: &str) -> Result<QuoteTick, CoreError> {
        let quote = self.board.get(symbol).ok_or_else(|| CoreError::Api {
            provider: self.name().into(),
            message: format!("No quote for {symbol}"),
        })?;
        Ok(QuoteTick {
            price: quote.price,
            change_pct: quote.change_pct,
        })
    }
}
