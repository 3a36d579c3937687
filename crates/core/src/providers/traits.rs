use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::quote::QuoteTick;

/// Source of live market prices for the quote board.
///
/// The app ships with a static provider (fixed demo prices) and a Yahoo
/// Finance provider; either can back `QuoteService::refresh`.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Latest price and day change for `symbol`.
    async fn fetch_quote(&self, symbol: &str) -> Result<QuoteTick, CoreError>;
}
