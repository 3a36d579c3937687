use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::ledger::PortfolioSnapshot;
use crate::models::quote::QuoteBoard;
use crate::models::settings::PortfolioMode;
use crate::models::trade::{TradeOrder, TradeRecord};

/// Where the simulator reads and writes portfolio state.
///
/// The remote backend is the source of truth; the local ledger is the
/// offline/demo fallback. Callers only see this trait.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PortfolioSource: Send + Sync {
    /// Human-readable name of this source (for logs/errors).
    fn name(&self) -> &str;

    fn mode(&self) -> PortfolioMode;

    /// Current cash and holdings. Remote sources fetch fresh on every call.
    async fn snapshot(&self) -> Result<PortfolioSnapshot, CoreError>;

    /// Execute an order. On error nothing has changed.
    async fn execute(&mut self, order: &TradeOrder) -> Result<(), CoreError>;

    /// New market prices are available.
    fn update_quotes(&mut self, _quotes: &QuoteBoard) {}

    /// Trades executed through this source, oldest first. Sources that
    /// don't keep history return an empty slice.
    fn history(&self) -> &[TradeRecord] {
        &[]
    }
}
