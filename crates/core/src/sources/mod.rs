pub mod local;
pub mod remote;
pub mod traits;

use crate::errors::CoreError;
use crate::models::quote::QuoteBoard;
use crate::models::settings::{PortfolioMode, Settings};
use local::LocalPortfolio;
use remote::RemotePortfolio;
use traits::PortfolioSource;

/// Build the portfolio source selected by `settings.portfolio_mode`.
pub fn build_source(
    settings: &Settings,
    quotes: &QuoteBoard,
) -> Result<Box<dyn PortfolioSource>, CoreError> {
    let source: Box<dyn PortfolioSource> = match settings.portfolio_mode {
        PortfolioMode::Local => Box::new(LocalPortfolio::new(
            settings.starting_balance,
            quotes.clone(),
        )),
        PortfolioMode::Remote => {
            Box::new(RemotePortfolio::from_settings(settings)?.with_names(quotes.clone()))
        }
    };
    Ok(source)
}
