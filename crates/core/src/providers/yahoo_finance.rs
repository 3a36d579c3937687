use async_trait::async_trait;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use time::OffsetDateTime;

use crate::errors::CoreError;
use crate::models::quote::QuoteTick;
use super::traits::QuoteProvider;

const PROVIDER: &str = "Yahoo Finance";

/// Days of daily history requested per quote. Wide enough that weekends and
/// holidays still leave two trading sessions to compare.
const LOOKBACK_DAYS: i64 = 10;

/// Yahoo Finance quote provider for stocks.
///
/// - **Free**: No API key required.
/// - **Data**: daily closes; the day change is computed from the last two.
///
/// Uses the `yahoo_finance_api` crate. Not WASM-compatible (native
/// reqwest/tokio connectors).
pub struct YahooQuoteProvider {
    connector: yahoo_finance_api::YahooConnector,
}

impl YahooQuoteProvider {
    pub fn new() -> Result<Self, CoreError> {
        let connector = yahoo_finance_api::YahooConnector::new().map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to create connector: {e}"),
        })?;
        Ok(Self { connector })
    }

    fn to_decimal(value: f64, symbol: &str) -> Result<Decimal, CoreError> {
        Decimal::from_f64(value)
            .map(|d| d.round_dp(4))
            .ok_or_else(|| CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("Unrepresentable price {value} for {symbol}"),
            })
    }

    /// Percent change from `previous` to `last`, two decimals.
    pub fn day_change_pct(previous: Decimal, last: Decimal) -> Decimal {
        if previous.is_zero() {
            return Decimal::ZERO;
        }
        ((last - previous) / previous * Decimal::ONE_HUNDRED).round_dp(2)
    }
}

#[async_trait]
impl QuoteProvider for YahooQuoteProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn fetch_quote(&self, symbol: &str) -> Result<QuoteTick, CoreError> {
        let end = OffsetDateTime::now_utc();
        let start = end - time::Duration::days(LOOKBACK_DAYS);

        let resp = self
            .connector
            .get_quote_history(symbol, start, end)
            .await
            .map_err(|e| CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("Failed to fetch history for {symbol}: {e}"),
            })?;

        let quotes = resp.quotes().map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to parse quotes for {symbol}: {e}"),
        })?;

        let mut closes = quotes.iter().rev().map(|q| q.close);
        let last = closes.next().ok_or_else(|| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("No quote data for {symbol}"),
        })?;
        let price = Self::to_decimal(last, symbol)?;

        let change_pct = match closes.next() {
            Some(previous) => Self::day_change_pct(Self::to_decimal(previous, symbol)?, price),
            None => Decimal::ZERO,
        };

        Ok(QuoteTick { price, change_pct })
    }
}
