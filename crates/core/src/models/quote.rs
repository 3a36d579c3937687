use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A market quote for one stock at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockQuote {
    /// Ticker symbol, uppercased (e.g., "AAPL")
    pub symbol: String,

    /// Display name (e.g., "Apple Inc.")
    pub name: String,

    /// Latest price
    pub price: Decimal,

    /// Percent change on the day (e.g., 2.1 means +2.1%)
    pub change_pct: Decimal,
}

impl StockQuote {
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
        change_pct: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            name: name.into(),
            price,
            change_pct,
        }
    }

    #[must_use]
    pub fn is_up(&self) -> bool {
        self.change_pct >= Decimal::ZERO
    }
}

/// Price update for a single symbol, as returned by a quote provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuoteTick {
    pub price: Decimal,
    pub change_pct: Decimal,
}

/// Immutable, ordered snapshot of market quotes.
///
/// Refreshing produces a new board rather than editing this one; see
/// `QuoteService::refresh`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<StockQuote>", into = "Vec<StockQuote>")]
pub struct QuoteBoard {
    quotes: Vec<StockQuote>,
}

impl QuoteBoard {
    /// Build a board, normalizing symbols to uppercase.
    /// Later duplicates of a symbol are dropped.
    pub fn new(quotes: Vec<StockQuote>) -> Self {
        let mut unique: Vec<StockQuote> = Vec::with_capacity(quotes.len());
        for mut quote in quotes {
            quote.symbol = quote.symbol.to_uppercase();
            if !unique.iter().any(|q| q.symbol == quote.symbol) {
                unique.push(quote);
            }
        }
        Self { quotes: unique }
    }

    /// Look up a quote by symbol (case-insensitive).
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&StockQuote> {
        let upper = symbol.to_uppercase();
        self.quotes.iter().find(|q| q.symbol == upper)
    }

    #[must_use]
    pub fn price_of(&self, symbol: &str) -> Option<Decimal> {
        self.get(symbol).map(|q| q.price)
    }

    #[must_use]
    pub fn quotes(&self) -> &[StockQuote] {
        &self.quotes
    }

    #[must_use]
    pub fn symbols(&self) -> Vec<&str> {
        self.quotes.iter().map(|q| q.symbol.as_str()).collect()
    }

    /// The first `n` quotes in source order (the "market watch" panel).
    #[must_use]
    pub fn market_watch(&self, n: usize) -> &[StockQuote] {
        &self.quotes[..n.min(self.quotes.len())]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

impl From<Vec<StockQuote>> for QuoteBoard {
    fn from(quotes: Vec<StockQuote>) -> Self {
        Self::new(quotes)
    }
}

impl From<QuoteBoard> for Vec<StockQuote> {
    fn from(board: QuoteBoard) -> Self {
        board.quotes
    }
}
