// ═══════════════════════════════════════════════════════════════════
// Ledger Tests — LedgerService buy/sell rules, weighted average cost,
// holdings and snapshot totals
// ═══════════════════════════════════════════════════════════════════

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use finlearn_core::errors::CoreError;
use finlearn_core::models::holding::Holding;
use finlearn_core::models::ledger::{Ledger, PortfolioSnapshot, DEFAULT_STARTING_BALANCE};
use finlearn_core::models::quote::{QuoteBoard, StockQuote};
use finlearn_core::models::trade::{TradeAction, TradeRequest};
use finlearn_core::services::ledger_service::LedgerService;

// ═══════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════

fn board() -> QuoteBoard {
    QuoteBoard::new(vec![
        StockQuote::new("AAPL", "Apple Inc.", dec!(175.43), dec!(2.1)),
        StockQuote::new("MSFT", "Microsoft Corp.", dec!(378.85), dec!(1.5)),
        StockQuote::new("TSLA", "Tesla Inc.", dec!(248.42), dec!(3.7)),
    ])
}

fn svc() -> LedgerService {
    LedgerService::new()
}

fn holding(symbol: &str, quantity: u64, avg: Decimal, current: Decimal) -> Holding {
    Holding {
        symbol: symbol.into(),
        name: format!("{symbol} Corp."),
        quantity,
        avg_price: avg,
        current_price: current,
    }
}

// ═══════════════════════════════════════════════════════════════════
// Buying
// ═══════════════════════════════════════════════════════════════════

mod buy {
    use super::*;

    #[test]
    fn first_buy_opens_holding_at_trade_price() {
        let mut ledger = Ledger::default();
        svc()
            .apply_trade(&mut ledger, &TradeRequest::buy("AAPL", 10, dec!(175.43)), &board())
            .unwrap();

        assert_eq!(ledger.cash_balance, dec!(8245.70));
        let h = ledger.holding("AAPL").unwrap();
        assert_eq!(h.quantity, 10);
        assert_eq!(h.avg_price, dec!(175.43));
        assert_eq!(h.name, "Apple Inc.");
    }

    #[test]
    fn second_buy_merges_with_weighted_average() {
        let mut ledger = Ledger::default();
        let quotes = board();
        svc()
            .apply_trade(&mut ledger, &TradeRequest::buy("AAPL", 10, dec!(175.43)), &quotes)
            .unwrap();
        svc()
            .apply_trade(&mut ledger, &TradeRequest::buy("AAPL", 5, dec!(180)), &quotes)
            .unwrap();

        assert_eq!(ledger.holdings.len(), 1);
        let h = ledger.holding("AAPL").unwrap();
        assert_eq!(h.quantity, 15);
        // (175.43·10 + 180·5) / 15 = 176.9533…
        assert_eq!(h.avg_price.round_dp(2), dec!(176.95));
        assert_eq!(h.avg_price.round(), dec!(177));
        assert_eq!(ledger.cash_balance, dec!(7345.70));
    }

    #[test]
    fn lowercase_symbol_is_normalized() {
        let mut ledger = Ledger::default();
        svc()
            .apply_trade(&mut ledger, &TradeRequest::buy("msft", 2, dec!(378.85)), &board())
            .unwrap();
        assert_eq!(ledger.holdings[0].symbol, "MSFT");
        assert_eq!(ledger.shares_of("msft"), 2);
    }

    #[test]
    fn holdings_keep_first_purchase_order() {
        let mut ledger = Ledger::default();
        let quotes = board();
        for sym in ["TSLA", "AAPL", "TSLA", "MSFT"] {
            let price = quotes.price_of(sym).unwrap();
            svc()
                .apply_trade(&mut ledger, &TradeRequest::buy(sym, 1, price), &quotes)
                .unwrap();
        }
        let order: Vec<&str> = ledger.holdings.iter().map(|h| h.symbol.as_str()).collect();
        assert_eq!(order, vec!["TSLA", "AAPL", "MSFT"]);
    }

    #[test]
    fn buy_spending_exact_balance_is_allowed() {
        let mut ledger = Ledger::new(dec!(1754.30));
        svc()
            .apply_trade(&mut ledger, &TradeRequest::buy("AAPL", 10, dec!(175.43)), &board())
            .unwrap();
        assert_eq!(ledger.cash_balance, Decimal::ZERO);
    }

    #[test]
    fn current_price_comes_from_board_not_trade() {
        let mut ledger = Ledger::default();
        svc()
            .apply_trade(&mut ledger, &TradeRequest::buy("AAPL", 1, dec!(150)), &board())
            .unwrap();
        let h = ledger.holding("AAPL").unwrap();
        assert_eq!(h.avg_price, dec!(150));
        assert_eq!(h.current_price, dec!(175.43));
    }

    #[test]
    fn insufficient_funds_leaves_ledger_unchanged() {
        let mut ledger = Ledger::new(dec!(100));
        let before = ledger.clone();
        let err = svc()
            .apply_trade(&mut ledger, &TradeRequest::buy("AAPL", 1, dec!(175.43)), &board())
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::InsufficientFunds { required, available }
                if required == dec!(175.43) && available == dec!(100)
        ));
        assert_eq!(ledger, before);
    }

    #[test]
    fn returns_record_and_appends_history() {
        let mut ledger = Ledger::default();
        let record = svc()
            .apply_trade(&mut ledger, &TradeRequest::buy("TSLA", 3, dec!(248.42)), &board())
            .unwrap();
        assert_eq!(record.action, TradeAction::Buy);
        assert_eq!(record.total(), Some(dec!(745.26)));
        assert_eq!(ledger.history, vec![record]);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Selling
// ═══════════════════════════════════════════════════════════════════

mod sell {
    use super::*;

    fn ledger_with_aapl(qty: u64) -> Ledger {
        let mut ledger = Ledger::default();
        svc()
            .apply_trade(&mut ledger, &TradeRequest::buy("AAPL", qty, dec!(175.43)), &board())
            .unwrap();
        ledger
    }

    #[test]
    fn partial_sell_keeps_average_price() {
        let mut ledger = ledger_with_aapl(10);
        svc()
            .apply_trade(&mut ledger, &TradeRequest::sell("AAPL", 4, dec!(200)), &board())
            .unwrap();

        let h = ledger.holding("AAPL").unwrap();
        assert_eq!(h.quantity, 6);
        assert_eq!(h.avg_price, dec!(175.43));
        assert_eq!(ledger.cash_balance, dec!(8245.70) + dec!(800));
    }

    #[test]
    fn selling_everything_removes_holding() {
        let mut ledger = ledger_with_aapl(10);
        svc()
            .apply_trade(&mut ledger, &TradeRequest::sell("AAPL", 10, dec!(175.43)), &board())
            .unwrap();

        assert!(ledger.holding("AAPL").is_none());
        assert!(ledger.holdings.is_empty());
        assert_eq!(ledger.cash_balance, DEFAULT_STARTING_BALANCE);
    }

    #[test]
    fn selling_more_than_held_is_rejected() {
        let mut ledger = ledger_with_aapl(3);
        let before = ledger.clone();
        let err = svc()
            .apply_trade(&mut ledger, &TradeRequest::sell("AAPL", 4, dec!(175.43)), &board())
            .unwrap_err();

        match err {
            CoreError::InsufficientShares { symbol, requested, held } => {
                assert_eq!(symbol, "AAPL");
                assert_eq!(requested, 4);
                assert_eq!(held, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(ledger, before);
    }

    #[test]
    fn selling_unheld_symbol_is_rejected() {
        let mut ledger = Ledger::default();
        let err = svc()
            .apply_trade(&mut ledger, &TradeRequest::sell("MSFT", 1, dec!(378.85)), &board())
            .unwrap_err();
        assert!(matches!(err, CoreError::InsufficientShares { held: 0, .. }));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Input validation
// ═══════════════════════════════════════════════════════════════════

mod validation {
    use super::*;

    #[test]
    fn zero_quantity_rejected_first() {
        let mut ledger = Ledger::default();
        // Zero quantity wins even with a bad price and unknown symbol.
        let err = svc()
            .apply_trade(&mut ledger, &TradeRequest::buy("ZZZZ", 0, dec!(-1)), &board())
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidQuantity(_)));
    }

    #[test]
    fn non_positive_price_rejected() {
        let mut ledger = Ledger::default();
        let err = svc()
            .apply_trade(&mut ledger, &TradeRequest::buy("AAPL", 1, Decimal::ZERO), &board())
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidPrice(p) if p.is_zero()));
    }

    #[test]
    fn cost_beyond_decimal_range_is_insufficient_funds() {
        let mut ledger = Ledger::default();
        let before = ledger.clone();
        let err = svc()
            .apply_trade(&mut ledger, &TradeRequest::buy("AAPL", 2, Decimal::MAX), &board())
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::InsufficientFunds { required, available }
                if required == Decimal::MAX && available == DEFAULT_STARTING_BALANCE
        ));
        assert_eq!(ledger, before);
    }

    #[test]
    fn sell_proceeds_beyond_decimal_range_rejected() {
        let mut ledger = Ledger::new(Decimal::MAX);
        ledger.holdings.push(holding("AAPL", 2, dec!(1), dec!(175.43)));
        let before = ledger.clone();

        let err = svc()
            .apply_trade(&mut ledger, &TradeRequest::sell("AAPL", 1, dec!(1000)), &board())
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidPrice(p) if p == dec!(1000)));
        assert_eq!(ledger, before);
    }

    #[test]
    fn merged_quantity_beyond_u64_rejected() {
        let mut ledger = Ledger::default();
        let tiny = Decimal::new(1, 28);
        svc()
            .apply_trade(&mut ledger, &TradeRequest::buy("AAPL", u64::MAX, tiny), &board())
            .unwrap();
        let after_first = ledger.clone();

        let err = svc()
            .apply_trade(&mut ledger, &TradeRequest::buy("AAPL", u64::MAX, tiny), &board())
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidQuantity(_)));
        assert_eq!(ledger, after_first);
        assert_eq!(ledger.shares_of("AAPL"), u64::MAX);
    }

    #[test]
    fn unknown_symbol_rejected() {
        let mut ledger = Ledger::default();
        let err = svc()
            .apply_trade(&mut ledger, &TradeRequest::buy("ZZZZ", 1, dec!(10)), &board())
            .unwrap_err();
        assert!(matches!(err, CoreError::UnknownSymbol(ref s) if s == "ZZZZ"));
        assert!(ledger.history.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Invariants over a trade sequence
// ═══════════════════════════════════════════════════════════════════

mod invariants {
    use super::*;

    #[test]
    fn cash_never_negative_and_no_empty_holdings() {
        let quotes = board();
        let mut ledger = Ledger::new(dec!(2000));
        let script = [
            (TradeAction::Buy, "AAPL", 5),
            (TradeAction::Buy, "MSFT", 3),
            (TradeAction::Buy, "TSLA", 10),
            (TradeAction::Sell, "AAPL", 5),
            (TradeAction::Sell, "MSFT", 4),
            (TradeAction::Buy, "TSLA", 4),
            (TradeAction::Sell, "TSLA", 2),
            (TradeAction::Buy, "AAPL", 100),
        ];

        for (action, sym, qty) in script {
            let price = quotes.price_of(sym).unwrap();
            let _ = svc().apply_trade(&mut ledger, &TradeRequest::new(action, sym, qty, price), &quotes);

            assert!(ledger.cash_balance >= Decimal::ZERO);
            assert!(ledger.holdings.iter().all(|h| h.quantity > 0));
            let mut symbols: Vec<&str> = ledger.holdings.iter().map(|h| h.symbol.as_str()).collect();
            symbols.sort_unstable();
            symbols.dedup();
            assert_eq!(symbols.len(), ledger.holdings.len());
        }
    }

    #[test]
    fn cash_plus_cost_is_conserved_at_trade_prices() {
        // Buying and selling at the same price never creates or destroys value.
        let quotes = board();
        let mut ledger = Ledger::default();
        svc().apply_trade(&mut ledger, &TradeRequest::buy("MSFT", 7, dec!(378.85)), &quotes).unwrap();
        svc().apply_trade(&mut ledger, &TradeRequest::sell("MSFT", 2, dec!(378.85)), &quotes).unwrap();

        let cost: Decimal = ledger.holdings.iter().map(Holding::cost_basis).sum();
        assert_eq!(ledger.cash_balance + cost, DEFAULT_STARTING_BALANCE);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Weighted average
// ═══════════════════════════════════════════════════════════════════

mod weighted_average {
    use super::*;

    #[test]
    fn equal_lots() {
        assert_eq!(LedgerService::weighted_average(dec!(100), 1, dec!(200), 1), Some(dec!(150)));
    }

    #[test]
    fn from_empty_position() {
        assert_eq!(LedgerService::weighted_average(Decimal::ZERO, 0, dec!(42.5), 3), Some(dec!(42.5)));
    }

    #[test]
    fn overflow_is_none() {
        assert_eq!(LedgerService::weighted_average(Decimal::MAX, 2, dec!(1), 1), None);
        assert_eq!(LedgerService::weighted_average(dec!(1), u64::MAX, dec!(1), 1), None);
    }

    #[test]
    fn zero_total_is_zero() {
        assert_eq!(LedgerService::weighted_average(dec!(10), 0, dec!(20), 0), Some(Decimal::ZERO));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Holdings, mark-to-market and snapshots
// ═══════════════════════════════════════════════════════════════════

mod valuation {
    use super::*;

    #[test]
    fn holding_derived_fields() {
        let h = holding("AAPL", 10, dec!(150), dec!(175));
        assert_eq!(h.market_value(), dec!(1750));
        assert_eq!(h.cost_basis(), dec!(1500));
        assert_eq!(h.pnl(), dec!(250));
        assert_eq!(h.pnl_percent().round_dp(4), dec!(16.6667));
    }

    #[test]
    fn pnl_percent_zero_avg_is_zero() {
        let h = holding("FREE", 1, Decimal::ZERO, dec!(10));
        assert_eq!(h.pnl_percent(), Decimal::ZERO);
    }

    #[test]
    fn losing_holding_not_profitable() {
        let view = holding("TSLA", 2, dec!(300), dec!(248.42)).to_view();
        assert_eq!(view.pnl, dec!(-103.16));
        assert!(!view.is_profitable());
    }

    #[test]
    fn mark_to_market_updates_prices_on_board_only() {
        let mut ledger = Ledger::default();
        ledger.holdings.push(holding("AAPL", 1, dec!(100), dec!(100)));
        ledger.holdings.push(holding("GONE", 1, dec!(5), dec!(7)));

        ledger.mark_to_market(&board());
        assert_eq!(ledger.holding("AAPL").unwrap().current_price, dec!(175.43));
        assert_eq!(ledger.holding("GONE").unwrap().current_price, dec!(7));
    }

    #[test]
    fn snapshot_totals() {
        let mut ledger = Ledger::new(dec!(1000));
        ledger.holdings.push(holding("AAPL", 10, dec!(150), dec!(175)));
        ledger.holdings.push(holding("TSLA", 2, dec!(300), dec!(250)));
        let snap = ledger.snapshot();

        assert_eq!(snap.total_holdings_value(), dec!(2250));
        assert_eq!(snap.total_pnl(), dec!(150));
        assert_eq!(snap.total_portfolio_value(), dec!(3250));
        // 150 / 2100 × 100
        assert_eq!(snap.total_pnl_percent().round_dp(2), dec!(7.14));
        assert_eq!(snap.holding("tsla").unwrap().quantity, 2);
    }

    #[test]
    fn empty_snapshot_has_zero_percent() {
        let snap = PortfolioSnapshot {
            cash_balance: dec!(10000),
            holdings: Vec::new(),
        };
        assert!(snap.is_empty());
        assert_eq!(snap.total_pnl_percent(), Decimal::ZERO);
        assert_eq!(snap.total_portfolio_value(), dec!(10000));
    }

    #[test]
    fn ledger_round_trips_through_json() {
        let mut ledger = Ledger::default();
        svc()
            .apply_trade(&mut ledger, &TradeRequest::buy("AAPL", 2, dec!(175.43)), &board())
            .unwrap();
        let json = serde_json::to_string(&ledger).unwrap();
        let back: Ledger = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ledger);
    }
}
