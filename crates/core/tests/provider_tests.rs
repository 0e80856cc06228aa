// ═══════════════════════════════════════════════════════════════════
// Provider Tests: SyntheticHistorySource, StaticHistorySource,
// HistorySourceRegistry
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;

use portfolio_dashboard_core::models::chart::{HistoricalPoint, TimeWindow};
use portfolio_dashboard_core::providers::registry::HistorySourceRegistry;
use portfolio_dashboard_core::providers::static_history::StaticHistorySource;
use portfolio_dashboard_core::providers::synthetic::{PriceBand, SyntheticHistorySource};
use portfolio_dashboard_core::providers::traits::HistorySource;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn p(date: NaiveDate, price: f64) -> HistoricalPoint {
    HistoricalPoint { date, price }
}

// ═══════════════════════════════════════════════════════════════════
// SyntheticHistorySource
// ═══════════════════════════════════════════════════════════════════

mod synthetic {
    use super::*;

    #[test]
    fn builtin_symbols() {
        let source = SyntheticHistorySource::with_defaults();
        for symbol in ["AAPL", "TSLA", "BTC", "ETH", "VOO"] {
            assert!(source.supports(symbol), "{symbol} should be known");
        }
        assert!(!source.supports("MSFT"));
        assert_eq!(source.name(), "Synthetic");
        assert_eq!(
            source.band_for("aapl", TimeWindow::Month),
            Some(PriceBand::new(150.0, 170.0))
        );
    }

    #[test]
    fn unknown_symbol_is_none() {
        let source = SyntheticHistorySource::with_defaults();
        assert!(source.series("MSFT", TimeWindow::Week, d(2025, 1, 1)).is_none());
        assert!(SyntheticHistorySource::new()
            .series("AAPL", TimeWindow::Week, d(2025, 1, 1))
            .is_none());
    }

    #[test]
    fn seeded_is_deterministic() {
        let source = SyntheticHistorySource::with_defaults().seeded(42);
        let end = d(2025, 6, 30);
        let a = source.series("BTC", TimeWindow::Month, end).unwrap();
        let b = source.series("BTC", TimeWindow::Month, end).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            source.default_series(TimeWindow::Year, end),
            source.default_series(TimeWindow::Year, end)
        );
    }

    #[test]
    fn seeds_differ() {
        let end = d(2025, 6, 30);
        let a = SyntheticHistorySource::with_defaults()
            .seeded(1)
            .series("ETH", TimeWindow::Quarter, end)
            .unwrap();
        let b = SyntheticHistorySource::with_defaults()
            .seeded(2)
            .series("ETH", TimeWindow::Quarter, end)
            .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn prices_stay_in_band() {
        let source = SyntheticHistorySource::with_defaults().seeded(9);
        let series = source.series("AAPL", TimeWindow::Month, d(2025, 1, 31)).unwrap();
        assert_eq!(series.len(), 30);
        assert!(series.iter().all(|p| p.price >= 150.0 && p.price <= 170.0));
    }

    #[test]
    fn prices_rounded_to_cents() {
        let source = SyntheticHistorySource::with_defaults().seeded(3);
        let series = source.series("TSLA", TimeWindow::Week, d(2025, 1, 31)).unwrap();
        for point in series {
            let cents = point.price * 100.0;
            assert!((cents - cents.round()).abs() < 1e-6);
        }
    }

    #[test]
    fn dates_end_before_anchor() {
        let source = SyntheticHistorySource::with_defaults().seeded(5);
        let series = source.series("VOO", TimeWindow::Week, d(2025, 3, 1)).unwrap();
        assert_eq!(series.first().unwrap().date, d(2025, 2, 22));
        assert_eq!(series.last().unwrap().date, d(2025, 2, 28));
    }

    #[test]
    fn custom_band() {
        let mut source = SyntheticHistorySource::new().seeded(11);
        source.set_band("msft", TimeWindow::Week, PriceBand::new(400.0, 420.0));
        assert!(source.supports("MSFT"));
        let series = source.series("MSFT", TimeWindow::Week, d(2025, 1, 8)).unwrap();
        assert!(series.iter().all(|p| p.price >= 400.0 && p.price <= 420.0));
    }
}

// ═══════════════════════════════════════════════════════════════════
// StaticHistorySource
// ═══════════════════════════════════════════════════════════════════

mod static_history {
    use super::*;

    #[test]
    fn insert_sorts_and_dedups() {
        let source = StaticHistorySource::new("fixture").with_series(
            "spy",
            TimeWindow::Week,
            vec![
                p(d(2025, 1, 3), 3.0),
                p(d(2025, 1, 1), 1.0),
                p(d(2025, 1, 3), 4.0),
            ],
        );
        assert_eq!(source.len(), 1);
        assert!(source.supports("SPY"));
        let series = source.series("SPY", TimeWindow::Week, d(2025, 1, 10)).unwrap();
        assert_eq!(series, vec![p(d(2025, 1, 1), 1.0), p(d(2025, 1, 3), 4.0)]);
    }

    #[test]
    fn missing_window_is_none() {
        let source = StaticHistorySource::new("fixture").with_series(
            "SPY",
            TimeWindow::Week,
            vec![p(d(2025, 1, 1), 1.0)],
        );
        assert!(source.series("SPY", TimeWindow::Year, d(2025, 1, 10)).is_none());
        assert_eq!(source.name(), "fixture");
    }
}

// ═══════════════════════════════════════════════════════════════════
// HistorySourceRegistry
// ═══════════════════════════════════════════════════════════════════

mod registry {
    use super::*;

    #[test]
    fn defaults_registered() {
        let registry = HistorySourceRegistry::new_with_defaults();
        assert_eq!(registry.source_names(), vec!["Synthetic".to_string()]);
        assert!(registry.source_for("btc").is_some());
        assert!(registry.source_for("MSFT").is_none());
        assert!(HistorySourceRegistry::new().source_names().is_empty());
    }

    #[test]
    fn first_registered_source_wins() {
        let mut registry = HistorySourceRegistry::new_with_defaults();
        registry.register(Box::new(StaticHistorySource::new("late").with_series(
            "AAPL",
            TimeWindow::Week,
            vec![p(d(2025, 1, 1), 1.0)],
        )));
        let series = registry.series_for("AAPL", TimeWindow::Week, d(2025, 1, 8));
        assert_eq!(series.len(), 7);

        let mut registry = HistorySourceRegistry::new();
        registry.register(Box::new(StaticHistorySource::new("early").with_series(
            "AAPL",
            TimeWindow::Week,
            vec![p(d(2025, 1, 1), 1.0)],
        )));
        registry.register(Box::new(SyntheticHistorySource::with_defaults()));
        let series = registry.series_for("aapl", TimeWindow::Week, d(2025, 1, 8));
        assert_eq!(series, vec![p(d(2025, 1, 1), 1.0)]);
    }

    #[test]
    fn falls_back_for_unknown_symbols() {
        let registry = HistorySourceRegistry::new()
            .with_fallback(SyntheticHistorySource::new().seeded(1));
        let end = d(2025, 1, 31);
        let series = registry.series_for("NOPE", TimeWindow::Month, end);
        assert_eq!(series, registry.default_series(TimeWindow::Month, end));
        assert_eq!(series.len(), 30);
    }
}
