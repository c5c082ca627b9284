// ═══════════════════════════════════════════════════════════════════
// Model Tests — Currency, Stock, Portfolio, HistoricalSeries,
// HistoryCache, ChartRow
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;

use portfolio_tracker_core::models::chart::ChartRow;
use portfolio_tracker_core::models::currency::Currency;
use portfolio_tracker_core::models::history::{HistoricalSeries, HistoryCache, PricePoint};
use portfolio_tracker_core::models::portfolio::{Portfolio, Stock};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
//  Currency
// ═══════════════════════════════════════════════════════════════════

mod currency {
    use super::*;

    #[test]
    fn display_usd() {
        assert_eq!(Currency::Usd.to_string(), "USD");
    }

    #[test]
    fn display_eur() {
        assert_eq!(Currency::Eur.to_string(), "EUR");
    }

    #[test]
    fn serializes_as_iso_code() {
        assert_eq!(serde_json::to_string(&Currency::Usd).unwrap(), "\"USD\"");
        assert_eq!(serde_json::to_string(&Currency::Eur).unwrap(), "\"EUR\"");
    }

    #[test]
    fn serde_roundtrip() {
        for c in [Currency::Usd, Currency::Eur] {
            let json = serde_json::to_string(&c).unwrap();
            let back: Currency = serde_json::from_str(&json).unwrap();
            assert_eq!(c, back);
        }
    }

    #[test]
    fn unknown_code_fails_to_deserialize() {
        assert!(serde_json::from_str::<Currency>("\"GBP\"").is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Stock
// ═══════════════════════════════════════════════════════════════════

mod stock {
    use super::*;

    #[test]
    fn new_uppercases_symbol() {
        let s = Stock::new("aapl", 100.0, 200.0, 2);
        assert_eq!(s.symbol, "AAPL");
    }

    #[test]
    fn new_preserves_uppercase_symbol() {
        let s = Stock::new("MSFT", 100.0, 200.0, 2);
        assert_eq!(s.symbol, "MSFT");
    }

    #[test]
    fn new_generates_distinct_ids() {
        let a = Stock::new("AAPL", 1.0, 1.0, 1);
        let b = Stock::new("AAPL", 1.0, 1.0, 1);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn total_value_multiplies_by_quantity() {
        let s = Stock::new("AAPL", 100.0, 200.0, 3);
        assert_eq!(s.total_value(), 600.0);
    }

    #[test]
    fn serde_roundtrip() {
        let s = Stock::new("AAPL", 100.0, 200.0, 2);
        let json = serde_json::to_string(&s).unwrap();
        let back: Stock = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Portfolio
// ═══════════════════════════════════════════════════════════════════

mod portfolio {
    use super::*;

    #[test]
    fn new_defaults_to_eur_and_no_stocks() {
        let p = Portfolio::new("Tech");
        assert_eq!(p.name, "Tech");
        assert_eq!(p.currency, Currency::Eur);
        assert!(p.stocks.is_empty());
    }

    #[test]
    fn new_generates_distinct_ids() {
        assert_ne!(Portfolio::new("A").id, Portfolio::new("B").id);
    }

    #[test]
    fn stock_lookup_by_id() {
        let mut p = Portfolio::new("P");
        p.stocks.push(Stock::new("AAPL", 1.0, 1.0, 1));
        p.stocks.push(Stock::new("MSFT", 1.0, 1.0, 1));
        let id = p.stocks[1].id;

        assert_eq!(p.stock(id).unwrap().symbol, "MSFT");
        assert!(p.stock(uuid::Uuid::new_v4()).is_none());
    }

    #[test]
    fn total_value_sums_positions_in_usd() {
        let mut p = Portfolio::new("P");
        p.stocks.push(Stock::new("AAPL", 100.0, 200.0, 2));
        p.stocks.push(Stock::new("MSFT", 50.0, 10.0, 3));
        assert_eq!(p.total_value(), 430.0);
    }

    #[test]
    fn snapshot_json_shape() {
        let mut p = Portfolio::new("Tech");
        p.stocks.push(Stock::new("AAPL", 100.0, 200.0, 2));

        let json: serde_json::Value = serde_json::to_value(&p).unwrap();
        assert_eq!(json["name"], "Tech");
        assert_eq!(json["currency"], "EUR");
        assert_eq!(json["stocks"][0]["symbol"], "AAPL");
        assert_eq!(json["stocks"][0]["initial_value"], 100.0);
        assert_eq!(json["stocks"][0]["latest_value"], 200.0);
        assert_eq!(json["stocks"][0]["quantity"], 2);
    }

    #[test]
    fn serde_roundtrip_preserves_stock_order() {
        let mut p = Portfolio::new("P");
        for symbol in ["AAPL", "MSFT", "NOK"] {
            p.stocks.push(Stock::new(symbol, 1.0, 1.0, 1));
        }

        let json = serde_json::to_string(&p).unwrap();
        let back: Portfolio = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
        let symbols: Vec<&str> = back.stocks.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(symbols, ["AAPL", "MSFT", "NOK"]);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  HistoricalSeries
// ═══════════════════════════════════════════════════════════════════

mod historical_series {
    use super::*;

    fn sample() -> HistoricalSeries {
        HistoricalSeries::new(
            "AAPL",
            d(2020, 3, 10),
            vec![
                PricePoint { date: d(2020, 3, 2), value: 70.0 },
                PricePoint { date: d(2020, 3, 3), value: 71.5 },
                PricePoint { date: d(2020, 3, 5), value: 69.0 },
            ],
        )
    }

    #[test]
    fn value_on_exact_date() {
        let s = sample();
        assert_eq!(s.value_on(d(2020, 3, 3)), Some(71.5));
    }

    #[test]
    fn value_on_missing_date_is_none() {
        let s = sample();
        assert_eq!(s.value_on(d(2020, 3, 4)), None);
        assert_eq!(s.value_on(d(2019, 1, 1)), None);
    }

    #[test]
    fn value_on_empty_series_is_none() {
        let s = HistoricalSeries::new("AAPL", d(2020, 3, 10), Vec::new());
        assert_eq!(s.value_on(d(2020, 3, 3)), None);
    }

    #[test]
    fn is_fresh_same_day_only() {
        let s = sample();
        assert!(s.is_fresh(d(2020, 3, 10)));
        assert!(!s.is_fresh(d(2020, 3, 11)));
        assert!(!s.is_fresh(d(2020, 3, 9)));
    }

    #[test]
    fn serde_roundtrip() {
        let s = sample();
        let json = serde_json::to_string(&s).unwrap();
        let back: HistoricalSeries = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  HistoryCache
// ═══════════════════════════════════════════════════════════════════

mod history_cache {
    use super::*;

    #[test]
    fn starts_empty() {
        let cache = HistoryCache::new();
        assert_eq!(cache.symbol_count(), 0);
        assert_eq!(cache.total_points(), 0);
        assert!(!cache.contains("AAPL"));
    }

    #[test]
    fn insert_then_get() {
        let mut cache = HistoryCache::new();
        cache.insert(HistoricalSeries::new(
            "AAPL",
            d(2020, 3, 10),
            vec![PricePoint { date: d(2020, 3, 2), value: 70.0 }],
        ));

        assert!(cache.contains("AAPL"));
        assert_eq!(cache.get("AAPL").unwrap().points.len(), 1);
        assert!(cache.get("MSFT").is_none());
    }

    #[test]
    fn insert_replaces_existing_symbol() {
        let mut cache = HistoryCache::new();
        cache.insert(HistoricalSeries::new(
            "AAPL",
            d(2020, 3, 9),
            vec![PricePoint { date: d(2020, 3, 2), value: 70.0 }],
        ));
        cache.insert(HistoricalSeries::new("AAPL", d(2020, 3, 10), Vec::new()));

        // At most one entry per symbol; replacement, not merge
        assert_eq!(cache.symbol_count(), 1);
        assert_eq!(cache.get("AAPL").unwrap().update_date, d(2020, 3, 10));
        assert!(cache.get("AAPL").unwrap().points.is_empty());
    }

    #[test]
    fn total_points_sums_all_series() {
        let mut cache = HistoryCache::new();
        cache.insert(HistoricalSeries::new(
            "AAPL",
            d(2020, 3, 10),
            vec![
                PricePoint { date: d(2020, 3, 2), value: 70.0 },
                PricePoint { date: d(2020, 3, 3), value: 71.0 },
            ],
        ));
        cache.insert(HistoricalSeries::new(
            "MSFT",
            d(2020, 3, 10),
            vec![PricePoint { date: d(2020, 3, 2), value: 160.0 }],
        ));

        assert_eq!(cache.symbol_count(), 2);
        assert_eq!(cache.total_points(), 3);
    }

    #[test]
    fn serde_roundtrip() {
        let mut cache = HistoryCache::new();
        cache.insert(HistoricalSeries::new(
            "AAPL",
            d(2020, 3, 10),
            vec![PricePoint { date: d(2020, 3, 2), value: 70.0 }],
        ));

        let json = serde_json::to_string(&cache).unwrap();
        let back: HistoryCache = serde_json::from_str(&json).unwrap();
        assert_eq!(cache, back);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  ChartRow
// ═══════════════════════════════════════════════════════════════════

mod chart_row {
    use super::*;

    #[test]
    fn value_lookup() {
        let mut row = ChartRow::new(d(2020, 3, 2));
        row.values.insert("AAPL".into(), 70.0);

        assert_eq!(row.value("AAPL"), Some(70.0));
        assert_eq!(row.value("MSFT"), None);
    }

    #[test]
    fn symbols_are_flattened_into_the_row() {
        let mut row = ChartRow::new(d(2020, 3, 2));
        row.values.insert("AAPL".into(), 70.0);
        row.values.insert("MSFT".into(), 160.5);

        let json: serde_json::Value = serde_json::to_value(&row).unwrap();
        assert_eq!(json["date"], "2020-03-02");
        assert_eq!(json["AAPL"], 70.0);
        assert_eq!(json["MSFT"], 160.5);
    }

    #[test]
    fn gap_symbols_are_absent_from_json() {
        let row = ChartRow::new(d(2020, 3, 2));
        let json: serde_json::Value = serde_json::to_value(&row).unwrap();

        // Only the date key — a missing symbol is a gap, not a zero
        assert_eq!(json.as_object().unwrap().len(), 1);
    }

    #[test]
    fn serde_roundtrip() {
        let mut row = ChartRow::new(d(2020, 3, 2));
        row.values.insert("AAPL".into(), 70.0);

        let json = serde_json::to_string(&row).unwrap();
        let back: ChartRow = serde_json::from_str(&json).unwrap();
        assert_eq!(row, back);
    }
}
