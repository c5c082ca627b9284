// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use portfolio_tracker_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn serialization() {
        let err = CoreError::Serialization("bad value".into());
        assert_eq!(err.to_string(), "Serialization error: bad value");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("unexpected token".into());
        assert_eq!(err.to_string(), "Deserialization error: unexpected token");
    }

    #[test]
    fn file_io() {
        let err = CoreError::FileIo("permission denied".into());
        assert_eq!(err.to_string(), "File I/O error: permission denied");
    }

    #[test]
    fn api() {
        let err = CoreError::Api {
            provider: "IEX Cloud".into(),
            message: "rate limited".into(),
        };
        assert_eq!(err.to_string(), "API error (IEX Cloud): rate limited");
    }

    #[test]
    fn network() {
        let err = CoreError::Network("connection refused".into());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn validation() {
        let err = CoreError::ValidationError("bad range".into());
        assert_eq!(err.to_string(), "Validation failed: bad range");
    }

    #[test]
    fn no_stock_data_is_the_exact_user_message() {
        assert_eq!(CoreError::NoStockData.to_string(), "No data for stock");
    }

    #[test]
    fn stock_price_missing_is_the_exact_user_message() {
        assert_eq!(
            CoreError::StockPriceMissing.to_string(),
            "Could not find price for the stock"
        );
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn io_error_becomes_file_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: CoreError = io.into();
        assert!(matches!(err, CoreError::FileIo(_)));
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn serde_json_error_becomes_deserialization() {
        let json_err = serde_json::from_str::<serde_json::Value>("{broken").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }
}
