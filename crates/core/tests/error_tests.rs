// ═══════════════════════════════════════════════════════════════════
// Error Tests: CoreError display and conversions
// ═══════════════════════════════════════════════════════════════════

use portfolio_dashboard_core::errors::CoreError;

mod display {
    use super::*;

    #[test]
    fn business_errors() {
        assert_eq!(
            CoreError::Validation("Name is required".into()).to_string(),
            "Holding validation failed: Name is required"
        );
        assert_eq!(
            CoreError::HoldingNotFound("a1".into()).to_string(),
            "Holding not found: a1"
        );
        assert_eq!(
            CoreError::DuplicateHolding("a1".into()).to_string(),
            "Duplicate holding id: a1"
        );
        assert_eq!(
            CoreError::UnknownToken {
                kind: "sort key",
                token: "price-asc".into()
            }
            .to_string(),
            "Unknown sort key 'price-asc'"
        );
    }

    #[test]
    fn snapshot_errors() {
        assert_eq!(
            CoreError::UnsupportedVersion(7).to_string(),
            "Unsupported snapshot version: 7"
        );
        assert_eq!(
            CoreError::InvalidSnapshot("empty document".into()).to_string(),
            "Invalid snapshot: empty document"
        );
        assert!(CoreError::FileIO("denied".into())
            .to_string()
            .starts_with("File I/O error"));
    }

    #[test]
    fn backend_errors() {
        let err = CoreError::Api {
            status: 403,
            message: "Forbidden".into(),
        };
        assert_eq!(err.to_string(), "Backend rejected request (403): Forbidden");
        assert_eq!(
            CoreError::Network("timed out".into()).to_string(),
            "Network error: timed out"
        );
    }
}

mod conversions {
    use super::*;

    #[test]
    fn from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: CoreError = io.into();
        match err {
            CoreError::FileIO(msg) => assert!(msg.contains("no such file")),
            other => panic!("expected FileIO, got {other:?}"),
        }
    }

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn question_mark_propagation() {
        fn parse(raw: &str) -> Result<serde_json::Value, CoreError> {
            Ok(serde_json::from_str(raw)?)
        }
        assert!(parse("[1, 2]").is_ok());
        assert!(matches!(parse("[1,"), Err(CoreError::Deserialization(_))));
    }
}
