// ═══════════════════════════════════════════════════════════════════
// Backend Tests: reply envelope, request bodies, route building
// (no network)
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;

use portfolio_dashboard_core::backend::http::{parse_envelope, AddAssetRequest, HttpAssetBackend};
use portfolio_dashboard_core::backend::traits::AssetBackend;
use portfolio_dashboard_core::errors::CoreError;
use portfolio_dashboard_core::models::holding::{Category, Holding, HoldingDraft, HoldingId};
use portfolio_dashboard_core::models::settings::BackendSettings;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn apple() -> Holding {
    Holding::create(HoldingDraft::new(
        "Apple Inc.",
        "AAPL",
        Category::Equity,
        10.0,
        150.25,
        175.5,
        d(2023, 1, 15),
    ))
    .unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// Envelope parsing
// ═══════════════════════════════════════════════════════════════════

mod envelope {
    use super::*;

    #[test]
    fn success_with_assets() {
        let body = r#"{
            "status": true,
            "data": [{
                "_id": "a1",
                "assetName": "Bitcoin",
                "symbol": "BTC",
                "assetType": "crypto",
                "Quantity": 0.5,
                "purchasePrice": 30000,
                "currentPrice": 60000,
                "purchaseDate": "2022-06-01T00:00:00.000Z"
            }]
        }"#;
        let assets: Option<Vec<Holding>> = parse_envelope(200, body, "fetch assets").unwrap();
        let assets = assets.unwrap();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].id, HoldingId::from("a1"));
        assert_eq!(assets[0].category, Category::Crypto);
        assert_eq!(assets[0].purchase_date, d(2022, 6, 1));
    }

    #[test]
    fn success_without_data() {
        let parsed: Option<serde_json::Value> =
            parse_envelope(200, r#"{"status":true,"message":"Asset deleted"}"#, "delete asset")
                .unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn status_false_carries_message() {
        let result: Result<Option<serde_json::Value>, _> = parse_envelope(
            200,
            r#"{"status":false,"message":"Asset already exists"}"#,
            "add asset",
        );
        match result {
            Err(CoreError::Api { status, message }) => {
                assert_eq!(status, 200);
                assert_eq!(message, "Asset already exists");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn http_error_with_message() {
        let result: Result<Option<serde_json::Value>, _> =
            parse_envelope(401, r#"{"status":false,"message":"Unauthorized"}"#, "fetch assets");
        assert!(matches!(
            result,
            Err(CoreError::Api { status: 401, ref message }) if message == "Unauthorized"
        ));
    }

    #[test]
    fn http_error_with_blank_message() {
        let result: Result<Option<serde_json::Value>, _> =
            parse_envelope(500, r#"{"status":false,"message":"  "}"#, "update asset");
        assert!(matches!(
            result,
            Err(CoreError::Api { status: 500, ref message }) if message == "Server error occurred."
        ));
    }

    #[test]
    fn http_error_with_garbage_body() {
        let result: Result<Option<serde_json::Value>, _> =
            parse_envelope(502, "<html>Bad Gateway</html>", "fetch assets");
        assert!(matches!(
            result,
            Err(CoreError::Api { status: 502, ref message }) if message == "Server error occurred."
        ));
    }

    #[test]
    fn success_with_garbage_body() {
        let result: Result<Option<serde_json::Value>, _> =
            parse_envelope(200, "not json", "fetch assets");
        match result {
            Err(CoreError::Deserialization(msg)) => assert!(msg.contains("fetch assets")),
            other => panic!("expected Deserialization error, got {other:?}"),
        }
    }

    #[test]
    fn non_2xx_overrides_status_true() {
        let result: Result<Option<serde_json::Value>, _> =
            parse_envelope(404, r#"{"status":true}"#, "update asset");
        assert!(matches!(result, Err(CoreError::Api { status: 404, .. })));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Request bodies
// ═══════════════════════════════════════════════════════════════════

mod requests {
    use super::*;

    #[test]
    fn add_asset_uses_service_field_names() {
        let holding = apple();
        let body = serde_json::to_value(AddAssetRequest::from_holding(&holding)).unwrap();
        assert_eq!(body["assetName"], "Apple Inc.");
        assert_eq!(body["symbol"], "AAPL");
        assert_eq!(body["assetType"], "stock");
        assert_eq!(body["Quantity"], 10.0);
        assert_eq!(body["purchaseDate"], "2023-01-15");
        assert_eq!(body["purchasePrice"], 150.25);
        assert_eq!(body["currentPrice"], 175.5);
        assert_eq!(
            body["logoUrl"],
            "https://ui-avatars.com/api/?name=AAPL&background=random&color=fff"
        );
    }

    #[test]
    fn update_body_is_holding_record() {
        let holding = apple();
        let body = serde_json::to_value(&holding).unwrap();
        assert_eq!(body["id"], holding.id.as_str());
        assert_eq!(body["quantity"], 10.0);
        let back: Holding = serde_json::from_value(body).unwrap();
        assert_eq!(back, holding);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Routes
// ═══════════════════════════════════════════════════════════════════

mod routes {
    use super::*;

    #[test]
    fn url_joins_base_and_path() {
        let backend = HttpAssetBackend::new(BackendSettings::default(), "token");
        assert_eq!(
            backend.url("getassets"),
            "https://investment-backend.vercel.app/api/user/getassets"
        );
        assert_eq!(backend.name(), "HttpAssetBackend");
    }

    #[test]
    fn url_tolerates_slashes() {
        let settings = BackendSettings {
            base_url: "http://localhost:4000/api/user/".into(),
            ..BackendSettings::default()
        };
        let backend = HttpAssetBackend::new(settings, "token");
        assert_eq!(
            backend.url("/deleteasset/a1"),
            "http://localhost:4000/api/user/deleteasset/a1"
        );
    }
}
