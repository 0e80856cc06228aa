use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::portfolio::Portfolio;

/// Tag identifying a portfolio snapshot document.
pub const FORMAT_TAG: &str = "portfolio-dashboard-snapshot";

/// Current snapshot format version.
pub const CURRENT_VERSION: u16 = 1;

/// Header fields of a snapshot, read before the body is trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotHeader {
    pub format: String,
    pub version: u16,
    pub saved_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct DocumentRef<'a> {
    #[serde(flatten)]
    header: SnapshotHeader,
    portfolio: &'a Portfolio,
}

#[derive(Deserialize)]
struct RawDocument {
    #[serde(flatten)]
    header: SnapshotHeader,
    portfolio: serde_json::Value,
}

/// Write a snapshot document as pretty-printed JSON.
///
/// Layout:
/// ```text
/// { "format": "portfolio-dashboard-snapshot", "version": 1,
///   "saved_at": "<RFC 3339>", "portfolio": { "holdings": [...], "settings": {...} } }
/// ```
pub fn write_document(portfolio: &Portfolio, saved_at: DateTime<Utc>) -> Result<Vec<u8>, CoreError> {
    let doc = DocumentRef {
        header: SnapshotHeader {
            format: FORMAT_TAG.to_string(),
            version: CURRENT_VERSION,
            saved_at,
        },
        portfolio,
    };
    serde_json::to_vec_pretty(&doc)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize snapshot: {e}")))
}

/// Parse and check a snapshot document. Returns the header and the portfolio.
pub fn read_document(data: &[u8]) -> Result<(SnapshotHeader, Portfolio), CoreError> {
    if data.iter().all(u8::is_ascii_whitespace) {
        return Err(CoreError::InvalidSnapshot("empty document".into()));
    }

    let raw: RawDocument = serde_json::from_slice(data)
        .map_err(|e| CoreError::InvalidSnapshot(format!("not a snapshot document: {e}")))?;

    if raw.header.format != FORMAT_TAG {
        return Err(CoreError::InvalidSnapshot(format!(
            "unexpected format tag '{}'",
            raw.header.format
        )));
    }
    if raw.header.version == 0 || raw.header.version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedVersion(raw.header.version));
    }

    let portfolio: Portfolio = serde_json::from_value(raw.portfolio)
        .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize portfolio: {e}")))?;

    Ok((raw.header, portfolio))
}
