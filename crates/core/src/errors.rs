use thiserror::Error;

/// Unified error type for the entire portfolio-dashboard-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Business Logic ──────────────────────────────────────────────
    #[error("Holding validation failed: {0}")]
    Validation(String),

    #[error("Holding not found: {0}")]
    HoldingNotFound(String),

    #[error("Duplicate holding id: {0}")]
    DuplicateHolding(String),

    #[error("Unknown {kind} '{token}'")]
    UnknownToken { kind: &'static str, token: String },

    // ── Snapshot / File ─────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Unsupported snapshot version: {0}")]
    UnsupportedVersion(u16),

    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── Backend / Network ───────────────────────────────────────────
    #[error("Backend rejected request ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),
}

// ── Conversions ─────────────────────────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(format!("{} ({:?})", e, e.kind()))
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(format!("line {} column {}: {e}", e.line(), e.column()))
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // The request URL can carry the session token; never echo it.
        if e.is_timeout() {
            return CoreError::Network("request to the asset service timed out".into());
        }
        match e.status() {
            Some(status) => CoreError::Api {
                status: status.as_u16(),
                message: e.without_url().to_string(),
            },
            None => CoreError::Network(e.without_url().to_string()),
        }
    }
}
