use chrono::Utc;
use log::info;

use crate::errors::CoreError;
use crate::models::portfolio::Portfolio;
use crate::services::asset_store::AssetStore;

use super::format;

/// Save/load a session's portfolio to/from a local JSON snapshot.
pub struct StorageManager;

impl StorageManager {
    /// Serialize a portfolio to snapshot bytes.
    pub fn save_to_bytes(portfolio: &Portfolio) -> Result<Vec<u8>, CoreError> {
        format::write_document(portfolio, Utc::now())
    }

    /// Parse snapshot bytes back into a portfolio.
    ///
    /// Flow: JSON → header check → portfolio → holding and settings validation.
    pub fn load_from_bytes(data: &[u8]) -> Result<Portfolio, CoreError> {
        let (header, portfolio) = format::read_document(data)?;

        // Same admission rules as live edits.
        let store = AssetStore::from_holdings(portfolio.holdings)?;
        portfolio.settings.validate()?;

        info!(
            "loaded snapshot v{} saved at {} ({} holdings)",
            header.version,
            header.saved_at,
            store.len()
        );

        Ok(Portfolio {
            holdings: store.into_holdings(),
            settings: portfolio.settings,
        })
    }

    /// Save a snapshot file on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(portfolio: &Portfolio, path: &str) -> Result<(), CoreError> {
        let bytes = Self::save_to_bytes(portfolio)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Load a snapshot file from disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &str) -> Result<Portfolio, CoreError> {
        let bytes = std::fs::read(path)?;
        Self::load_from_bytes(&bytes)
    }
}
