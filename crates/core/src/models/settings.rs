use serde::{Deserialize, Serialize};

use super::chart::TimeWindow;
use super::query::SortKey;
use crate::errors::CoreError;

/// Session-level preferences. Travels inside the local snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Currency code used when formatting values (e.g., "USD", "EUR").
    pub currency: String,

    /// Window preselected on the dashboard chart.
    #[serde(default)]
    pub default_window: TimeWindow,

    /// Sort order preselected on the holdings list.
    #[serde(default)]
    pub default_sort: SortKey,

    /// How many holdings the "top holdings" panel shows.
    #[serde(default = "default_top_holdings_limit")]
    pub top_holdings_limit: usize,

    #[serde(default)]
    pub backend: BackendSettings,
}

fn default_top_holdings_limit() -> usize {
    5
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            default_window: TimeWindow::default(),
            default_sort: SortKey::default(),
            top_holdings_limit: default_top_holdings_limit(),
            backend: BackendSettings::default(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), CoreError> {
        let code = self.currency.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CoreError::Validation(format!(
                "Invalid currency code '{}': must be exactly 3 ASCII letters (e.g., USD, EUR)",
                self.currency
            )));
        }
        if self.top_holdings_limit == 0 {
            return Err(CoreError::Validation(
                "Top holdings limit must be at least 1".into(),
            ));
        }
        if self.backend.base_url.trim().is_empty() {
            return Err(CoreError::Validation("Backend base URL must not be empty".into()));
        }
        Ok(())
    }
}

/// Where the asset service lives and which routes it exposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendSettings {
    pub base_url: String,
    pub assets_path: String,
    pub add_path: String,
    pub update_path: String,
    pub delete_path: String,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "https://investment-backend.vercel.app/api/user".to_string(),
            assets_path: "getassets".to_string(),
            add_path: "addasset".to_string(),
            update_path: "updateasset".to_string(),
            delete_path: "deleteasset".to_string(),
        }
    }
}
