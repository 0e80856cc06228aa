use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use super::traits::AssetBackend;
use crate::errors::CoreError;
use crate::models::holding::{Holding, HoldingId};
use crate::models::settings::BackendSettings;

/// Fallback message when the service rejects a call without saying why.
const GENERIC_FAILURE: &str = "Server error occurred.";

/// JSON-over-HTTP client for the dashboard's asset service.
///
/// - **Auth**: `Authorization: Bearer <token>` on every call.
/// - **Replies**: `{ "status": bool, "message"?: string, "data"?: T }`;
///   `status: false` or a non-2xx code becomes [`CoreError::Api`].
pub struct HttpAssetBackend {
    client: Client,
    settings: BackendSettings,
    token: String,
}

impl HttpAssetBackend {
    pub fn new(settings: BackendSettings, token: impl Into<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            settings,
            token: token.into(),
        }
    }

    /// Full URL for a route, tolerating stray slashes in settings.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.settings.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn finish<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        action: &str,
    ) -> Result<Option<T>, CoreError> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        parse_envelope(status, &body, action)
    }
}

/// Decode a service reply.
///
/// Returns the `data` payload (if any) when both the HTTP status and the
/// envelope's `status` flag report success.
pub fn parse_envelope<T: DeserializeOwned>(
    http_status: u16,
    body: &str,
    action: &str,
) -> Result<Option<T>, CoreError> {
    let success = (200..300).contains(&http_status);
    let envelope: Envelope<T> = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) if success => {
            return Err(CoreError::Deserialization(format!(
                "Unexpected reply to {action}: {e}"
            )))
        }
        Err(_) => {
            return Err(CoreError::Api {
                status: http_status,
                message: GENERIC_FAILURE.to_string(),
            })
        }
    };

    if !success || !envelope.status {
        let message = envelope
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE.to_string());
        warn!("{action} rejected ({http_status}): {message}");
        return Err(CoreError::Api {
            status: http_status,
            message,
        });
    }

    Ok(envelope.data)
}

// ── Service request/response types ──────────────────────────────────

#[derive(Deserialize)]
struct Envelope<T> {
    status: bool,
    message: Option<String>,
    data: Option<T>,
}

/// Body of the "add asset" call, in the service's own field names.
#[derive(Debug, Serialize)]
pub struct AddAssetRequest<'a> {
    #[serde(rename = "assetName")]
    pub asset_name: &'a str,
    pub symbol: &'a str,
    #[serde(rename = "assetType")]
    pub asset_type: &'a str,
    #[serde(rename = "Quantity")]
    pub quantity: f64,
    #[serde(rename = "purchaseDate")]
    pub purchase_date: String,
    #[serde(rename = "currentPrice")]
    pub current_price: f64,
    #[serde(rename = "purchasePrice")]
    pub purchase_price: f64,
    #[serde(rename = "logoUrl")]
    pub logo_url: String,
}

impl<'a> AddAssetRequest<'a> {
    pub fn from_holding(holding: &'a Holding) -> Self {
        Self {
            asset_name: &holding.name,
            symbol: &holding.symbol,
            asset_type: holding.category.token(),
            quantity: holding.quantity,
            purchase_date: holding.purchase_date.format("%Y-%m-%d").to_string(),
            current_price: holding.current_price,
            purchase_price: holding.purchase_price,
            logo_url: holding.logo(),
        }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AssetBackend for HttpAssetBackend {
    fn name(&self) -> &str {
        "HttpAssetBackend"
    }

    async fn fetch_assets(&self) -> Result<Vec<Holding>, CoreError> {
        let url = self.url(&self.settings.assets_path);
        debug!("fetching assets from {url}");
        let response = self.client.get(&url).bearer_auth(&self.token).send().await?;
        let assets: Option<Vec<Holding>> = self.finish(response, "fetch assets").await?;
        Ok(assets.unwrap_or_default())
    }

    async fn create_asset(&self, holding: &Holding) -> Result<Holding, CoreError> {
        let url = self.url(&self.settings.add_path);
        debug!("creating asset {} at {url}", holding.symbol);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&AddAssetRequest::from_holding(holding))
            .send()
            .await?;
        let stored: Option<Holding> = self.finish(response, "add asset").await?;
        // The service may acknowledge without echoing the record.
        Ok(stored.unwrap_or_else(|| holding.clone()))
    }

    async fn update_asset(&self, holding: &Holding) -> Result<(), CoreError> {
        let url = self.url(&format!("{}/{}", self.settings.update_path, holding.id));
        debug!("updating asset {} at {url}", holding.id);
        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.token)
            .json(holding)
            .send()
            .await?;
        self.finish::<serde_json::Value>(response, "update asset").await?;
        Ok(())
    }

    async fn delete_asset(&self, id: &HoldingId) -> Result<(), CoreError> {
        let url = self.url(&format!("{}/{}", self.settings.delete_path, id));
        debug!("deleting asset {id} at {url}");
        let response = self.client.delete(&url).bearer_auth(&self.token).send().await?;
        self.finish::<serde_json::Value>(response, "delete asset").await?;
        Ok(())
    }
}
