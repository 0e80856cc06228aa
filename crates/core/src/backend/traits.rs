use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::holding::{Holding, HoldingId};

/// The remote asset service a session is loaded from and pushes edits to.
///
/// Implementations own transport and authentication; the core only sees
/// resolved collections or a [`CoreError`] carrying a human-readable message.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait AssetBackend: Send + Sync {
    /// Human-readable name of this backend (for logs/errors).
    fn name(&self) -> &str;

    /// The full current collection for the authenticated user.
    async fn fetch_assets(&self) -> Result<Vec<Holding>, CoreError>;

    /// Persist a new holding. Returns the stored record, whose id may differ
    /// from the locally generated one.
    async fn create_asset(&self, holding: &Holding) -> Result<Holding, CoreError>;

    /// Persist an edited holding.
    async fn update_asset(&self, holding: &Holding) -> Result<(), CoreError>;

    /// Delete a holding by id.
    async fn delete_asset(&self, id: &HoldingId) -> Result<(), CoreError>;
}
