pub mod backend;
pub mod errors;
pub mod format;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use log::{debug, info};

use backend::traits::AssetBackend;
use errors::CoreError;
use models::{
    analytics::{AllocationMap, AllocationSlice, PortfolioSummary},
    chart::{ComparisonSeries, HistoricalPoint, MarketIndex, PortfolioPoint, TimeWindow},
    holding::{Holding, HoldingDraft, HoldingId},
    portfolio::Portfolio,
    query::{HoldingQuery, SortKey},
    settings::Settings,
};
use services::{
    allocation_service::AllocationService,
    asset_store::AssetStore,
    history_service::{ComparisonTarget, HistoryService},
    metrics_service::MetricsService,
    query_service::QueryService,
};
use storage::manager::StorageManager;

/// Main entry point for the portfolio dashboard core.
///
/// One instance per authenticated session: it owns the session's holdings
/// and keeps the summary and allocation in step with every mutation. Drop
/// it on logout.
#[must_use]
pub struct PortfolioSession {
    store: AssetStore,
    settings: Settings,
    metrics_service: MetricsService,
    allocation_service: AllocationService,
    history_service: HistoryService,
    query_service: QueryService,
    summary: PortfolioSummary,
    allocation: AllocationMap,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for PortfolioSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioSession")
            .field("holdings", &self.store.len())
            .field("settings", &self.settings)
            .field("summary", &self.summary)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl PortfolioSession {
    /// Empty session with default settings.
    pub fn new() -> Self {
        Self::build(AssetStore::new(), Settings::default())
    }

    /// Session over an already-resolved collection (e.g. the backend read).
    pub fn from_holdings(holdings: Vec<Holding>, settings: Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        let store = AssetStore::from_holdings(holdings)?;
        Ok(Self::build(store, settings))
    }

    /// Populate a session once from the backend.
    pub async fn load_from_backend(
        backend: &dyn AssetBackend,
        settings: Settings,
    ) -> Result<Self, CoreError> {
        let holdings = backend.fetch_assets().await?;
        info!("loaded {} holdings from {}", holdings.len(), backend.name());
        Self::from_holdings(holdings, settings)
    }

    /// Restore a session from local snapshot bytes.
    pub fn load_from_bytes(data: &[u8]) -> Result<Self, CoreError> {
        let portfolio = StorageManager::load_from_bytes(data)?;
        Self::from_portfolio(portfolio)
    }

    /// Snapshot the session to bytes. Clears the unsaved-changes flag.
    pub fn save_to_bytes(&mut self) -> Result<Vec<u8>, CoreError> {
        let bytes = StorageManager::save_to_bytes(&self.to_portfolio())?;
        self.dirty = false;
        Ok(bytes)
    }

    /// Restore a session from a snapshot file (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &str) -> Result<Self, CoreError> {
        let portfolio = StorageManager::load_from_file(path)?;
        Self::from_portfolio(portfolio)
    }

    /// Snapshot the session to a file (native only). Clears the unsaved-changes flag.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(&mut self, path: &str) -> Result<(), CoreError> {
        StorageManager::save_to_file(&self.to_portfolio(), path)?;
        self.dirty = false;
        Ok(())
    }

    /// Swap the history service, e.g. to register market data sources or
    /// pin the anchor date.
    pub fn with_history_service(mut self, history_service: HistoryService) -> Self {
        self.history_service = history_service;
        self
    }

    pub fn history_service_mut(&mut self) -> &mut HistoryService {
        &mut self.history_service
    }

    // ── Holding Management ──────────────────────────────────────────

    /// Create a holding locally. Returns its new id.
    pub fn add_holding(&mut self, draft: HoldingDraft) -> Result<HoldingId, CoreError> {
        let id = self.store.add(draft)?;
        self.after_mutation();
        Ok(id)
    }

    /// Edit a holding in place; its id is unchanged.
    pub fn update_holding(&mut self, id: &HoldingId, draft: HoldingDraft) -> Result<(), CoreError> {
        self.store.update(id, draft)?;
        self.after_mutation();
        Ok(())
    }

    /// Remove a holding. Returns the removed record.
    pub fn remove_holding(&mut self, id: &HoldingId) -> Result<Holding, CoreError> {
        let removed = self.store.remove(id)?;
        self.after_mutation();
        Ok(removed)
    }

    /// Create a holding on the backend, then locally with the id the backend
    /// assigned. Nothing changes locally if the backend refuses.
    pub async fn create_remote(
        &mut self,
        backend: &dyn AssetBackend,
        draft: HoldingDraft,
    ) -> Result<HoldingId, CoreError> {
        let holding = Holding::create(draft)?;
        let stored = backend.create_asset(&holding).await?;
        let id = stored.id.clone();
        self.store.insert(stored)?;
        self.after_mutation();
        Ok(id)
    }

    /// Validate an edit, push it to the backend, then apply it locally.
    pub async fn update_remote(
        &mut self,
        backend: &dyn AssetBackend,
        id: &HoldingId,
        draft: HoldingDraft,
    ) -> Result<(), CoreError> {
        let mut updated = self
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::HoldingNotFound(id.to_string()))?;
        updated.apply(draft)?;
        backend.update_asset(&updated).await?;
        self.store.replace(updated)?;
        self.after_mutation();
        Ok(())
    }

    /// Delete on the backend, then locally.
    pub async fn remove_remote(
        &mut self,
        backend: &dyn AssetBackend,
        id: &HoldingId,
    ) -> Result<Holding, CoreError> {
        if !self.store.contains(id) {
            return Err(CoreError::HoldingNotFound(id.to_string()));
        }
        backend.delete_asset(id).await?;
        self.remove_holding(id)
    }

    #[must_use]
    pub fn get_holding(&self, id: &HoldingId) -> Option<&Holding> {
        self.store.get(id)
    }

    /// All holdings in insertion order.
    #[must_use]
    pub fn holdings(&self) -> &[Holding] {
        self.store.holdings()
    }

    #[must_use]
    pub fn holding_count(&self) -> usize {
        self.store.len()
    }

    // ── Metrics & Allocation ────────────────────────────────────────

    /// Portfolio totals as of the last mutation.
    #[must_use]
    pub fn summary(&self) -> PortfolioSummary {
        self.summary
    }

    #[must_use]
    pub fn allocation(&self) -> &AllocationMap {
        &self.allocation
    }

    #[must_use]
    pub fn allocation_slices(&self) -> Vec<AllocationSlice> {
        self.allocation.slices()
    }

    /// The largest holdings by value, as many as the settings allow.
    #[must_use]
    pub fn top_holdings(&self) -> Vec<&Holding> {
        self.metrics_service
            .top_holdings(self.store.holdings(), self.settings.top_holdings_limit)
    }

    // ── Listing ─────────────────────────────────────────────────────

    /// Filtered and sorted view for the holdings list.
    #[must_use]
    pub fn query(&self, query: &HoldingQuery) -> Vec<&Holding> {
        self.query_service.apply(self.store.holdings(), query)
    }

    /// Empty search, all categories, the configured default sort.
    #[must_use]
    pub fn default_query(&self) -> HoldingQuery {
        HoldingQuery::new().sort(self.settings.default_sort)
    }

    // ── Charts ──────────────────────────────────────────────────────

    /// Price history for one holding.
    pub fn holding_series(
        &self,
        id: &HoldingId,
        window: TimeWindow,
    ) -> Result<Vec<HistoricalPoint>, CoreError> {
        let holding = self
            .store
            .get(id)
            .ok_or_else(|| CoreError::HoldingNotFound(id.to_string()))?;
        Ok(self.history_service.asset_series(&holding.symbol, window))
    }

    /// Price history for any symbol, held or not.
    #[must_use]
    pub fn symbol_series(&self, symbol: &str, window: TimeWindow) -> Vec<HistoricalPoint> {
        self.history_service.asset_series(symbol, window)
    }

    /// Aggregate portfolio value over `window`. Empty when there are no holdings.
    #[must_use]
    pub fn portfolio_series(&self, window: TimeWindow) -> Vec<PortfolioPoint> {
        self.history_service
            .portfolio_series(self.store.holdings(), window)
    }

    /// Comparison chart for a selection of holding ids and/or market index
    /// ids (`SP500`, `NASDAQ`, `DOW`, `BTCUSD`), in selection order.
    pub fn compare(
        &self,
        keys: &[&str],
        window: TimeWindow,
    ) -> Result<Vec<ComparisonSeries>, CoreError> {
        let targets = keys
            .iter()
            .map(|key| {
                if let Some(holding) = self.store.get(&HoldingId::from(*key)) {
                    Ok(ComparisonTarget::Holding(holding))
                } else if let Some(index) = MarketIndex::find(key) {
                    Ok(ComparisonTarget::Index(index))
                } else {
                    Err(CoreError::HoldingNotFound((*key).to_string()))
                }
            })
            .collect::<Result<Vec<_>, CoreError>>()?;
        Ok(self.history_service.compare(&targets, window))
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace all settings after validating them.
    pub fn update_settings(&mut self, settings: Settings) -> Result<(), CoreError> {
        settings.validate()?;
        self.settings = settings;
        self.dirty = true;
        Ok(())
    }

    /// Set the display currency (3-letter code, stored uppercase).
    pub fn set_currency(&mut self, currency: &str) -> Result<(), CoreError> {
        let mut settings = self.settings.clone();
        settings.currency = currency.trim().to_uppercase();
        self.update_settings(settings)
    }

    pub fn set_default_window(&mut self, window: TimeWindow) {
        self.settings.default_window = window;
        self.dirty = true;
    }

    pub fn set_default_sort(&mut self, sort: SortKey) {
        self.settings.default_sort = sort;
        self.dirty = true;
    }

    /// Returns `true` if the session has been modified since the last save or load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    /// Export holdings as a JSON array in the backend's record shape.
    pub fn export_holdings_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self.store.holdings())
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize holdings: {e}")))
    }

    // ── Internal ────────────────────────────────────────────────────

    fn from_portfolio(portfolio: Portfolio) -> Result<Self, CoreError> {
        Self::from_holdings(portfolio.holdings, portfolio.settings)
    }

    fn to_portfolio(&self) -> Portfolio {
        Portfolio {
            holdings: self.store.holdings().to_vec(),
            settings: self.settings.clone(),
        }
    }

    fn after_mutation(&mut self) {
        self.dirty = true;
        self.recompute();
    }

    fn recompute(&mut self) {
        let holdings = self.store.holdings();
        self.summary = self.metrics_service.summarize(holdings);
        self.allocation = self.allocation_service.allocate(holdings);
        debug!(
            "recomputed metrics: {} holdings, value {:.2}, {} categories",
            holdings.len(),
            self.summary.total_value,
            self.allocation.len()
        );
    }

    fn build(store: AssetStore, settings: Settings) -> Self {
        let mut session = Self {
            store,
            settings,
            metrics_service: MetricsService::new(),
            allocation_service: AllocationService::new(),
            history_service: HistoryService::default(),
            query_service: QueryService::new(),
            summary: PortfolioSummary::default(),
            allocation: AllocationMap::new(),
            dirty: false,
        };
        session.recompute();
        session
    }
}

impl Default for PortfolioSession {
    fn default() -> Self {
        Self::new()
    }
}
