use std::collections::HashSet;

use log::debug;

use crate::errors::CoreError;
use crate::models::holding::{Holding, HoldingDraft, HoldingId};

/// The current collection of holdings for one session.
///
/// Every record passes [`Holding::validate`] before it gets in, and ids are
/// unique at all times. No I/O here; persistence is the caller's job.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetStore {
    holdings: Vec<Holding>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from an already-resolved collection (backend read,
    /// snapshot load). Records are normalized first; the whole batch is
    /// rejected if any record is invalid or an id repeats.
    pub fn from_holdings(mut holdings: Vec<Holding>) -> Result<Self, CoreError> {
        let mut seen = HashSet::with_capacity(holdings.len());
        for holding in &mut holdings {
            holding.normalize();
            holding.validate()?;
            if !seen.insert(holding.id.clone()) {
                return Err(CoreError::DuplicateHolding(holding.id.to_string()));
            }
        }
        debug!("asset store populated with {} holdings", holdings.len());
        Ok(Self { holdings })
    }

    /// Create a holding from user input, assigning a fresh id.
    pub fn add(&mut self, draft: HoldingDraft) -> Result<HoldingId, CoreError> {
        let holding = Holding::create(draft)?;
        let id = holding.id.clone();
        self.insert(holding)?;
        Ok(id)
    }

    /// Insert a fully-formed holding (e.g. one echoed back by the backend).
    pub fn insert(&mut self, mut holding: Holding) -> Result<(), CoreError> {
        holding.normalize();
        holding.validate()?;
        if self.contains(&holding.id) {
            return Err(CoreError::DuplicateHolding(holding.id.to_string()));
        }
        debug!("adding holding {} ({})", holding.id, holding.symbol);
        self.holdings.push(holding);
        Ok(())
    }

    /// Edit a holding in place; id and position are preserved.
    pub fn update(&mut self, id: &HoldingId, draft: HoldingDraft) -> Result<(), CoreError> {
        let holding = self
            .holdings
            .iter_mut()
            .find(|h| &h.id == id)
            .ok_or_else(|| CoreError::HoldingNotFound(id.to_string()))?;
        holding.apply(draft)?;
        debug!("updated holding {id}");
        Ok(())
    }

    /// Replace a holding with a full record carrying the same id.
    pub fn replace(&mut self, mut holding: Holding) -> Result<(), CoreError> {
        holding.normalize();
        holding.validate()?;
        let slot = self
            .holdings
            .iter_mut()
            .find(|h| h.id == holding.id)
            .ok_or_else(|| CoreError::HoldingNotFound(holding.id.to_string()))?;
        *slot = holding;
        Ok(())
    }

    /// Remove a holding by id. Removal is final.
    pub fn remove(&mut self, id: &HoldingId) -> Result<Holding, CoreError> {
        let idx = self
            .holdings
            .iter()
            .position(|h| &h.id == id)
            .ok_or_else(|| CoreError::HoldingNotFound(id.to_string()))?;
        debug!("removing holding {id}");
        Ok(self.holdings.remove(idx))
    }

    pub fn get(&self, id: &HoldingId) -> Option<&Holding> {
        self.holdings.iter().find(|h| &h.id == id)
    }

    pub fn contains(&self, id: &HoldingId) -> bool {
        self.holdings.iter().any(|h| &h.id == id)
    }

    /// Holdings whose symbol matches (case-insensitive).
    pub fn find_by_symbol(&self, symbol: &str) -> Vec<&Holding> {
        let upper = symbol.trim().to_uppercase();
        self.holdings.iter().filter(|h| h.symbol == upper).collect()
    }

    /// Read-only snapshot in insertion order.
    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    pub fn into_holdings(self) -> Vec<Holding> {
        self.holdings
    }
}
