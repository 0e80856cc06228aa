use crate::models::analytics::AllocationMap;
use crate::models::holding::Holding;

/// Groups holdings by category and sums their market value.
pub struct AllocationService;

impl AllocationService {
    pub fn new() -> Self {
        Self
    }

    /// Category → Σ market value, in first-seen order. Only categories with
    /// at least one holding appear.
    pub fn allocate(&self, holdings: &[Holding]) -> AllocationMap {
        let mut allocation = AllocationMap::new();
        for holding in holdings {
            let value = holding.market_value();
            allocation.add(holding.category, if value.is_finite() { value } else { 0.0 });
        }
        allocation
    }
}

impl Default for AllocationService {
    fn default() -> Self {
        Self::new()
    }
}
