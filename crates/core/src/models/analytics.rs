use serde::{Deserialize, Serialize};

use super::holding::Category;

/// Headline numbers for the whole portfolio. Recomputed from the holdings
/// on demand, never stored on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Σ current_price × quantity
    pub total_value: f64,

    /// Σ purchase_price × quantity
    pub total_cost: f64,

    /// total_value - total_cost
    pub change_amount: f64,

    /// (change_amount / total_cost) × 100, or 0 when total_cost is 0
    pub change_percent: f64,
}

/// Category → aggregate market value, in the order categories were first seen.
///
/// Categories without holdings are absent rather than zero-valued.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationMap {
    entries: Vec<(Category, f64)>,
}

/// One slice of the allocation chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSlice {
    pub category: Category,
    pub label: String,
    pub color: String,
    pub value: f64,
    /// Share of the total in percent; 0 when the total is 0.
    pub percent: f64,
}

impl AllocationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value` to `category`, appending the category if unseen.
    pub fn add(&mut self, category: Category, value: f64) {
        match self.entries.iter_mut().find(|(c, _)| *c == category) {
            Some((_, total)) => *total += value,
            None => self.entries.push((category, value)),
        }
    }

    pub fn get(&self, category: Category) -> Option<f64> {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.entries.iter().map(|(c, _)| *c).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Σ of all category values.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v).sum()
    }

    /// Chart-ready slices with percent of total.
    pub fn slices(&self) -> Vec<AllocationSlice> {
        let total = self.total();
        self.entries
            .iter()
            .map(|(category, value)| AllocationSlice {
                category: *category,
                label: category.display_name().to_string(),
                color: category.color().to_string(),
                value: *value,
                percent: if total > 0.0 { value / total * 100.0 } else { 0.0 },
            })
            .collect()
    }
}
