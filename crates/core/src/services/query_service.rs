use std::cmp::Ordering;

use crate::models::holding::Holding;
use crate::models::query::{HoldingQuery, SortKey};

/// Search, filter and sort over a read-only holdings snapshot.
pub struct QueryService;

impl QueryService {
    pub fn new() -> Self {
        Self
    }

    /// Apply `query` and return the matching holdings in display order.
    ///
    /// The search term (case-insensitive, matched as typed) must occur in the
    /// name or the symbol; the category filter must match. Sorting is stable, so
    /// ties keep their input order. The input slice is never reordered.
    pub fn apply<'a>(&self, holdings: &'a [Holding], query: &HoldingQuery) -> Vec<&'a Holding> {
        let term = query.search.to_lowercase();

        let mut matched: Vec<&Holding> = holdings
            .iter()
            .filter(|h| {
                term.is_empty()
                    || h.name.to_lowercase().contains(&term)
                    || h.symbol.to_lowercase().contains(&term)
            })
            .filter(|h| query.category.matches(h.category))
            .collect();

        match query.sort {
            SortKey::NameAsc => matched.sort_by(|a, b| compare_names(a, b)),
            SortKey::NameDesc => matched.sort_by(|a, b| compare_names(b, a)),
            SortKey::ValueAsc => {
                matched.sort_by(|a, b| a.market_value().total_cmp(&b.market_value()))
            }
            SortKey::ValueDesc => {
                matched.sort_by(|a, b| b.market_value().total_cmp(&a.market_value()))
            }
            SortKey::ProfitAsc => {
                matched.sort_by(|a, b| profit_sort_key(a).total_cmp(&profit_sort_key(b)))
            }
            SortKey::ProfitDesc => {
                matched.sort_by(|a, b| profit_sort_key(b).total_cmp(&profit_sort_key(a)))
            }
        }

        matched
    }
}

impl Default for QueryService {
    fn default() -> Self {
        Self::new()
    }
}

/// Case-insensitive name order.
fn compare_names(a: &Holding, b: &Holding) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

/// Percentage gain used for ordering.
///
/// A zero purchase price has no finite percentage: a holding bought for
/// nothing that is now worth something ranks as an unbounded gain (+∞), and
/// one that is still worth nothing ranks as 0.
pub fn profit_sort_key(holding: &Holding) -> f64 {
    if holding.purchase_price > 0.0 {
        (holding.current_price - holding.purchase_price) / holding.purchase_price * 100.0
    } else if holding.current_price > 0.0 {
        f64::INFINITY
    } else {
        0.0
    }
}
