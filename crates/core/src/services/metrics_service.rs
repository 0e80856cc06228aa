use crate::models::analytics::PortfolioSummary;
use crate::models::holding::Holding;

/// Computes portfolio-level value, cost basis and gain/loss.
///
/// Pure functions of the holdings slice: no state, no I/O.
pub struct MetricsService;

impl MetricsService {
    pub fn new() -> Self {
        Self
    }

    /// Summarize a holdings snapshot.
    ///
    /// - `total_value  = Σ current_price × quantity`
    /// - `total_cost   = Σ purchase_price × quantity`
    /// - `change_amount = total_value - total_cost`
    /// - `change_percent = change_amount / total_cost × 100` (0 if no cost)
    ///
    /// An empty slice yields all zeros.
    pub fn summarize(&self, holdings: &[Holding]) -> PortfolioSummary {
        let total_value = non_negative(holdings.iter().map(Holding::market_value).sum());
        let total_cost = non_negative(holdings.iter().map(Holding::cost_basis).sum());

        let change_amount = finite_or_zero(total_value - total_cost);
        let change_percent = if total_cost > 0.0 {
            finite_or_zero(change_amount / total_cost * 100.0)
        } else {
            0.0
        };

        PortfolioSummary {
            total_value,
            total_cost,
            change_amount,
            change_percent,
        }
    }

    /// The `limit` largest holdings by market value, largest first.
    /// Equal values keep their original order.
    pub fn top_holdings<'a>(&self, holdings: &'a [Holding], limit: usize) -> Vec<&'a Holding> {
        let mut ranked: Vec<&Holding> = holdings.iter().collect();
        ranked.sort_by(|a, b| b.market_value().total_cmp(&a.market_value()));
        ranked.truncate(limit);
        ranked
    }
}

impl Default for MetricsService {
    fn default() -> Self {
        Self::new()
    }
}

/// Totals shown to the user must never be NaN or negative.
fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
