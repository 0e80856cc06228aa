use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, Utc};
use log::debug;

use crate::models::chart::{
    ComparisonSeries, HistoricalPoint, MarketIndex, PortfolioPoint, TimeWindow,
};
use crate::models::holding::Holding;
use crate::providers::registry::HistorySourceRegistry;

/// Line colours for comparison charts, cycled in selection order.
const COMPARISON_PALETTE: [&str; 6] = [
    "#3366FF", "#8C52FF", "#36D399", "#FFBD49", "#FF5724", "#6B7280",
];

/// Something that can be plotted in the comparison tool.
#[derive(Debug, Clone, Copy)]
pub enum ComparisonTarget<'a> {
    Holding(&'a Holding),
    Index(&'static MarketIndex),
}

/// Generates chart-ready price and value series.
///
/// The core computes all the numbers; the frontend only renders. Series end
/// the day before the anchor date, which defaults to today (UTC).
pub struct HistoryService {
    registry: HistorySourceRegistry,
    anchor: Option<NaiveDate>,
}

impl HistoryService {
    pub fn new(registry: HistorySourceRegistry) -> Self {
        Self {
            registry,
            anchor: None,
        }
    }

    /// Pin the end of every window to `date` instead of today.
    pub fn anchored_at(mut self, date: NaiveDate) -> Self {
        self.anchor = Some(date);
        self
    }

    pub fn set_anchor(&mut self, date: Option<NaiveDate>) {
        self.anchor = date;
    }

    pub fn registry(&self) -> &HistorySourceRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut HistorySourceRegistry {
        &mut self.registry
    }

    pub fn end_date(&self) -> NaiveDate {
        self.anchor.unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Price series for one symbol, oldest first.
    pub fn asset_series(&self, symbol: &str, window: TimeWindow) -> Vec<HistoricalPoint> {
        self.registry.series_for(symbol, window, self.end_date())
    }

    /// Aggregate value series for a set of holdings.
    ///
    /// For every date present in any holding's series, sums
    /// `price × quantity` over all holdings. A holding with no point on a
    /// date contributes 0 to that date; the date itself is kept. Each symbol
    /// is fetched once per call and shared by every lot of it.
    pub fn portfolio_series(&self, holdings: &[Holding], window: TimeWindow) -> Vec<PortfolioPoint> {
        if holdings.is_empty() {
            return Vec::new();
        }

        let end = self.end_date();
        let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        let mut by_symbol: HashMap<String, Vec<HistoricalPoint>> = HashMap::new();

        for holding in holdings {
            let series = by_symbol
                .entry(holding.symbol.trim().to_uppercase())
                .or_insert_with_key(|symbol| self.registry.series_for(symbol, window, end));
            for point in series.iter() {
                let contribution = point.price * holding.quantity;
                let slot = by_date.entry(point.date).or_insert(0.0);
                if contribution.is_finite() {
                    *slot += contribution;
                }
            }
        }

        debug!(
            "portfolio series for {} holdings ({} symbols) over {window}: {} points",
            holdings.len(),
            by_symbol.len(),
            by_date.len()
        );

        by_date
            .into_iter()
            .map(|(date, value)| PortfolioPoint { date, value })
            .collect()
    }

    /// Series for several holdings and/or market indices over one window.
    /// Indices have no data of their own and use the default series.
    pub fn compare(
        &self,
        targets: &[ComparisonTarget<'_>],
        window: TimeWindow,
    ) -> Vec<ComparisonSeries> {
        let end = self.end_date();
        targets
            .iter()
            .enumerate()
            .map(|(i, target)| {
                let (label, symbol, is_holding, points) = match target {
                    ComparisonTarget::Holding(h) => (
                        format!("{} ({})", h.name, h.symbol),
                        h.symbol.clone(),
                        true,
                        self.registry.series_for(&h.symbol, window, end),
                    ),
                    ComparisonTarget::Index(index) => (
                        format!("{} ({})", index.name, index.symbol),
                        index.symbol.to_string(),
                        false,
                        self.registry.default_series(window, end),
                    ),
                };
                ComparisonSeries {
                    label,
                    symbol,
                    is_holding,
                    color: COMPARISON_PALETTE[i % COMPARISON_PALETTE.len()].to_string(),
                    window_return_percent: window_return(&points),
                    points,
                }
            })
            .collect()
    }
}

impl Default for HistoryService {
    fn default() -> Self {
        Self::new(HistorySourceRegistry::new_with_defaults())
    }
}

/// First-to-last change in percent; 0 for short series or a zero start.
pub fn window_return(points: &[HistoricalPoint]) -> f64 {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if first.price > 0.0 => {
            (last.price - first.price) / first.price * 100.0
        }
        _ => 0.0,
    }
}
