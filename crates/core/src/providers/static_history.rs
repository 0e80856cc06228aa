use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use super::traits::HistorySource;
use crate::models::chart::{HistoricalPoint, TimeWindow};

/// Price history supplied by the integrator (fetched market data, imports,
/// fixtures). Points are kept sorted by date, one per day.
#[derive(Debug, Clone, Default)]
pub struct StaticHistorySource {
    name: String,
    series: HashMap<(String, TimeWindow), Vec<HistoricalPoint>>,
}

impl StaticHistorySource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            series: HashMap::new(),
        }
    }

    /// Store the series for (symbol, window). Points are sorted by date; for
    /// duplicate dates the last one given wins.
    pub fn insert(&mut self, symbol: &str, window: TimeWindow, points: Vec<HistoricalPoint>) {
        let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for point in points {
            by_date.insert(point.date, point.price);
        }
        let sorted = by_date
            .into_iter()
            .map(|(date, price)| HistoricalPoint { date, price })
            .collect();
        self.series
            .insert((symbol.trim().to_uppercase(), window), sorted);
    }

    pub fn with_series(
        mut self,
        symbol: &str,
        window: TimeWindow,
        points: Vec<HistoricalPoint>,
    ) -> Self {
        self.insert(symbol, window, points);
        self
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl HistorySource for StaticHistorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports(&self, symbol: &str) -> bool {
        self.series.keys().any(|(s, _)| s == symbol)
    }

    /// Stored points are returned as-is; `end` is ignored because the data
    /// was captured for a specific window already.
    fn series(
        &self,
        symbol: &str,
        window: TimeWindow,
        _end: NaiveDate,
    ) -> Option<Vec<HistoricalPoint>> {
        self.series.get(&(symbol.to_string(), window)).cloned()
    }
}
