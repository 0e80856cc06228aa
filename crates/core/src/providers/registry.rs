use chrono::NaiveDate;
use log::debug;

use super::synthetic::SyntheticHistorySource;
use super::traits::HistorySource;
use crate::models::chart::{HistoricalPoint, TimeWindow};

/// Ordered list of history sources plus the fallback used for unknown symbols.
///
/// Sources are asked in registration order; the first one that knows the
/// symbol answers. New sources can be added without touching the callers.
pub struct HistorySourceRegistry {
    sources: Vec<Box<dyn HistorySource>>,
    fallback: SyntheticHistorySource,
}

impl HistorySourceRegistry {
    /// Registry with no sources; every symbol gets the fallback series.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            fallback: SyntheticHistorySource::new(),
        }
    }

    /// Registry with the built-in synthetic bands registered.
    pub fn new_with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(SyntheticHistorySource::with_defaults()));
        registry
    }

    /// Replace the fallback generator (e.g. with a seeded one).
    pub fn with_fallback(mut self, fallback: SyntheticHistorySource) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn register(&mut self, source: Box<dyn HistorySource>) {
        self.sources.push(source);
    }

    /// Names of registered sources, in priority order.
    pub fn source_names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name().to_string()).collect()
    }

    /// The first source that knows `symbol`, if any.
    pub fn source_for(&self, symbol: &str) -> Option<&dyn HistorySource> {
        let upper = symbol.trim().to_uppercase();
        self.sources
            .iter()
            .find(|s| s.supports(&upper))
            .map(|s| s.as_ref())
    }

    /// Series for `symbol`, falling back to the default series. The result is
    /// always sorted by date with at most one point per day.
    pub fn series_for(
        &self,
        symbol: &str,
        window: TimeWindow,
        end: NaiveDate,
    ) -> Vec<HistoricalPoint> {
        let upper = symbol.trim().to_uppercase();
        let found = self
            .sources
            .iter()
            .find_map(|s| s.series(&upper, window, end));

        let points = match found {
            Some(points) => points,
            None => {
                debug!("no history source for {upper} ({window}), using default series");
                self.fallback.default_series(window, end)
            }
        };
        normalize(points)
    }

    /// The series used for unknown symbols and market indices.
    pub fn default_series(&self, window: TimeWindow, end: NaiveDate) -> Vec<HistoricalPoint> {
        normalize(self.fallback.default_series(window, end))
    }
}

impl Default for HistorySourceRegistry {
    fn default() -> Self {
        Self::new_with_defaults()
    }
}

/// Sort by date and drop repeated dates (first occurrence kept).
fn normalize(mut points: Vec<HistoricalPoint>) -> Vec<HistoricalPoint> {
    points.sort_by_key(|p| p.date);
    points.dedup_by_key(|p| p.date);
    points
}
