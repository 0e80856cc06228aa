use chrono::NaiveDate;

use crate::models::chart::{HistoricalPoint, TimeWindow};

/// A source of historical price series.
///
/// Sources are synchronous: anything that needs the network fetches ahead of
/// time and hands the result to a source such as
/// [`StaticHistorySource`](super::static_history::StaticHistorySource), so
/// chart computation never waits on I/O.
pub trait HistorySource: Send + Sync {
    /// Human-readable name of this source (for logs).
    fn name(&self) -> &str;

    /// Whether this source has data for `symbol` (already uppercased).
    fn supports(&self, symbol: &str) -> bool;

    /// Daily points for `symbol` covering `window`, ending the day before
    /// `end`. `None` when the symbol is unknown to this source.
    fn series(
        &self,
        symbol: &str,
        window: TimeWindow,
        end: NaiveDate,
    ) -> Option<Vec<HistoricalPoint>>;
}
