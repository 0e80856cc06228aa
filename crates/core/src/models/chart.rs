use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Named time range for historical charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeWindow {
    #[serde(rename = "1W")]
    Week,
    #[default]
    #[serde(rename = "1M")]
    Month,
    #[serde(rename = "3M")]
    Quarter,
    #[serde(rename = "1Y")]
    Year,
    #[serde(rename = "ALL")]
    All,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 5] = [
        TimeWindow::Week,
        TimeWindow::Month,
        TimeWindow::Quarter,
        TimeWindow::Year,
        TimeWindow::All,
    ];

    /// Number of daily points covered by this window. "All time" is three years.
    pub fn days(&self) -> u32 {
        match self {
            TimeWindow::Week => 7,
            TimeWindow::Month => 30,
            TimeWindow::Quarter => 90,
            TimeWindow::Year => 365,
            TimeWindow::All => 1095,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            TimeWindow::Week => "1W",
            TimeWindow::Month => "1M",
            TimeWindow::Quarter => "3M",
            TimeWindow::Year => "1Y",
            TimeWindow::All => "ALL",
        }
    }

    /// Short label for window selector buttons.
    pub fn label(&self) -> &'static str {
        match self {
            TimeWindow::All => "All",
            other => other.token(),
        }
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

impl std::str::FromStr for TimeWindow {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "1W" | "WEEK" => Ok(TimeWindow::Week),
            "1M" | "MONTH" => Ok(TimeWindow::Month),
            "3M" | "QUARTER" => Ok(TimeWindow::Quarter),
            "1Y" | "YEAR" => Ok(TimeWindow::Year),
            "ALL" | "ALL-TIME" => Ok(TimeWindow::All),
            _ => Err(CoreError::UnknownToken {
                kind: "time window",
                token: s.to_string(),
            }),
        }
    }
}

/// A single price observation for one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// Aggregate portfolio value on one date.
///
/// The core generates these; the frontend just renders them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// One line of the comparison chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSeries {
    /// "Name (SYMBOL)"
    pub label: String,
    pub symbol: String,
    /// `true` for portfolio holdings, `false` for market indices
    pub is_holding: bool,
    pub color: String,
    pub points: Vec<HistoricalPoint>,
    /// First-to-last price change over the window, in percent
    pub window_return_percent: f64,
}

/// Benchmark index offered next to the user's holdings in comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketIndex {
    pub id: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
}

pub static MARKET_INDICES: [MarketIndex; 4] = [
    MarketIndex { id: "SP500", name: "S&P 500", symbol: "SPX" },
    MarketIndex { id: "NASDAQ", name: "NASDAQ Composite", symbol: "IXIC" },
    MarketIndex { id: "DOW", name: "Dow Jones Industrial Average", symbol: "DJI" },
    MarketIndex { id: "BTCUSD", name: "Bitcoin USD", symbol: "BTCUSD" },
];

impl MarketIndex {
    /// Look up a built-in index by id or symbol (case-insensitive).
    pub fn find(key: &str) -> Option<&'static MarketIndex> {
        MARKET_INDICES
            .iter()
            .find(|i| i.id.eq_ignore_ascii_case(key) || i.symbol.eq_ignore_ascii_case(key))
    }
}
