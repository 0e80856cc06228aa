use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::traits::HistorySource;
use crate::models::chart::{HistoricalPoint, TimeWindow};

/// Price band a synthetic series oscillates in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBand {
    pub min: f64,
    pub max: f64,
}

impl PriceBand {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Placeholder price history: noise around the middle of a per-symbol band,
/// with a slight upward drift.
///
/// Unseeded sources draw fresh entropy on every call. Seeded sources are
/// reproducible per (symbol, window, end date).
#[derive(Debug, Clone)]
pub struct SyntheticHistorySource {
    bands: HashMap<(String, TimeWindow), PriceBand>,
    default_bands: HashMap<TimeWindow, PriceBand>,
    seed: Option<u64>,
}

/// (symbol, [1W, 1M, 3M, 1Y, ALL] bands)
const BUILTIN_BANDS: &[(&str, [(f64, f64); 5])] = &[
    ("AAPL", [(165.0, 170.0), (150.0, 170.0), (145.0, 175.0), (130.0, 180.0), (100.0, 180.0)]),
    ("TSLA", [(220.0, 230.0), (210.0, 240.0), (200.0, 250.0), (180.0, 300.0), (150.0, 350.0)]),
    ("BTC", [
        (60_000.0, 63_000.0),
        (55_000.0, 63_000.0),
        (45_000.0, 65_000.0),
        (35_000.0, 65_000.0),
        (20_000.0, 65_000.0),
    ]),
    ("ETH", [(2400.0, 2500.0), (2200.0, 2500.0), (2000.0, 2600.0), (1800.0, 2600.0), (1000.0, 2600.0)]),
    ("VOO", [(400.0, 410.0), (390.0, 410.0), (380.0, 410.0), (360.0, 410.0), (300.0, 410.0)]),
];

const DEFAULT_BANDS: [(f64, f64); 5] =
    [(90.0, 110.0), (80.0, 120.0), (70.0, 130.0), (60.0, 140.0), (50.0, 150.0)];

impl SyntheticHistorySource {
    /// Empty source: knows no symbols, default bands only.
    pub fn new() -> Self {
        let default_bands = TimeWindow::ALL
            .iter()
            .zip(DEFAULT_BANDS)
            .map(|(w, (min, max))| (*w, PriceBand::new(min, max)))
            .collect();
        Self {
            bands: HashMap::new(),
            default_bands,
            seed: None,
        }
    }

    /// Source pre-loaded with the built-in symbol bands.
    pub fn with_defaults() -> Self {
        let mut source = Self::new();
        for (symbol, bands) in BUILTIN_BANDS {
            for (window, (min, max)) in TimeWindow::ALL.iter().zip(bands) {
                source.set_band(symbol, *window, PriceBand::new(*min, *max));
            }
        }
        source
    }

    /// Make generation reproducible.
    pub fn seeded(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn set_band(&mut self, symbol: &str, window: TimeWindow, band: PriceBand) {
        self.bands.insert((symbol.trim().to_uppercase(), window), band);
    }

    pub fn band_for(&self, symbol: &str, window: TimeWindow) -> Option<PriceBand> {
        self.bands.get(&(symbol.to_uppercase(), window)).copied()
    }

    /// Series used when no source knows a symbol.
    pub fn default_series(&self, window: TimeWindow, end: NaiveDate) -> Vec<HistoricalPoint> {
        let band = self
            .default_bands
            .get(&window)
            .copied()
            .unwrap_or(PriceBand::new(DEFAULT_BANDS[0].0, DEFAULT_BANDS[0].1));
        let mut rng = self.rng_for("", window, end);
        generate(window.days(), band, end, &mut rng)
    }

    fn rng_for(&self, symbol: &str, window: TimeWindow, end: NaiveDate) -> StdRng {
        match self.seed {
            Some(seed) => {
                let key = format!("{symbol}|{window}|{end}");
                let mixed = key.bytes().fold(seed ^ 0xcbf2_9ce4_8422_2325, |acc, b| {
                    (acc ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
                });
                StdRng::seed_from_u64(mixed)
            }
            None => StdRng::from_entropy(),
        }
    }
}

impl Default for SyntheticHistorySource {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl HistorySource for SyntheticHistorySource {
    fn name(&self) -> &str {
        "Synthetic"
    }

    fn supports(&self, symbol: &str) -> bool {
        self.bands.keys().any(|(s, _)| s == symbol)
    }

    fn series(
        &self,
        symbol: &str,
        window: TimeWindow,
        end: NaiveDate,
    ) -> Option<Vec<HistoricalPoint>> {
        let band = self.band_for(symbol, window)?;
        let mut rng = self.rng_for(symbol, window, end);
        Some(generate(window.days(), band, end, &mut rng))
    }
}

/// One point per day for the `days` days before `end`, oldest first.
///
/// price = mid + (range / 4) × u × noise × trend, with u ∈ [-1, 1),
/// noise ∈ [0.8, 1.2) and trend rising linearly from 1.0 to 1.2.
fn generate(days: u32, band: PriceBand, end: NaiveDate, rng: &mut StdRng) -> Vec<HistoricalPoint> {
    let range = band.max - band.min;
    let mid = band.min + range / 2.0;
    let volatility = range / 4.0;

    (0..days)
        .filter_map(|i| {
            let date = end.checked_sub_days(Days::new(u64::from(days - i)))?;
            let noise = 0.8 + rng.gen::<f64>() * 0.4;
            let trend = 1.0 + (f64::from(i) / f64::from(days)) * 0.2;
            let swing = rng.gen::<f64>() * 2.0 - 1.0;
            let price = mid + volatility * swing * noise * trend;
            Some(HistoricalPoint {
                date,
                price: (price * 100.0).round() / 100.0,
            })
        })
        .collect()
}
