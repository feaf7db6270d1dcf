//! Indicator frame assembly.

use tracing::debug;

use crate::config::AnalysisConfig;
use crate::error::{AppError, Result};
use crate::services::analysis::indicators::{BollingerBands, Ema, Macd, Rsi, Volatility};
use crate::services::analysis::round2;
use crate::types::{Candle, IndicatorSnapshot};

/// Minimum candles before any indicator frame is produced.
pub const MIN_CANDLES: usize = 50;

/// One fully-populated indicator observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorRow {
    /// Unix timestamp in milliseconds.
    pub time: i64,
    pub close: f64,
    pub volume: f64,
    pub rsi: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub macd_histogram: f64,
    pub bb_upper: f64,
    pub bb_middle: f64,
    pub bb_lower: f64,
    /// Band width relative to the middle band.
    pub bb_width: f64,
    /// Price position within the bands, 0 at lower and 1 at upper.
    pub bb_position: f64,
    pub ema_short: f64,
    pub ema_long: f64,
    /// Rolling stdev of percentage returns, in percent.
    pub volatility: f64,
}

impl IndicatorRow {
    /// Rounded wire-format view of this row.
    pub fn snapshot(&self) -> IndicatorSnapshot {
        IndicatorSnapshot {
            rsi: round2(self.rsi),
            macd: round2(self.macd),
            macd_signal: round2(self.macd_signal),
            macd_histogram: round2(self.macd_histogram),
            bb_upper: round2(self.bb_upper),
            bb_middle: round2(self.bb_middle),
            bb_lower: round2(self.bb_lower),
            bb_width: round2(self.bb_width),
            bb_position: round2(self.bb_position),
            ema_short: round2(self.ema_short),
            ema_long: round2(self.ema_long),
            volatility: round2(self.volatility),
            price: round2(self.close),
            volume: round2(self.volume),
        }
    }

    fn is_complete(&self) -> bool {
        [
            self.rsi,
            self.macd,
            self.macd_signal,
            self.macd_histogram,
            self.bb_upper,
            self.bb_middle,
            self.bb_lower,
            self.bb_width,
            self.bb_position,
            self.ema_short,
            self.ema_long,
            self.volatility,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Per-candle indicator rows with the NaN warm-up head removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorFrame {
    rows: Vec<IndicatorRow>,
}

impl IndicatorFrame {
    pub fn from_rows(rows: Vec<IndicatorRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[IndicatorRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn latest(&self) -> Option<&IndicatorRow> {
        self.rows.last()
    }

    /// Row before the latest, or the latest itself when only one row exists.
    pub fn previous(&self) -> Option<&IndicatorRow> {
        self.rows
            .len()
            .checked_sub(2)
            .and_then(|i| self.rows.get(i))
            .or_else(|| self.latest())
    }
}

/// Computes the full indicator set over a candle series.
pub struct IndicatorEngine {
    rsi: Rsi,
    macd: Macd,
    bands: BollingerBands,
    ema_short: Ema,
    ema_long: Ema,
    volatility: Volatility,
}

impl IndicatorEngine {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            rsi: Rsi::new(config.rsi_period),
            macd: Macd::new(config.macd_fast, config.macd_slow, config.macd_signal),
            bands: BollingerBands::new(config.bb_period, config.bb_stddev),
            ema_short: Ema::new(config.ema_short),
            ema_long: Ema::new(config.ema_long),
            volatility: Volatility::new(config.volatility_period),
        }
    }

    /// Compute an indicator frame over the series.
    ///
    /// Rows lacking enough history for the longest-period computation are
    /// dropped as a block at the head; the frame never carries NaN.
    pub fn compute(&self, candles: &[Candle]) -> Result<IndicatorFrame> {
        if candles.len() < MIN_CANDLES {
            return Err(AppError::InsufficientData {
                required: MIN_CANDLES,
                available: candles.len(),
            });
        }

        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();

        let rsi = self.rsi.compute(&closes);
        let macd = self.macd.compute(&closes);
        let bands = self.bands.compute(&closes);
        let ema_short = self.ema_short.compute(&closes);
        let ema_long = self.ema_long.compute(&closes);
        let volatility = self.volatility.compute(&closes);

        let mut rows = Vec::with_capacity(candles.len());
        for (i, candle) in candles.iter().enumerate() {
            let band = bands.upper[i] - bands.lower[i];
            let bb_width = if bands.middle[i] != 0.0 {
                band / bands.middle[i]
            } else {
                0.0
            };
            let bb_position = if band > 0.0 {
                (candle.close - bands.lower[i]) / band
            } else {
                0.5
            };

            let row = IndicatorRow {
                time: candle.time,
                close: candle.close,
                volume: candle.volume,
                rsi: rsi[i],
                macd: macd.macd[i],
                macd_signal: macd.signal[i],
                macd_histogram: macd.histogram[i],
                bb_upper: bands.upper[i],
                bb_middle: bands.middle[i],
                bb_lower: bands.lower[i],
                bb_width,
                bb_position,
                ema_short: ema_short[i],
                ema_long: ema_long[i],
                volatility: volatility[i],
            };

            if row.is_complete() {
                rows.push(row);
            }
        }

        if rows.is_empty() {
            return Err(AppError::InsufficientData {
                required: MIN_CANDLES,
                available: candles.len(),
            });
        }

        debug!(
            "indicator frame: {} candles -> {} rows",
            candles.len(),
            rows.len()
        );

        Ok(IndicatorFrame::from_rows(rows))
    }
}
