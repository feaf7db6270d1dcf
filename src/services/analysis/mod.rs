//! Technical analysis services.
//!
//! Indicator computation, signal scoring, pattern detection, and the
//! walk-forward backtest, wired together by [`Analyzer`].

pub mod backtest;
pub mod engine;
pub mod indicators;
pub mod patterns;
pub mod scorer;

pub use backtest::Backtester;
pub use engine::{IndicatorEngine, IndicatorFrame, IndicatorRow};
pub use patterns::PatternDetector;
pub use scorer::SignalScorer;

use std::sync::Arc;

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::types::{BacktestReport, Candle, IndicatorSnapshot, Pattern, Signal};

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Facade wiring the engine, scorer, detector, and backtester from one
/// configuration value.
pub struct Analyzer {
    engine: IndicatorEngine,
    scorer: SignalScorer,
    detector: PatternDetector,
    backtester: Backtester,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Arc<Self> {
        Arc::new(Self {
            engine: IndicatorEngine::new(config.clone()),
            scorer: SignalScorer::new(),
            detector: PatternDetector::new(),
            backtester: Backtester::new(config),
        })
    }

    /// Score the most recent observation of a candle series.
    pub fn signal(&self, candles: &[Candle]) -> Result<Signal> {
        let frame = self.engine.compute(candles)?;
        Ok(self.scorer.score(&frame))
    }

    /// Latest indicator snapshot for a candle series.
    pub fn latest_indicators(&self, candles: &[Candle]) -> Result<IndicatorSnapshot> {
        let frame = self.engine.compute(candles)?;
        Ok(frame
            .latest()
            .map(|row| row.snapshot())
            .unwrap_or_default())
    }

    /// Chart patterns over the most recent candles.
    pub fn patterns(&self, candles: &[Candle]) -> Vec<Pattern> {
        self.detector.detect(candles)
    }

    /// Walk-forward replay over the full history.
    pub fn backtest(&self, symbol: &str, candles: &[Candle]) -> Result<BacktestReport> {
        self.backtester.run(symbol, candles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(70.0), 70.0);
        assert_eq!(round2(62.4999), 62.5);
        assert_eq!(round2(-5.089_999), -5.09);
    }
}
