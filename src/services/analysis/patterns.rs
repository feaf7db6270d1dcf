//! Chart pattern detection over recent candles.

use std::cmp::Ordering;

use crate::types::{Candle, Pattern, PatternStrength, PatternType, SignalType};

/// Number of trailing candles examined for patterns.
const WINDOW: usize = 20;
/// Maximum relative distance between the two extremes of a double pattern.
const DOUBLE_TOLERANCE: f64 = 0.02;
/// Minimum percentage move for a trend call.
const TREND_CHANGE_PCT: f64 = 2.0;

/// Scans the most recent candles for double bottoms/tops and trends.
#[derive(Debug, Default)]
pub struct PatternDetector;

impl PatternDetector {
    pub fn new() -> Self {
        Self
    }

    /// Detect patterns over the last [`WINDOW`] candles. Shorter series
    /// yield nothing.
    pub fn detect(&self, candles: &[Candle]) -> Vec<Pattern> {
        if candles.len() < WINDOW {
            return Vec::new();
        }
        let recent = &candles[candles.len() - WINDOW..];

        let mut patterns = Vec::new();

        let lows: Vec<f64> = recent.iter().map(|c| c.low).collect();
        let (low1, low2) = two_lowest(&lows);
        if is_double(low1, low2) {
            patterns.push(Pattern {
                kind: PatternType::DoubleBottom,
                signal: SignalType::Long,
                strength: PatternStrength::High,
            });
        }

        let highs: Vec<f64> = recent.iter().map(|c| c.high).collect();
        let (high1, high2) = two_highest(&highs);
        if is_double(high1, high2) {
            patterns.push(Pattern {
                kind: PatternType::DoubleTop,
                signal: SignalType::Short,
                strength: PatternStrength::High,
            });
        }

        if let Some(trend) = detect_trend(recent) {
            patterns.push(trend);
        }

        patterns
    }
}

/// Relative difference measured against the more extreme of the pair.
fn is_double(extreme: f64, runner_up: f64) -> bool {
    extreme > 0.0 && (extreme - runner_up).abs() / extreme < DOUBLE_TOLERANCE
}

/// Two smallest values; equal values resolve to the earlier candle.
fn two_lowest(values: &[f64]) -> (f64, f64) {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| {
        values[a]
            .partial_cmp(&values[b])
            .unwrap_or(Ordering::Equal)
            .then(a.cmp(&b))
    });
    (values[order[0]], values[order[1]])
}

/// Two largest values; equal values resolve to the earlier candle.
fn two_highest(values: &[f64]) -> (f64, f64) {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| {
        values[b]
            .partial_cmp(&values[a])
            .unwrap_or(Ordering::Equal)
            .then(a.cmp(&b))
    });
    (values[order[0]], values[order[1]])
}

/// Least-squares slope of close against candle index, gated by the window's
/// percentage change.
fn detect_trend(recent: &[Candle]) -> Option<Pattern> {
    let closes: Vec<f64> = recent.iter().map(|c| c.close).collect();
    let n = closes.len() as f64;

    let mean_x = (n - 1.0) / 2.0;
    let mean_y = closes.iter().sum::<f64>() / n;
    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, y) in closes.iter().enumerate() {
        let dx = i as f64 - mean_x;
        numerator += dx * (y - mean_y);
        denominator += dx * dx;
    }
    if denominator == 0.0 {
        return None;
    }
    let slope = numerator / denominator;

    let first = *closes.first()?;
    let last = *closes.last()?;
    if first == 0.0 {
        return None;
    }
    let change_pct = (last - first) / first * 100.0;

    if slope > 0.0 && change_pct > TREND_CHANGE_PCT {
        Some(Pattern {
            kind: PatternType::Uptrend,
            signal: SignalType::Long,
            strength: PatternStrength::Medium,
        })
    } else if slope < 0.0 && change_pct < -TREND_CHANGE_PCT {
        Some(Pattern {
            kind: PatternType::Downtrend,
            signal: SignalType::Short,
            strength: PatternStrength::Medium,
        })
    } else {
        None
    }
}
