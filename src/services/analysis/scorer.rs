//! Signal scoring over the latest indicator rows.

use crate::services::analysis::engine::{IndicatorFrame, IndicatorRow};
use crate::services::analysis::round2;
use crate::types::{IndicatorSnapshot, Signal, SignalType};

/// Minimum usable rows before any directional call is attempted.
pub const MIN_ROWS: usize = 10;

/// Volatility floor (percent) below which the market counts as choppy.
const CHOPPY_VOLATILITY: f64 = 0.5;
/// Band-width floor below which the market counts as choppy.
const CHOPPY_BB_WIDTH: f64 = 0.02;
/// Minimum strength score a candidate needs to be emitted.
const EMISSION_FLOOR: f64 = 60.0;

// Strength weights. Empirically tuned, not derived from a model.
const WEIGHT_RSI_EXTREME: f64 = 20.0;
const WEIGHT_RSI_LEAN: f64 = 10.0;
const WEIGHT_MACD_MOMENTUM: f64 = 25.0;
const WEIGHT_MACD_CROSSED: f64 = 12.0;
const WEIGHT_PRICE_EMA: f64 = 15.0;
const WEIGHT_EMA_STACK: f64 = 30.0;
const WEIGHT_EMA_PARTIAL: f64 = 15.0;

/// Scores the tail of an indicator frame into a single signal.
///
/// Pure function of its input: no clock reads, no shared state.
#[derive(Debug, Default)]
pub struct SignalScorer;

impl SignalScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, frame: &IndicatorFrame) -> Signal {
        let Some(latest) = frame.latest() else {
            return neutral(IndicatorSnapshot::default(), "Insufficient data");
        };
        let snapshot = latest.snapshot();

        if frame.len() < MIN_ROWS {
            return neutral(snapshot, "Insufficient data");
        }

        let prev = frame.previous().unwrap_or(latest);

        // The consolidation guard outranks every directional setup.
        if latest.volatility < CHOPPY_VOLATILITY && latest.bb_width < CHOPPY_BB_WIDTH {
            return neutral(
                snapshot,
                "Market is consolidating; volatility too low for a directional call",
            );
        }

        let candidate = if latest.rsi < 50.0
            && latest.macd_histogram > 0.0
            && latest.close >= latest.ema_short
        {
            Some(SignalType::Long)
        } else if latest.rsi > 50.0
            && latest.macd_histogram < 0.0
            && latest.close <= latest.ema_short
        {
            Some(SignalType::Short)
        } else if aligned_long(latest, prev) {
            Some(SignalType::Long)
        } else if aligned_short(latest, prev) {
            Some(SignalType::Short)
        } else {
            None
        };

        if let Some(direction) = candidate {
            let aligned = match direction {
                SignalType::Long => aligned_long(latest, prev),
                SignalType::Short => aligned_short(latest, prev),
                SignalType::Neutral => false,
            };
            if aligned {
                let (strength, drivers) = strength(latest, prev, direction);
                if strength >= EMISSION_FLOOR {
                    return Signal {
                        signal: direction,
                        confidence: round2(strength),
                        indicators: snapshot,
                        reason: drivers.join("; "),
                        recommendation: recommendation(direction, strength),
                    };
                }
            }
        }

        neutral(snapshot, "Indicators not aligned or volatility too low")
    }
}

/// At least 2 of 3: RSI in the bullish band, histogram positive and rising,
/// price stacked above both EMAs.
fn aligned_long(row: &IndicatorRow, prev: &IndicatorRow) -> bool {
    let mut checks = 0;
    if row.rsi > 40.0 && row.rsi < 70.0 {
        checks += 1;
    }
    if row.macd_histogram > 0.0 && row.macd_histogram > prev.macd_histogram {
        checks += 1;
    }
    if row.close > row.ema_short && row.ema_short > row.ema_long {
        checks += 1;
    }
    checks >= 2
}

/// At least 2 of 3: RSI in the bearish band, histogram negative and falling,
/// price stacked below both EMAs.
fn aligned_short(row: &IndicatorRow, prev: &IndicatorRow) -> bool {
    let mut checks = 0;
    if row.rsi > 30.0 && row.rsi < 60.0 {
        checks += 1;
    }
    if row.macd_histogram < 0.0 && row.macd_histogram < prev.macd_histogram {
        checks += 1;
    }
    if row.close < row.ema_short && row.ema_short < row.ema_long {
        checks += 1;
    }
    checks >= 2
}

fn strength(
    row: &IndicatorRow,
    prev: &IndicatorRow,
    direction: SignalType,
) -> (f64, Vec<&'static str>) {
    let mut score = 0.0;
    let mut drivers = Vec::new();

    match direction {
        SignalType::Long => {
            if row.rsi < 30.0 {
                score += WEIGHT_RSI_EXTREME;
                drivers.push("RSI oversold");
            } else if row.rsi < 50.0 {
                score += WEIGHT_RSI_LEAN;
                drivers.push("RSI leaning bullish");
            }
            if row.macd_histogram > 0.0 {
                if row.macd_histogram > prev.macd_histogram {
                    score += WEIGHT_MACD_MOMENTUM;
                    drivers.push("MACD histogram rising above zero");
                } else {
                    score += WEIGHT_MACD_CROSSED;
                    drivers.push("MACD above signal line");
                }
            }
            if row.close > row.ema_short {
                score += WEIGHT_PRICE_EMA;
                drivers.push("price above short EMA");
            }
            if row.ema_short > row.ema_long {
                if row.close > row.ema_short {
                    score += WEIGHT_EMA_STACK;
                    drivers.push("EMAs stacked bullish with price on top");
                } else {
                    score += WEIGHT_EMA_PARTIAL;
                    drivers.push("short EMA above long EMA");
                }
            }
        }
        SignalType::Short => {
            if row.rsi > 70.0 {
                score += WEIGHT_RSI_EXTREME;
                drivers.push("RSI overbought");
            } else if row.rsi > 50.0 {
                score += WEIGHT_RSI_LEAN;
                drivers.push("RSI leaning bearish");
            }
            if row.macd_histogram < 0.0 {
                if row.macd_histogram < prev.macd_histogram {
                    score += WEIGHT_MACD_MOMENTUM;
                    drivers.push("MACD histogram falling below zero");
                } else {
                    score += WEIGHT_MACD_CROSSED;
                    drivers.push("MACD below signal line");
                }
            }
            if row.close < row.ema_short {
                score += WEIGHT_PRICE_EMA;
                drivers.push("price below short EMA");
            }
            if row.ema_short < row.ema_long {
                if row.close < row.ema_short {
                    score += WEIGHT_EMA_STACK;
                    drivers.push("EMAs stacked bearish with price underneath");
                } else {
                    score += WEIGHT_EMA_PARTIAL;
                    drivers.push("short EMA below long EMA");
                }
            }
        }
        SignalType::Neutral => {}
    }

    (score.min(100.0), drivers)
}

fn recommendation(direction: SignalType, strength: f64) -> String {
    match direction {
        SignalType::Long if strength >= 80.0 => {
            "Strong long setup. Consider entry with a stop under the recent swing low."
        }
        SignalType::Long => {
            "Long setup forming. Wait for confirmation on the next candle before entry."
        }
        SignalType::Short if strength >= 80.0 => {
            "Strong short setup. Consider entry with a stop above the recent swing high."
        }
        SignalType::Short => {
            "Short setup forming. Wait for confirmation on the next candle before entry."
        }
        SignalType::Neutral => "No trade. Wait for clearer alignment between trend and momentum.",
    }
    .to_string()
}

fn neutral(snapshot: IndicatorSnapshot, reason: &str) -> Signal {
    Signal {
        signal: SignalType::Neutral,
        confidence: 0.0,
        indicators: snapshot,
        reason: reason.to_string(),
        recommendation: recommendation(SignalType::Neutral, 0.0),
    }
}
