//! Pattern detector tests.

use augur::services::analysis::PatternDetector;
use augur::types::{Candle, PatternStrength, PatternType, SignalType};

fn candle(i: usize, open: f64, high: f64, low: f64, close: f64) -> Candle {
    Candle {
        time: 1_000_000 + i as i64 * 60_000,
        open,
        high,
        low,
        close,
        volume: 1_000.0,
    }
}

/// Flat closes, highs spread wider than the 2% tolerance, lows drifting up
/// except for the two troughs at indices 3 and 15.
fn double_bottom_candles() -> Vec<Candle> {
    (0..20)
        .map(|i| {
            let low = match i {
                3 => 100.0,
                15 => 99.5,
                _ => 102.0 + 0.5 * i as f64,
            };
            let high = 200.0 - 5.0 * i as f64;
            candle(i, 101.0, high, low, 101.0)
        })
        .collect()
}

#[test]
fn test_double_bottom_detected() {
    let patterns = PatternDetector::new().detect(&double_bottom_candles());

    let bottom = patterns
        .iter()
        .find(|p| p.kind == PatternType::DoubleBottom)
        .expect("double bottom expected");
    assert_eq!(bottom.signal, SignalType::Long);
    assert_eq!(bottom.strength, PatternStrength::High);

    assert!(!patterns.iter().any(|p| p.kind == PatternType::DoubleTop));
}

#[test]
fn test_lower_outlier_breaks_double_bottom() {
    // a third, far lower low must pair with the trough at 99.5 and fail the
    // 2% test; the detector compares the two lowest values, not any pair
    let mut candles = double_bottom_candles();
    candles[9].low = 50.0;

    let patterns = PatternDetector::new().detect(&candles);
    assert!(!patterns.iter().any(|p| p.kind == PatternType::DoubleBottom));
}

#[test]
fn test_double_top_on_mirrored_data() {
    let mirrored: Vec<Candle> = double_bottom_candles()
        .iter()
        .map(|c| Candle {
            time: c.time,
            open: 300.0 - c.open,
            high: 300.0 - c.low,
            low: 300.0 - c.high,
            close: 300.0 - c.close,
            volume: c.volume,
        })
        .collect();

    let patterns = PatternDetector::new().detect(&mirrored);

    let top = patterns
        .iter()
        .find(|p| p.kind == PatternType::DoubleTop)
        .expect("double top expected");
    assert_eq!(top.signal, SignalType::Short);
    assert_eq!(top.strength, PatternStrength::High);

    assert!(!patterns.iter().any(|p| p.kind == PatternType::DoubleBottom));
}

#[test]
fn test_uptrend_detected() {
    let candles: Vec<Candle> = (0..20)
        .map(|i| {
            let close = 100.0 + 10.0 * i as f64 / 19.0;
            candle(i, close, close + 0.5, close - 0.5, close)
        })
        .collect();

    let patterns = PatternDetector::new().detect(&candles);
    let trend = patterns
        .iter()
        .find(|p| p.kind == PatternType::Uptrend)
        .expect("uptrend expected");
    assert_eq!(trend.signal, SignalType::Long);
    assert_eq!(trend.strength, PatternStrength::Medium);
    assert!(!patterns.iter().any(|p| p.kind == PatternType::Downtrend));
}

#[test]
fn test_downtrend_detected() {
    let candles: Vec<Candle> = (0..20)
        .map(|i| {
            let close = 110.0 - 10.0 * i as f64 / 19.0;
            candle(i, close, close + 0.5, close - 0.5, close)
        })
        .collect();

    let patterns = PatternDetector::new().detect(&candles);
    assert!(patterns.iter().any(|p| p.kind == PatternType::Downtrend));
    assert!(!patterns.iter().any(|p| p.kind == PatternType::Uptrend));
}

#[test]
fn test_small_move_is_not_a_trend() {
    // 1% over the window stays under the 2% gate
    let candles: Vec<Candle> = (0..20)
        .map(|i| {
            let close = 100.0 + 1.0 * i as f64 / 19.0;
            candle(i, close, close + 5.0, close - 5.0, close)
        })
        .collect();

    let patterns = PatternDetector::new().detect(&candles);
    assert!(!patterns.iter().any(|p| p.kind == PatternType::Uptrend));
    assert!(!patterns.iter().any(|p| p.kind == PatternType::Downtrend));
}

#[test]
fn test_short_series_yields_nothing() {
    let candles: Vec<Candle> = (0..19)
        .map(|i| candle(i, 100.0, 101.0, 99.0, 100.0))
        .collect();
    assert!(PatternDetector::new().detect(&candles).is_empty());
}

#[test]
fn test_only_last_twenty_candles_considered() {
    // deep trough outside the window must not affect detection
    let mut candles: Vec<Candle> = (0..30)
        .map(|i| {
            let low = 102.0 + 0.5 * i as f64;
            candle(i, 120.0, 200.0 - 5.0 * i as f64, low, 120.0)
        })
        .collect();
    candles[0].low = 1.0;
    candles[13].low = 100.0;
    candles[25].low = 99.5;

    let patterns = PatternDetector::new().detect(&candles);
    assert!(patterns.iter().any(|p| p.kind == PatternType::DoubleBottom));
}
