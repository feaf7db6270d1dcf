//! Indicator engine tests.

use augur::config::AnalysisConfig;
use augur::error::AppError;
use augur::services::analysis::IndicatorEngine;
use augur::types::Candle;

fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, close)| Candle {
            time: 1_000_000 + i as i64 * 60_000,
            open: *close,
            high: close + 1.0,
            low: close - 1.0,
            close: *close,
            volume: 1_000.0,
        })
        .collect()
}

fn engine() -> IndicatorEngine {
    IndicatorEngine::new(AnalysisConfig::default())
}

#[test]
fn test_under_fifty_candles_is_rejected() {
    let candles = candles_from_closes(&vec![100.0; 49]);
    match engine().compute(&candles) {
        Err(AppError::InsufficientData {
            required,
            available,
        }) => {
            assert_eq!(required, 50);
            assert_eq!(available, 49);
        }
        other => panic!("expected InsufficientData, got {:?}", other.map(|f| f.len())),
    }
}

#[test]
fn test_warmup_rows_trimmed_as_head_block() {
    let closes: Vec<f64> = (0..60).map(|i| 100.0 + 60.0 * i as f64 / 59.0).collect();
    let candles = candles_from_closes(&closes);
    let frame = engine().compute(&candles).unwrap();

    // longest warm-up is the 20-period volatility window
    assert_eq!(frame.len(), candles.len() - 20);
    assert_eq!(frame.rows()[0].time, candles[20].time);
}

#[test]
fn test_frame_never_carries_nan() {
    let closes: Vec<f64> = (0..80)
        .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0)
        .collect();
    let candles = candles_from_closes(&closes);
    let frame = engine().compute(&candles).unwrap();

    for row in frame.rows() {
        assert!(row.rsi.is_finite());
        assert!(row.macd.is_finite());
        assert!(row.macd_signal.is_finite());
        assert!(row.macd_histogram.is_finite());
        assert!(row.bb_upper.is_finite());
        assert!(row.bb_middle.is_finite());
        assert!(row.bb_lower.is_finite());
        assert!(row.bb_width.is_finite());
        assert!(row.bb_position.is_finite());
        assert!(row.ema_short.is_finite());
        assert!(row.ema_long.is_finite());
        assert!(row.volatility.is_finite());
    }
}

#[test]
fn test_constant_close_reads_neutral() {
    let candles = candles_from_closes(&vec![100.0; 60]);
    let frame = engine().compute(&candles).unwrap();
    let latest = frame.latest().unwrap();

    assert_eq!(latest.rsi, 50.0);
    assert_eq!(latest.bb_upper, 100.0);
    assert_eq!(latest.bb_middle, 100.0);
    assert_eq!(latest.bb_lower, 100.0);
    assert_eq!(latest.bb_width, 0.0);
    assert_eq!(latest.bb_position, 0.5);
    assert_eq!(latest.volatility, 0.0);
    assert_eq!(latest.macd_histogram, 0.0);
}

#[test]
fn test_monotone_ramp_pins_extremes() {
    let closes: Vec<f64> = (0..60).map(|i| 100.0 + 60.0 * i as f64 / 59.0).collect();
    let candles = candles_from_closes(&closes);
    let frame = engine().compute(&candles).unwrap();
    let latest = frame.latest().unwrap();

    assert_eq!(latest.rsi, 100.0);
    assert!(latest.macd_histogram > 0.0);
    assert!(latest.bb_position > 0.85);
    assert!(latest.ema_short > latest.ema_long);
}

#[test]
fn test_previous_row_falls_back_to_latest() {
    use augur::services::analysis::IndicatorFrame;

    let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
    let candles = candles_from_closes(&closes);
    let frame = engine().compute(&candles).unwrap();

    let single = IndicatorFrame::from_rows(vec![*frame.latest().unwrap()]);
    assert_eq!(single.previous(), single.latest());

    let prev = frame.previous().unwrap();
    assert_eq!(prev.time, frame.rows()[frame.len() - 2].time);
}

#[test]
fn test_snapshot_rounds_to_two_decimals() {
    let closes: Vec<f64> = (0..60)
        .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0)
        .collect();
    let candles = candles_from_closes(&closes);
    let frame = engine().compute(&candles).unwrap();
    let snapshot = frame.latest().unwrap().snapshot();

    for value in [snapshot.rsi, snapshot.macd, snapshot.bb_position, snapshot.price] {
        assert_eq!((value * 100.0).round() / 100.0, value);
    }
}
