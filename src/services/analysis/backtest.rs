//! Walk-forward backtest replay.
//!
//! Re-scores a growing prefix of the candle history and drives a
//! single-position state machine over the resulting signals. Each step is a
//! full recomputation, which keeps the replay reproducible at an O(n^2) cost
//! acceptable for backtest scope.

use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::error::{AppError, Result};
use crate::services::analysis::engine::IndicatorEngine;
use crate::services::analysis::scorer::SignalScorer;
use crate::types::{BacktestReport, Candle, SignalType, Trade};

/// Minimum history required for a replay.
pub const MIN_CANDLES: usize = 100;
/// Index of the first evaluated bar; earlier prefixes cannot fill a frame.
const REPLAY_START: usize = 50;
/// How many recent trades the report carries.
const REPORT_TRADES: usize = 10;

/// Replays the signal engine over historical candles.
pub struct Backtester {
    engine: IndicatorEngine,
    scorer: SignalScorer,
    confidence_threshold: f64,
    stop_loss_pct: f64,
}

impl Backtester {
    pub fn new(config: AnalysisConfig) -> Self {
        let confidence_threshold = config.confidence_threshold;
        let stop_loss_pct = config.stop_loss_pct;
        Self {
            engine: IndicatorEngine::new(config),
            scorer: SignalScorer::new(),
            confidence_threshold,
            stop_loss_pct,
        }
    }

    /// Run the replay and aggregate trade statistics.
    ///
    /// A position still open at replay end stays open; it appears in the
    /// trade list but not in the win/loss tallies.
    pub fn run(&self, symbol: &str, candles: &[Candle]) -> Result<BacktestReport> {
        if candles.len() < MIN_CANDLES {
            return Err(AppError::InsufficientData {
                required: MIN_CANDLES,
                available: candles.len(),
            });
        }

        let mut trades: Vec<Trade> = Vec::new();
        let mut position: Option<Trade> = None;

        for i in REPLAY_START..candles.len() {
            let frame = self.engine.compute(&candles[..=i])?;
            let signal = self.scorer.score(&frame);
            let bar = &candles[i];

            match position.take() {
                Some(mut trade) => {
                    let stop = trade.entry_price * (1.0 - self.stop_loss_pct / 100.0);
                    if bar.close <= stop || signal.signal == SignalType::Short {
                        trade.close(bar.close, bar.time);
                        debug!(
                            "closed trade at {}: entry {} exit {}",
                            bar.time, trade.entry_price, bar.close
                        );
                        trades.push(trade);
                    } else {
                        position = Some(trade);
                    }
                }
                None => {
                    if signal.signal == SignalType::Long
                        && signal.confidence >= self.confidence_threshold
                    {
                        debug!(
                            "opened trade at {}: entry {} confidence {}",
                            bar.time, bar.close, signal.confidence
                        );
                        position = Some(Trade::open(
                            SignalType::Long,
                            bar.close,
                            bar.time,
                            signal.confidence,
                        ));
                    }
                }
            }
        }

        if let Some(trade) = position {
            trades.push(trade);
        }

        let total_trades = trades.iter().filter(|t| !t.is_open()).count();
        let winning_trades = trades
            .iter()
            .filter(|t| t.pnl_percent.is_some_and(|p| p > 0.0))
            .count();
        let losing_trades = total_trades - winning_trades;
        let win_rate = if total_trades > 0 {
            winning_trades as f64 / total_trades as f64 * 100.0
        } else {
            0.0
        };
        let total_pnl_percent: f64 = trades.iter().filter_map(|t| t.pnl_percent).sum();

        let recent_start = trades.len().saturating_sub(REPORT_TRADES);
        let recent = trades[recent_start..].to_vec();

        info!(
            "backtest {}: {} closed trades, {:.1}% win rate, {:.2}% total pnl",
            symbol, total_trades, win_rate, total_pnl_percent
        );

        Ok(BacktestReport {
            symbol: symbol.to_uppercase(),
            total_trades,
            winning_trades,
            losing_trades,
            win_rate,
            total_pnl_percent,
            trades: recent,
        })
    }
}
