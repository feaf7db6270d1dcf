use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::SignalType;

/// A simulated position taken during a backtest replay.
///
/// A trade is open while the exit fields are absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: SignalType,
    pub entry_price: f64,
    /// Unix timestamp in milliseconds.
    pub entry_time: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pnl_percent: Option<f64>,
    /// Signal confidence at entry.
    pub confidence: f64,
}

impl Trade {
    /// Open a new trade.
    pub fn open(kind: SignalType, entry_price: f64, entry_time: i64, confidence: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            entry_price,
            entry_time,
            exit_price: None,
            exit_time: None,
            pnl_percent: None,
            confidence,
        }
    }

    /// Close the trade and record its realized PnL.
    pub fn close(&mut self, exit_price: f64, exit_time: i64) {
        self.exit_price = Some(exit_price);
        self.exit_time = Some(exit_time);
        self.pnl_percent = Some((exit_price - self.entry_price) / self.entry_price * 100.0);
    }

    pub fn is_open(&self) -> bool {
        self.exit_price.is_none()
    }
}

/// Aggregate outcome of one backtest replay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestReport {
    pub symbol: String,
    /// Closed trades only; a position still open at replay end is excluded.
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    /// Percent of closed trades with positive PnL.
    pub win_rate: f64,
    pub total_pnl_percent: f64,
    /// Most recent trades, open or closed.
    pub trades: Vec<Trade>,
}
