pub mod backtest;
pub mod candle;
pub mod signal;

pub use backtest::{BacktestReport, Trade};
pub use candle::{Candle, CandleRow, CandleSeries, Timeframe};
pub use signal::{IndicatorSnapshot, Pattern, PatternStrength, PatternType, Signal, SignalType};
