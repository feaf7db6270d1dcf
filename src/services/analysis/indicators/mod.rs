//! Rolling indicator kernels over close-price series.
//!
//! Each kernel returns one value per input index; rows without enough
//! trailing history are NaN so the engine can trim them as a block.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod volatility;

pub use bollinger::{BollingerBands, BollingerSeries};
pub use ema::Ema;
pub use macd::{Macd, MacdSeries};
pub use rsi::Rsi;
pub use volatility::Volatility;
