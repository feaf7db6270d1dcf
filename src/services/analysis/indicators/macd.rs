//! MACD (Moving Average Convergence Divergence) indicator.

use super::Ema;

/// Aligned MACD columns, one value per input index.
pub struct MacdSeries {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

/// MACD indicator.
///
/// Shows the relationship between two EMAs:
/// - MACD Line = EMA(fast) - EMA(slow)
/// - Signal Line = EMA(MACD, signal period)
/// - Histogram = MACD Line - Signal Line
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Default for Macd {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

impl Macd {
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Self {
        Self {
            fast_period,
            slow_period,
            signal_period,
        }
    }

    pub fn compute(&self, closes: &[f64]) -> MacdSeries {
        let fast = Ema::new(self.fast_period).compute(closes);
        let slow = Ema::new(self.slow_period).compute(closes);

        let macd: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal = Ema::new(self.signal_period).compute(&macd);
        let histogram: Vec<f64> = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();

        MacdSeries {
            macd,
            signal,
            histogram,
        }
    }
}
