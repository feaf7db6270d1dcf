//! Relative Strength Index (RSI) indicator.

/// RSI (Relative Strength Index) indicator.
///
/// Measures momentum by comparing the magnitude of recent gains to recent
/// losses, using simple rolling means of the positive and negative price
/// deltas rather than Wilder smoothing. Values range 0-100:
/// - Below 30: Oversold (potential buy signal)
/// - Above 70: Overbought (potential sell signal)
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// RSI per index. Rows without `period` prior deltas are NaN.
    ///
    /// A window with zero loss pins RSI at 100 (the ratio diverges); a
    /// window with no movement at all reads neutral at 50.
    pub fn compute(&self, closes: &[f64]) -> Vec<f64> {
        let mut out = vec![f64::NAN; closes.len()];
        if closes.len() <= self.period {
            return out;
        }

        let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();

        for i in self.period..closes.len() {
            let window = &deltas[i - self.period..i];
            let avg_gain: f64 =
                window.iter().copied().filter(|d| *d > 0.0).sum::<f64>() / self.period as f64;
            let avg_loss: f64 =
                window.iter().copied().filter(|d| *d < 0.0).map(|d| -d).sum::<f64>()
                    / self.period as f64;

            out[i] = if avg_gain == 0.0 && avg_loss == 0.0 {
                50.0
            } else if avg_loss == 0.0 {
                100.0
            } else {
                100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
            };
        }

        out
    }
}
