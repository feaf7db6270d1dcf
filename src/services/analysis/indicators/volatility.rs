//! Rolling volatility of percentage returns.

/// Volatility indicator.
///
/// Population standard deviation of single-step percentage returns over a
/// trailing window, expressed in percent.
pub struct Volatility {
    period: usize,
}

impl Default for Volatility {
    fn default() -> Self {
        Self { period: 20 }
    }
}

impl Volatility {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// Volatility per index. Rows without `period` prior returns are NaN.
    pub fn compute(&self, closes: &[f64]) -> Vec<f64> {
        let mut out = vec![f64::NAN; closes.len()];
        if closes.len() <= self.period || self.period == 0 {
            return out;
        }

        let returns: Vec<f64> = closes.windows(2).map(|w| (w[1] - w[0]) / w[0]).collect();

        for i in self.period..closes.len() {
            let window = &returns[i - self.period..i];
            let mean = window.iter().sum::<f64>() / self.period as f64;
            let variance =
                window.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / self.period as f64;
            out[i] = variance.sqrt() * 100.0;
        }

        out
    }
}
