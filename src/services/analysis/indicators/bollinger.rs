//! Bollinger Bands indicator.

/// Band columns, one value per input index.
pub struct BollingerSeries {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
}

/// Bollinger Bands indicator.
///
/// Consists of:
/// - Middle band: SMA(period)
/// - Upper band: SMA + multiplier * StdDev
/// - Lower band: SMA - multiplier * StdDev
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev_multiplier: 2.0,
        }
    }
}

impl BollingerBands {
    pub fn new(period: usize, std_dev_multiplier: f64) -> Self {
        Self {
            period,
            std_dev_multiplier,
        }
    }

    /// Population standard deviation.
    fn std_dev(values: &[f64], mean: f64) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        let variance: f64 =
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
        variance.sqrt()
    }

    /// Bands per index. Rows with fewer than `period` observations are NaN.
    pub fn compute(&self, closes: &[f64]) -> BollingerSeries {
        let n = closes.len();
        let mut upper = vec![f64::NAN; n];
        let mut middle = vec![f64::NAN; n];
        let mut lower = vec![f64::NAN; n];

        if n < self.period || self.period == 0 {
            return BollingerSeries {
                upper,
                middle,
                lower,
            };
        }

        for i in (self.period - 1)..n {
            let window = &closes[i + 1 - self.period..=i];
            let mean = window.iter().sum::<f64>() / self.period as f64;
            let sd = Self::std_dev(window, mean);
            middle[i] = mean;
            upper[i] = mean + self.std_dev_multiplier * sd;
            lower[i] = mean - self.std_dev_multiplier * sd;
        }

        BollingerSeries {
            upper,
            middle,
            lower,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands_head_is_nan() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let bands = BollingerBands::default().compute(&closes);
        assert!(bands.middle[..19].iter().all(|v| v.is_nan()));
        assert!(bands.middle[19..].iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_bands_collapse_on_constant_series() {
        let closes = vec![100.0; 30];
        let bands = BollingerBands::default().compute(&closes);
        assert_eq!(bands.upper[29], 100.0);
        assert_eq!(bands.middle[29], 100.0);
        assert_eq!(bands.lower[29], 100.0);
    }

    #[test]
    fn test_bands_known_window() {
        let closes = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        let bands = BollingerBands::new(5, 2.0).compute(&closes);
        let sd = (2.0f64).sqrt();
        assert_eq!(bands.middle[4], 2.0);
        assert!((bands.upper[4] - (2.0 + 2.0 * sd)).abs() < 1e-12);
        assert!((bands.lower[4] - (2.0 - 2.0 * sd)).abs() < 1e-12);
    }

    #[test]
    fn test_bands_ordering() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64) * 0.7).collect();
        let bands = BollingerBands::default().compute(&closes);
        for i in 19..40 {
            assert!(bands.upper[i] >= bands.middle[i]);
            assert!(bands.middle[i] >= bands.lower[i]);
        }
    }
}
