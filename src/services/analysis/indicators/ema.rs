//! Exponential Moving Average (EMA) indicator.

/// EMA (Exponential Moving Average) indicator.
///
/// Recursively weighted toward recent observations, seeded with the first
/// value so every index is defined without look-ahead.
pub struct Ema {
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// EMA per index over an arbitrary value series.
    pub fn compute(&self, values: &[f64]) -> Vec<f64> {
        if values.is_empty() {
            return Vec::new();
        }

        let multiplier = 2.0 / (self.period as f64 + 1.0);
        let mut out = Vec::with_capacity(values.len());
        let mut ema = values[0];
        out.push(ema);

        for value in &values[1..] {
            ema = (value - ema) * multiplier + ema;
            out.push(ema);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ema_seeded_by_first_value() {
        let values = vec![42.0, 43.0, 44.0];
        let ema = Ema::new(10).compute(&values);
        assert_eq!(ema[0], 42.0);
        assert_eq!(ema.len(), 3);
    }

    #[test]
    fn test_ema_constant_series() {
        let values = vec![100.0; 20];
        let ema = Ema::new(5).compute(&values);
        assert!(ema.iter().all(|v| *v == 100.0));
    }

    #[test]
    fn test_ema_small_case() {
        // period 3 gives multiplier 0.5
        let ema = Ema::new(3).compute(&[2.0, 4.0]);
        assert_eq!(ema, vec![2.0, 3.0]);
    }

    #[test]
    fn test_ema_tracks_rising_series() {
        let values: Vec<f64> = (0..50).map(|i| 100.0 + i as f64).collect();
        let ema = Ema::new(10).compute(&values);
        let last = *ema.last().unwrap();
        assert!(last < 149.0);
        assert!(last > 140.0);
    }

    #[test]
    fn test_ema_empty_input() {
        assert!(Ema::new(5).compute(&[]).is_empty());
    }
}
