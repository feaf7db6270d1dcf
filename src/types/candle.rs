use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Candle timeframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Timeframe {
    #[default]
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "1d")]
    OneDay,
}

impl Timeframe {
    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "1m" | "1min" | "minute" => Some(Self::OneMinute),
            "5m" | "5min" => Some(Self::FiveMinutes),
            "15m" | "15min" => Some(Self::FifteenMinutes),
            "1h" | "60m" | "hour" | "hourly" => Some(Self::OneHour),
            "4h" => Some(Self::FourHours),
            "1d" | "day" | "daily" => Some(Self::OneDay),
            _ => None,
        }
    }

    /// Get display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::OneMinute => "1m",
            Self::FiveMinutes => "5m",
            Self::FifteenMinutes => "15m",
            Self::OneHour => "1h",
            Self::FourHours => "4h",
            Self::OneDay => "1d",
        }
    }

    /// Candles produced per day at this timeframe.
    pub fn candles_per_day(&self) -> usize {
        match self {
            Self::OneMinute => 1440,
            Self::FiveMinutes => 288,
            Self::FifteenMinutes => 96,
            Self::OneHour => 24,
            Self::FourHours => 6,
            Self::OneDay => 1,
        }
    }
}

/// One OHLCV observation for a fixed time bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Unix timestamp in milliseconds.
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Ingestion row with every field optional.
///
/// Conversion to [`Candle`] reports which column is missing rather than
/// failing at deserialization time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandleRow {
    pub time: Option<i64>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
}

impl CandleRow {
    /// Validate and convert into a candle.
    pub fn into_candle(self) -> Result<Candle, AppError> {
        let time = self
            .time
            .ok_or_else(|| AppError::MissingColumns("time".to_string()))?;
        Ok(Candle {
            time,
            open: require_price(self.open, "open")?,
            high: require_price(self.high, "high")?,
            low: require_price(self.low, "low")?,
            close: require_price(self.close, "close")?,
            volume: require_price(self.volume, "volume")?,
        })
    }
}

fn require_price(value: Option<f64>, name: &str) -> Result<f64, AppError> {
    let v = value.ok_or_else(|| AppError::MissingColumns(name.to_string()))?;
    if !v.is_finite() || v < 0.0 {
        return Err(AppError::BadRequest(format!(
            "invalid value for {}: {}",
            name, v
        )));
    }
    Ok(v)
}

/// Candles sorted ascending by timestamp with no duplicates.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CandleSeries(Vec<Candle>);

impl CandleSeries {
    /// Sort by timestamp and drop duplicate timestamps, keeping the row
    /// that arrived last.
    pub fn from_unsorted(mut candles: Vec<Candle>) -> Self {
        candles.sort_by_key(|c| c.time);
        let mut out: Vec<Candle> = Vec::with_capacity(candles.len());
        for candle in candles {
            match out.last_mut() {
                Some(last) if last.time == candle.time => *last = candle,
                _ => out.push(candle),
            }
        }
        Self(out)
    }

    /// Wrap candles that are already sorted and deduplicated.
    pub fn from_sorted(candles: Vec<Candle>) -> Self {
        Self(candles)
    }

    pub fn into_inner(self) -> Vec<Candle> {
        self.0
    }
}

impl std::ops::Deref for CandleSeries {
    type Target = [Candle];

    fn deref(&self) -> &[Candle] {
        &self.0
    }
}
