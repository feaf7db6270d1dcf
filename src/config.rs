use std::env;

/// Tuning values for the analysis components.
///
/// Passed into each component at construction; the engine never reads the
/// process environment itself.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// RSI rolling window.
    pub rsi_period: usize,
    /// MACD fast EMA period.
    pub macd_fast: usize,
    /// MACD slow EMA period.
    pub macd_slow: usize,
    /// MACD signal-line EMA period.
    pub macd_signal: usize,
    /// Bollinger band moving-average window.
    pub bb_period: usize,
    /// Bollinger band standard-deviation multiplier.
    pub bb_stddev: f64,
    /// Short EMA period.
    pub ema_short: usize,
    /// Long EMA period.
    pub ema_long: usize,
    /// Rolling window for return volatility.
    pub volatility_period: usize,
    /// Minimum confidence before the backtester opens a position.
    pub confidence_threshold: f64,
    /// Hard stop-loss, percent below entry.
    pub stop_loss_pct: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bb_period: 20,
            bb_stddev: 2.0,
            ema_short: 20,
            ema_long: 50,
            volatility_period: 20,
            confidence_threshold: 70.0,
            stop_loss_pct: 5.0,
        }
    }
}

impl AnalysisConfig {
    /// Load analysis tuning from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            rsi_period: parse_env("RSI_PERIOD", defaults.rsi_period),
            macd_fast: parse_env("MACD_FAST", defaults.macd_fast),
            macd_slow: parse_env("MACD_SLOW", defaults.macd_slow),
            macd_signal: parse_env("MACD_SIGNAL", defaults.macd_signal),
            bb_period: parse_env("BB_PERIOD", defaults.bb_period),
            bb_stddev: parse_env("BB_STDDEV", defaults.bb_stddev),
            ema_short: parse_env("EMA_SHORT", defaults.ema_short),
            ema_long: parse_env("EMA_LONG", defaults.ema_long),
            volatility_period: parse_env("VOLATILITY_PERIOD", defaults.volatility_period),
            confidence_threshold: parse_env("CONFIDENCE_THRESHOLD", defaults.confidence_threshold),
            stop_loss_pct: parse_env("STOP_LOSS_PCT", defaults.stop_loss_pct),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Lookback in days when a request does not specify one.
    pub default_days: u32,
    /// Upper bound on candles resolved per request.
    pub max_lookback: usize,
    /// Upper bound on candles retained per symbol.
    pub max_candles: usize,
    /// Analysis tuning.
    pub analysis: AnalysisConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_env("PORT", 5000),
            default_days: parse_env("DEFAULT_DAYS", 7),
            max_lookback: parse_env("MAX_LOOKBACK", 50_000),
            max_candles: parse_env("MAX_CANDLES", 100_000),
            analysis: AnalysisConfig::from_env(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
