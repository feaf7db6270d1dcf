use serde::{Deserialize, Serialize};

/// Direction of a trading signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalType {
    Long,
    Short,
    Neutral,
}

impl SignalType {
    /// Get display label for this direction.
    pub fn label(&self) -> &'static str {
        match self {
            SignalType::Long => "LONG",
            SignalType::Short => "SHORT",
            SignalType::Neutral => "NEUTRAL",
        }
    }
}

/// Latest indicator values, rounded for the wire.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub rsi: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub macd_histogram: f64,
    pub bb_upper: f64,
    pub bb_middle: f64,
    pub bb_lower: f64,
    pub bb_width: f64,
    pub bb_position: f64,
    pub ema_short: f64,
    pub ema_long: f64,
    pub volatility: f64,
    pub price: f64,
    pub volume: f64,
}

/// A scored directional call over the latest observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub signal: SignalType,
    /// Strength score, 0-100. Zero for every neutral outcome.
    pub confidence: f64,
    pub indicators: IndicatorSnapshot,
    pub reason: String,
    pub recommendation: String,
}

/// Chart pattern kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    DoubleBottom,
    DoubleTop,
    Uptrend,
    Downtrend,
}

/// How pronounced a detected pattern is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternStrength {
    Low,
    Medium,
    High,
}

/// A detected chart pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    #[serde(rename = "type")]
    pub kind: PatternType,
    pub signal: SignalType,
    pub strength: PatternStrength,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_type_serialization() {
        assert_eq!(serde_json::to_string(&SignalType::Long).unwrap(), "\"LONG\"");
        assert_eq!(
            serde_json::to_string(&SignalType::Neutral).unwrap(),
            "\"NEUTRAL\""
        );
    }

    #[test]
    fn test_signal_type_label() {
        assert_eq!(SignalType::Short.label(), "SHORT");
    }

    #[test]
    fn test_pattern_serialization() {
        let pattern = Pattern {
            kind: PatternType::DoubleBottom,
            signal: SignalType::Long,
            strength: PatternStrength::High,
        };
        let json = serde_json::to_string(&pattern).unwrap();
        assert!(json.contains("\"type\":\"double_bottom\""));
        assert!(json.contains("\"signal\":\"LONG\""));
        assert!(json.contains("\"strength\":\"high\""));
    }
}
