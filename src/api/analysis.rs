//! Analysis endpoints: signal, indicators, patterns, backtest.

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::types::{BacktestReport, IndicatorSnapshot, Pattern, SignalType, Timeframe};
use crate::AppState;

/// Request body for the analyze endpoint.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub symbol: String,
    /// Candle timeframe label, e.g. "1m" or "1h". Defaults to "1m".
    pub timeframe: Option<String>,
    /// Lookback in days.
    pub days: Option<u32>,
}

/// Query parameters shared by the GET endpoints.
#[derive(Debug, Deserialize)]
pub struct AnalysisQuery {
    pub timeframe: Option<String>,
    pub days: Option<u32>,
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub symbol: String,
    pub signal_type: SignalType,
    pub confidence: f64,
    pub indicators: IndicatorSnapshot,
    pub patterns: Vec<Pattern>,
    pub reason: String,
    pub recommendation: String,
    pub timestamp: i64,
}

#[derive(Serialize)]
pub struct IndicatorsResponse {
    pub symbol: String,
    pub indicators: IndicatorSnapshot,
    pub timestamp: i64,
}

#[derive(Serialize)]
pub struct PatternsResponse {
    pub symbol: String,
    pub patterns: Vec<Pattern>,
    pub timestamp: i64,
}

/// Create the analysis router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/indicators/:symbol", get(get_indicators))
        .route("/patterns/:symbol", get(get_patterns))
        .route("/backtest/:symbol", get(run_backtest))
}

/// Resolve a timeframe/days pair into a candle count.
fn lookback(state: &AppState, timeframe: Option<&str>, days: Option<u32>) -> usize {
    let timeframe = timeframe.and_then(Timeframe::from_str).unwrap_or_default();
    let days = days.unwrap_or(state.config.default_days) as usize;
    (days * timeframe.candles_per_day()).min(state.config.max_lookback)
}

/// Full analysis: signal plus patterns over the resolved lookback.
async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>> {
    let limit = lookback(&state, request.timeframe.as_deref(), request.days);
    let candles = state.candle_store.latest(&request.symbol, limit);

    let signal = state.analyzer.signal(&candles)?;
    let patterns = state.analyzer.patterns(&candles);

    Ok(Json(AnalyzeResponse {
        symbol: request.symbol.to_uppercase(),
        signal_type: signal.signal,
        confidence: signal.confidence,
        indicators: signal.indicators,
        patterns,
        reason: signal.reason,
        recommendation: signal.recommendation,
        timestamp: chrono::Utc::now().timestamp_millis(),
    }))
}

/// Latest indicator snapshot for a symbol.
async fn get_indicators(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<AnalysisQuery>,
) -> Result<Json<IndicatorsResponse>> {
    let limit = lookback(&state, query.timeframe.as_deref(), query.days);
    let candles = state.candle_store.latest(&symbol, limit);

    if candles.is_empty() {
        return Err(AppError::NotFound(format!("no data for {}", symbol)));
    }

    let indicators = state.analyzer.latest_indicators(&candles)?;

    Ok(Json(IndicatorsResponse {
        symbol: symbol.to_uppercase(),
        indicators,
        timestamp: chrono::Utc::now().timestamp_millis(),
    }))
}

/// Chart patterns for a symbol.
async fn get_patterns(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<AnalysisQuery>,
) -> Result<Json<PatternsResponse>> {
    let limit = lookback(&state, query.timeframe.as_deref(), query.days);
    let candles = state.candle_store.latest(&symbol, limit);

    let patterns = state.analyzer.patterns(&candles);

    Ok(Json(PatternsResponse {
        symbol: symbol.to_uppercase(),
        patterns,
        timestamp: chrono::Utc::now().timestamp_millis(),
    }))
}

/// Walk-forward backtest for a symbol.
async fn run_backtest(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<AnalysisQuery>,
) -> Result<Json<BacktestReport>> {
    let limit = lookback(&state, query.timeframe.as_deref(), query.days);
    let candles = state.candle_store.latest(&symbol, limit);

    let report = state.analyzer.backtest(&symbol, &candles)?;

    Ok(Json(report))
}
