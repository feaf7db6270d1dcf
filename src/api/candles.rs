//! Candle ingestion and readback endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::types::{Candle, CandleRow};
use crate::AppState;

/// Query parameters for candle readback.
#[derive(Debug, Deserialize)]
pub struct CandlesQuery {
    pub limit: Option<usize>,
    /// Unix milliseconds, inclusive.
    pub start: Option<i64>,
    /// Unix milliseconds, inclusive.
    pub end: Option<i64>,
}

#[derive(Serialize)]
pub struct IngestResponse {
    pub symbol: String,
    pub inserted: usize,
    pub stored: usize,
}

#[derive(Serialize)]
pub struct CandlesResponse {
    pub symbol: String,
    pub candles: Vec<Candle>,
    pub timestamp: i64,
}

/// Create the candles router.
pub fn router() -> Router<AppState> {
    Router::new().route("/:symbol", post(ingest_candles).get(get_candles))
}

/// Ingest a batch of candles for a symbol.
async fn ingest_candles(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Json(rows): Json<Vec<CandleRow>>,
) -> Result<Json<IngestResponse>> {
    if rows.is_empty() {
        return Err(AppError::BadRequest("empty candle batch".to_string()));
    }

    let candles: Vec<Candle> = rows
        .into_iter()
        .map(CandleRow::into_candle)
        .collect::<Result<_>>()?;

    let inserted = candles.len();
    let stored = state.candle_store.insert_batch(&symbol, candles);

    Ok(Json(IngestResponse {
        symbol: symbol.to_uppercase(),
        inserted,
        stored,
    }))
}

/// Read stored candles for a symbol.
async fn get_candles(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<CandlesQuery>,
) -> Result<Json<CandlesResponse>> {
    let series = match (query.start, query.end) {
        (Some(start), Some(end)) => state.candle_store.range(&symbol, start, end),
        _ => state.candle_store.latest(&symbol, query.limit.unwrap_or(100)),
    };

    Ok(Json(CandlesResponse {
        symbol: symbol.to_uppercase(),
        candles: series.to_vec(),
        timestamp: chrono::Utc::now().timestamp_millis(),
    }))
}
