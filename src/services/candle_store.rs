//! In-memory candle history keyed by symbol.

use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

use crate::types::{Candle, CandleSeries};

/// Per-symbol candle history with batch ingestion and time-ordered reads.
///
/// Symbols are case-insensitive. An unknown symbol reads back as an empty
/// series, never an error.
pub struct CandleStore {
    data: DashMap<String, Vec<Candle>>,
    max_candles: usize,
}

impl CandleStore {
    pub fn new(max_candles: usize) -> Arc<Self> {
        Arc::new(Self {
            data: DashMap::new(),
            max_candles,
        })
    }

    /// Merge a batch into the symbol's history.
    ///
    /// Candles are kept sorted by timestamp; duplicate timestamps keep the
    /// newest row. Oldest candles are evicted past the retention cap.
    /// Returns the stored series length.
    pub fn insert_batch(&self, symbol: &str, batch: Vec<Candle>) -> usize {
        let key = symbol.to_lowercase();
        let mut entry = self.data.entry(key).or_default();

        let mut merged = Vec::with_capacity(entry.len() + batch.len());
        merged.extend(entry.iter().copied());
        merged.extend(batch);

        let mut candles = CandleSeries::from_unsorted(merged).into_inner();
        if candles.len() > self.max_candles {
            let excess = candles.len() - self.max_candles;
            candles.drain(..excess);
        }

        debug!("{}: {} candles stored", symbol, candles.len());
        *entry.value_mut() = candles;
        entry.len()
    }

    /// Most recent `limit` candles, time-ordered.
    pub fn latest(&self, symbol: &str, limit: usize) -> CandleSeries {
        match self.data.get(&symbol.to_lowercase()) {
            Some(entry) => {
                let candles = entry.value();
                let start = candles.len().saturating_sub(limit);
                CandleSeries::from_sorted(candles[start..].to_vec())
            }
            None => CandleSeries::default(),
        }
    }

    /// Candles with timestamps inside `[start, end]`, time-ordered.
    pub fn range(&self, symbol: &str, start: i64, end: i64) -> CandleSeries {
        match self.data.get(&symbol.to_lowercase()) {
            Some(entry) => CandleSeries::from_sorted(
                entry
                    .value()
                    .iter()
                    .filter(|c| c.time >= start && c.time <= end)
                    .copied()
                    .collect(),
            ),
            None => CandleSeries::default(),
        }
    }

    /// Stored candle count for a symbol.
    pub fn count(&self, symbol: &str) -> usize {
        self.data
            .get(&symbol.to_lowercase())
            .map(|entry| entry.len())
            .unwrap_or(0)
    }

    /// All symbols with stored candles.
    pub fn symbols(&self) -> Vec<String> {
        self.data.iter().map(|entry| entry.key().clone()).collect()
    }
}
