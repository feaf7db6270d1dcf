//! Augur - technical-analysis signal engine with walk-forward backtesting.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod types;

use std::sync::Arc;

use config::Config;
use services::{Analyzer, CandleStore};

pub use error::{AppError, Result};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub candle_store: Arc<CandleStore>,
    pub analyzer: Arc<Analyzer>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let candle_store = CandleStore::new(config.max_candles);
        let analyzer = Analyzer::new(config.analysis.clone());
        Self {
            config: Arc::new(config),
            candle_store,
            analyzer,
        }
    }
}
