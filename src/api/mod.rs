pub mod analysis;
pub mod candles;
pub mod health;

use crate::AppState;
use axum::Router;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new().merge(health::router()).nest(
        "/api",
        Router::new()
            .merge(analysis::router())
            .nest("/candles", candles::router()),
    )
}
