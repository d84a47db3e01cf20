use crate::AppState;
use axum::Router;

pub mod api;
pub mod health;

/// Merge all routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .nest("/api", api::routes())
}
