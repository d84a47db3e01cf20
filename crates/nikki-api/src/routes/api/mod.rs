use crate::AppState;
use axum::{Router, routing::post};

pub mod body;
pub mod generate;
pub mod manga;
pub mod reflect;

/// Lesson routes, mounted under `/api`
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reflect", post(reflect::reflect))
        .route("/manga", post(manga::manga))
        .route("/generate", post(generate::generate))
}
