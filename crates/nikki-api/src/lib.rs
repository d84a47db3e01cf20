use axum::Router;
use nikki::LessonService;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod error;
pub mod routes;

pub use config::ApiConfig;
pub use error::{ApiError, ErrorResponse};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<LessonService>,
}

impl AppState {
    pub fn new(service: LessonService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(LessonService::from_env())
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health_check,
        crate::routes::api::reflect::reflect,
        crate::routes::api::manga::manga,
        crate::routes::api::generate::generate,
    ),
    components(
        schemas(
            crate::routes::health::HealthResponse,
            crate::routes::api::reflect::ReflectRequest,
            crate::routes::api::manga::MangaRequest,
            crate::error::ErrorResponse,
            nikki::ReflectionResponse,
            nikki::MangaResult,
            nikki::GenerateResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "lesson", description = "Lesson and manga generation")
    )
)]
pub struct ApiDoc;

/// Build API application with the default configuration
pub fn build_app(state: AppState) -> Router {
    build_app_with_config(state, &ApiConfig::default())
}

/// Build API application
pub fn build_app_with_config(state: AppState, config: &ApiConfig) -> Router {
    let mut router = Router::new().merge(routes::routes());

    if config.enable_swagger {
        router = router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    router
        .layer(error::catch_panic_layer())
        .layer(config.cors.layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
