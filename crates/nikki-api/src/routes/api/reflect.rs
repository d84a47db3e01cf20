use axum::{Json, extract::State};
use nikki::ReflectionResponse;

use super::body::JsonObject;
use crate::AppState;
use crate::error::{ApiError, ErrorResponse};

/// Request to build a lesson from a diary entry
#[derive(Debug, Clone, serde::Deserialize, utoipa::ToSchema)]
pub struct ReflectRequest {
    /// Diary entry, must not be blank
    pub entry: String,
    /// Proficiency label, defaults to `beginner`
    pub level: Option<String>,
}

/// Build a lesson from a diary entry
#[utoipa::path(
    post,
    path = "/api/reflect",
    request_body = ReflectRequest,
    responses(
        (status = 200, description = "Structured lesson", body = ReflectionResponse),
        (status = 400, description = "Entry missing or blank", body = ErrorResponse),
        (status = 500, description = "Model call failed", body = ErrorResponse),
        (status = 503, description = "Model credentials missing", body = ErrorResponse)
    ),
    tag = "lesson"
)]
pub async fn reflect(
    State(state): State<AppState>,
    body: JsonObject,
) -> Result<Json<ReflectionResponse>, ApiError> {
    let entry = body.entry()?;
    let level = body.level();

    let reflection = state.service.reflect(&entry, &level).await?;
    Ok(Json(reflection))
}
