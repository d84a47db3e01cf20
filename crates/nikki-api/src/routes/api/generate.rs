use axum::{Json, extract::State};
use nikki::GenerateResponse;

use super::body::JsonObject;
use super::reflect::ReflectRequest;
use crate::AppState;
use crate::error::{ApiError, ErrorResponse};

/// Build the lesson and draw its page in one call
#[utoipa::path(
    post,
    path = "/api/generate",
    request_body = ReflectRequest,
    responses(
        (status = 200, description = "Lesson with rendered page", body = GenerateResponse),
        (status = 400, description = "Entry missing or blank", body = ErrorResponse),
        (status = 500, description = "A model call failed", body = ErrorResponse),
        (status = 503, description = "Model credentials missing", body = ErrorResponse)
    ),
    tag = "lesson"
)]
pub async fn generate(
    State(state): State<AppState>,
    body: JsonObject,
) -> Result<Json<GenerateResponse>, ApiError> {
    let entry = body.entry()?;
    let level = body.level();

    let response = state.service.generate(&entry, &level).await?;
    Ok(Json(response))
}
