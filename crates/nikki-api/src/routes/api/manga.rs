use axum::{Json, extract::State};
use nikki::{MangaPrompt, MangaResult, Panel};

use super::body::JsonObject;
use crate::AppState;
use crate::error::{ApiError, ErrorResponse};

/// Request to draw a manga page
#[derive(Debug, Clone, serde::Deserialize, utoipa::ToSchema)]
pub struct MangaRequest {
    pub manga_prompt: MangaPrompt,
    /// Panels echoed back in the result
    pub panels: Vec<Panel>,
}

/// Draw the manga page for a lesson
#[utoipa::path(
    post,
    path = "/api/manga",
    request_body = MangaRequest,
    responses(
        (status = 200, description = "Rendered page", body = MangaResult),
        (status = 400, description = "manga_prompt or panels missing or malformed", body = ErrorResponse),
        (status = 500, description = "Image generation failed", body = ErrorResponse),
        (status = 503, description = "Model credentials missing", body = ErrorResponse)
    ),
    tag = "lesson"
)]
pub async fn manga(
    State(state): State<AppState>,
    body: JsonObject,
) -> Result<Json<MangaResult>, ApiError> {
    let (Some(manga_prompt), Some(panels)) =
        (body.required("manga_prompt"), body.required("panels"))
    else {
        return Err(ApiError::bad_request(
            "manga_prompt and panels are required",
        ));
    };

    let manga_prompt: MangaPrompt = JsonObject::parse(manga_prompt, "manga_prompt")?;
    let panels: Vec<Panel> = JsonObject::parse(panels, "panels")?;

    let result = state.service.illustrate(&manga_prompt, &panels).await?;
    Ok(Json(result))
}
