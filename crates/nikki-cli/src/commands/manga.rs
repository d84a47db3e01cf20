use nikki::{LessonService, MangaPrompt, Panel};
use serde::Deserialize;
use std::path::Path;

use super::image::write_image;
use super::print_json;
use crate::error::CliError;

/// Same shape as the `/api/manga` request body
#[derive(Debug, Deserialize)]
pub struct MangaInput {
    pub manga_prompt: MangaPrompt,
    pub panels: Vec<Panel>,
}

impl MangaInput {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path)?;
        let input: Self = serde_json::from_str(&content)?;

        if input.panels.is_empty() {
            return Err(CliError::InvalidInput(
                "manga_prompt and panels are required".to_string(),
            ));
        }
        Ok(input)
    }
}

pub async fn run_manga(
    service: &LessonService,
    input: &Path,
    out: Option<&Path>,
) -> Result<(), CliError> {
    let input = MangaInput::load(input)?;
    let result = service.illustrate(&input.manga_prompt, &input.panels).await?;

    match out {
        Some(out) => write_image(&result.image_data_url, out).map(|_| ()),
        None => print_json(&result),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nikki::ModelSettings;

    #[test]
    fn test_load_reflect_output_shape() {
        let lesson = nikki::stub::jogging_lesson("entry", "beginner");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manga.json");
        let body = serde_json::json!({
            "manga_prompt": lesson.manga_prompt,
            "panels": lesson.script.panels,
        });
        std::fs::write(&path, body.to_string()).unwrap();

        let input = MangaInput::load(&path).unwrap();
        assert_eq!(input.panels.len(), 4);
    }

    #[test]
    fn test_load_rejects_empty_panels() {
        let lesson = nikki::stub::jogging_lesson("entry", "beginner");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manga.json");
        let body = serde_json::json!({ "manga_prompt": lesson.manga_prompt, "panels": [] });
        std::fs::write(&path, body.to_string()).unwrap();

        assert!(matches!(
            MangaInput::load(&path),
            Err(CliError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_run_manga_writes_svg() {
        let lesson = nikki::stub::jogging_lesson("entry", "beginner");
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("manga.json");
        let out = dir.path().join("page.svg");
        let body = serde_json::json!({
            "manga_prompt": lesson.manga_prompt,
            "panels": lesson.script.panels,
        });
        std::fs::write(&input, body.to_string()).unwrap();

        let service = LessonService::new(ModelSettings::stub());
        run_manga(&service, &input, Some(&out)).await.unwrap();

        let svg = std::fs::read_to_string(&out).unwrap();
        assert!(svg.starts_with("<svg"));
    }
}
