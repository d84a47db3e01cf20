use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use nikki_core::{
    GenerationError, Illustrator, MangaPrompt, MangaResult, Panel, ProcessorMetadata, Result,
};

use super::client::{GeminiClient, GenerateContentRequest, InlineData};
use super::error::GeminiResult;
use super::prompt::image_prompt;
use crate::config::ModelSettings;

const DEFAULT_MIME_TYPE: &str = "image/png";

/// Manga page rendering with an image-capable model
#[derive(Debug, Clone)]
pub struct GeminiIllustrator {
    client: GeminiClient,
    model: String,
}

impl GeminiIllustrator {
    pub fn new(client: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Uses the primary key, then the image fallback key. Fails with
    /// `Unavailable` when neither is set.
    pub fn from_settings(settings: &ModelSettings, http: reqwest::Client) -> Result<Self> {
        let api_key = settings
            .image_key()
            .ok_or_else(|| GenerationError::unavailable("GEMINI_API_KEY is not set."))?;

        Ok(Self::new(
            GeminiClient::new(http, settings.api_base.clone(), api_key),
            settings.image_model.clone(),
        ))
    }

    async fn generate(&self, prompt: &MangaPrompt, panels: &[Panel]) -> GeminiResult<MangaResult> {
        let request = GenerateContentRequest::prompt(image_prompt(prompt, panels.len()));
        let response = self.client.generate_content(&self.model, &request).await?;
        let image = response.image()?;

        Ok(MangaResult {
            image_data_url: data_url(image),
            panels: panels.to_vec(),
            notes: format!("Generated by {}", self.model),
        })
    }
}

/// Encode an inline image as a `data:` URL
pub fn data_url(image: &InlineData) -> String {
    let mime_type = image
        .mime_type
        .as_deref()
        .filter(|mime| !mime.is_empty())
        .unwrap_or(DEFAULT_MIME_TYPE);
    format!("data:{};base64,{}", mime_type, BASE64.encode(&image.data))
}

#[async_trait]
impl Illustrator for GeminiIllustrator {
    async fn illustrate(&self, prompt: &MangaPrompt, panels: &[Panel]) -> Result<MangaResult> {
        self.generate(prompt, panels)
            .await
            .map_err(|e| GenerationError::call(format!("Image generation failed: {}", e)))
    }

    fn metadata(&self) -> ProcessorMetadata {
        ProcessorMetadata::new(self.model.clone(), "Manga page image generation")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_uses_reported_mime() {
        let image = InlineData {
            mime_type: Some("image/jpeg".to_string()),
            data: vec![0xff, 0xd8, 0xff],
        };
        assert_eq!(data_url(&image), "data:image/jpeg;base64,/9j/");
    }

    #[test]
    fn test_data_url_defaults_mime() {
        let image = InlineData {
            mime_type: None,
            data: b"png".to_vec(),
        };
        assert_eq!(data_url(&image), "data:image/png;base64,cG5n");
    }

    #[test]
    fn test_fallback_key() {
        let settings = ModelSettings {
            image_api_key: Some("banana".to_string()),
            ..ModelSettings::live(None)
        };
        assert!(GeminiIllustrator::from_settings(&settings, reqwest::Client::new()).is_ok());

        let err = GeminiIllustrator::from_settings(&ModelSettings::live(None), reqwest::Client::new())
            .unwrap_err();
        assert_eq!(err.to_string(), "GEMINI_API_KEY is not set.");
    }

    #[tokio::test]
    async fn test_transport_failure_is_call_error() {
        // Nothing listens on port 9 of the loopback interface
        let settings = ModelSettings {
            api_base: "http://127.0.0.1:9/v1beta".to_string(),
            ..ModelSettings::live(Some("key".to_string()))
        };
        let illustrator = GeminiIllustrator::from_settings(&settings, reqwest::Client::new()).unwrap();
        let lesson = crate::stub::jogging_lesson("entry", "beginner");

        let err = illustrator
            .illustrate(&lesson.manga_prompt, &lesson.script.panels)
            .await
            .unwrap_err();
        match err {
            GenerationError::Call(message) => {
                assert!(message.starts_with("Image generation failed: "))
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
