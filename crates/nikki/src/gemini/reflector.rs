use async_trait::async_trait;
use nikki_core::{
    GenerationError, ProcessorMetadata, Reflector, ReflectionResponse, Result, StructuredOutput,
    Validate,
};

use super::client::{GeminiClient, GenerateContentRequest};
use super::error::{GeminiError, GeminiResult};
use super::prompt::reflect_prompt;
use crate::config::ModelSettings;

/// Lesson generation constrained to the [`ReflectionResponse`] schema
#[derive(Debug, Clone)]
pub struct GeminiReflector {
    client: GeminiClient,
    model: String,
}

impl GeminiReflector {
    pub fn new(client: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Fails with `Unavailable` when no credential is configured
    pub fn from_settings(settings: &ModelSettings, http: reqwest::Client) -> Result<Self> {
        let api_key = settings
            .reflect_key()
            .ok_or_else(|| GenerationError::unavailable("GEMINI_API_KEY is not set."))?;

        Ok(Self::new(
            GeminiClient::new(http, settings.api_base.clone(), api_key),
            settings.text_model.clone(),
        ))
    }

    async fn generate(&self, entry: &str, level: &str) -> GeminiResult<ReflectionResponse> {
        let request = GenerateContentRequest::prompt(reflect_prompt(entry, level))
            .with_response_schema(ReflectionResponse::response_schema());

        let response = self.client.generate_content(&self.model, &request).await?;
        parse_reflection(&response.text()?)
    }
}

/// Parse and validate the structured reply
pub fn parse_reflection(text: &str) -> GeminiResult<ReflectionResponse> {
    let reflection: ReflectionResponse =
        serde_json::from_str(text).map_err(GeminiError::Schema)?;
    reflection.validate()?;
    Ok(reflection)
}

#[async_trait]
impl Reflector for GeminiReflector {
    async fn reflect(&self, entry: &str, level: &str) -> Result<ReflectionResponse> {
        self.generate(entry, level)
            .await
            .map_err(|e| GenerationError::call(format!("Gemini reflect failed: {}", e)))
    }

    fn metadata(&self) -> ProcessorMetadata {
        ProcessorMetadata::new(
            self.model.clone(),
            "Schema-constrained lesson generation",
        )
    }
}
