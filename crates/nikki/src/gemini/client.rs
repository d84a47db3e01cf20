//! Minimal `generateContent` REST client
//!
//! One attempt per call. There is no retry and no explicit timeout; the
//! transport defaults apply.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{GeminiError, GeminiResult};
use nikki_core::truncate_chars;

const API_KEY_HEADER: &str = "x-goog-api-key";
const ERROR_BODY_CHARS: usize = 300;

/// Request body for `models/{model}:generateContent`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Single user turn carrying `prompt`
    pub fn prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::text(prompt)],
            }],
            generation_config: None,
        }
    }

    /// Constrain the reply to JSON matching `schema`
    pub fn with_response_schema(mut self, schema: Value) -> Self {
        self.generation_config = Some(GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(schema),
        });
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, alias = "inline_data", skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
    /// Set on reasoning summaries, which are not part of the answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    fn is_thought(&self) -> bool {
        self.thought.unwrap_or(false)
    }
}

/// Binary payload; base64 on the wire, raw bytes in memory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default, alias = "mime_type")]
    pub mime_type: Option<String>,
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Parts of the first candidate, or an error when there are none
    pub fn first_parts(&self) -> GeminiResult<&[Part]> {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| content.parts.as_slice())
            .filter(|parts| !parts.is_empty())
            .ok_or_else(|| self.no_content())
    }

    /// Empty reply, carrying the first candidate's finish reason if any
    fn no_content(&self) -> GeminiError {
        GeminiError::NoContent {
            finish_reason: self
                .candidates
                .first()
                .and_then(|candidate| candidate.finish_reason.clone()),
        }
    }

    /// Concatenated answer text of the first candidate
    pub fn text(&self) -> GeminiResult<String> {
        let text: String = self
            .first_parts()?
            .iter()
            .filter(|part| !part.is_thought())
            .filter_map(|part| part.text.as_deref())
            .collect();

        if text.trim().is_empty() {
            return Err(self.no_content());
        }
        Ok(text)
    }

    /// First inline image of the first candidate. When the model answered
    /// in text only, the error carries the start of that text.
    pub fn image(&self) -> GeminiResult<&InlineData> {
        let parts = self.first_parts()?;

        if let Some(data) = parts.iter().find_map(|part| part.inline_data.as_ref()) {
            return Ok(data);
        }

        let text = parts
            .iter()
            .filter(|part| !part.is_thought())
            .find_map(|part| part.text.as_deref())
            .unwrap_or_default();
        Err(GeminiError::TextInsteadOfImage(
            truncate_chars(text, 100).to_string(),
        ))
    }
}

/// Authenticated client bound to one API key
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(http: reqwest::Client, api_base: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            api_base: api_base.into(),
            api_key: api_key.into(),
        }
    }

    pub fn endpoint(&self, model: &str) -> String {
        let model = model.trim();
        let model_path = if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{}", model)
        };
        format!("{}/{}:generateContent", self.api_base, model_path)
    }

    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> GeminiResult<GenerateContentResponse> {
        let endpoint = self.endpoint(model);
        tracing::debug!("POST {}", endpoint);

        let response = self
            .http
            .post(&endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::Status {
                status: status.as_u16(),
                body: truncate_chars(&body, ERROR_BODY_CHARS).to_string(),
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

mod base64_bytes {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        BASE64.decode(encoded.as_bytes()).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_request_wire_format() {
        let request = GenerateContentRequest::prompt("hello")
            .with_response_schema(json!({ "type": "OBJECT" }));

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "contents": [{ "role": "user", "parts": [{ "text": "hello" }] }],
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": { "type": "OBJECT" }
                }
            })
        );
    }

    #[test]
    fn test_plain_request_has_no_generation_config() {
        let value = serde_json::to_value(GenerateContentRequest::prompt("draw")).unwrap();
        assert!(value.get("generationConfig").is_none());
    }

    #[test]
    fn test_endpoint() {
        let client = GeminiClient::new(reqwest::Client::new(), "https://example.test/v1beta", "k");
        assert_eq!(
            client.endpoint("gemini-3-pro-preview"),
            "https://example.test/v1beta/models/gemini-3-pro-preview:generateContent"
        );
        assert_eq!(
            client.endpoint("models/custom"),
            "https://example.test/v1beta/models/custom:generateContent"
        );
    }

    #[test]
    fn test_text_skips_thoughts() {
        let response = response(json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "thinking...", "thought": true },
                    { "text": "{\"a\":" },
                    { "text": "1}" }
                ]}
            }]
        }));
        assert_eq!(response.text().unwrap(), "{\"a\":1}");
    }

    #[test]
    fn test_no_candidates() {
        let empty = response(json!({}));
        assert!(matches!(empty.image(), Err(GeminiError::NoContent { .. })));
        assert!(matches!(empty.text(), Err(GeminiError::NoContent { .. })));

        let no_parts = response(json!({ "candidates": [{ "content": { "parts": [] } }] }));
        assert!(matches!(no_parts.image(), Err(GeminiError::NoContent { .. })));

        let no_content = response(json!({ "candidates": [{ "finishReason": "SAFETY" }] }));
        assert!(matches!(no_content.image(), Err(GeminiError::NoContent { .. })));
    }

    #[test]
    fn test_blocked_reply_reports_finish_reason() {
        let blocked = response(json!({ "candidates": [{ "finishReason": "SAFETY" }] }));
        assert_eq!(
            blocked.text().unwrap_err().to_string(),
            "No content generated (finish reason: SAFETY)"
        );
    }

    #[test]
    fn test_refusal_excerpt_skips_thoughts() {
        let response = response(json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "internal reasoning", "thought": true },
                    { "text": "I cannot draw that" }
                ]}
            }]
        }));

        assert_eq!(
            response.image().unwrap_err().to_string(),
            "Model returned text instead of image: I cannot draw that..."
        );
    }

    #[test]
    fn test_image_decodes_inline_data() {
        let response = response(json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "Here is your page" },
                    { "inlineData": { "mimeType": "image/jpeg", "data": "AQID" } }
                ]}
            }]
        }));

        let image = response.image().unwrap();
        assert_eq!(image.data, vec![1, 2, 3]);
        assert_eq!(image.mime_type.as_deref(), Some("image/jpeg"));
    }

    #[test]
    fn test_image_accepts_snake_case() {
        let response = response(json!({
            "candidates": [{
                "content": { "parts": [{ "inline_data": { "data": "AQID" } }] }
            }]
        }));

        let image = response.image().unwrap();
        assert_eq!(image.mime_type, None);
    }

    #[test]
    fn test_text_instead_of_image_is_truncated() {
        let refusal = "I can't draw that. ".repeat(20);
        let response = response(json!({
            "candidates": [{ "content": { "parts": [{ "text": refusal }] } }]
        }));

        let err = response.image().unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Model returned text instead of image: I can't draw that."));
        assert!(message.ends_with("..."));
        match err {
            GeminiError::TextInsteadOfImage(text) => assert_eq!(text.chars().count(), 100),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_base64_is_rejected() {
        let result = serde_json::from_value::<GenerateContentResponse>(json!({
            "candidates": [{
                "content": { "parts": [{ "inlineData": { "data": "not base64!" } }] }
            }]
        }));
        assert!(result.is_err());
    }
}
