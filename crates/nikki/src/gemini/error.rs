use nikki_core::ValidationError;
use thiserror::Error;

/// Failures talking to the provider
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("No content generated{}", finish_suffix(.finish_reason))]
    NoContent { finish_reason: Option<String> },

    #[error("Model returned text instead of image: {0}...")]
    TextInsteadOfImage(String),

    #[error("could not decode provider response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response did not match the lesson schema: {0}")]
    Schema(serde_json::Error),

    #[error("response failed validation: {0}")]
    Invalid(#[from] ValidationError),
}

pub type GeminiResult<T> = Result<T, GeminiError>;

fn finish_suffix(finish_reason: &Option<String>) -> String {
    match finish_reason {
        Some(reason) => format!(" (finish reason: {})", reason),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_content_message() {
        let plain = GeminiError::NoContent {
            finish_reason: None,
        };
        assert_eq!(plain.to_string(), "No content generated");

        let blocked = GeminiError::NoContent {
            finish_reason: Some("SAFETY".to_string()),
        };
        assert_eq!(
            blocked.to_string(),
            "No content generated (finish reason: SAFETY)"
        );
    }
}
