use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::convert::Infallible;

use crate::error::ApiError;

pub const DEFAULT_LEVEL: &str = "beginner";

/// JSON object body that never rejects: a missing, malformed or non-object
/// body is read as `{}`.
#[derive(Debug, Clone, Default)]
pub struct JsonObject(pub Map<String, Value>);

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let fields = match Bytes::from_request(req, state).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(Value::Object(fields)) => fields,
                _ => Map::new(),
            },
            Err(_) => Map::new(),
        };
        Ok(Self(fields))
    }
}

/// Missing-or-empty check for required fields
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        Value::Number(_) => false,
    }
}

impl JsonObject {
    /// Trimmed `entry`, or a 400 when it is missing, not a string, or blank
    pub fn entry(&self) -> Result<String, ApiError> {
        self.0
            .get("entry")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .ok_or_else(|| ApiError::bad_request("entry is required"))
    }

    /// `level`, defaulting to beginner when absent or not a string
    pub fn level(&self) -> String {
        self.0
            .get("level")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_LEVEL)
            .to_string()
    }

    /// A required field: `None` when missing or blank
    pub fn required(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|value| !is_blank(value))
    }

    /// Deserialize a field that has already been checked for presence
    pub fn parse<T: DeserializeOwned>(value: &Value, key: &str) -> Result<T, ApiError> {
        serde_json::from_value(value.clone())
            .map_err(|e| ApiError::bad_request(format!("invalid {}: {}", key, e)))
    }
}
