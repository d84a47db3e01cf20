#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use nikki::stub::{StubIllustrator, StubReflector};
use nikki::{BackendSelector, LessonService, ModelSettings};
use nikki_api::{AppState, build_app};
use nikki_core::{
    GenerationError, Illustrator, MangaPrompt, MangaResult, Panel, Reflector, ReflectionResponse,
    Result, SharedIllustrator, SharedReflector,
};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tower::util::ServiceExt;

/// Create a test application serving stub content
pub fn create_test_app() -> axum::Router {
    create_app(LessonService::new(ModelSettings::stub()))
}

/// Create a test application in live mode without any credentials
pub fn create_live_app_without_keys() -> axum::Router {
    create_app(LessonService::new(ModelSettings::live(None)))
}

pub fn create_app(service: LessonService) -> axum::Router {
    build_app(AppState::new(service))
}

/// Send a raw body and parse the JSON reply
pub async fn raw_request(
    app: &mut axum::Router,
    method: &str,
    uri: &str,
    body: Body,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let body: Value = if body_bytes.is_empty() {
        json!(null)
    } else {
        // Try to parse as JSON, if it fails, treat as string
        serde_json::from_slice(&body_bytes)
            .unwrap_or_else(|_| json!(String::from_utf8_lossy(&body_bytes).to_string()))
    };

    (status, body)
}

/// Helper function to make JSON requests
pub async fn json_request(
    app: &mut axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let body = match body {
        Some(body) => Body::from(serde_json::to_string(&body).unwrap()),
        None => Body::empty(),
    };
    raw_request(app, method, uri, body).await
}

/// Counts backend calls; serves stub content unless told to fail
#[derive(Clone, Default)]
pub struct Calls {
    pub reflect: Arc<AtomicUsize>,
    pub illustrate: Arc<AtomicUsize>,
}

impl Calls {
    pub fn reflect_count(&self) -> usize {
        self.reflect.load(Ordering::SeqCst)
    }

    pub fn illustrate_count(&self) -> usize {
        self.illustrate.load(Ordering::SeqCst)
    }
}

struct RecordingReflector {
    calls: Calls,
    failure: Option<GenerationError>,
}

#[async_trait]
impl Reflector for RecordingReflector {
    async fn reflect(&self, entry: &str, level: &str) -> Result<ReflectionResponse> {
        self.calls.reflect.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(e) => Err(e.clone()),
            None => StubReflector.reflect(entry, level).await,
        }
    }
}

struct RecordingIllustrator {
    calls: Calls,
    failure: Option<GenerationError>,
}

#[async_trait]
impl Illustrator for RecordingIllustrator {
    async fn illustrate(&self, prompt: &MangaPrompt, panels: &[Panel]) -> Result<MangaResult> {
        self.calls.illustrate.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(e) => Err(e.clone()),
            None => StubIllustrator.illustrate(prompt, panels).await,
        }
    }
}

pub struct RecordingSelector {
    pub calls: Calls,
    pub reflect_failure: Option<GenerationError>,
    pub illustrate_failure: Option<GenerationError>,
}

impl RecordingSelector {
    pub fn new(calls: Calls) -> Self {
        Self {
            calls,
            reflect_failure: None,
            illustrate_failure: None,
        }
    }
}

impl BackendSelector for RecordingSelector {
    fn reflector(&self) -> Result<SharedReflector> {
        Ok(Arc::new(RecordingReflector {
            calls: self.calls.clone(),
            failure: self.reflect_failure.clone(),
        }))
    }

    fn illustrator(&self) -> Result<SharedIllustrator> {
        Ok(Arc::new(RecordingIllustrator {
            calls: self.calls.clone(),
            failure: self.illustrate_failure.clone(),
        }))
    }
}

/// App whose backends record every call
pub fn create_recording_app(selector: RecordingSelector) -> axum::Router {
    create_app(LessonService::with_selector(selector))
}

/// Decode an SVG data URL
pub fn decode_svg(data_url: &str) -> String {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD as BASE64;

    let payload = data_url
        .strip_prefix("data:image/svg+xml;base64,")
        .expect("svg data url");
    String::from_utf8(BASE64.decode(payload).unwrap()).unwrap()
}

/// `y` coordinates of the panel dialogue lines in a placeholder SVG
pub fn dialogue_line_ys(svg: &str) -> Vec<usize> {
    svg.split("<text x='70' y='")
        .skip(1)
        .map(|rest| rest.split('\'').next().unwrap().parse().unwrap())
        .collect()
}

/// A stub lesson as JSON, for building manga requests
pub fn stub_lesson() -> Value {
    serde_json::to_value(nikki::stub::jogging_lesson("entry", "beginner")).unwrap()
}
