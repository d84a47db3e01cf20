use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
    routing::get,
};
use nikki_api::error::catch_panic_layer;
use serde_json::{Value, json};
use tower::util::ServiceExt;

async fn explode() -> &'static str {
    panic!("lesson state corrupted")
}

#[tokio::test]
async fn test_panic_becomes_json_500() {
    let app: Router = Router::new()
        .route("/explode", get(explode))
        .layer(catch_panic_layer());

    let request = Request::builder()
        .uri("/explode")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        body,
        json!({ "error": "Internal server error", "detail": "lesson state corrupted" })
    );
}
