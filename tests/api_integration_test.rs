use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use formgen::adapters::api_handler::ApiState;
use formgen::cli::Cli;
use formgen::config::Settings;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::util::ServiceExt;

fn test_state() -> ApiState {
    let cli = Cli {
        config: "does-not-exist.toml".into(),
        host: None,
        port: None,
        schema: None,
        sets: None,
        backend: formgen::cli::BackendChoice::Local,
    };
    let settings = Settings::new_with_cli(&cli).expect("default settings");
    ApiState {
        settings: Arc::new(RwLock::new(settings)),
        backend: None,
    }
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn sample_schema() -> Value {
    json!({
        "components": [
            {
                "type": "panel",
                "key": "contact",
                "title": "Contact",
                "components": [
                    { "type": "textfield", "key": "name" },
                    { "type": "email", "key": "email" }
                ]
            }
        ]
    })
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = formgen::create_app(test_state());

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_generate_endpoint_returns_panel_grouped_sets() {
    let app = formgen::create_app(test_state());

    let request = post_json(
        "/api/generate",
        json!({ "schema": sample_schema(), "numTestSets": 2 }),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let sets = body.as_array().expect("array of test sets");
    assert_eq!(sets.len(), 2);
    assert_eq!(sets[0]["panels"][0]["title"], "Contact");
    assert!(sets[0]["panels"][0]["fields"]["email"].is_string());
}

#[tokio::test]
async fn test_generate_endpoint_defaults_set_count() {
    let app = formgen::create_app(test_state());

    let request = post_json("/api/generate", json!({ "schema": sample_schema() }));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_generate_endpoint_distinguishes_error_classes() {
    let app = formgen::create_app(test_state());

    // Not a form schema at all
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/generate",
            json!({ "schema": { "oops": true } }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Valid shape, nothing usable inside
    let response = app
        .oneshot(post_json(
            "/api/generate",
            json!({ "schema": { "components": [{ "type": "button", "key": "go" }] } }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_generate_endpoint_llm_without_backend() {
    let app = formgen::create_app(test_state());

    let request = post_json(
        "/api/generate",
        json!({ "schema": sample_schema(), "backend": "llm" }),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_fields_endpoint_returns_parse_result() {
    let app = formgen::create_app(test_state());

    let request = post_json("/api/fields", json!({ "schema": sample_schema() }));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["panels"][0]["key"], "contact");
    assert_eq!(body["fields"][0]["key"], "contact.name");
    assert_eq!(body["fields"][1]["key"], "contact.email");
}
