//! REST API handlers for test data generation.
//!
//! `POST /api/generate` runs either the local deterministic pipeline
//! (panel-grouped output) or the external backend (flat records), and
//! `POST /api/fields` returns the parse result without generating.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::adapters::llm_generator::{CompletionPort, LlmGenerator};
use crate::config::Settings;
use crate::domain::error::GenerationError;
use crate::generator::{self, walker};

/// Shared application state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub settings: Arc<RwLock<Settings>>,
    /// External generation backend, when one is configured.
    pub backend: Option<Arc<dyn CompletionPort>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub schema: Value,
    /// Zero or omitted falls back to the configured default.
    #[serde(default)]
    pub num_test_sets: usize,
    #[serde(default)]
    pub backend: BackendKind,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Local,
    Llm,
}

#[derive(Debug, Deserialize)]
pub struct FieldsRequest {
    pub schema: Value,
}

pub async fn generate(
    State(state): State<ApiState>,
    Json(request): Json<GenerateRequest>,
) -> Response {
    match request.backend {
        BackendKind::Local => {
            let generation = {
                let settings = state.settings.read().await;
                settings.generation
            };
            match generator::generate_local(&request.schema, request.num_test_sets, &generation) {
                Ok(sets) => (StatusCode::OK, Json(json!(sets))).into_response(),
                Err(err) => error_response(err),
            }
        }
        BackendKind::Llm => {
            let Some(backend) = state.backend.clone() else {
                return (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({ "error": "no generation backend configured" })),
                )
                    .into_response();
            };
            let default_sets = {
                let settings = state.settings.read().await;
                settings.generation.default_sets
            };
            let llm = LlmGenerator::new(backend, default_sets);
            match llm.generate(&request.schema, request.num_test_sets).await {
                Ok(records) => (StatusCode::OK, Json(json!(records))).into_response(),
                Err(err) => error_response(err),
            }
        }
    }
}

/// Parse-only endpoint used by front-ends to preview panels and fields
/// before generating.
pub async fn fields(Json(request): Json<FieldsRequest>) -> Response {
    if walker::root_components(&request.schema).is_none() {
        return error_response(GenerationError::InvalidSchema);
    }
    let parsed = walker::walk(&request.schema);
    if parsed.fields.is_empty() {
        return error_response(GenerationError::NoFieldsFound);
    }
    (StatusCode::OK, Json(json!(parsed))).into_response()
}

fn error_response(err: GenerationError) -> Response {
    let status = err.status_code();
    if status.is_server_error() {
        tracing::error!(error = %err, "generation failed");
    } else {
        tracing::warn!(error = %err, "generation rejected");
    }
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}
