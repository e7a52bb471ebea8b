//! # formgen - Form Test Data Generator
//!
//! formgen parses form.io-style form schemas and produces synthetic test
//! data sets for their input fields, honoring field types, validation
//! constraints, option lists, and conditional visibility rules.
//!
//! ## Generation paths
//!
//! - **Local**: a deterministic rule-based synthesizer. Values are a pure
//!   function of the field descriptor and the set index, grouped by panel.
//! - **LLM**: an external completion backend prompted with a flat field
//!   listing, returning ungrouped records.
//!
//! ## Quick start
//!
//! ```rust
//! use formgen::config::GenerationSettings;
//! use serde_json::json;
//!
//! let schema = json!({
//!     "components": [
//!         { "type": "panel", "key": "contact", "title": "Contact", "components": [
//!             { "type": "email", "key": "email", "label": "Email" }
//!         ]}
//!     ]
//! });
//!
//! let sets = formgen::generator::generate_local(&schema, 3, &GenerationSettings::default())
//!     .expect("generation succeeds");
//! assert_eq!(sets.len(), 3);
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: the schema/field data model and error taxonomy
//! - **Generator**: walker, synthesizer, conditional resolver, assembler
//! - **Adapters**: HTTP handlers, schema loading, the LLM backend port
//! - **Config**: configuration management

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod generator;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::adapters::api_handler::{self, ApiState};
use crate::adapters::health_handler::HealthHandler;

/// Creates the Axum application router with all endpoints configured.
pub fn create_app(state: ApiState) -> Router {
    let health_handler = Arc::new(HealthHandler::new());

    let api_router = Router::new()
        .route("/generate", post(api_handler::generate))
        .route("/fields", post(api_handler::fields))
        .with_state(state);

    let router = Router::new()
        .route(
            "/health",
            get({
                let handler = health_handler.clone();
                move || {
                    let h = handler.clone();
                    async move { h.health().await }
                }
            }),
        )
        .nest("/api", api_router);

    router.layer(
        tower_http::cors::CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any),
    )
}
