pub mod api_handler;
pub mod health_handler;
pub mod llm_generator;
pub mod schema_loader;
