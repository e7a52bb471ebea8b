use clap::Parser;
use formgen::adapters::api_handler::ApiState;
use formgen::adapters::llm_generator::{CompletionPort, LlmGenerator, OpenAiBackend};
use formgen::adapters::schema_loader;
use formgen::cli::{BackendChoice, Cli};
use formgen::config::Settings;
use formgen::generator;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)?;

    // One-shot mode: generate from a schema file or URL and print.
    if let Some(source) = &cli.schema {
        return generate_once(&cli, &settings, source).await;
    }

    let host = settings.server.host.clone();
    let port = settings.server.port;
    info!("Starting formgen server on {}:{}", host, port);

    let backend = build_backend(&settings);
    let state = ApiState {
        settings: Arc::new(RwLock::new(settings)),
        backend,
    };

    let app = formgen::create_app(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_backend(settings: &Settings) -> Option<Arc<dyn CompletionPort>> {
    let llm = settings.llm.as_ref()?;
    match OpenAiBackend::new(llm) {
        Ok(backend) => Some(Arc::new(backend)),
        Err(e) => {
            warn!("LLM backend unavailable: {}", e);
            None
        }
    }
}

async fn generate_once(cli: &Cli, settings: &Settings, source: &str) -> anyhow::Result<()> {
    let schema = schema_loader::load_schema(source).await?;
    let sets = cli.sets.unwrap_or(0);

    let output = match cli.backend {
        BackendChoice::Local => {
            let test_sets = generator::generate_local(&schema, sets, &settings.generation)?;
            serde_json::to_string_pretty(&test_sets)?
        }
        BackendChoice::Llm => {
            let llm = settings
                .llm
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("no [llm] section in configuration"))?;
            let backend: Arc<dyn CompletionPort> = Arc::new(OpenAiBackend::new(llm)?);
            let generator = LlmGenerator::new(backend, settings.generation.default_sets);
            let records = generator.generate(&schema, sets).await?;
            serde_json::to_string_pretty(&records)?
        }
    };

    println!("{}", output);
    Ok(())
}
