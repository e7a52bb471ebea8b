use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Form test data generator - serves an HTTP API by default, or generates
/// once to stdout when --schema is given.
#[derive(Parser, Debug, Clone)]
#[command(name = "formgen", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "FORMGEN_CONFIG", default_value = "formgen.toml")]
    pub config: PathBuf,

    /// Server host address
    #[arg(long, env = "FORMGEN_HOST")]
    pub host: Option<String>,

    /// Server port
    #[arg(long, env = "FORMGEN_PORT")]
    pub port: Option<u16>,

    /// Generate once from this schema file or URL and print the result
    #[arg(long)]
    pub schema: Option<String>,

    /// Number of test sets to generate in one-shot mode
    #[arg(long)]
    pub sets: Option<usize>,

    /// Generation backend for one-shot mode
    #[arg(long, value_enum, default_value_t = BackendChoice::Local)]
    pub backend: BackendChoice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendChoice {
    /// Deterministic rule-based synthesizer
    Local,
    /// External LLM generation backend
    Llm,
}
