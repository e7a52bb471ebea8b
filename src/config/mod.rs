//! Application configuration, layered CLI > environment > file > defaults.

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

#[derive(Debug, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub generation: GenerationSettings,
    /// External generation backend. Absent means only the local
    /// synthesizer is available.
    #[serde(default)]
    pub llm: Option<LlmSettings>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Knobs for the local synthesizer. These were implicit constants in the
/// original tool; keeping them here keeps the core side-effect-free.
#[derive(Debug, Deserialize, Serialize, Clone, Copy)]
#[serde(default)]
pub struct GenerationSettings {
    /// Set count used when a request omits or zeroes `numTestSets`.
    pub default_sets: usize,
    /// Default lower bound for number fields without a min constraint.
    pub number_min: i64,
    /// Default upper bound for number fields without a max constraint.
    pub number_max: i64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            default_sets: 5,
            number_min: 0,
            number_max: 100,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub model: String,
    /// Environment variable holding the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    OpenAI,
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        let cli = Cli {
            config: "formgen.toml".into(),
            host: None,
            port: None,
            schema: None,
            sets: None,
            backend: crate::cli::BackendChoice::Local,
        };
        Self::new_with_cli(&cli)
    }

    /// Build settings from the config file named by the CLI, then apply
    /// CLI overrides on top.
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .add_source(File::from(cli.config.clone()).required(false))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("generation.default_sets", 5)?
            .set_default("generation.number_min", 0)?
            .set_default("generation.number_max", 100)?
            .build()?;

        let mut settings: Settings = s.try_deserialize()?;
        settings.apply_cli_overrides(cli);

        if settings.generation.default_sets == 0 {
            anyhow::bail!("generation.default_sets must be at least 1");
        }

        Ok(settings)
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
    }
}
