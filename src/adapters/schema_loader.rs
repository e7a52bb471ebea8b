//! Schema document loading from local files or HTTP(S) URLs.
//!
//! This is transport glue in front of the core: whatever the source, the
//! result is one `serde_json::Value` handed to the walker. YAML files are
//! accepted by extension and converted to the same JSON value shape.

use anyhow::Context;
use serde_json::Value;
use std::path::Path;

/// Load a schema from `source`, which is treated as a URL when it starts
/// with an http(s) scheme and as a filesystem path otherwise.
pub async fn load_schema(source: &str) -> anyhow::Result<Value> {
    if source.starts_with("http://") || source.starts_with("https://") {
        load_from_url(source).await
    } else {
        load_from_file(Path::new(source)).await
    }
}

async fn load_from_url(url: &str) -> anyhow::Result<Value> {
    tracing::info!(url, "fetching schema");
    let response = reqwest::get(url)
        .await
        .with_context(|| format!("failed to fetch schema from {}", url))?;

    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("schema fetch failed with HTTP status {}", status);
    }

    response
        .json()
        .await
        .with_context(|| format!("schema at {} is not valid JSON", url))
}

async fn load_from_file(path: &Path) -> anyhow::Result<Value> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read schema file {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );

    if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("schema file {} is not valid YAML", path.display()))
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("schema file {} is not valid JSON", path.display()))
    }
}
