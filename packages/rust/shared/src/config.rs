//! Application configuration for TextRelay.
//!
//! User config lives at `~/.textrelay/textrelay.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "textrelay.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".textrelay";

// ---------------------------------------------------------------------------
// Config structs (matching textrelay.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Webhook settings.
    #[serde(default)]
    pub webhook: WebhookConfig,
}

/// `[webhook]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Endpoint URL the pipeline posts chunks to. Empty until configured.
    #[serde(default)]
    pub url: String,

    /// Optional per-request timeout in seconds. When absent, requests wait
    /// for the transport's own behavior.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.textrelay/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| PipelineError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.textrelay/textrelay.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| PipelineError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| PipelineError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| PipelineError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| PipelineError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Check that a webhook endpoint is configured and is a valid HTTP(S) URL.
pub fn validate_endpoint(endpoint: &str) -> Result<()> {
    if endpoint.is_empty() {
        return Err(PipelineError::MissingEndpoint);
    }

    let parsed = url::Url::parse(endpoint)
        .map_err(|e| PipelineError::config(format!("invalid webhook URL '{endpoint}': {e}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(PipelineError::config(format!(
            "invalid webhook URL '{endpoint}': unsupported scheme '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("[webhook]"));
        assert!(toml_str.contains("url"));
    }

    #[test]
    fn config_roundtrip() {
        let toml_str = r#"
[webhook]
url = "https://hooks.example.com/transform"
timeout_secs = 30
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.webhook.url, "https://hooks.example.com/transform");
        assert_eq!(config.webhook.timeout_secs, Some(30));

        let serialized = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&serialized).expect("deserialize");
        assert_eq!(parsed.webhook.url, config.webhook.url);
    }

    #[test]
    fn missing_timeout_defaults_to_none() {
        let toml_str = r#"
[webhook]
url = "https://hooks.example.com/transform"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.webhook.timeout_secs, None);
    }

    #[test]
    fn load_config_from_file() {
        let dir = std::env::temp_dir().join(format!("textrelay-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("textrelay.toml");
        std::fs::write(&path, "[webhook]\nurl = \"https://example.com/hook\"\n").unwrap();

        let config = load_config_from(&path).expect("load");
        assert_eq!(config.webhook.url, "https://example.com/hook");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_config_rejects_invalid_toml() {
        let dir = std::env::temp_dir().join(format!("textrelay-badcfg-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("textrelay.toml");
        std::fs::write(&path, "not valid toml [[").unwrap();

        let result = load_config_from(&path);
        assert!(result.is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn endpoint_validation() {
        assert!(matches!(
            validate_endpoint(""),
            Err(PipelineError::MissingEndpoint)
        ));
        assert!(validate_endpoint("not a url").is_err());
        assert!(validate_endpoint("ftp://example.com/hook").is_err());
        assert!(validate_endpoint("https://hooks.example.com/transform").is_ok());
        assert!(validate_endpoint("http://localhost:5678/webhook/formal").is_ok());
    }
}
