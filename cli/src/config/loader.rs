//! Simple CLI configuration loader for slider-callback
//!
//! Implements single-source priority loading with flag overrides:
//! 1. --config file/dir (highest priority)
//! 2. Current working directory: ./slider-callback.json or ./.slider-callback/config.json
//! 3. User config: <config dir>/slider-callback/config.json
//! 4. Environment variables only (no files)

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use slider_callback_core::{PageConfig, SliderConfig};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Environment variable holding the endpoint URL
pub const ENDPOINT_ENV: &str = "SLIDER_CALLBACK_URL";
/// Environment variable naming the slider of an env-only configuration
pub const SLIDER_ENV: &str = "SLIDER_CALLBACK_SLIDER";

const CONFIG_FILE: &str = "slider-callback.json";
const CONFIG_DIR: &str = ".slider-callback";

/// Raw configuration file format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawConfig {
    /// Endpoint URL (can be "env:VAR_NAME" for environment variable)
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Sliders on the page; a single default slider when empty
    #[serde(default)]
    pub sliders: Vec<SliderConfig>,
    /// Additional headers (optional)
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

/// CLI configuration loader
#[derive(Debug, Default)]
pub struct CliConfigLoader {
    /// Override config file/directory path
    config_override: Option<PathBuf>,
    /// Flag overrides
    endpoint_override: Option<String>,
}

impl CliConfigLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Set config file/directory override
    pub fn with_config_override(mut self, path: PathBuf) -> Self {
        self.config_override = Some(path);
        self
    }

    /// Set endpoint override
    pub fn with_endpoint_override(mut self, endpoint: String) -> Self {
        self.endpoint_override = Some(endpoint);
        self
    }

    /// Load and resolve configuration
    pub async fn load(&self) -> Result<PageConfig> {
        // Step 1: Find and load base configuration
        let mut config = if let Some(override_path) = &self.config_override {
            self.load_from_path(override_path).await.with_context(|| {
                format!(
                    "Failed to load config from override path: {}",
                    override_path.display()
                )
            })?
        } else {
            self.search_and_load().await?
        };

        // Step 2: Apply flag overrides
        if let Some(endpoint) = &self.endpoint_override {
            config.endpoint = Some(endpoint.clone());
        }

        // Step 3: Resolve to final page config
        self.resolve_config(config)
    }

    /// Search for config in priority order
    async fn search_and_load(&self) -> Result<RawConfig> {
        let cwd = std::env::current_dir()?;
        for candidate in [cwd.join(CONFIG_FILE), cwd.join(CONFIG_DIR).join("config.json")] {
            if candidate.exists() {
                return self.load_file(&candidate).await;
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let candidate = config_dir.join("slider-callback").join("config.json");
            if candidate.exists() {
                return self.load_file(&candidate).await;
            }
        }

        Ok(RawConfig::default())
    }

    /// Load configuration from a specific path (file or directory)
    async fn load_from_path(&self, path: &Path) -> Result<RawConfig> {
        if path.is_file() {
            self.load_file(path).await
        } else if path.is_dir() {
            let config_file = path.join("config.json");
            if config_file.exists() {
                self.load_file(&config_file).await
            } else {
                Err(anyhow!(
                    "No config.json found in directory: {}",
                    path.display()
                ))
            }
        } else {
            Err(anyhow!("Config path does not exist: {}", path.display()))
        }
    }

    /// Load a single config file
    async fn load_file(&self, path: &Path) -> Result<RawConfig> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Resolve raw config to a validated PageConfig
    fn resolve_config(&self, config: RawConfig) -> Result<PageConfig> {
        let endpoint = match config.endpoint {
            Some(endpoint) => endpoint,
            None => std::env::var(ENDPOINT_ENV).map_err(|_| {
                anyhow!(
                    "No endpoint configured. Create a {} file, pass --endpoint or set {}",
                    CONFIG_FILE,
                    ENDPOINT_ENV
                )
            })?,
        };

        // Resolve endpoint (handle env: prefix)
        let endpoint = if let Some(var_name) = endpoint.strip_prefix("env:") {
            std::env::var(var_name)
                .with_context(|| format!("Environment variable not found: {}", var_name))?
        } else {
            endpoint
        };

        let sliders = if config.sliders.is_empty() {
            let id = std::env::var(SLIDER_ENV).unwrap_or_else(|_| "slider".to_string());
            vec![SliderConfig::new(id)
                .with_range(1.0, 100.0, 1.0)
                .with_initial(50.0)]
        } else {
            config.sliders
        };

        let resolved = PageConfig {
            endpoint,
            sliders,
            headers: config.headers,
        };

        resolved
            .validate()
            .map_err(|e| anyhow!("Configuration validation failed: {}", e))?;

        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const CONFIG: &str = r#"{
        "endpoint": "http://192.168.1.40/slider",
        "headers": { "X-Device": "led" },
        "sliders": [
            { "id": "slider1", "min": 0, "max": 1000, "initial": 250 },
            { "id": "slider2", "initial": 66 }
        ]
    }"#;

    #[tokio::test]
    async fn test_load_explicit_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("page.json");
        std::fs::write(&path, CONFIG).unwrap();

        let config = CliConfigLoader::new()
            .with_config_override(path)
            .load()
            .await
            .unwrap();

        assert_eq!(config.endpoint, "http://192.168.1.40/slider");
        assert_eq!(config.sliders.len(), 2);
        assert_eq!(config.sliders[0].max, 1000.0);
        assert_eq!(config.headers.get("X-Device").map(String::as_str), Some("led"));
    }

    #[tokio::test]
    async fn test_load_directory_and_endpoint_override() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("config.json"), CONFIG).unwrap();

        let config = CliConfigLoader::new()
            .with_config_override(dir.path().to_path_buf())
            .with_endpoint_override("http://localhost:5000/change".to_string())
            .load()
            .await
            .unwrap();

        assert_eq!(config.endpoint, "http://localhost:5000/change");
    }

    #[tokio::test]
    async fn test_missing_override_path_fails() {
        let dir = tempdir().unwrap();
        let result = CliConfigLoader::new()
            .with_config_override(dir.path().join("missing.json"))
            .load()
            .await;
        assert!(result.is_err());

        let result = CliConfigLoader::new()
            .with_config_override(dir.path().to_path_buf())
            .load()
            .await;
        assert!(result.unwrap_err().to_string().contains("Failed to load config"));
    }

    #[tokio::test]
    async fn test_invalid_file_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(
            &path,
            r#"{ "endpoint": "http://x.local/c", "sliders": [{ "id": "a", "min": 5, "max": 1 }] }"#,
        )
        .unwrap();

        let err = CliConfigLoader::new()
            .with_config_override(path)
            .load()
            .await
            .unwrap_err();
        assert!(err.to_string().contains("validation failed"));
    }

    #[test]
    fn test_default_slider_when_none_configured() {
        let loader = CliConfigLoader::new();
        let config = loader
            .resolve_config(RawConfig {
                endpoint: Some("http://localhost:5000/change".to_string()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(config.sliders.len(), 1);
        assert_eq!(config.sliders[0].min, 1.0);
        assert_eq!(config.sliders[0].initial, Some(50.0));
    }

    #[test]
    fn test_env_prefixed_endpoint() {
        std::env::set_var("SLIDER_CALLBACK_TEST_URL", "http://10.0.0.7/duty");
        let loader = CliConfigLoader::new();
        let config = loader
            .resolve_config(RawConfig {
                endpoint: Some("env:SLIDER_CALLBACK_TEST_URL".to_string()),
                sliders: vec![SliderConfig::new("led")],
                ..Default::default()
            })
            .unwrap();
        assert_eq!(config.endpoint, "http://10.0.0.7/duty");

        let err = loader
            .resolve_config(RawConfig {
                endpoint: Some("env:SLIDER_CALLBACK_TEST_UNSET".to_string()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(err.to_string().contains("SLIDER_CALLBACK_TEST_UNSET"));
    }
}
