//! Configuration types and loading

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the configured model name
pub const MODEL_ENV: &str = "OPENAI_MODEL";

/// Environment variable overriding the configured base URL
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote model configuration
    pub llm: LlmConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .taskbreak.yml
        let local_config = PathBuf::from(".taskbreak.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/taskbreak/taskbreak.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("taskbreak").join("taskbreak.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::debug!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Remote model configuration as it appears in the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Model identifier
    pub model: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum retries for transient transport failures
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Per-attempt request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            base_url: "https://api.openai.com".to_string(),
            max_retries: 3,
            timeout_ms: 30_000,
            max_tokens: 4096,
        }
    }
}

impl LlmConfig {
    /// Resolve the runtime configuration, applying environment overrides.
    ///
    /// Environment values win over file values: the API key comes from
    /// the variable named by `api-key-env`, and `OPENAI_MODEL` /
    /// `OPENAI_BASE_URL` override the configured model and endpoint.
    /// A missing or empty API key is a hard error - the remote strategy
    /// cannot run without credentials.
    pub fn resolve(&self) -> Result<ResolvedLlmConfig> {
        let api_key = std::env::var(&self.api_key_env).unwrap_or_default();
        if api_key.trim().is_empty() {
            return Err(eyre::eyre!(
                "API key not found. Set the {} environment variable.",
                self.api_key_env
            ));
        }

        let model = env_override(MODEL_ENV).unwrap_or_else(|| self.model.clone());
        let base_url = env_override(BASE_URL_ENV).unwrap_or_else(|| self.base_url.clone());

        Ok(ResolvedLlmConfig {
            model,
            api_key,
            base_url,
            max_retries: self.max_retries,
            timeout: Duration::from_millis(self.timeout_ms),
            max_tokens: self.max_tokens,
        })
    }
}

fn env_override(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Fully resolved remote-model configuration
///
/// Built once at strategy construction and read-only afterwards.
#[derive(Debug, Clone)]
pub struct ResolvedLlmConfig {
    pub model: String,
    pub api_key: String,
    pub base_url: String,
    pub max_retries: u32,
    pub timeout: Duration,
    pub max_tokens: u32,
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.llm.base_url, "https://api.openai.com");
        assert_eq!(config.llm.max_retries, 3);
        assert_eq!(config.llm.timeout_ms, 30_000);
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
llm:
  model: gpt-4o
  api-key-env: MY_API_KEY
  base-url: https://api.example.com
  max-retries: 5
  timeout-ms: 60000
  max-tokens: 8192
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.llm.api_key_env, "MY_API_KEY");
        assert_eq!(config.llm.base_url, "https://api.example.com");
        assert_eq!(config.llm.max_retries, 5);
        assert_eq!(config.llm.timeout_ms, 60_000);
        assert_eq!(config.llm.max_tokens, 8192);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
llm:
  model: gpt-4o
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.llm.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.llm.max_retries, 3);
    }

    #[test]
    fn test_load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.yml");
        fs::write(&path, "llm:\n  model: gpt-4o\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.llm.model, "gpt-4o");
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let path = PathBuf::from("/nonexistent/taskbreak.yml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    #[serial]
    fn test_resolve_requires_api_key() {
        let config = LlmConfig {
            api_key_env: "TB_TEST_MISSING_KEY".to_string(),
            ..LlmConfig::default()
        };

        unsafe { std::env::remove_var("TB_TEST_MISSING_KEY") };
        let err = config.resolve().unwrap_err();
        assert!(err.to_string().contains("TB_TEST_MISSING_KEY"));
    }

    #[test]
    #[serial]
    fn test_resolve_reads_key_from_named_env_var() {
        let config = LlmConfig {
            api_key_env: "TB_TEST_KEY".to_string(),
            ..LlmConfig::default()
        };

        unsafe {
            std::env::set_var("TB_TEST_KEY", "secret");
            std::env::remove_var(MODEL_ENV);
            std::env::remove_var(BASE_URL_ENV);
        }

        let resolved = config.resolve().unwrap();
        assert_eq!(resolved.api_key, "secret");
        assert_eq!(resolved.model, config.model);
        assert_eq!(resolved.base_url, config.base_url);
        assert_eq!(resolved.timeout, Duration::from_secs(30));

        unsafe { std::env::remove_var("TB_TEST_KEY") };
    }

    #[test]
    #[serial]
    fn test_environment_overrides_win_over_file_values() {
        let config = LlmConfig {
            api_key_env: "TB_TEST_KEY".to_string(),
            model: "from-file".to_string(),
            base_url: "https://file.example.com".to_string(),
            ..LlmConfig::default()
        };

        unsafe {
            std::env::set_var("TB_TEST_KEY", "secret");
            std::env::set_var(MODEL_ENV, "from-env");
            std::env::set_var(BASE_URL_ENV, "https://env.example.com");
        }

        let resolved = config.resolve().unwrap();
        assert_eq!(resolved.model, "from-env");
        assert_eq!(resolved.base_url, "https://env.example.com");

        unsafe {
            std::env::remove_var("TB_TEST_KEY");
            std::env::remove_var(MODEL_ENV);
            std::env::remove_var(BASE_URL_ENV);
        }
    }
}
