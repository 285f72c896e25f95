//! Global comemora configuration.
//!
//! Layered: built-in defaults, then `~/.config/comemora/config.toml`, then
//! `COMEMORA_*` environment variables (`COMEMORA_LLM__API_KEY`,
//! `COMEMORA_DATA_DIR`, ...). The data directory setting may contain `~`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ComemoraError, ComemoraResult};

static DEFAULT_DATA_DIR: &str = "~/.local/share/comemora";

fn default_data_dir() -> String {
    DEFAULT_DATA_DIR.to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.0
}

fn default_max_attempts() -> u32 {
    3
}

/// Completion service settings.
#[derive(Deserialize, Clone)]
pub struct LlmConfig {
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        LlmConfig {
            api_key: String::new(),
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_attempts: default_max_attempts(),
        }
    }
}

/// Global configuration at ~/.config/comemora/config.toml
#[derive(Deserialize, Clone)]
pub struct GlobalConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default)]
    pub llm: LlmConfig,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        GlobalConfig {
            data_dir: default_data_dir(),
            llm: LlmConfig::default(),
        }
    }
}

impl GlobalConfig {
    pub fn config_path() -> ComemoraResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ComemoraError::Config("Could not determine config directory".into()))?
            .join("comemora");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the layered configuration from the default location.
    pub fn load() -> ComemoraResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from an explicit config file path (absent files are fine).
    pub fn load_from(path: &Path) -> ComemoraResult<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.to_path_buf()).required(false))
            .add_source(config::Environment::with_prefix("COMEMORA").separator("__"))
            .build()
            .map_err(|e| ComemoraError::Config(e.to_string()))?;

        settings
            .try_deserialize()
            .map_err(|e| ComemoraError::Config(e.to_string()))
    }

    /// The data directory with `~` expanded.
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.data_dir).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_a_config_file() {
        let config: GlobalConfig = toml::from_str("").unwrap();
        assert_eq!(config.data_dir, DEFAULT_DATA_DIR);
        assert!(config.llm.api_key.is_empty());
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.max_attempts, 3);
        assert_eq!(config.llm.temperature, 0.0);
    }

    #[test]
    fn file_values_override_defaults() {
        let config: GlobalConfig = toml::from_str(
            r#"
            data_dir = "/tmp/comemora-test"

            [llm]
            api_key = "sk-test"
            model = "gpt-4o"
            "#,
        )
        .unwrap();
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/comemora-test"));
        assert_eq!(config.llm.api_key, "sk-test");
        assert_eq!(config.llm.model, "gpt-4o");
        // untouched fields keep their defaults
        assert_eq!(config.llm.max_attempts, 3);
    }

    #[test]
    fn tilde_expands_in_data_dir() {
        let config = GlobalConfig::default();
        assert!(!config.data_dir().to_string_lossy().contains('~'));
    }
}
