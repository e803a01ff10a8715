// ABOUTME: Configuration management for the resolvent CLI
// ABOUTME: Loads default template variables and logging settings from YAML and the environment

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::path::PathBuf;

const LOG_LEVEL_ENV: &str = "RESOLVENT_LOG_LEVEL";
const LOG_FORMAT_ENV: &str = "RESOLVENT_LOG_FORMAT";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Variables available to every template before context files and `-V`,
    /// kept in file order
    #[serde(default)]
    pub template_vars: Map<String, JsonValue>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from an explicit path or the first default location.
    /// A missing file yields the defaults.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let mut config = match path.or_else(Self::find_config_file) {
            Some(config_path) if config_path.exists() => {
                let contents = std::fs::read_to_string(&config_path).with_context(|| {
                    format!("Failed to read config file '{}'", config_path.display())
                })?;
                serde_yaml::from_str(&contents).with_context(|| {
                    format!("Invalid config file '{}'", config_path.display())
                })?
            }
            _ => Config::default(),
        };

        config.merge_env();
        Ok(config)
    }

    /// Working directory candidates first, then `~/.resolvent/config.yaml`
    fn find_config_file() -> Option<PathBuf> {
        let local = [
            "resolvent.yaml",
            "resolvent.yml",
            ".resolvent.yaml",
            ".resolvent.yml",
        ]
        .into_iter()
        .map(PathBuf::from)
        .find(|path| path.exists());

        local.or_else(|| {
            dirs::home_dir()
                .map(|home| home.join(".resolvent").join("config.yaml"))
                .filter(|path| path.exists())
        })
    }

    fn merge_env(&mut self) {
        if let Ok(level) = std::env::var(LOG_LEVEL_ENV) {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var(LOG_FORMAT_ENV) {
            self.logging.format = format;
        }
    }
}
