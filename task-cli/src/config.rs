use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub const CONFIG_FILE: &str = "task-cli";
pub const ENV_PREFIX: &str = "TASK_CLI";

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_file")]
    pub file: PathBuf,
    #[serde(default = "default_storage")]
    pub storage: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: default_file(),
            storage: default_storage(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Loads configuration from an optional `task-cli.toml` in the working
    /// directory, overridden by `TASK_CLI_*` environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Configured log level, falling back to `warn` when it cannot be parsed.
    pub fn log_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::WARN)
    }
}

fn default_file() -> PathBuf {
    PathBuf::from("tasks.json")
}

fn default_storage() -> String {
    "json".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Json,
    Memory,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown storage type {0}")]
pub struct UnknownStorageType(pub String);

impl FromStr for StorageKind {
    type Err = UnknownStorageType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "json" => Ok(StorageKind::Json),
            "memory" => Ok(StorageKind::Memory),
            _ => Err(UnknownStorageType(value.to_string())),
        }
    }
}
