use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// How ROM reports are written to stdout.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    /// Return `OutputFormat` as a `str`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
#[serde(default)] // Ensures new fields don't break existing configurations
pub struct Config {
    pub format: OutputFormat,
    /// Include the unofficial flags 10 byte in text reports.
    pub show_flags10: bool,
}

impl Config {
    pub const BASE_DIR: &'static str = "nesrom";
    pub const FILENAME: &'static str = "config.json";

    #[must_use]
    pub fn default_config_dir() -> PathBuf {
        dirs::config_local_dir().map_or_else(
            || PathBuf::from("config"),
            |dir| dir.join(Self::BASE_DIR),
        )
    }

    #[must_use]
    pub fn config_path() -> PathBuf {
        Self::default_config_dir().join(Self::FILENAME)
    }

    /// Load `Config` from `path`, or the default config path if none is given. Falls back to
    /// defaults if the file is missing or invalid.
    pub fn load(path: Option<PathBuf>) -> Self {
        let explicit = path.is_some();
        let path = path.unwrap_or_else(Config::config_path);

        path.exists()
            .then(|| {
                info!("Loading configuration from {path:?}");
                std::fs::read(&path)
                    .context("failed to load config")
                    .and_then(|data| Ok(serde_json::from_slice::<Self>(&data)?))
                    .with_context(|| format!("failed to parse {path:?}"))
                    .unwrap_or_else(|err| {
                        error!("Invalid config: {path:?}, reverting to defaults. Error: {err:?}");
                        Self::default()
                    })
            })
            .unwrap_or_else(|| {
                if explicit {
                    warn!("Config {path:?} does not exist, reverting to defaults");
                } else {
                    info!("Loading default configuration");
                }
                Self::default()
            })
    }
}
