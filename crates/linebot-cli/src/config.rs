//! Settings file discovery and layering.
//!
//! Resolution order (later overrides earlier):
//! 1. `<config dir>/linebot/config.toml`, or the file named by `--config`
//! 2. Environment variables and command-line flags (handled by clap)
//!
//! ```toml
//! channel-secret = "..."
//! channel-token = "..."
//! endpoint-base = "https://api.line.me"
//! timeout-secs = 30
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use linebot::ClientConfig;
use serde::{Deserialize, Serialize};

/// Application name for config directory resolution.
const APP_NAME: &str = "linebot";

/// Settings filename within the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Placeholder shown instead of credentials.
const REDACTED: &str = "<redacted>";

/// Errors that can occur while loading settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a settings file.
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },

    /// Failed to parse TOML.
    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Channel settings; every field is optional so layers can be merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Settings {
    /// Parse settings from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Overlay `other` on top of `self`; set fields in `other` win.
    pub fn merge(self, other: Settings) -> Settings {
        Settings {
            channel_secret: other.channel_secret.or(self.channel_secret),
            channel_token: other.channel_token.or(self.channel_token),
            endpoint_base: other.endpoint_base.or(self.endpoint_base),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
        }
    }

    /// Copy with credentials replaced by a placeholder.
    pub fn redacted(&self) -> Settings {
        Settings {
            channel_secret: self.channel_secret.as_ref().map(|_| REDACTED.to_string()),
            channel_token: self.channel_token.as_ref().map(|_| REDACTED.to_string()),
            ..self.clone()
        }
    }

    /// Per-request timeout, if configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Client configuration; missing credentials become empty strings and
    /// are rejected when the client is built.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            endpoint_base: self.endpoint_base.clone(),
            ..ClientConfig::new(
                self.channel_secret.clone().unwrap_or_default(),
                self.channel_token.clone().unwrap_or_default(),
            )
        }
    }
}

/// Default settings file location.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME).join(CONFIG_FILE))
}

/// Load the settings file layer.
///
/// An explicit path must exist. The default path is optional: when it is
/// missing, empty settings are returned.
pub fn load(explicit: Option<&Path>) -> Result<Settings, ConfigError> {
    match explicit {
        Some(path) => load_file(path),
        None => match default_config_path() {
            Some(path) if path.exists() => load_file(&path),
            _ => Ok(Settings::default()),
        },
    }
}

/// Load settings from a specific file.
pub fn load_file(path: &Path) -> Result<Settings, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.display().to_string(),
        source: e,
    })?;
    let settings = Settings::from_toml(&contents).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), "loaded settings file");
    Ok(settings)
}
