//! Host configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_program::{GAME_SEED, REGISTRY_SEED, SetupPolicy};
use tracing::{debug, info, instrument};

/// Configuration for the runtime and the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct HostConfig {
    /// Seed tag hashed into every game address.
    #[serde(default = "default_game_seed")]
    game_seed: String,

    /// Seed tag locating the registry record.
    #[serde(default = "default_registry_seed")]
    registry_seed: String,

    /// Whether a player may set up a game against themselves.
    #[serde(default)]
    allow_self_play: bool,

    /// Tracing filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,
}

#[instrument]
fn default_game_seed() -> String {
    String::from_utf8_lossy(GAME_SEED).into_owned()
}

#[instrument]
fn default_registry_seed() -> String {
    String::from_utf8_lossy(REGISTRY_SEED).into_owned()
}

#[instrument]
fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            game_seed: default_game_seed(),
            registry_seed: default_registry_seed(),
            allow_self_play: false,
            log_filter: default_log_filter(),
        }
    }
}

impl HostConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(
            game_seed = %config.game_seed,
            allow_self_play = config.allow_self_play,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Returns a copy that permits self-play.
    pub fn with_self_play(mut self, allow: bool) -> Self {
        self.allow_self_play = allow;
        self
    }

    /// Setup rules derived from this configuration.
    pub fn setup_policy(&self) -> SetupPolicy {
        SetupPolicy::new(self.allow_self_play)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new config error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
