use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ai::OpponentKind;
use crate::error::ConfigError;
use crate::game::{Player, STANDARD_HEIGHT, STANDARD_WIDTH};

/// Largest board edge accepted from configuration.
pub const MAX_DIMENSION: usize = 64;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub game: GameConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            width: STANDARD_WIDTH,
            height: STANDARD_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side the person at the keyboard plays.
    pub human: Player,
    /// Side that moves first.
    pub first: Player,
    pub opponent: OpponentKind,
    /// Seed for the random opponent; fresh entropy when absent.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            human: Player::A,
            first: Player::A,
            opponent: OpponentKind::Lookahead,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `"info"` or `"connect_four=debug"`.
    pub level: String,
    /// Write logs here instead of stderr. The TUI needs this to keep the
    /// screen clean.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "warn".to_string(),
            file: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.width == 0 || self.board.width > MAX_DIMENSION {
            return Err(ConfigError::Validation(format!(
                "board.width must be in [1, {MAX_DIMENSION}]"
            )));
        }
        if self.board.height == 0 || self.board.height > MAX_DIMENSION {
            return Err(ConfigError::Validation(format!(
                "board.height must be in [1, {MAX_DIMENSION}]"
            )));
        }
        if self
            .logging
            .level
            .parse::<tracing_subscriber::EnvFilter>()
            .is_err()
        {
            return Err(ConfigError::Validation(format!(
                "logging.level '{}' is not a valid filter",
                self.logging.level
            )));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).unwrap_or_default()
    }
}
