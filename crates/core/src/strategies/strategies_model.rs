//! Configuration strategy domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, Error, Result};

/// Kind of runtime configuration a strategy contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyType {
    /// Filesystem mount root on the host; addons install beneath it.
    Volume,
    CliArgs,
    EnvVars,
    ConfigFile,
}

impl StrategyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyType::Volume => "volume",
            StrategyType::CliArgs => "cli_args",
            StrategyType::EnvVars => "env_vars",
            StrategyType::ConfigFile => "config_file",
        }
    }
}

impl fmt::Display for StrategyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "volume" => Ok(StrategyType::Volume),
            "cli_args" => Ok(StrategyType::CliArgs),
            "env_vars" => Ok(StrategyType::EnvVars),
            "config_file" => Ok(StrategyType::ConfigFile),
            other => Err(format!("Unknown strategy type: {}", other)),
        }
    }
}

/// A per-game configuration rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationStrategy {
    pub id: String,
    pub game_id: String,
    pub strategy_type: StrategyType,
    /// Absolute host path. Only meaningful for volume strategies.
    pub target_path: Option<String>,
    /// Stored for display ordering; path resolution does not consult it.
    pub apply_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl ConfigurationStrategy {
    pub fn is_volume(&self) -> bool {
        self.strategy_type == StrategyType::Volume
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewConfigurationStrategy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub game_id: String,
    pub strategy_type: StrategyType,
    pub target_path: Option<String>,
    #[serde(default)]
    pub apply_order: i32,
}

impl NewConfigurationStrategy {
    pub fn validate(&self) -> Result<()> {
        if self.game_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "gameId".to_string(),
            )));
        }
        if let Some(path) = &self.target_path {
            if self.strategy_type == StrategyType::Volume && !path.starts_with('/') {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Volume target path must be absolute: {}",
                    path
                ))));
            }
        }
        Ok(())
    }
}
