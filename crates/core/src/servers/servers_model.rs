//! Game config and server game config domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, Error, Result};

/// Per-game configuration root. Strategies hang off its `game_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    pub id: String,
    pub game_id: String,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGameConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub game_id: String,
    pub name: String,
}

impl NewGameConfig {
    pub fn validate(&self) -> Result<()> {
        if self.game_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "gameId".to_string(),
            )));
        }
        Ok(())
    }
}

/// A deployable server instance of a game config (SGC).
///
/// `server_id` identifies the host agent that receives commands for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerGameConfig {
    pub id: String,
    pub game_config_id: String,
    pub server_id: String,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewServerGameConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub game_config_id: String,
    pub server_id: String,
    pub name: String,
}

impl NewServerGameConfig {
    pub fn validate(&self) -> Result<()> {
        if self.game_config_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "gameConfigId".to_string(),
            )));
        }
        if self.server_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "serverId".to_string(),
            )));
        }
        Ok(())
    }
}
