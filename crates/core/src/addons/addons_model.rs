//! Workshop addon domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{errors::ValidationError, Error, Result};

/// Platform hosting the addon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlatformType {
    #[default]
    Steam,
}

impl PlatformType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformType::Steam => "steam",
        }
    }
}

impl fmt::Display for PlatformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "steam" => Ok(PlatformType::Steam),
            other => Err(format!("Unknown platform type: {}", other)),
        }
    }
}

/// One child of a collection addon, in collection order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionItemRef {
    pub workshop_id: String,
    pub title: String,
}

/// Addon metadata stored as a single JSON object.
///
/// Known keys are typed; anything else round-trips through `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AddonMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steam_app_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub collection_items: Vec<CollectionItemRef>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AddonMetadata {
    /// Parses stored metadata. Empty input yields empty metadata.
    pub fn from_json(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn is_empty(&self) -> bool {
        self.steam_app_id.is_none() && self.collection_items.is_empty() && self.extra.is_empty()
    }
}

/// Domain model for a workshop addon registered against a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopAddon {
    pub id: String,
    pub game_id: String,
    /// Id of the item on the workshop platform.
    pub workshop_id: String,
    pub platform_type: PlatformType,
    pub name: String,
    pub description: Option<String>,
    pub file_size_bytes: Option<i64>,
    pub is_collection: bool,
    /// When the item was last updated on the platform.
    pub last_updated: Option<NaiveDateTime>,
    /// Path relative to the game's volume root.
    pub installation_path: Option<String>,
    pub metadata: AddonMetadata,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl WorkshopAddon {
    /// App id handed to the host agent's downloader, or an empty string.
    pub fn steam_app_id(&self) -> &str {
        self.metadata.steam_app_id.as_deref().unwrap_or("")
    }
}

/// Input model for creating a new addon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkshopAddon {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub game_id: String,
    pub workshop_id: String,
    pub platform_type: PlatformType,
    pub name: String,
    pub description: Option<String>,
    pub file_size_bytes: Option<i64>,
    pub is_collection: bool,
    pub last_updated: Option<NaiveDateTime>,
    pub installation_path: Option<String>,
    #[serde(default)]
    pub metadata: AddonMetadata,
}

impl NewWorkshopAddon {
    pub fn validate(&self) -> Result<()> {
        if self.game_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "gameId".to_string(),
            )));
        }
        if self.workshop_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "workshopId".to_string(),
            )));
        }
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Addon name cannot be empty".to_string(),
            )));
        }
        if let Some(size) = self.file_size_bytes {
            if size < 0 {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "File size cannot be negative: {}",
                    size
                ))));
            }
        }
        Ok(())
    }
}
