//! Host-agent command payloads.
//!
//! These are the messages the control plane hands to the command bus. They
//! are pure data and serialize to snake_case JSON.

use serde::{Deserialize, Serialize};

use super::publisher::PublishError;
use crate::constants::HOST_ROUTING_PREFIX;
use crate::errors::Result;

/// Ask a host agent to download an addon into `install_path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadAddonCommand {
    pub installation_id: String,
    pub sgc_id: String,
    pub addon_id: String,
    pub workshop_id: String,
    /// Game app id used by the workshop downloader. Empty when unknown.
    #[serde(default)]
    pub steam_app_id: String,
    pub install_path: String,
}

/// Ask a host agent to delete an installed addon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveAddonCommand {
    pub installation_id: String,
    pub sgc_id: String,
    pub addon_id: String,
    pub installation_path: String,
}

/// Any addon command, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AddonCommand {
    Download(DownloadAddonCommand),
    Remove(RemoveAddonCommand),
}

impl AddonCommand {
    pub fn installation_id(&self) -> &str {
        match self {
            AddonCommand::Download(cmd) => &cmd.installation_id,
            AddonCommand::Remove(cmd) => &cmd.installation_id,
        }
    }
}

/// A command paired with the server whose host agent must execute it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutedCommand {
    pub server_id: String,
    pub command: AddonCommand,
}

impl RoutedCommand {
    pub fn new(server_id: impl Into<String>, command: AddonCommand) -> Self {
        Self {
            server_id: server_id.into(),
            command,
        }
    }

    /// Bus subject for the owning host agent, e.g. `hosts.10.workshop`.
    pub fn routing_key(&self) -> String {
        routing_key(&self.server_id)
    }

    /// JSON body sent to the host agent (the command only, not the route).
    pub fn payload(&self) -> Result<Vec<u8>> {
        let payload = serde_json::to_vec(&self.command)
            .map_err(|e| PublishError::Encode(e.to_string()))?;
        Ok(payload)
    }
}

pub fn routing_key(server_id: &str) -> String {
    format!("{}.{}.workshop", HOST_ROUTING_PREFIX, server_id)
}
