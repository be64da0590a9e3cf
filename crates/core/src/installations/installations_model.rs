//! Workshop installation domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Install state of one addon on one SGC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallationStatus {
    Pending,
    Downloading,
    Installed,
    Failed,
    Removed,
}

impl InstallationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallationStatus::Pending => "pending",
            InstallationStatus::Downloading => "downloading",
            InstallationStatus::Installed => "installed",
            InstallationStatus::Failed => "failed",
            InstallationStatus::Removed => "removed",
        }
    }
}

impl fmt::Display for InstallationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstallationStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InstallationStatus::Pending),
            "downloading" => Ok(InstallationStatus::Downloading),
            "installed" => Ok(InstallationStatus::Installed),
            "failed" => Ok(InstallationStatus::Failed),
            "removed" => Ok(InstallationStatus::Removed),
            other => Err(format!("Unknown installation status: {}", other)),
        }
    }
}

/// Persisted install record, unique per (sgc_id, addon_id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopInstallation {
    pub id: String,
    pub sgc_id: String,
    pub addon_id: String,
    pub status: InstallationStatus,
    /// Absolute path on the host.
    pub installation_path: String,
    pub progress_percent: i32,
    pub error_message: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl WorkshopInstallation {
    /// Puts the record back to pending for a retry or forced reinstall.
    pub fn reset_for_install(&mut self, installation_path: String) {
        self.status = InstallationStatus::Pending;
        self.installation_path = installation_path;
        self.progress_percent = 0;
        self.error_message = None;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInstallation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub sgc_id: String,
    pub addon_id: String,
    pub status: InstallationStatus,
    pub installation_path: String,
    pub progress_percent: i32,
}

impl NewInstallation {
    /// A fresh pending record at `installation_path`.
    pub fn pending(sgc_id: &str, addon_id: &str, installation_path: String) -> Self {
        Self {
            id: None,
            sgc_id: sgc_id.to_string(),
            addon_id: addon_id.to_string(),
            status: InstallationStatus::Pending,
            installation_path,
            progress_percent: 0,
        }
    }
}
