use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::installations_model::{InstallationStatus, NewInstallation, WorkshopInstallation};
use super::installations_traits::{InstallationRepositoryTrait, InstallationServiceTrait};
use super::path_resolver::PathResolver;
use crate::addons::AddonRepositoryTrait;
use crate::commands::{CommandPublisherTrait, DownloadAddonCommand, RemoveAddonCommand};
use crate::errors::{Error, ErrorContext, ErrorKind, Result};
use crate::servers::{GameConfigRepositoryTrait, ServerGameConfigRepositoryTrait};
use crate::sessions::SessionRepositoryTrait;
use crate::strategies::ConfigurationStrategyRepositoryTrait;

/// Coordinates addon installs and removals across storage and the command bus.
///
/// Holds no state besides its collaborators; concurrent calls for the same
/// (sgc, addon) pair are not serialized here.
pub struct InstallationManager {
    addon_repository: Arc<dyn AddonRepositoryTrait>,
    installation_repository: Arc<dyn InstallationRepositoryTrait>,
    sgc_repository: Arc<dyn ServerGameConfigRepositoryTrait>,
    session_repository: Arc<dyn SessionRepositoryTrait>,
    command_publisher: Arc<dyn CommandPublisherTrait>,
    path_resolver: PathResolver,
}

impl InstallationManager {
    pub fn new(
        addon_repository: Arc<dyn AddonRepositoryTrait>,
        installation_repository: Arc<dyn InstallationRepositoryTrait>,
        sgc_repository: Arc<dyn ServerGameConfigRepositoryTrait>,
        game_config_repository: Arc<dyn GameConfigRepositoryTrait>,
        strategy_repository: Arc<dyn ConfigurationStrategyRepositoryTrait>,
        session_repository: Arc<dyn SessionRepositoryTrait>,
        command_publisher: Arc<dyn CommandPublisherTrait>,
    ) -> Self {
        Self {
            addon_repository,
            installation_repository,
            sgc_repository,
            session_repository,
            command_publisher,
            path_resolver: PathResolver::new(game_config_repository, strategy_repository),
        }
    }

    async fn save_pending(
        &self,
        existing: Option<WorkshopInstallation>,
        sgc_id: &str,
        addon_id: &str,
        install_path: String,
    ) -> Result<WorkshopInstallation> {
        match existing {
            Some(mut installation) => {
                debug!(
                    "Resetting installation {} from {} to pending",
                    installation.id, installation.status
                );
                installation.reset_for_install(install_path);
                let id = installation.id.clone();
                self.installation_repository
                    .update(installation)
                    .await
                    .with_context(|| format!("failed to update installation {}", id))
            }
            None => {
                let created = self
                    .installation_repository
                    .create(NewInstallation::pending(sgc_id, addon_id, install_path))
                    .await;
                match created {
                    Err(err) if err.kind() == ErrorKind::Conflict => {
                        warn!(
                            "Lost install race for addon {} on sgc {}, nothing dispatched",
                            addon_id, sgc_id
                        );
                        Err(err.context(format!(
                            "installation of addon {} on sgc {} already exists",
                            addon_id, sgc_id
                        )))
                    }
                    other => other.with_context(|| {
                        format!(
                            "failed to create installation of addon {} on sgc {}",
                            addon_id, sgc_id
                        )
                    }),
                }
            }
        }
    }
}

#[async_trait]
impl InstallationServiceTrait for InstallationManager {
    async fn install_addon(
        &self,
        sgc_id: &str,
        addon_id: &str,
        force_reinstall: bool,
    ) -> Result<WorkshopInstallation> {
        let existing = self
            .installation_repository
            .find_by_sgc_and_addon(sgc_id, addon_id)
            .with_context(|| {
                format!(
                    "failed to look up installation of addon {} on sgc {}",
                    addon_id, sgc_id
                )
            })?;

        if let Some(installation) = &existing {
            if installation.status == InstallationStatus::Installed && !force_reinstall {
                debug!(
                    "Addon {} already installed on sgc {} ({}), skipping",
                    addon_id, sgc_id, installation.id
                );
                return Ok(installation.clone());
            }
        }

        let addon = self
            .addon_repository
            .get_by_id(addon_id)
            .with_context(|| format!("failed to load addon {}", addon_id))?;
        let sgc = self
            .sgc_repository
            .get_by_id(sgc_id)
            .with_context(|| format!("failed to load sgc {}", sgc_id))?;
        let install_path = self.path_resolver.resolve(&sgc, &addon).with_context(|| {
            format!(
                "failed to resolve installation path for addon {} on sgc {}",
                addon_id, sgc_id
            )
        })?;

        let installation = self
            .save_pending(existing, sgc_id, addon_id, install_path)
            .await?;

        let command = DownloadAddonCommand {
            installation_id: installation.id.clone(),
            sgc_id: sgc.id.clone(),
            addon_id: addon.id.clone(),
            workshop_id: addon.workshop_id.clone(),
            steam_app_id: addon.steam_app_id().to_string(),
            install_path: installation.installation_path.clone(),
        };
        self.command_publisher
            .publish_download_command(&sgc.server_id, command)
            .await?;

        info!(
            "Dispatched download of workshop item {} to server {} at {} (installation {})",
            addon.workshop_id, sgc.server_id, installation.installation_path, installation.id
        );
        Ok(installation)
    }

    async fn remove_installation(&self, installation_id: &str) -> Result<()> {
        let installation = self
            .installation_repository
            .get_by_id(installation_id)
            .with_context(|| format!("failed to load installation {}", installation_id))?;

        let sessions = self
            .session_repository
            .list_by_sgc(&installation.sgc_id)
            .with_context(|| format!("failed to list sessions for sgc {}", installation.sgc_id))?;

        if let Some(active) = sessions.iter().find(|s| s.is_active()) {
            warn!(
                "Refusing to remove installation {}: session {} is {}",
                installation_id, active.id, active.status
            );
            return Err(Error::ActiveSession {
                installation_id: installation_id.to_string(),
                session_id: active.id.clone(),
                status: active.status.to_string(),
            });
        }

        let sgc = self
            .sgc_repository
            .get_by_id(&installation.sgc_id)
            .with_context(|| format!("failed to load sgc {}", installation.sgc_id))?;

        // Not rolled back if the publish below fails.
        self.installation_repository
            .update_status(installation_id, InstallationStatus::Removed)
            .await
            .with_context(|| format!("failed to mark installation {} removed", installation_id))?;

        let command = RemoveAddonCommand {
            installation_id: installation.id.clone(),
            sgc_id: installation.sgc_id.clone(),
            addon_id: installation.addon_id.clone(),
            installation_path: installation.installation_path.clone(),
        };
        self.command_publisher
            .publish_remove_command(&sgc.server_id, command)
            .await?;

        info!(
            "Dispatched removal of {} to server {} (installation {})",
            installation.installation_path, sgc.server_id, installation.id
        );
        Ok(())
    }

    fn get_installation(&self, installation_id: &str) -> Result<WorkshopInstallation> {
        self.installation_repository
            .get_by_id(installation_id)
            .with_context(|| format!("failed to load installation {}", installation_id))
    }

    fn list_installations(&self, sgc_id: &str) -> Result<Vec<WorkshopInstallation>> {
        self.installation_repository.list_by_sgc(sgc_id)
    }
}
