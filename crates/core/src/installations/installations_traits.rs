//! Installation repository and service traits.

use async_trait::async_trait;

use super::installations_model::{InstallationStatus, NewInstallation, WorkshopInstallation};
use crate::errors::Result;

/// Persistence contract for installations.
///
/// Implementations must reject a second record for the same
/// (sgc_id, addon_id) pair with `DatabaseError::UniqueViolation`.
#[async_trait]
pub trait InstallationRepositoryTrait: Send + Sync {
    async fn create(&self, new_installation: NewInstallation) -> Result<WorkshopInstallation>;

    /// Overwrites status, path, progress and error message.
    async fn update(&self, installation: WorkshopInstallation) -> Result<WorkshopInstallation>;

    async fn update_status(
        &self,
        installation_id: &str,
        status: InstallationStatus,
    ) -> Result<WorkshopInstallation>;

    /// Returns the number of deleted records.
    async fn delete(&self, installation_id: &str) -> Result<usize>;

    /// Fails with `DatabaseError::NotFound` when no row matches.
    fn get_by_id(&self, installation_id: &str) -> Result<WorkshopInstallation>;

    fn find_by_sgc_and_addon(
        &self,
        sgc_id: &str,
        addon_id: &str,
    ) -> Result<Option<WorkshopInstallation>>;

    fn list_by_sgc(&self, sgc_id: &str) -> Result<Vec<WorkshopInstallation>>;
}

/// Install and remove operations exposed to callers.
#[async_trait]
pub trait InstallationServiceTrait: Send + Sync {
    /// Installs an addon on an SGC, or returns the existing record when it is
    /// already installed and `force_reinstall` is false.
    async fn install_addon(
        &self,
        sgc_id: &str,
        addon_id: &str,
        force_reinstall: bool,
    ) -> Result<WorkshopInstallation>;

    /// Marks an installation removed and asks the host to delete it.
    ///
    /// Refused while any session of the SGC is active.
    async fn remove_installation(&self, installation_id: &str) -> Result<()>;

    fn get_installation(&self, installation_id: &str) -> Result<WorkshopInstallation>;

    fn list_installations(&self, sgc_id: &str) -> Result<Vec<WorkshopInstallation>>;
}
