//! Addon repository and metadata fetcher traits.

use async_trait::async_trait;

use super::addons_model::{NewWorkshopAddon, WorkshopAddon};
use crate::errors::Result;

/// Persistence contract for workshop addons.
#[async_trait]
pub trait AddonRepositoryTrait: Send + Sync {
    async fn create(&self, new_addon: NewWorkshopAddon) -> Result<WorkshopAddon>;

    /// Overwrites the mutable fields of an existing addon.
    ///
    /// `game_id` and `workshop_id` are never changed by an update.
    async fn update(&self, addon: WorkshopAddon) -> Result<WorkshopAddon>;

    /// Returns the number of deleted records.
    async fn delete(&self, addon_id: &str) -> Result<usize>;

    /// Fails with `DatabaseError::NotFound` when no row matches.
    fn get_by_id(&self, addon_id: &str) -> Result<WorkshopAddon>;

    fn find_by_workshop_id(&self, game_id: &str, workshop_id: &str)
        -> Result<Option<WorkshopAddon>>;

    fn list_by_game(&self, game_id: &str) -> Result<Vec<WorkshopAddon>>;
}

/// Retrieves workshop metadata and turns it into addon records.
#[async_trait]
pub trait MetadataFetcherTrait: Send + Sync {
    /// Builds an unsaved addon from platform metadata.
    ///
    /// Collections are expanded into `metadata.collection_items`. Any lookup
    /// failure aborts the whole call.
    async fn fetch_metadata(&self, game_id: &str, workshop_id: &str) -> Result<NewWorkshopAddon>;

    /// Fetches metadata and persists it. Nothing is written on failure.
    async fn fetch_and_create_addon(&self, game_id: &str, workshop_id: &str)
        -> Result<WorkshopAddon>;

    /// Re-fetches metadata for a stored addon and updates it in place.
    async fn refresh_addon(&self, addon_id: &str) -> Result<WorkshopAddon>;
}
