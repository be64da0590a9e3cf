use std::sync::Arc;

use async_trait::async_trait;
use forgefleet_workshop_api::{CollectionDetails, WorkshopItemDetails, WorkshopPlatformClient};
use log::{debug, info};

use super::addons_model::{
    AddonMetadata, CollectionItemRef, NewWorkshopAddon, PlatformType, WorkshopAddon,
};
use super::addons_traits::{AddonRepositoryTrait, MetadataFetcherTrait};
use crate::errors::{Error, ErrorContext, Result, ValidationError};

/// Turns workshop platform metadata into addon records.
pub struct MetadataFetcher {
    client: Arc<dyn WorkshopPlatformClient>,
    addon_repository: Arc<dyn AddonRepositoryTrait>,
}

impl MetadataFetcher {
    pub fn new(
        client: Arc<dyn WorkshopPlatformClient>,
        addon_repository: Arc<dyn AddonRepositoryTrait>,
    ) -> Self {
        Self {
            client,
            addon_repository,
        }
    }

    async fn fetch_collection_items(&self, collection_id: &str) -> Result<Vec<CollectionItemRef>> {
        let collection: CollectionDetails = self
            .client
            .get_collection_details(collection_id)
            .await
            .with_context(|| format!("failed to fetch collection {}", collection_id))?;

        debug!(
            "Collection {} expanded to {} items",
            collection_id,
            collection.items.len()
        );

        Ok(collection
            .items
            .into_iter()
            .map(|item| {
                let title = if item.title.trim().is_empty() {
                    item.workshop_id.clone()
                } else {
                    item.title
                };
                CollectionItemRef {
                    workshop_id: item.workshop_id,
                    title,
                }
            })
            .collect())
    }
}

fn require(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            field.to_string(),
        )));
    }
    Ok(())
}

fn build_new_addon(
    game_id: &str,
    details: WorkshopItemDetails,
    collection_items: Vec<CollectionItemRef>,
) -> NewWorkshopAddon {
    let name = if details.title.trim().is_empty() {
        format!("Workshop item {}", details.workshop_id)
    } else {
        details.title
    };

    NewWorkshopAddon {
        id: None,
        game_id: game_id.to_string(),
        workshop_id: details.workshop_id,
        platform_type: PlatformType::Steam,
        name,
        description: details.description.filter(|d| !d.trim().is_empty()),
        file_size_bytes: details.file_size_bytes,
        is_collection: details.is_collection,
        last_updated: details.time_updated.map(|t| t.naive_utc()),
        installation_path: None,
        metadata: AddonMetadata {
            steam_app_id: details.consumer_app_id.map(|id| id.to_string()),
            collection_items,
            extra: Default::default(),
        },
    }
}

#[async_trait]
impl MetadataFetcherTrait for MetadataFetcher {
    async fn fetch_metadata(&self, game_id: &str, workshop_id: &str) -> Result<NewWorkshopAddon> {
        require(game_id, "gameId")?;
        require(workshop_id, "workshopId")?;

        let details = self
            .client
            .get_workshop_item_details(workshop_id)
            .await
            .with_context(|| format!("failed to fetch workshop item {}", workshop_id))?;

        let collection_items = if details.is_collection {
            self.fetch_collection_items(workshop_id).await?
        } else {
            Vec::new()
        };

        Ok(build_new_addon(game_id, details, collection_items))
    }

    async fn fetch_and_create_addon(
        &self,
        game_id: &str,
        workshop_id: &str,
    ) -> Result<WorkshopAddon> {
        if let Some(existing) = self
            .addon_repository
            .find_by_workshop_id(game_id, workshop_id)?
        {
            return Err(Error::Conflict(format!(
                "workshop item {} is already registered for game {} as addon {}",
                workshop_id, game_id, existing.id
            )));
        }

        let new_addon = self.fetch_metadata(game_id, workshop_id).await?;
        new_addon.validate()?;

        let addon = self
            .addon_repository
            .create(new_addon)
            .await
            .with_context(|| format!("failed to save addon for workshop item {}", workshop_id))?;

        info!(
            "Registered addon {} ({}) for workshop item {}",
            addon.id, addon.name, addon.workshop_id
        );
        Ok(addon)
    }

    async fn refresh_addon(&self, addon_id: &str) -> Result<WorkshopAddon> {
        let existing = self
            .addon_repository
            .get_by_id(addon_id)
            .with_context(|| format!("failed to load addon {}", addon_id))?;

        let fetched = self
            .fetch_metadata(&existing.game_id, &existing.workshop_id)
            .await?;

        let mut metadata = existing.metadata.clone();
        if fetched.metadata.steam_app_id.is_some() {
            metadata.steam_app_id = fetched.metadata.steam_app_id;
        }
        metadata.collection_items = fetched.metadata.collection_items;

        let updated = WorkshopAddon {
            name: fetched.name,
            description: fetched.description,
            file_size_bytes: fetched.file_size_bytes,
            is_collection: fetched.is_collection,
            last_updated: fetched.last_updated,
            metadata,
            ..existing
        };

        let addon = self.addon_repository.update(updated).await?;
        debug!("Refreshed metadata for addon {}", addon.id);
        Ok(addon)
    }
}
