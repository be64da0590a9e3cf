use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{not_found_as, IntoCore};
use crate::schema::workshop_addons;
use crate::utils::{id_or_new, now};
use forgefleet_core::addons::{AddonRepositoryTrait, NewWorkshopAddon, WorkshopAddon};
use forgefleet_core::errors::Result;

use super::model::WorkshopAddonDB;

/// Repository for workshop addons.
pub struct AddonRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AddonRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl AddonRepositoryTrait for AddonRepository {
    async fn create(&self, new_addon: NewWorkshopAddon) -> Result<WorkshopAddon> {
        new_addon.validate()?;
        let mut addon_db = WorkshopAddonDB::from_new(new_addon)?;
        addon_db.id = id_or_new(addon_db.id);

        self.writer
            .exec(move |conn| {
                diesel::insert_into(workshop_addons::table)
                    .values(&addon_db)
                    .execute(conn)
                    .into_core()?;

                WorkshopAddon::try_from(addon_db)
            })
            .await
    }

    async fn update(&self, addon: WorkshopAddon) -> Result<WorkshopAddon> {
        let mut addon_db = WorkshopAddonDB::from_domain(addon)?;

        self.writer
            .exec(move |conn| {
                let existing = workshop_addons::table
                    .select(WorkshopAddonDB::as_select())
                    .find(&addon_db.id)
                    .first::<WorkshopAddonDB>(conn)
                    .into_core()
                    .map_err(not_found_as("addon", &addon_db.id))?;

                addon_db.game_id = existing.game_id;
                addon_db.workshop_id = existing.workshop_id;
                addon_db.created_at = existing.created_at;
                addon_db.updated_at = now();

                diesel::update(workshop_addons::table.find(&addon_db.id))
                    .set(&addon_db)
                    .execute(conn)
                    .into_core()?;

                WorkshopAddon::try_from(addon_db)
            })
            .await
    }

    async fn delete(&self, addon_id: &str) -> Result<usize> {
        let addon_id = addon_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(workshop_addons::table.find(addon_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    fn get_by_id(&self, addon_id: &str) -> Result<WorkshopAddon> {
        let mut conn = get_connection(&self.pool)?;

        let addon = workshop_addons::table
            .select(WorkshopAddonDB::as_select())
            .find(addon_id)
            .first::<WorkshopAddonDB>(&mut conn)
            .into_core()
            .map_err(not_found_as("addon", addon_id))?;

        addon.try_into()
    }

    fn find_by_workshop_id(
        &self,
        game_id: &str,
        workshop_id: &str,
    ) -> Result<Option<WorkshopAddon>> {
        let mut conn = get_connection(&self.pool)?;

        let addon = workshop_addons::table
            .filter(workshop_addons::game_id.eq(game_id))
            .filter(workshop_addons::workshop_id.eq(workshop_id))
            .select(WorkshopAddonDB::as_select())
            .first::<WorkshopAddonDB>(&mut conn)
            .optional()
            .into_core()?;

        addon.map(WorkshopAddon::try_from).transpose()
    }

    fn list_by_game(&self, game_id: &str) -> Result<Vec<WorkshopAddon>> {
        let mut conn = get_connection(&self.pool)?;

        let results = workshop_addons::table
            .filter(workshop_addons::game_id.eq(game_id))
            .select(WorkshopAddonDB::as_select())
            .order(workshop_addons::name.asc())
            .load::<WorkshopAddonDB>(&mut conn)
            .into_core()?;

        results.into_iter().map(WorkshopAddon::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup_db;
    use forgefleet_core::addons::{AddonMetadata, CollectionItemRef, PlatformType};
    use forgefleet_core::ErrorKind;

    fn new_addon(workshop_id: &str) -> NewWorkshopAddon {
        NewWorkshopAddon {
            id: None,
            game_id: "4000".to_string(),
            workshop_id: workshop_id.to_string(),
            platform_type: PlatformType::Steam,
            name: format!("Addon {}", workshop_id),
            description: Some("A map".to_string()),
            file_size_bytes: Some(1024),
            is_collection: true,
            last_updated: Some(now()),
            installation_path: Some("maps".to_string()),
            metadata: AddonMetadata {
                steam_app_id: Some("4000".to_string()),
                collection_items: vec![
                    CollectionItemRef {
                        workshop_id: "2".to_string(),
                        title: "B".to_string(),
                    },
                    CollectionItemRef {
                        workshop_id: "1".to_string(),
                        title: "A".to_string(),
                    },
                ],
                extra: Default::default(),
            },
        }
    }

    #[tokio::test]
    async fn test_create_and_load_keeps_metadata() {
        let (pool, writer, _temp_dir) = setup_db();
        let repo = AddonRepository::new(pool, writer);

        let created = repo.create(new_addon("123456")).await.unwrap();
        let loaded = repo.get_by_id(&created.id).unwrap();

        assert_eq!(loaded.workshop_id, "123456");
        assert_eq!(loaded.steam_app_id(), "4000");
        let ids: Vec<&str> = loaded
            .metadata
            .collection_items
            .iter()
            .map(|i| i.workshop_id.as_str())
            .collect();
        assert_eq!(ids, vec!["2", "1"]);

        let found = repo.find_by_workshop_id("4000", "123456").unwrap();
        assert_eq!(found.map(|a| a.id), Some(created.id));
        assert!(repo.find_by_workshop_id("4001", "123456").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_workshop_item_per_game_is_conflict() {
        let (pool, writer, _temp_dir) = setup_db();
        let repo = AddonRepository::new(pool, writer);

        repo.create(new_addon("123456")).await.unwrap();
        let err = repo.create(new_addon("123456")).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_update_cannot_move_addon_between_games() {
        let (pool, writer, _temp_dir) = setup_db();
        let repo = AddonRepository::new(pool, writer);
        let created = repo.create(new_addon("123456")).await.unwrap();

        let mut changed = created.clone();
        changed.game_id = "9999".to_string();
        changed.name = "Renamed".to_string();
        changed.description = None;
        let updated = repo.update(changed).await.unwrap();

        assert_eq!(updated.game_id, "4000");
        assert_eq!(updated.name, "Renamed");
        let loaded = repo.get_by_id(&created.id).unwrap();
        assert_eq!(loaded.description, None);
        assert_eq!(repo.list_by_game("4000").unwrap().len(), 1);
    }
}
