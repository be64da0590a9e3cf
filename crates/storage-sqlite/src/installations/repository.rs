use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{not_found_as, IntoCore};
use crate::schema::workshop_installations;
use crate::utils::{id_or_new, now};
use forgefleet_core::errors::Result;
use forgefleet_core::installations::{
    InstallationRepositoryTrait, InstallationStatus, NewInstallation, WorkshopInstallation,
};

use super::model::WorkshopInstallationDB;

/// Repository for workshop installations.
///
/// The (sgc_id, addon_id) unique index turns a second insert for the same
/// pair into `DatabaseError::UniqueViolation`.
pub struct InstallationRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl InstallationRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn load(conn: &mut SqliteConnection, installation_id: &str) -> Result<WorkshopInstallationDB> {
    workshop_installations::table
        .select(WorkshopInstallationDB::as_select())
        .find(installation_id)
        .first::<WorkshopInstallationDB>(conn)
        .into_core()
        .map_err(not_found_as("installation", installation_id))
}

#[async_trait]
impl InstallationRepositoryTrait for InstallationRepository {
    async fn create(&self, new_installation: NewInstallation) -> Result<WorkshopInstallation> {
        self.writer
            .exec(move |conn| {
                let mut installation_db: WorkshopInstallationDB = new_installation.into();
                installation_db.id = id_or_new(installation_db.id);

                diesel::insert_into(workshop_installations::table)
                    .values(&installation_db)
                    .execute(conn)
                    .into_core()?;

                WorkshopInstallation::try_from(installation_db)
            })
            .await
    }

    async fn update(&self, installation: WorkshopInstallation) -> Result<WorkshopInstallation> {
        self.writer
            .exec(move |conn| {
                let existing = load(conn, &installation.id)?;

                let mut installation_db: WorkshopInstallationDB = installation.into();
                installation_db.sgc_id = existing.sgc_id;
                installation_db.addon_id = existing.addon_id;
                installation_db.created_at = existing.created_at;
                installation_db.updated_at = now();

                diesel::update(workshop_installations::table.find(&installation_db.id))
                    .set(&installation_db)
                    .execute(conn)
                    .into_core()?;

                WorkshopInstallation::try_from(installation_db)
            })
            .await
    }

    async fn update_status(
        &self,
        installation_id: &str,
        status: InstallationStatus,
    ) -> Result<WorkshopInstallation> {
        let installation_id = installation_id.to_string();
        self.writer
            .exec(move |conn| {
                let existing = load(conn, &installation_id)?;
                let timestamp = now();

                diesel::update(workshop_installations::table.find(&installation_id))
                    .set((
                        workshop_installations::status.eq(status.as_str()),
                        workshop_installations::updated_at.eq(timestamp),
                    ))
                    .execute(conn)
                    .into_core()?;

                WorkshopInstallation::try_from(WorkshopInstallationDB {
                    status: status.as_str().to_string(),
                    updated_at: timestamp,
                    ..existing
                })
            })
            .await
    }

    async fn delete(&self, installation_id: &str) -> Result<usize> {
        let installation_id = installation_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(workshop_installations::table.find(installation_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    fn get_by_id(&self, installation_id: &str) -> Result<WorkshopInstallation> {
        let mut conn = get_connection(&self.pool)?;
        load(&mut conn, installation_id)?.try_into()
    }

    fn find_by_sgc_and_addon(
        &self,
        sgc_id: &str,
        addon_id: &str,
    ) -> Result<Option<WorkshopInstallation>> {
        let mut conn = get_connection(&self.pool)?;

        let installation = workshop_installations::table
            .filter(workshop_installations::sgc_id.eq(sgc_id))
            .filter(workshop_installations::addon_id.eq(addon_id))
            .select(WorkshopInstallationDB::as_select())
            .first::<WorkshopInstallationDB>(&mut conn)
            .optional()
            .into_core()?;

        installation.map(WorkshopInstallation::try_from).transpose()
    }

    fn list_by_sgc(&self, sgc_id: &str) -> Result<Vec<WorkshopInstallation>> {
        let mut conn = get_connection(&self.pool)?;

        let results = workshop_installations::table
            .filter(workshop_installations::sgc_id.eq(sgc_id))
            .select(WorkshopInstallationDB::as_select())
            .order((
                workshop_installations::created_at.asc(),
                workshop_installations::id.asc(),
            ))
            .load::<WorkshopInstallationDB>(&mut conn)
            .into_core()?;

        results
            .into_iter()
            .map(WorkshopInstallation::try_from)
            .collect()
    }
}
