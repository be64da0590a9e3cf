//! Database model for workshop installations.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use forgefleet_core::errors::{DatabaseError, Error};
use forgefleet_core::installations::{NewInstallation, WorkshopInstallation};

#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::workshop_installations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct WorkshopInstallationDB {
    pub id: String,
    pub sgc_id: String,
    pub addon_id: String,
    pub status: String,
    pub installation_path: String,
    pub progress_percent: i32,
    pub error_message: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<WorkshopInstallationDB> for WorkshopInstallation {
    type Error = Error;

    fn try_from(db: WorkshopInstallationDB) -> Result<Self, Self::Error> {
        let status = db.status.parse().map_err(|e: String| {
            Error::Database(DatabaseError::Internal(format!(
                "installation {}: {}",
                db.id, e
            )))
        })?;
        Ok(Self {
            id: db.id,
            sgc_id: db.sgc_id,
            addon_id: db.addon_id,
            status,
            installation_path: db.installation_path,
            progress_percent: db.progress_percent,
            error_message: db.error_message,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<NewInstallation> for WorkshopInstallationDB {
    fn from(domain: NewInstallation) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain.id.unwrap_or_default(),
            sgc_id: domain.sgc_id,
            addon_id: domain.addon_id,
            status: domain.status.as_str().to_string(),
            installation_path: domain.installation_path,
            progress_percent: domain.progress_percent,
            error_message: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<WorkshopInstallation> for WorkshopInstallationDB {
    fn from(domain: WorkshopInstallation) -> Self {
        Self {
            id: domain.id,
            sgc_id: domain.sgc_id,
            addon_id: domain.addon_id,
            status: domain.status.as_str().to_string(),
            installation_path: domain.installation_path,
            progress_percent: domain.progress_percent,
            error_message: domain.error_message,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
