//! Database model for workshop addons.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use forgefleet_core::addons::{AddonMetadata, NewWorkshopAddon, WorkshopAddon};
use forgefleet_core::errors::{DatabaseError, Error, Result};

#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::workshop_addons)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct WorkshopAddonDB {
    pub id: String,
    pub game_id: String,
    pub workshop_id: String,
    pub platform_type: String,
    pub name: String,
    pub description: Option<String>,
    pub file_size_bytes: Option<i64>,
    pub is_collection: bool,
    pub last_updated: Option<NaiveDateTime>,
    pub installation_path: Option<String>,
    /// JSON object, see [`AddonMetadata`].
    pub metadata: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl WorkshopAddonDB {
    pub fn from_new(domain: NewWorkshopAddon) -> Result<Self> {
        let now = chrono::Utc::now().naive_utc();
        Ok(Self {
            id: domain.id.unwrap_or_default(),
            game_id: domain.game_id,
            workshop_id: domain.workshop_id,
            platform_type: domain.platform_type.as_str().to_string(),
            name: domain.name,
            description: domain.description,
            file_size_bytes: domain.file_size_bytes,
            is_collection: domain.is_collection,
            last_updated: domain.last_updated,
            installation_path: domain.installation_path,
            metadata: domain.metadata.to_json()?,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn from_domain(domain: WorkshopAddon) -> Result<Self> {
        Ok(Self {
            id: domain.id,
            game_id: domain.game_id,
            workshop_id: domain.workshop_id,
            platform_type: domain.platform_type.as_str().to_string(),
            name: domain.name,
            description: domain.description,
            file_size_bytes: domain.file_size_bytes,
            is_collection: domain.is_collection,
            last_updated: domain.last_updated,
            installation_path: domain.installation_path,
            metadata: domain.metadata.to_json()?,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        })
    }
}

impl TryFrom<WorkshopAddonDB> for WorkshopAddon {
    type Error = Error;

    fn try_from(db: WorkshopAddonDB) -> std::result::Result<Self, Self::Error> {
        let platform_type = db.platform_type.parse().map_err(|e: String| {
            Error::Database(DatabaseError::Internal(format!("addon {}: {}", db.id, e)))
        })?;
        let metadata = AddonMetadata::from_json(&db.metadata).map_err(|e| {
            Error::Database(DatabaseError::Internal(format!(
                "addon {} has unreadable metadata: {}",
                db.id, e
            )))
        })?;
        Ok(Self {
            id: db.id,
            game_id: db.game_id,
            workshop_id: db.workshop_id,
            platform_type,
            name: db.name,
            description: db.description,
            file_size_bytes: db.file_size_bytes,
            is_collection: db.is_collection,
            last_updated: db.last_updated,
            installation_path: db.installation_path,
            metadata,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}
