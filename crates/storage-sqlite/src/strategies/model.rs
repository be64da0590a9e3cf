//! Database model for configuration strategies.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use forgefleet_core::errors::{DatabaseError, Error};
use forgefleet_core::strategies::{ConfigurationStrategy, NewConfigurationStrategy};

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::configuration_strategies)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ConfigurationStrategyDB {
    pub id: String,
    pub game_id: String,
    pub strategy_type: String,
    pub target_path: Option<String>,
    pub apply_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<ConfigurationStrategyDB> for ConfigurationStrategy {
    type Error = Error;

    fn try_from(db: ConfigurationStrategyDB) -> Result<Self, Self::Error> {
        let strategy_type = db.strategy_type.parse().map_err(|e: String| {
            Error::Database(DatabaseError::Internal(format!("strategy {}: {}", db.id, e)))
        })?;
        Ok(Self {
            id: db.id,
            game_id: db.game_id,
            strategy_type,
            target_path: db.target_path,
            apply_order: db.apply_order,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<NewConfigurationStrategy> for ConfigurationStrategyDB {
    fn from(domain: NewConfigurationStrategy) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain.id.unwrap_or_default(),
            game_id: domain.game_id,
            strategy_type: domain.strategy_type.as_str().to_string(),
            target_path: domain.target_path,
            apply_order: domain.apply_order,
            created_at: now,
            updated_at: now,
        }
    }
}
