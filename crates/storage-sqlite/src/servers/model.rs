//! Database models for game configs and server game configs.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use forgefleet_core::servers::{GameConfig, NewGameConfig, NewServerGameConfig, ServerGameConfig};

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::game_configs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GameConfigDB {
    pub id: String,
    pub game_id: String,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<GameConfigDB> for GameConfig {
    fn from(db: GameConfigDB) -> Self {
        Self {
            id: db.id,
            game_id: db.game_id,
            name: db.name,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewGameConfig> for GameConfigDB {
    fn from(domain: NewGameConfig) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain.id.unwrap_or_default(),
            game_id: domain.game_id,
            name: domain.name,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::server_game_configs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ServerGameConfigDB {
    pub id: String,
    pub game_config_id: String,
    pub server_id: String,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<ServerGameConfigDB> for ServerGameConfig {
    fn from(db: ServerGameConfigDB) -> Self {
        Self {
            id: db.id,
            game_config_id: db.game_config_id,
            server_id: db.server_id,
            name: db.name,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewServerGameConfig> for ServerGameConfigDB {
    fn from(domain: NewServerGameConfig) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain.id.unwrap_or_default(),
            game_config_id: domain.game_config_id,
            server_id: domain.server_id,
            name: domain.name,
            created_at: now,
            updated_at: now,
        }
    }
}
