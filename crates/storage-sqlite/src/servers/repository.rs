use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{not_found_as, IntoCore};
use crate::schema::{game_configs, server_game_configs};
use crate::utils::id_or_new;
use forgefleet_core::errors::Result;
use forgefleet_core::servers::{
    GameConfig, GameConfigRepositoryTrait, NewGameConfig, NewServerGameConfig, ServerGameConfig,
    ServerGameConfigRepositoryTrait,
};

use super::model::{GameConfigDB, ServerGameConfigDB};

/// Repository for game configs.
pub struct GameConfigRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GameConfigRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl GameConfigRepositoryTrait for GameConfigRepository {
    async fn create(&self, new_config: NewGameConfig) -> Result<GameConfig> {
        new_config.validate()?;

        self.writer
            .exec(move |conn| {
                let mut config_db: GameConfigDB = new_config.into();
                config_db.id = id_or_new(config_db.id);

                diesel::insert_into(game_configs::table)
                    .values(&config_db)
                    .execute(conn)
                    .into_core()?;

                Ok(config_db.into())
            })
            .await
    }

    async fn delete(&self, config_id: &str) -> Result<usize> {
        let config_id = config_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(game_configs::table.find(config_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    fn get_by_id(&self, config_id: &str) -> Result<GameConfig> {
        let mut conn = get_connection(&self.pool)?;

        let config = game_configs::table
            .select(GameConfigDB::as_select())
            .find(config_id)
            .first::<GameConfigDB>(&mut conn)
            .into_core()
            .map_err(not_found_as("game config", config_id))?;

        Ok(config.into())
    }

    fn list(&self) -> Result<Vec<GameConfig>> {
        let mut conn = get_connection(&self.pool)?;

        let results = game_configs::table
            .select(GameConfigDB::as_select())
            .order(game_configs::name.asc())
            .load::<GameConfigDB>(&mut conn)
            .into_core()?;

        Ok(results.into_iter().map(GameConfig::from).collect())
    }
}

/// Repository for server game configs.
pub struct ServerGameConfigRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ServerGameConfigRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl ServerGameConfigRepositoryTrait for ServerGameConfigRepository {
    async fn create(&self, new_sgc: NewServerGameConfig) -> Result<ServerGameConfig> {
        new_sgc.validate()?;

        self.writer
            .exec(move |conn| {
                let mut sgc_db: ServerGameConfigDB = new_sgc.into();
                sgc_db.id = id_or_new(sgc_db.id);

                diesel::insert_into(server_game_configs::table)
                    .values(&sgc_db)
                    .execute(conn)
                    .into_core()?;

                Ok(sgc_db.into())
            })
            .await
    }

    async fn delete(&self, sgc_id: &str) -> Result<usize> {
        let sgc_id = sgc_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(server_game_configs::table.find(sgc_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    fn get_by_id(&self, sgc_id: &str) -> Result<ServerGameConfig> {
        let mut conn = get_connection(&self.pool)?;

        let sgc = server_game_configs::table
            .select(ServerGameConfigDB::as_select())
            .find(sgc_id)
            .first::<ServerGameConfigDB>(&mut conn)
            .into_core()
            .map_err(not_found_as("sgc", sgc_id))?;

        Ok(sgc.into())
    }

    fn list_by_server(&self, server_id: &str) -> Result<Vec<ServerGameConfig>> {
        let mut conn = get_connection(&self.pool)?;

        let results = server_game_configs::table
            .filter(server_game_configs::server_id.eq(server_id))
            .select(ServerGameConfigDB::as_select())
            .order((
                server_game_configs::created_at.asc(),
                server_game_configs::id.asc(),
            ))
            .load::<ServerGameConfigDB>(&mut conn)
            .into_core()?;

        Ok(results.into_iter().map(ServerGameConfig::from).collect())
    }
}
