use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{not_found_as, IntoCore};
use crate::schema::configuration_strategies;
use crate::utils::id_or_new;
use forgefleet_core::errors::Result;
use forgefleet_core::strategies::{
    ConfigurationStrategy, ConfigurationStrategyRepositoryTrait, NewConfigurationStrategy,
};

use super::model::ConfigurationStrategyDB;

/// Repository for per-game configuration strategies.
pub struct ConfigurationStrategyRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ConfigurationStrategyRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl ConfigurationStrategyRepositoryTrait for ConfigurationStrategyRepository {
    async fn create(
        &self,
        new_strategy: NewConfigurationStrategy,
    ) -> Result<ConfigurationStrategy> {
        new_strategy.validate()?;

        self.writer
            .exec(move |conn| {
                let mut strategy_db: ConfigurationStrategyDB = new_strategy.into();
                strategy_db.id = id_or_new(strategy_db.id);

                diesel::insert_into(configuration_strategies::table)
                    .values(&strategy_db)
                    .execute(conn)
                    .into_core()?;

                ConfigurationStrategy::try_from(strategy_db)
            })
            .await
    }

    async fn delete(&self, strategy_id: &str) -> Result<usize> {
        let strategy_id = strategy_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(configuration_strategies::table.find(strategy_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    fn get_by_id(&self, strategy_id: &str) -> Result<ConfigurationStrategy> {
        let mut conn = get_connection(&self.pool)?;

        let strategy = configuration_strategies::table
            .select(ConfigurationStrategyDB::as_select())
            .find(strategy_id)
            .first::<ConfigurationStrategyDB>(&mut conn)
            .into_core()
            .map_err(not_found_as("strategy", strategy_id))?;

        strategy.try_into()
    }

    fn list_by_game(&self, game_id: &str) -> Result<Vec<ConfigurationStrategy>> {
        let mut conn = get_connection(&self.pool)?;

        let results = configuration_strategies::table
            .filter(configuration_strategies::game_id.eq(game_id))
            .select(ConfigurationStrategyDB::as_select())
            .order((
                configuration_strategies::created_at.asc(),
                configuration_strategies::id.asc(),
            ))
            .load::<ConfigurationStrategyDB>(&mut conn)
            .into_core()?;

        results
            .into_iter()
            .map(ConfigurationStrategy::try_from)
            .collect()
    }
}
