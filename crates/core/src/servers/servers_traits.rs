//! Game config and server game config repository traits.

use async_trait::async_trait;

use super::servers_model::{GameConfig, NewGameConfig, NewServerGameConfig, ServerGameConfig};
use crate::errors::Result;

/// Persistence contract for game configs.
#[async_trait]
pub trait GameConfigRepositoryTrait: Send + Sync {
    async fn create(&self, new_config: NewGameConfig) -> Result<GameConfig>;

    /// Returns the number of deleted records.
    async fn delete(&self, config_id: &str) -> Result<usize>;

    /// Retrieves a game config by its ID.
    ///
    /// Fails with `DatabaseError::NotFound` when no row matches.
    fn get_by_id(&self, config_id: &str) -> Result<GameConfig>;

    fn list(&self) -> Result<Vec<GameConfig>>;
}

/// Persistence contract for server game configs.
#[async_trait]
pub trait ServerGameConfigRepositoryTrait: Send + Sync {
    async fn create(&self, new_sgc: NewServerGameConfig) -> Result<ServerGameConfig>;

    /// Returns the number of deleted records.
    async fn delete(&self, sgc_id: &str) -> Result<usize>;

    /// Retrieves an SGC by its ID.
    ///
    /// Fails with `DatabaseError::NotFound` when no row matches.
    fn get_by_id(&self, sgc_id: &str) -> Result<ServerGameConfig>;

    fn list_by_server(&self, server_id: &str) -> Result<Vec<ServerGameConfig>>;
}
