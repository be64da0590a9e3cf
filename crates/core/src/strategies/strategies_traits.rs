//! Configuration strategy repository trait.

use async_trait::async_trait;

use super::strategies_model::{ConfigurationStrategy, NewConfigurationStrategy};
use crate::errors::Result;

/// Persistence contract for configuration strategies.
#[async_trait]
pub trait ConfigurationStrategyRepositoryTrait: Send + Sync {
    async fn create(&self, new_strategy: NewConfigurationStrategy)
        -> Result<ConfigurationStrategy>;

    /// Returns the number of deleted records.
    async fn delete(&self, strategy_id: &str) -> Result<usize>;

    fn get_by_id(&self, strategy_id: &str) -> Result<ConfigurationStrategy>;

    /// Lists a game's strategies in insertion order.
    ///
    /// Path resolution picks the first volume entry from this list, so
    /// implementations must return a stable order.
    fn list_by_game(&self, game_id: &str) -> Result<Vec<ConfigurationStrategy>>;
}
