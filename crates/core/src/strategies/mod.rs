//! Strategies module - per-game configuration strategies.

mod strategies_model;
mod strategies_traits;

pub use strategies_model::{ConfigurationStrategy, NewConfigurationStrategy, StrategyType};
pub use strategies_traits::ConfigurationStrategyRepositoryTrait;
