//! Servers module - game configs and the server game configs (SGCs) addons attach to.

mod servers_model;
mod servers_traits;

pub use servers_model::{GameConfig, NewGameConfig, NewServerGameConfig, ServerGameConfig};
pub use servers_traits::{GameConfigRepositoryTrait, ServerGameConfigRepositoryTrait};
