mod model;
mod repository;

pub use model::{GameConfigDB, ServerGameConfigDB};
pub use repository::{GameConfigRepository, ServerGameConfigRepository};
