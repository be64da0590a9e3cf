//! Sessions module - runtime executions of a server game config.

mod sessions_model;
mod sessions_traits;

pub use sessions_model::{NewSession, Session, SessionStatus};
pub use sessions_traits::SessionRepositoryTrait;
