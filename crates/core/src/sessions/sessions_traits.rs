//! Session repository trait.

use async_trait::async_trait;

use super::sessions_model::{NewSession, Session, SessionStatus};
use crate::errors::Result;

/// Persistence contract for sessions.
///
/// Sessions are written by whatever tracks server processes; this crate only
/// reads them to gate destructive operations.
#[async_trait]
pub trait SessionRepositoryTrait: Send + Sync {
    async fn create(&self, new_session: NewSession) -> Result<Session>;

    /// Sets the status, stamping `ended_at` when the session leaves the active states.
    async fn update_status(&self, session_id: &str, status: SessionStatus) -> Result<Session>;

    fn get_by_id(&self, session_id: &str) -> Result<Session>;

    /// Lists every session recorded for an SGC, newest first.
    fn list_by_sgc(&self, sgc_id: &str) -> Result<Vec<Session>>;
}
