use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{not_found_as, IntoCore};
use crate::schema::sessions;
use crate::utils::{id_or_new, now};
use forgefleet_core::errors::Result;
use forgefleet_core::sessions::{NewSession, Session, SessionRepositoryTrait, SessionStatus};

use super::model::SessionDB;

/// Repository for server sessions.
pub struct SessionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SessionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl SessionRepositoryTrait for SessionRepository {
    async fn create(&self, new_session: NewSession) -> Result<Session> {
        self.writer
            .exec(move |conn| {
                let mut session_db: SessionDB = new_session.into();
                session_db.id = id_or_new(session_db.id);

                diesel::insert_into(sessions::table)
                    .values(&session_db)
                    .execute(conn)
                    .into_core()?;

                Session::try_from(session_db)
            })
            .await
    }

    async fn update_status(&self, session_id: &str, status: SessionStatus) -> Result<Session> {
        let session_id = session_id.to_string();
        self.writer
            .exec(move |conn| {
                let existing = sessions::table
                    .select(SessionDB::as_select())
                    .find(&session_id)
                    .first::<SessionDB>(conn)
                    .into_core()
                    .map_err(not_found_as("session", &session_id))?;

                let timestamp = now();
                let ended_at = if status.is_active() {
                    None
                } else {
                    existing.ended_at.or(Some(timestamp))
                };

                diesel::update(sessions::table.find(&session_id))
                    .set((
                        sessions::status.eq(status.as_str()),
                        sessions::ended_at.eq(ended_at),
                        sessions::updated_at.eq(timestamp),
                    ))
                    .execute(conn)
                    .into_core()?;

                Session::try_from(SessionDB {
                    status: status.as_str().to_string(),
                    ended_at,
                    updated_at: timestamp,
                    ..existing
                })
            })
            .await
    }

    fn get_by_id(&self, session_id: &str) -> Result<Session> {
        let mut conn = get_connection(&self.pool)?;

        let session = sessions::table
            .select(SessionDB::as_select())
            .find(session_id)
            .first::<SessionDB>(&mut conn)
            .into_core()
            .map_err(not_found_as("session", session_id))?;

        session.try_into()
    }

    fn list_by_sgc(&self, sgc_id: &str) -> Result<Vec<Session>> {
        let mut conn = get_connection(&self.pool)?;

        let results = sessions::table
            .filter(sessions::sgc_id.eq(sgc_id))
            .select(SessionDB::as_select())
            .order((sessions::created_at.desc(), sessions::id.desc()))
            .load::<SessionDB>(&mut conn)
            .into_core()?;

        results.into_iter().map(Session::try_from).collect()
    }
}
