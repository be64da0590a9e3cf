//! Database model for sessions.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use forgefleet_core::errors::{DatabaseError, Error};
use forgefleet_core::sessions::{NewSession, Session};

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::sessions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SessionDB {
    pub id: String,
    pub sgc_id: String,
    pub status: String,
    pub started_at: Option<NaiveDateTime>,
    pub ended_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<SessionDB> for Session {
    type Error = Error;

    fn try_from(db: SessionDB) -> Result<Self, Self::Error> {
        let status = db.status.parse().map_err(|e: String| {
            Error::Database(DatabaseError::Internal(format!("session {}: {}", db.id, e)))
        })?;
        Ok(Self {
            id: db.id,
            sgc_id: db.sgc_id,
            status,
            started_at: db.started_at,
            ended_at: db.ended_at,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<NewSession> for SessionDB {
    fn from(domain: NewSession) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain.id.unwrap_or_default(),
            sgc_id: domain.sgc_id,
            status: domain.status.as_str().to_string(),
            started_at: domain.started_at,
            ended_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}
