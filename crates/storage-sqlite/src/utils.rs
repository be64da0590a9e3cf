//! Small helpers shared by the repositories.

use chrono::NaiveDateTime;

/// New primary key. UUID v7 sorts by creation time; listings still order by
/// `created_at` first because callers may supply their own ids.
pub fn new_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

/// Uses the caller's id when present and non-blank.
pub fn id_or_new(id: String) -> String {
    if id.trim().is_empty() {
        new_id()
    } else {
        id
    }
}

pub fn now() -> NaiveDateTime {
    chrono::Utc::now().naive_utc()
}
