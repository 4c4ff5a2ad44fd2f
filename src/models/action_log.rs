use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
pub struct ActionLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub action_id: Uuid,
    pub context: String,
    pub status: bool,
    pub created: DateTime<Utc>,
}

/// Candidate record assembled before validation. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionLogDraft {
    pub id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub action_id: Option<Uuid>,
    pub context: Option<String>,
    pub status: Option<bool>,
}

/// A validated record, ready to be inserted. `created` is assigned by storage.
#[derive(Debug, Clone, PartialEq)]
pub struct NewActionLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub action_id: Uuid,
    pub context: String,
    pub status: bool,
}
