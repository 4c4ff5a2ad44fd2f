pub mod action_log;
pub mod actions;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use sqlx::error::ErrorKind;

use crate::models::{ActionLog, ActionType, NewActionLog};

pub use memory::MemoryRepository;
pub use postgres::PgRepository;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store refused the row because of one of its own constraints.
    #[error("constraint violated on {field} ({rule}): {message}")]
    Constraint {
        field: &'static str,
        rule: &'static str,
        message: String,
    },
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let rule = match db_err.kind() {
                ErrorKind::UniqueViolation => Some("unique"),
                ErrorKind::ForeignKeyViolation => Some("exists"),
                ErrorKind::NotNullViolation => Some("_required"),
                ErrorKind::CheckViolation => Some("check"),
                _ => match db_err.code().as_deref() {
                    // string_data_right_truncation
                    Some("22001") => Some("maxLength"),
                    // character_not_in_repertoire, e.g. a NUL byte in text
                    Some("22021") => Some("encoding"),
                    _ => None,
                },
            };

            if let Some(rule) = rule {
                let field = match db_err.constraint() {
                    Some("action_logs_pkey") => "id",
                    Some("action_logs_action_id_fkey") | Some("actions_pkey") => "action_id",
                    Some("actions_name_key") => "action_name",
                    _ if rule == "maxLength" => "context",
                    _ => "action_log",
                };
                return StoreError::Constraint {
                    field,
                    rule,
                    message: db_err.message().to_string(),
                };
            }
        }
        StoreError::Database(err)
    }
}

/// Source of units of work over the action log tables.
#[async_trait]
pub trait LogRepository: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn LogTransaction>, StoreError>;
}

/// A unit of work. Writes become visible only after `commit`; dropping it
/// without committing discards them.
#[async_trait]
pub trait LogTransaction: Send {
    async fn find_action_by_name(&mut self, name: &str) -> Result<Option<ActionType>, StoreError>;

    /// Insert an action type. Returns `None` when its id or name is already taken.
    async fn insert_action(&mut self, action: &ActionType) -> Result<Option<ActionType>, StoreError>;

    async fn insert_action_log(&mut self, log: &NewActionLog) -> Result<ActionLog, StoreError>;

    async fn commit(self: Box<Self>) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use sqlx::error::DatabaseError;

    use super::*;
    use crate::audit::LogError;

    /// Postgres-shaped rejection carrying an SQLSTATE and constraint name.
    #[derive(Debug)]
    struct Rejected {
        code: &'static str,
        constraint: Option<&'static str>,
    }

    impl std::fmt::Display for Rejected {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "rejected with {}", self.code)
        }
    }

    impl std::error::Error for Rejected {}

    impl DatabaseError for Rejected {
        fn message(&self) -> &str {
            "rejected"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn constraint(&self) -> Option<&str> {
            self.constraint
        }

        fn kind(&self) -> ErrorKind {
            match self.code {
                "23505" => ErrorKind::UniqueViolation,
                "23503" => ErrorKind::ForeignKeyViolation,
                "23502" => ErrorKind::NotNullViolation,
                "23514" => ErrorKind::CheckViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    fn rejected(code: &'static str, constraint: Option<&'static str>) -> StoreError {
        StoreError::from(sqlx::Error::Database(Box::new(Rejected { code, constraint })))
    }

    fn constraint_of(err: StoreError) -> (&'static str, &'static str) {
        match err {
            StoreError::Constraint { field, rule, .. } => (field, rule),
            other => panic!("expected a constraint error, got {other:?}"),
        }
    }

    #[test]
    fn constraint_violations_are_classified() {
        assert_eq!(constraint_of(rejected("23505", Some("action_logs_pkey"))), ("id", "unique"));
        assert_eq!(
            constraint_of(rejected("23503", Some("action_logs_action_id_fkey"))),
            ("action_id", "exists")
        );
        assert_eq!(
            constraint_of(rejected("23505", Some("actions_name_key"))),
            ("action_name", "unique")
        );
        assert_eq!(constraint_of(rejected("23502", None)), ("action_log", "_required"));
        assert_eq!(constraint_of(rejected("22001", None)), ("context", "maxLength"));
        assert_eq!(constraint_of(rejected("22021", None)), ("action_log", "encoding"));
    }

    #[test]
    fn constraint_violation_becomes_validation_failure() {
        let err = LogError::from(rejected("23505", Some("action_logs_pkey")));
        match err {
            LogError::ValidationFailed(violations) => assert!(violations.has_rule("id", "unique")),
            other => panic!("expected a validation failure, got {other:?}"),
        }
    }

    #[test]
    fn other_errors_become_persistence_failures() {
        let err = StoreError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StoreError::Database(sqlx::Error::PoolTimedOut)));
        assert!(matches!(
            LogError::from(err),
            LogError::PersistenceFailed(StoreError::Database(_))
        ));

        // Deadlocks and the like are not caused by the input.
        let err = LogError::from(rejected("40P01", None));
        assert!(matches!(err, LogError::PersistenceFailed(StoreError::Database(_))));
    }
}
