pub mod blacklist;
pub mod registry;
pub mod store;
pub mod validation;

use crate::db::StoreError;

pub use blacklist::Blacklist;
pub use registry::ActionRegistry;
pub use store::{ActionLogStore, CreateOutcome};
pub use validation::Violations;

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// The record breaks a field rule. Retrying without changing the input is pointless.
    #[error("Could not validate action_log data: {0}")]
    ValidationFailed(Violations),
    /// Storage could not save a valid record.
    #[error("The action_log could not be saved: {0}")]
    PersistenceFailed(#[source] StoreError),
}

impl From<StoreError> for LogError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Constraint {
                field,
                rule,
                message,
            } => LogError::ValidationFailed(Violations::single(field, rule, message)),
            other => LogError::PersistenceFailed(other),
        }
    }
}
