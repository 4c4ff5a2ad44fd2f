use std::sync::Arc;

use crate::db::LogRepository;
use crate::models::{ActionLog, ActionLogDraft, UserAction};

use super::blacklist::Blacklist;
use super::registry::{self, ActionRegistry};
use super::validation;
use super::LogError;

/// Result of a `create` call that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    Logged(ActionLog),
    /// The action is blacklisted and was deliberately not recorded.
    Skipped,
}

impl CreateOutcome {
    pub fn into_log(self) -> Option<ActionLog> {
        match self {
            CreateOutcome::Logged(log) => Some(log),
            CreateOutcome::Skipped => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, CreateOutcome::Skipped)
    }
}

#[derive(Clone)]
pub struct ActionLogStore {
    repository: Arc<dyn LogRepository>,
    blacklist: Blacklist,
    registry: ActionRegistry,
}

impl ActionLogStore {
    pub fn new(repository: Arc<dyn LogRepository>, blacklist: Blacklist) -> Self {
        Self {
            repository,
            blacklist,
            registry: ActionRegistry,
        }
    }

    /// Record a user action with its outcome.
    ///
    /// Action type registration and the log insert share one unit of work, so
    /// a failure leaves nothing behind. Nothing is retried here.
    pub async fn create(&self, user_action: &UserAction, status: bool) -> Result<CreateOutcome, LogError> {
        if self.blacklist.is_blacklisted(&user_action.action_name) {
            tracing::debug!("Action {} is blacklisted, not logging", user_action.action_name);
            return Ok(CreateOutcome::Skipped);
        }

        let result = self.record(user_action, status).await;
        match &result {
            Ok(log) => tracing::debug!(
                log_id = %log.id,
                action = %user_action.action_name,
                "Action logged"
            ),
            Err(LogError::ValidationFailed(violations)) => tracing::warn!(
                action = %user_action.action_name,
                "Could not validate action_log data: {violations}"
            ),
            Err(e) => tracing::error!(action = %user_action.action_name, "{e}"),
        }
        result.map(CreateOutcome::Logged)
    }

    async fn record(&self, user_action: &UserAction, status: bool) -> Result<ActionLog, LogError> {
        let mut draft = ActionLogDraft {
            id: Some(user_action.user_action_id),
            user_id: user_action.user_id(),
            action_id: None,
            context: Some(user_action.context.clone()),
            status: Some(status),
        };

        // Reject what can be rejected before opening a unit of work.
        let mut violations = validation::check_without_action(&draft);
        violations.merge(registry::check_name(&user_action.action_name));
        violations.into_result().map_err(LogError::ValidationFailed)?;

        let mut tx = self.repository.begin().await?;

        let action = self
            .registry
            .find_or_create_action(tx.as_mut(), user_action.action_id, &user_action.action_name)
            .await?;

        draft.action_id = Some(action.id);
        let record = validation::validate(&draft).map_err(LogError::ValidationFailed)?;

        let saved = tx.insert_action_log(&record).await?;
        tx.commit().await?;

        Ok(saved)
    }
}
