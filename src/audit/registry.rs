use uuid::Uuid;

use crate::db::LogTransaction;
use crate::models::ActionType;

use super::LogError;
use super::validation::Violations;

const ACTION_NAME_MAX_LENGTH: usize = 255;

/// Resolves action names to action types, registering new names on first use.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionRegistry;

impl ActionRegistry {
    /// The name is the natural key. `action_id` only picks the id of a newly
    /// registered type; without it the id is derived from the name.
    pub async fn find_or_create_action(
        &self,
        tx: &mut dyn LogTransaction,
        action_id: Option<Uuid>,
        action_name: &str,
    ) -> Result<ActionType, LogError> {
        check_name(action_name)
            .into_result()
            .map_err(LogError::ValidationFailed)?;

        if let Some(existing) = tx.find_action_by_name(action_name).await? {
            return Ok(existing);
        }

        let candidate = ActionType {
            id: action_id
                .filter(|id| !id.is_nil())
                .unwrap_or_else(|| ActionType::id_for_name(action_name)),
            name: action_name.to_string(),
        };

        if let Some(created) = tx.insert_action(&candidate).await? {
            tracing::debug!(action_id = %created.id, "Registered action {action_name}");
            return Ok(created);
        }

        // Lost a race with a concurrent registration of the same name.
        if let Some(existing) = tx.find_action_by_name(action_name).await? {
            return Ok(existing);
        }

        Err(LogError::ValidationFailed(Violations::single(
            "action_id",
            "unique",
            format!("action_id {} is already registered under another name", candidate.id),
        )))
    }
}

/// Rules on the action name alone; no storage access.
pub fn check_name(name: &str) -> Violations {
    let mut violations = Violations::new();
    if name.trim().is_empty() {
        violations.add("action_name", "_empty", "action_name should not be empty");
    }
    if name.contains('\0') {
        violations.add("action_name", "nul", "action_name should not contain NUL characters");
    }
    if name.len() > ACTION_NAME_MAX_LENGTH {
        violations.add(
            "action_name",
            "maxLength",
            format!("action_name should not exceed {ACTION_NAME_MAX_LENGTH} characters"),
        );
    }
    violations
}
