use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ActionType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
    Guest,
}

/// Who is performing an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccessControl {
    pub role: Role,
    pub user_id: Option<Uuid>,
}

impl UserAccessControl {
    pub fn new(role: Role, user_id: Uuid) -> Self {
        Self {
            role,
            user_id: Some(user_id),
        }
    }

    pub fn guest() -> Self {
        Self {
            role: Role::Guest,
            user_id: None,
        }
    }

    pub fn id(&self) -> Option<Uuid> {
        self.user_id
    }
}

/// An action a user triggered, to be recorded in the action log.
#[derive(Debug, Clone, PartialEq)]
pub struct UserAction {
    /// Id of this particular occurrence; becomes the log entry id.
    pub user_action_id: Uuid,
    pub action_id: Option<Uuid>,
    pub action_name: String,
    pub context: String,
    pub access_control: UserAccessControl,
}

impl UserAction {
    pub fn new(
        access_control: UserAccessControl,
        action_name: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        let action_name = action_name.into();
        Self {
            user_action_id: Uuid::new_v4(),
            action_id: Some(ActionType::id_for_name(&action_name)),
            action_name,
            context: context.into(),
            access_control,
        }
    }

    pub fn with_ids(mut self, user_action_id: Uuid, action_id: Option<Uuid>) -> Self {
        self.user_action_id = user_action_id;
        self.action_id = action_id;
        self
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.access_control.id()
    }
}
