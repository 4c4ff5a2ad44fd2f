use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::audit::CreateOutcome;
use crate::audit::validation::{self, Violations};
use crate::error::AppError;
use crate::models::{Role, UserAccessControl, UserAction};
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct UserPayload {
    pub role: Role,
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateActionLogRequest {
    pub user_action_id: Option<String>,
    pub action_id: Option<String>,
    pub action_name: Option<String>,
    pub context: Option<String>,
    pub user: Option<UserPayload>,
    pub status: Option<Value>,
}

impl CreateActionLogRequest {
    /// Turn the loosely typed body into a user action and its status.
    pub fn into_user_action(self) -> Result<(UserAction, bool), Violations> {
        let mut violations = Violations::new();

        let user_action_id =
            validation::parse_uuid("user_action_id", self.user_action_id.as_deref(), &mut violations);
        let action_id = validation::parse_uuid("action_id", self.action_id.as_deref(), &mut violations);

        let access_control = match self.user {
            Some(user) => UserAccessControl {
                role: user.role,
                user_id: validation::parse_uuid("user_id", user.id.as_deref(), &mut violations),
            },
            None => UserAccessControl::guest(),
        };

        let action_name = self.action_name.unwrap_or_default();
        if action_name.trim().is_empty() {
            violations.add("action_name", "_required", "An action_name is required");
        }

        if self.context.is_none() {
            violations.add("context", "_required", "A context is required");
        }

        let status = validation::parse_boolean("status", self.status.as_ref(), &mut violations);
        if self.status.as_ref().is_none_or(Value::is_null) {
            violations.add("status", "_required", "A status is required");
        }

        violations.into_result()?;

        let user_action = UserAction::new(
            access_control,
            action_name,
            self.context.unwrap_or_default(),
        );
        let instance_id = user_action_id.unwrap_or(user_action.user_action_id);
        let action_id = action_id.or(user_action.action_id);
        let user_action = user_action.with_ids(instance_id, action_id);

        Ok((user_action, status.unwrap_or_default()))
    }
}

pub async fn create(
    State(state): State<SharedState>,
    Json(body): Json<CreateActionLogRequest>,
) -> Result<Response, AppError> {
    let (user_action, status) = body.into_user_action().map_err(AppError::Validation)?;

    match state.store.create(&user_action, status).await? {
        CreateOutcome::Logged(log) => Ok((StatusCode::CREATED, Json(log)).into_response()),
        CreateOutcome::Skipped => {
            Ok((StatusCode::OK, Json(json!({ "status": "skipped" }))).into_response())
        }
    }
}

