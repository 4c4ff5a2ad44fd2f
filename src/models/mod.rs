pub mod action;
pub mod action_log;
pub mod user_action;

pub use action::ActionType;
pub use action_log::{ActionLog, ActionLogDraft, NewActionLog};
pub use user_action::{Role, UserAccessControl, UserAction};
