use std::sync::Arc;

use crate::audit::ActionLogStore;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub store: ActionLogStore,
}
