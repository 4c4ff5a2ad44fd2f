use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Namespace for name-derived action ids.
const ACTION_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2a4e_8b3d_4f0a_9c57_e2d1_0b84_a3f6);

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
pub struct ActionType {
    pub id: Uuid,
    pub name: String,
}

impl ActionType {
    /// Stable id for an action name, identical on every installation.
    pub fn id_for_name(name: &str) -> Uuid {
        Uuid::new_v5(&ACTION_NAMESPACE, name.as_bytes())
    }
}
