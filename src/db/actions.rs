use sqlx::PgConnection;

use crate::models::ActionType;

pub async fn find_by_name(
    conn: &mut PgConnection,
    name: &str,
) -> Result<Option<ActionType>, sqlx::Error> {
    sqlx::query_as::<_, ActionType>("SELECT id, name FROM actions WHERE name = $1")
        .bind(name)
        .fetch_optional(conn)
        .await
}

/// Insert unless the id or name already exists, in which case nothing is returned.
pub async fn insert_if_absent(
    conn: &mut PgConnection,
    action: &ActionType,
) -> Result<Option<ActionType>, sqlx::Error> {
    sqlx::query_as::<_, ActionType>(
        "INSERT INTO actions (id, name) VALUES ($1, $2)
         ON CONFLICT DO NOTHING RETURNING id, name",
    )
    .bind(action.id)
    .bind(&action.name)
    .fetch_optional(conn)
    .await
}
