use sqlx::PgConnection;

use crate::models::{ActionLog, NewActionLog};

pub async fn create(conn: &mut PgConnection, log: &NewActionLog) -> Result<ActionLog, sqlx::Error> {
    sqlx::query_as::<_, ActionLog>(
        "INSERT INTO action_logs (id, user_id, action_id, context, status)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(log.id)
    .bind(log.user_id)
    .bind(log.action_id)
    .bind(&log.context)
    .bind(log.status)
    .fetch_one(conn)
    .await
}
