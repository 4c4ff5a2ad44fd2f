use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::{ActionLog, ActionType, NewActionLog};

use super::{LogRepository, LogTransaction, StoreError, action_log, actions};

#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LogRepository for PgRepository {
    async fn begin(&self) -> Result<Box<dyn LogTransaction>, StoreError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgTransaction { tx }))
    }
}

/// Rolled back by sqlx when dropped uncommitted.
pub struct PgTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl LogTransaction for PgTransaction {
    async fn find_action_by_name(&mut self, name: &str) -> Result<Option<ActionType>, StoreError> {
        Ok(actions::find_by_name(&mut self.tx, name).await?)
    }

    async fn insert_action(&mut self, action: &ActionType) -> Result<Option<ActionType>, StoreError> {
        Ok(actions::insert_if_absent(&mut self.tx, action).await?)
    }

    async fn insert_action_log(&mut self, log: &NewActionLog) -> Result<ActionLog, StoreError> {
        Ok(action_log::create(&mut self.tx, log).await?)
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        self.tx.commit().await?;
        Ok(())
    }
}
