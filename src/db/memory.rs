use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::audit::validation::CONTEXT_MAX_LENGTH;
use crate::models::{ActionLog, ActionType, NewActionLog};

use super::{LogRepository, LogTransaction, StoreError};

#[derive(Debug, Default)]
struct Tables {
    actions: Vec<ActionType>,
    action_logs: Vec<ActionLog>,
}

/// Process-local storage with the same constraints as the Postgres schema.
/// A unit of work holds the lock until it is committed or dropped.
#[derive(Clone, Default)]
pub struct MemoryRepository {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn actions(&self) -> Vec<ActionType> {
        self.tables.lock().await.actions.clone()
    }

    pub async fn action_logs(&self) -> Vec<ActionLog> {
        self.tables.lock().await.action_logs.clone()
    }
}

#[async_trait]
impl LogRepository for MemoryRepository {
    async fn begin(&self) -> Result<Box<dyn LogTransaction>, StoreError> {
        let tables = self.tables.clone().lock_owned().await;
        Ok(Box::new(MemoryTransaction {
            tables,
            actions: Vec::new(),
            action_logs: Vec::new(),
        }))
    }
}

pub struct MemoryTransaction {
    tables: OwnedMutexGuard<Tables>,
    actions: Vec<ActionType>,
    action_logs: Vec<ActionLog>,
}

impl MemoryTransaction {
    fn all_actions(&self) -> impl Iterator<Item = &ActionType> {
        self.tables.actions.iter().chain(self.actions.iter())
    }

    fn all_action_logs(&self) -> impl Iterator<Item = &ActionLog> {
        self.tables.action_logs.iter().chain(self.action_logs.iter())
    }
}

#[async_trait]
impl LogTransaction for MemoryTransaction {
    async fn find_action_by_name(&mut self, name: &str) -> Result<Option<ActionType>, StoreError> {
        Ok(self.all_actions().find(|a| a.name == name).cloned())
    }

    async fn insert_action(&mut self, action: &ActionType) -> Result<Option<ActionType>, StoreError> {
        if self
            .all_actions()
            .any(|a| a.id == action.id || a.name == action.name)
        {
            return Ok(None);
        }
        self.actions.push(action.clone());
        Ok(Some(action.clone()))
    }

    async fn insert_action_log(&mut self, log: &NewActionLog) -> Result<ActionLog, StoreError> {
        if self.all_action_logs().any(|l| l.id == log.id) {
            return Err(StoreError::Constraint {
                field: "id",
                rule: "unique",
                message: format!("action log {} already exists", log.id),
            });
        }
        if !self.all_actions().any(|a| a.id == log.action_id) {
            return Err(StoreError::Constraint {
                field: "action_id",
                rule: "exists",
                message: format!("action {} does not exist", log.action_id),
            });
        }
        if log.context.len() > CONTEXT_MAX_LENGTH {
            return Err(StoreError::Constraint {
                field: "context",
                rule: "maxLength",
                message: "value too long for context".to_string(),
            });
        }

        let stored = ActionLog {
            id: log.id,
            user_id: log.user_id,
            action_id: log.action_id,
            context: log.context.clone(),
            status: log.status,
            created: Utc::now(),
        };
        self.action_logs.push(stored.clone());
        Ok(stored)
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let MemoryTransaction {
            mut tables,
            actions,
            action_logs,
        } = *self;
        tables.actions.extend(actions);
        tables.action_logs.extend(action_logs);
        Ok(())
    }
}
