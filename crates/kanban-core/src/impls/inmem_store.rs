//! InMemoryBoardStore - 開発用・テスト用のストア
//!
//! # 実装詳細
//! - BTreeMap<SprintId, Sprint> / BTreeMap<TaskId, Task>（ULID 順 = 作成順）
//! - tokio::sync::RwLock で排他制御（読み出しは並行に走る）
//! - スプリントはタスクを持たない形で保存し、読み出し時に sprint_id で結合する

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::{
    BoardResult, ProjectId, Sprint, SprintId, SprintStatus, Task, TaskId, TaskStatus, UserId,
};
use crate::ports::{SprintStore, TaskStore};

#[derive(Default)]
struct Tables {
    sprints: BTreeMap<SprintId, Sprint>,
    tasks: BTreeMap<TaskId, Task>,
}

impl Tables {
    fn with_tasks(&self, sprint: &Sprint) -> Sprint {
        let mut sprint = sprint.clone();
        sprint.tasks = self
            .tasks
            .values()
            .filter(|t| t.sprint_id == sprint.id)
            .cloned()
            .collect();
        sprint
    }
}

/// InMemoryBoardStore は SprintStore と TaskStore の両方を実装する
///
/// # 使用例
/// ```ignore
/// let store = Arc::new(InMemoryBoardStore::new());
/// let app = AppBuilder::new().with_store(store).build()?;
/// ```
pub struct InMemoryBoardStore {
    tables: RwLock<Tables>,
}

impl InMemoryBoardStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }
}

impl Default for InMemoryBoardStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SprintStore for InMemoryBoardStore {
    async fn insert_sprint(&self, sprint: &Sprint) -> BoardResult<()> {
        let mut stored = sprint.clone();
        stored.tasks.clear();
        self.tables.write().await.sprints.insert(stored.id, stored);
        Ok(())
    }

    async fn load_sprint(&self, id: SprintId) -> BoardResult<Option<Sprint>> {
        let tables = self.tables.read().await;
        Ok(tables.sprints.get(&id).map(|s| tables.with_tasks(s)))
    }

    async fn load_sprints(&self, project: Option<ProjectId>) -> BoardResult<Vec<Sprint>> {
        let tables = self.tables.read().await;
        Ok(tables
            .sprints
            .values()
            .filter(|s| project.is_none_or(|p| s.project_id == p))
            .map(|s| tables.with_tasks(s))
            .collect())
    }

    async fn save_sprint_status(&self, id: SprintId, status: &SprintStatus) -> BoardResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.sprints.get_mut(&id) {
            Some(sprint) => {
                sprint.status = status.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl TaskStore for InMemoryBoardStore {
    async fn insert_task(&self, task: &Task) -> BoardResult<()> {
        self.tables.write().await.tasks.insert(task.id, task.clone());
        Ok(())
    }

    async fn load_task(&self, id: TaskId) -> BoardResult<Option<Task>> {
        Ok(self.tables.read().await.tasks.get(&id).cloned())
    }

    async fn load_tasks(&self, sprint: Option<SprintId>) -> BoardResult<Vec<Task>> {
        Ok(self
            .tables
            .read()
            .await
            .tasks
            .values()
            .filter(|t| sprint.is_none_or(|s| t.sprint_id == s))
            .cloned()
            .collect())
    }

    async fn save_task_status(
        &self,
        id: TaskId,
        status: &TaskStatus,
        updated_at: DateTime<Utc>,
    ) -> BoardResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.tasks.get_mut(&id) {
            Some(task) => {
                task.status = status.clone();
                task.updated_at = updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn save_task_assignee(
        &self,
        id: TaskId,
        assignee: Option<UserId>,
        updated_at: DateTime<Utc>,
    ) -> BoardResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.tasks.get_mut(&id) {
            Some(task) => {
                task.assign_to = assignee;
                task.updated_at = updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove_task(&self, id: TaskId) -> BoardResult<bool> {
        Ok(self.tables.write().await.tasks.remove(&id).is_some())
    }
}
