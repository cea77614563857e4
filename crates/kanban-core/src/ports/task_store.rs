//! TaskStore port - タスクの永続化
//!
//! 更新系は「行が存在したか」を返し、NotFound への変換はサービス層が行う。

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{BoardResult, SprintId, Task, TaskId, TaskStatus, UserId};

/// TaskStore はタスクの保存先
///
/// 同じ行への同時書き込みは last-write-wins。ロックやバージョン管理はしない。
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn insert_task(&self, task: &Task) -> BoardResult<()>;

    async fn load_task(&self, id: TaskId) -> BoardResult<Option<Task>>;

    /// 全タスク（`sprint` 指定時はそのスプリントのみ）を ID 順で読み込む
    async fn load_tasks(&self, sprint: Option<SprintId>) -> BoardResult<Vec<Task>>;

    async fn save_task_status(
        &self,
        id: TaskId,
        status: &TaskStatus,
        updated_at: DateTime<Utc>,
    ) -> BoardResult<bool>;

    /// `None` は担当者の解除
    async fn save_task_assignee(
        &self,
        id: TaskId,
        assignee: Option<UserId>,
        updated_at: DateTime<Utc>,
    ) -> BoardResult<bool>;

    async fn remove_task(&self, id: TaskId) -> BoardResult<bool>;
}
