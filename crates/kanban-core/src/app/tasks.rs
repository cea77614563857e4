//! TaskService - タスクの作成・参照・status 更新・担当者変更・削除

use std::sync::Arc;

use crate::domain::{
    BoardError, BoardResult, NewTask, SprintId, Task, TaskId, TaskStatus, UserId,
};
use crate::ports::{Clock, IdGenerator, SprintStore, TaskStore};

#[derive(Clone)]
pub struct TaskService {
    tasks: Arc<dyn TaskStore>,
    sprints: Arc<dyn SprintStore>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl TaskService {
    pub fn new(
        tasks: Arc<dyn TaskStore>,
        sprints: Arc<dyn SprintStore>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            tasks,
            sprints,
            clock,
            ids,
        }
    }

    /// タスクを作成する。所属スプリントが存在しなければ NotFound
    pub async fn create(&self, input: NewTask) -> BoardResult<Task> {
        if input.title.trim().is_empty() {
            return Err(BoardError::InvalidInput("title is required".to_string()));
        }
        if input.status.is_blank() {
            return Err(BoardError::InvalidInput("status is required".to_string()));
        }
        if self.sprints.load_sprint(input.sprint_id).await?.is_none() {
            return Err(BoardError::sprint_not_found(input.sprint_id));
        }

        let task = input.into_task(self.ids.generate_task_id(), self.clock.now());
        self.tasks.insert_task(&task).await?;
        tracing::info!(task_id = %task.id, sprint_id = %task.sprint_id, "task created");
        Ok(task)
    }

    pub async fn get(&self, id: TaskId) -> BoardResult<Task> {
        self.tasks
            .load_task(id)
            .await?
            .ok_or_else(|| BoardError::task_not_found(id))
    }

    pub async fn list(&self) -> BoardResult<Vec<Task>> {
        self.tasks.load_tasks(None).await
    }

    /// 存在しないスプリントは空のリストになる
    pub async fn list_by_sprint(&self, sprint: SprintId) -> BoardResult<Vec<Task>> {
        self.tasks.load_tasks(Some(sprint)).await
    }

    pub async fn update_status(&self, id: TaskId, status: TaskStatus) -> BoardResult<Task> {
        if status.is_blank() {
            return Err(BoardError::InvalidInput("status is required".to_string()));
        }
        if !self.tasks.save_task_status(id, &status, self.clock.now()).await? {
            return Err(BoardError::task_not_found(id));
        }
        tracing::info!(task_id = %id, status = %status, "task status updated");
        self.get(id).await
    }

    /// `None` で担当者を外す
    pub async fn assign(&self, id: TaskId, assignee: Option<UserId>) -> BoardResult<Task> {
        if !self
            .tasks
            .save_task_assignee(id, assignee, self.clock.now())
            .await?
        {
            return Err(BoardError::task_not_found(id));
        }
        match assignee {
            Some(user) => tracing::info!(task_id = %id, user_id = %user, "task assigned"),
            None => tracing::info!(task_id = %id, "task unassigned"),
        }
        self.get(id).await
    }

    pub async fn delete(&self, id: TaskId) -> BoardResult<()> {
        if !self.tasks.remove_task(id).await? {
            return Err(BoardError::task_not_found(id));
        }
        tracing::info!(task_id = %id, "task deleted");
        Ok(())
    }
}
