//! Task - スプリント集計の対象になる作業単位

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{SprintId, TaskId, UserId};
use super::state::TaskStatus;

/// Task は 1 つのスプリントに属する作業
///
/// `estimation` は作成時に決まる。`status` と `assign_to` は
/// [`crate::app::TaskService`] がその場で書き換える。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    pub sprint_id: SprintId,
    pub assign_to: Option<UserId>,
    pub estimation: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// NewTask はタスク作成の入力
///
/// `sprint_id` は必須で、そのスプリントが存在している必要がある。
#[derive(Debug, Clone, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    pub sprint_id: SprintId,
    #[serde(default)]
    pub assign_to: Option<UserId>,
    #[serde(default)]
    pub estimation: f64,
}

impl NewTask {
    pub fn new(
        title: impl Into<String>,
        status: impl Into<TaskStatus>,
        sprint_id: SprintId,
        estimation: f64,
    ) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            status: status.into(),
            sprint_id,
            assign_to: None,
            estimation,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_assignee(mut self, user: UserId) -> Self {
        self.assign_to = Some(user);
        self
    }

    /// 保存用のレコードに変換する（created_at / updated_at は `now`）
    pub fn into_task(self, id: TaskId, now: DateTime<Utc>) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            status: self.status,
            sprint_id: self.sprint_id,
            assign_to: self.assign_to,
            estimation: self.estimation,
            created_at: now,
            updated_at: now,
        }
    }
}
