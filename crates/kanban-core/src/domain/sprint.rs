//! Sprint - スプリントのレコードと作成入力

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ProjectId, SprintId};
use super::state::{EstimationType, SprintStatus};
use super::task::Task;
use crate::analytics::aggregate;

/// Sprint はプロジェクト内の期間を区切ったタスクのまとまり
///
/// `total_estimation` / `remaining_estimation` はストアに残ったキャッシュで、
/// 読み出し時には信用しない。[`crate::app::SprintService`] の読み出し経路は
/// すべて先に [`Sprint::refresh_estimations`] を通す。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprint {
    pub id: SprintId,
    pub project_id: ProjectId,
    pub name: String,
    pub goal: String,
    pub estimation_type: EstimationType,
    pub total_estimation: f64,
    pub remaining_estimation: f64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: SprintStatus,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Sprint {
    /// 読み込み済みのタスクから合計値を計算し直して上書きする
    pub fn refresh_estimations(&mut self) {
        self.total_estimation = aggregate::total_estimation(&self.tasks);
        self.remaining_estimation = aggregate::remaining_estimation(&self.tasks);
    }

    /// [`Sprint::refresh_estimations`] の所有権を取る版
    pub fn refreshed(mut self) -> Self {
        self.refresh_estimations();
        self
    }
}

/// NewSprint はスプリント作成の入力
///
/// 2 つの estimation は受け取ったまま保存するが、次の読み出しで上書きされる。
#[derive(Debug, Clone, Deserialize)]
pub struct NewSprint {
    pub name: String,
    pub project_id: ProjectId,
    #[serde(default)]
    pub goal: String,
    pub estimation_type: EstimationType,
    #[serde(default)]
    pub total_estimation: f64,
    #[serde(default)]
    pub remaining_estimation: f64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: SprintStatus,
}

impl NewSprint {
    pub fn new(
        name: impl Into<String>,
        project_id: ProjectId,
        estimation_type: EstimationType,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            project_id,
            goal: String::new(),
            estimation_type,
            total_estimation: 0.0,
            remaining_estimation: 0.0,
            start_date,
            end_date,
            status: SprintStatus::planned(),
        }
    }

    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = goal.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<SprintStatus>) -> Self {
        self.status = status.into();
        self
    }

    /// 保存用のレコードに変換する（タスクはまだ空）
    pub fn into_sprint(self, id: SprintId) -> Sprint {
        Sprint {
            id,
            project_id: self.project_id,
            name: self.name,
            goal: self.goal,
            estimation_type: self.estimation_type,
            total_estimation: self.total_estimation,
            remaining_estimation: self.remaining_estimation,
            start_date: self.start_date,
            end_date: self.end_date,
            status: self.status,
            tasks: Vec::new(),
        }
    }
}
