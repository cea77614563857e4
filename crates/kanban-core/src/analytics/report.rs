//! Report - `GET /sprints/{id}/analytics` の中身を組み立てる
//!
//! aggregate の結果とバーンダウン系列を 1 つにまとめる。ここでは失敗しない。
//! sprint id の解決（と NotFound）は [`crate::app::SprintService::analytics`] 側。

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::aggregate::{EstimationSummary, status_breakdown};
use super::burndown::{BurndownPoint, simulated_burndown};
use crate::domain::{EstimationType, Sprint, SprintId, SprintStatus, Task};

/// SprintInfo はスプリントの識別情報（キャッシュされた合計値は含めない）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SprintInfo {
    pub id: SprintId,
    pub name: String,
    pub goal: String,
    pub estimation_type: EstimationType,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: SprintStatus,
}

impl From<&Sprint> for SprintInfo {
    fn from(sprint: &Sprint) -> Self {
        Self {
            id: sprint.id,
            name: sprint.name.clone(),
            goal: sprint.goal.clone(),
            estimation_type: sprint.estimation_type,
            start_date: sprint.start_date,
            end_date: sprint.end_date,
            status: sprint.status.clone(),
        }
    }
}

/// SprintAnalytics は 1 スプリント分の集計結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SprintAnalytics {
    pub sprint_info: SprintInfo,
    pub estimation_summary: EstimationSummary,
    pub task_breakdown: BTreeMap<String, usize>,
    pub burndown_chart: Vec<BurndownPoint>,
    pub tasks: Vec<Task>,
}

impl SprintAnalytics {
    /// タスク読み込み済みのスプリントから組み立てる
    pub fn assemble(sprint: Sprint) -> Self {
        let estimation_summary = EstimationSummary::from_tasks(&sprint.tasks);
        let task_breakdown = status_breakdown(&sprint.tasks);
        let burndown_chart = simulated_burndown(
            estimation_summary.total_estimation,
            estimation_summary.remaining_estimation,
        );

        Self {
            sprint_info: SprintInfo::from(&sprint),
            estimation_summary,
            task_breakdown,
            burndown_chart,
            tasks: sprint.tasks,
        }
    }
}
