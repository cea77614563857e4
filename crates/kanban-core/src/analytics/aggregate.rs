//! Aggregate - スプリントのタスク列に対する純粋関数
//!
//! I/O もエラーもない。estimation は負の値も含めてそのまま足し込む
//! （値の検証はタスクを作る側の責務）。
//!
//! 3 つの合計はそれぞれ独立に足すので、`total == remaining + completed` は
//! 浮動小数点の加算順の誤差の範囲でだけ成り立つ。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Task, TaskStatus};

/// 全タスクの `estimation` の合計
pub fn total_estimation(tasks: &[Task]) -> f64 {
    tasks.iter().map(|t| t.estimation).sum()
}

/// status が `done` 以外のタスクの `estimation` の合計
pub fn remaining_estimation(tasks: &[Task]) -> f64 {
    tasks
        .iter()
        .filter(|t| !t.status.is_done())
        .map(|t| t.estimation)
        .sum()
}

/// status が `done` のタスクの `estimation` の合計
pub fn completed_estimation(tasks: &[Task]) -> f64 {
    tasks
        .iter()
        .filter(|t| t.status.is_done())
        .map(|t| t.estimation)
        .sum()
}

/// `completed / total * 100`。total が 0 なら `0.0`（NaN にしない）
pub fn progress_percentage(tasks: &[Task]) -> f64 {
    let total = total_estimation(tasks);
    if total == 0.0 {
        return 0.0;
    }
    completed_estimation(tasks) / total * 100.0
}

/// status ごとのタスク数
///
/// `todo` / `in_progress` / `done` は 0 件でもキーを持つ。
/// それ以外の status は拒否せず、その文字列のキーで数える。
pub fn status_breakdown(tasks: &[Task]) -> BTreeMap<String, usize> {
    let mut breakdown: BTreeMap<String, usize> = [
        TaskStatus::TODO,
        TaskStatus::IN_PROGRESS,
        TaskStatus::DONE,
    ]
    .into_iter()
    .map(|s| (s.to_string(), 0))
    .collect();

    for task in tasks {
        *breakdown.entry(task.status.as_str().to_string()).or_insert(0) += 1;
    }
    breakdown
}

/// EstimationSummary は `estimation_summary` として返す 4 つの値
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimationSummary {
    pub total_estimation: f64,
    pub remaining_estimation: f64,
    pub completed_estimation: f64,
    pub progress_percentage: f64,
}

impl EstimationSummary {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        Self {
            total_estimation: total_estimation(tasks),
            remaining_estimation: remaining_estimation(tasks),
            completed_estimation: completed_estimation(tasks),
            progress_percentage: progress_percentage(tasks),
        }
    }
}
