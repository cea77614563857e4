//! Analytics - スプリント集計
//!
//! # 構成
//! - **aggregate**: タスク列からの合計・残り・完了・進捗率・status 内訳（純粋関数）
//! - **burndown**: 固定比率のバーンダウン系列（履歴ではなくシミュレーション）
//! - **report**: 上記をまとめた `SprintAnalytics`
//!
//! どれも I/O を持たず、失敗しない。

pub mod aggregate;
pub mod burndown;
pub mod report;

pub use self::aggregate::{
    EstimationSummary, completed_estimation, progress_percentage, remaining_estimation,
    status_breakdown, total_estimation,
};
pub use self::burndown::{BurndownPoint, simulated_burndown};
pub use self::report::{SprintAnalytics, SprintInfo};
