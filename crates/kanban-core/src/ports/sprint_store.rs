//! SprintStore port - スプリントの永続化
//!
//! 読み出し系は常にタスクを一緒に読み込んだ `Sprint` を返します。
//! 返ってくる `total_estimation` / `remaining_estimation` はストアに残っていた
//! キャッシュ値であり、呼び出し側（`SprintService`）が必ず再計算します。

use async_trait::async_trait;

use crate::domain::{BoardResult, ProjectId, Sprint, SprintId, SprintStatus};

/// SprintStore はスプリントの保存先
///
/// # 実装
/// - `InMemoryBoardStore`: テスト・開発用
/// - `SqliteBoardStore`: 永続化用
#[async_trait]
pub trait SprintStore: Send + Sync {
    /// スプリントを保存する（tasks フィールドは無視される）
    async fn insert_sprint(&self, sprint: &Sprint) -> BoardResult<()>;

    /// ID でスプリントをタスク込みで読み込む
    async fn load_sprint(&self, id: SprintId) -> BoardResult<Option<Sprint>>;

    /// 全スプリント（`project` 指定時はそのプロジェクトのみ）を ID 順で読み込む
    async fn load_sprints(&self, project: Option<ProjectId>) -> BoardResult<Vec<Sprint>>;

    /// status を上書きする。見つからなければ `false`
    async fn save_sprint_status(&self, id: SprintId, status: &SprintStatus) -> BoardResult<bool>;
}
