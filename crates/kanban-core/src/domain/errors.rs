//! Errors - エラー型と分類
//!
//! 集計そのものは失敗しない。エラーになるのは参照解決（NotFound）、
//! サービス層の入力検証、ストアの障害の 3 種類だけ。

use thiserror::Error;

/// BoardError はドメインエラー
#[derive(Debug, Error)]
pub enum BoardError {
    /// ID が保存済みのエンティティに解決できない
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// 必須フィールドの欠落など
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// ストア（SQLite など）の障害
    #[error("storage error: {0}")]
    Storage(String),
}

impl BoardError {
    pub fn sprint_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            entity: "sprint",
            id: id.to_string(),
        }
    }

    pub fn task_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            entity: "task",
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<rusqlite::Error> for BoardError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Storage(e.to_string())
    }
}

impl From<tokio::task::JoinError> for BoardError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Storage(format!("blocking task failed: {e}"))
    }
}

pub type BoardResult<T> = Result<T, BoardError>;
