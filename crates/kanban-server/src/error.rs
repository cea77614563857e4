//! HTTP エラー変換
//!
//! 失敗はすべて `{"error": <message>}` の形で返す。status code は
//! `BoardError` の種類から決まる。JSON 本文の読み取り失敗は 400 にそろえる。

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kanban_core::domain::{BoardError, ParseIdError};
use serde::Serialize;

/// エラー応答の本文
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// ApiError はハンドラが返すエラー
///
/// - `Board`: サービス層のエラー
/// - `BadId`: パスの ID が読めない
/// - `BadJson`: リクエスト本文が読めない
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    BadId(#[from] ParseIdError),

    #[error(transparent)]
    BadJson(#[from] JsonRejection),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Board(BoardError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Board(BoardError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            Self::Board(BoardError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadId(_) => StatusCode::BAD_REQUEST,
            // 欠けたフィールド・型違い・壊れた JSON は入力エラー
            Self::BadJson(JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_)) => {
                StatusCode::BAD_REQUEST
            }
            // Content-Type なし (415) などは axum の判定に任せる
            Self::BadJson(rejection) => rejection.status(),
        }
    }

    fn message(&self) -> String {
        match self {
            // "Sprint not found" / "Task not found"
            Self::Board(BoardError::NotFound { entity, .. }) => {
                let mut chars = entity.chars();
                match chars.next() {
                    Some(first) => format!("{}{} not found", first.to_uppercase(), chars.as_str()),
                    None => "not found".to_string(),
                }
            }
            Self::Board(BoardError::InvalidInput(msg)) => msg.clone(),
            Self::BadJson(rejection) => rejection.body_text(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Board(BoardError::Storage(e)) => tracing::error!(error = %e, "storage failure"),
            Self::Board(BoardError::NotFound { entity, id }) => {
                tracing::warn!(entity, id = %id, "not found")
            }
            other => tracing::debug!(error = %other, "rejected request"),
        }
        let body = ErrorBody {
            error: self.message(),
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_uses_capitalized_entity() {
        let err = ApiError::from(BoardError::sprint_not_found("sprint-x"));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Sprint not found");

        let err = ApiError::from(BoardError::task_not_found("task-x"));
        assert_eq!(err.message(), "Task not found");
    }

    #[test]
    fn storage_errors_are_internal() {
        let err = ApiError::from(BoardError::Storage("disk full".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn bad_ids_are_bad_requests() {
        let parse_err = "nope".parse::<kanban_core::domain::SprintId>().unwrap_err();
        let err = ApiError::from(parse_err);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.message().contains("nope"));
    }
}
