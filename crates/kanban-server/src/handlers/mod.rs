//! Handlers - リソースごとのリクエストハンドラ
//!
//! ハンドラは ID の解析・JSON の読み取り・結果の包装だけを行う。

pub mod sprints;
pub mod tasks;

use serde::Serialize;

/// 成功時の包み: `{"data": ...}`
#[derive(Debug, Serialize)]
pub struct Data<T> {
    pub data: T,
}

impl<T> Data<T> {
    pub fn new(data: T) -> axum::Json<Self> {
        axum::Json(Self { data })
    }
}

/// 本文のない成功応答: `{"message": ...}`
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}

pub async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}
