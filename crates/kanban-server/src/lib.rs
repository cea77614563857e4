//! kanban-server
//!
//! HTTP server for the kanban board.
//!
//! # モジュール構成
//! - **config**: 環境変数（`KANBAN_*`）からの設定
//! - **error**: `ApiError` と `{"error": ...}` への変換
//! - **handlers**: `/sprints` / `/tasks` / `/health` のハンドラ
//!
//! ドメインロジックはすべて `kanban-core` 側にある。

pub mod config;
pub mod error;
pub mod handlers;

use axum::Router;
use axum::routing::{get, put};
use kanban_core::app::App;

/// すべてのルートを `app` に結びつけた Router を作る
pub fn router(app: App) -> Router {
    use handlers::{sprints, tasks};

    Router::new()
        .route("/health", get(handlers::health))
        .route("/sprints", get(sprints::list).post(sprints::create))
        .route("/sprints/{id}", get(sprints::get))
        .route("/sprints/{id}/analytics", get(sprints::analytics))
        .route("/sprints/{id}/status", put(sprints::set_status))
        .route("/sprints/{id}/tasks", get(sprints::tasks))
        .route("/projects/{project_id}/sprints", get(sprints::by_project))
        .route("/tasks", get(tasks::list).post(tasks::create))
        .route(
            "/tasks/{id}",
            get(tasks::get).put(tasks::update_status).delete(tasks::delete),
        )
        .route("/tasks/{id}/assign", put(tasks::assign))
        .with_state(app)
}
