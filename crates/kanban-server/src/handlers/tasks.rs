//! `/tasks` のハンドラ

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use kanban_core::app::App;
use kanban_core::domain::{NewTask, Task, TaskId, TaskStatus, UserId};
use serde::Deserialize;

use super::{Data, Message};
use crate::error::ApiResult;

#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: TaskStatus,
}

/// `assign_to` が null または省略なら担当者を外す
#[derive(Debug, Deserialize)]
pub struct AssignBody {
    #[serde(default)]
    pub assign_to: Option<UserId>,
}

#[tracing::instrument(skip_all)]
pub async fn create(
    State(app): State<App>,
    body: Result<Json<NewTask>, JsonRejection>,
) -> ApiResult<Json<Data<Task>>> {
    let Json(input) = body?;
    Ok(Data::new(app.tasks.create(input).await?))
}

#[tracing::instrument(skip_all)]
pub async fn list(State(app): State<App>) -> ApiResult<Json<Data<Vec<Task>>>> {
    Ok(Data::new(app.tasks.list().await?))
}

#[tracing::instrument(skip(app))]
pub async fn get(State(app): State<App>, Path(id): Path<String>) -> ApiResult<Json<Data<Task>>> {
    let id: TaskId = id.parse()?;
    Ok(Data::new(app.tasks.get(id).await?))
}

#[tracing::instrument(skip(app, body))]
pub async fn update_status(
    State(app): State<App>,
    Path(id): Path<String>,
    body: Result<Json<StatusBody>, JsonRejection>,
) -> ApiResult<Json<Data<Task>>> {
    let id: TaskId = id.parse()?;
    let Json(StatusBody { status }) = body?;
    Ok(Data::new(app.tasks.update_status(id, status).await?))
}

#[tracing::instrument(skip(app, body))]
pub async fn assign(
    State(app): State<App>,
    Path(id): Path<String>,
    body: Result<Json<AssignBody>, JsonRejection>,
) -> ApiResult<Json<Data<Task>>> {
    let id: TaskId = id.parse()?;
    let Json(AssignBody { assign_to }) = body?;
    Ok(Data::new(app.tasks.assign(id, assign_to).await?))
}

#[tracing::instrument(skip(app))]
pub async fn delete(State(app): State<App>, Path(id): Path<String>) -> ApiResult<Json<Message>> {
    let id: TaskId = id.parse()?;
    app.tasks.delete(id).await?;
    Ok(Json(Message {
        message: "Task deleted successfully",
    }))
}
