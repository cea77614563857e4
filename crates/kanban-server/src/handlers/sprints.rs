//! `/sprints` と `/projects/{project_id}/sprints` のハンドラ

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use kanban_core::analytics::SprintAnalytics;
use kanban_core::app::App;
use kanban_core::domain::{NewSprint, ProjectId, Sprint, SprintId, SprintStatus, Task};
use serde::Deserialize;

use super::Data;
use crate::error::ApiResult;

#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: SprintStatus,
}

#[tracing::instrument(skip_all)]
pub async fn create(
    State(app): State<App>,
    body: Result<Json<NewSprint>, JsonRejection>,
) -> ApiResult<Json<Data<Sprint>>> {
    let Json(input) = body?;
    let sprint = app.sprints.create(input).await?;
    Ok(Data::new(sprint))
}

#[tracing::instrument(skip_all)]
pub async fn list(State(app): State<App>) -> ApiResult<Json<Data<Vec<Sprint>>>> {
    Ok(Data::new(app.sprints.list().await?))
}

#[tracing::instrument(skip(app))]
pub async fn get(
    State(app): State<App>,
    Path(id): Path<String>,
) -> ApiResult<Json<Data<Sprint>>> {
    let id: SprintId = id.parse()?;
    Ok(Data::new(app.sprints.get(id).await?))
}

#[tracing::instrument(skip(app))]
pub async fn analytics(
    State(app): State<App>,
    Path(id): Path<String>,
) -> ApiResult<Json<Data<SprintAnalytics>>> {
    let id: SprintId = id.parse()?;
    Ok(Data::new(app.sprints.analytics(id).await?))
}

#[tracing::instrument(skip(app, body))]
pub async fn set_status(
    State(app): State<App>,
    Path(id): Path<String>,
    body: Result<Json<StatusBody>, JsonRejection>,
) -> ApiResult<Json<Data<Sprint>>> {
    let id: SprintId = id.parse()?;
    let Json(StatusBody { status }) = body?;
    Ok(Data::new(app.sprints.set_status(id, status).await?))
}

#[tracing::instrument(skip(app))]
pub async fn tasks(
    State(app): State<App>,
    Path(id): Path<String>,
) -> ApiResult<Json<Data<Vec<Task>>>> {
    let id: SprintId = id.parse()?;
    Ok(Data::new(app.tasks.list_by_sprint(id).await?))
}

#[tracing::instrument(skip(app))]
pub async fn by_project(
    State(app): State<App>,
    Path(project_id): Path<String>,
) -> ApiResult<Json<Data<Vec<Sprint>>>> {
    let project_id: ProjectId = project_id.parse()?;
    Ok(Data::new(app.sprints.list_by_project(project_id).await?))
}
