//! SqliteBoardStore - リレーショナルストア実装
//!
//! # 実装詳細
//! - 1 本の `rusqlite::Connection` を `Mutex` で守る
//! - 各操作は `spawn_blocking` 上で同期的に実行する（async context で
//!   ブロッキング I/O を走らせないため）
//! - ID は表示形式（`sprint-<ulid>`）の TEXT、時刻は chrono の TEXT 表現で保存
//!
//! 同じ行への同時更新は SQLite の行単位 last-write-wins に任せる。

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::{Connection, OptionalExtension, Row, ToSql, params};

use crate::domain::ids::{Id, IdMarker};
use crate::domain::{
    BoardError, BoardResult, EstimationType, ProjectId, Sprint, SprintId, SprintStatus, Task,
    TaskId, TaskStatus, UserId,
};
use crate::ports::{SprintStore, TaskStore};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS sprints (
        id                   TEXT PRIMARY KEY,
        project_id           TEXT NOT NULL,
        name                 TEXT NOT NULL,
        goal                 TEXT NOT NULL,
        estimation_type      TEXT NOT NULL,
        total_estimation     REAL NOT NULL DEFAULT 0,
        remaining_estimation REAL NOT NULL DEFAULT 0,
        start_date           TEXT NOT NULL,
        end_date             TEXT NOT NULL,
        status               TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS sprints_project_id ON sprints (project_id);

    CREATE TABLE IF NOT EXISTS tasks (
        id          TEXT PRIMARY KEY,
        sprint_id   TEXT NOT NULL REFERENCES sprints (id),
        title       TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        status      TEXT NOT NULL,
        assign_to   TEXT,
        estimation  REAL NOT NULL DEFAULT 0,
        created_at  TEXT NOT NULL,
        updated_at  TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS tasks_sprint_id ON tasks (sprint_id);
";

const SPRINT_COLUMNS: &str = "id, project_id, name, goal, estimation_type, total_estimation, \
     remaining_estimation, start_date, end_date, status";

const TASK_COLUMNS: &str =
    "id, sprint_id, title, description, status, assign_to, estimation, created_at, updated_at";

// ========================================
// 列 <-> ドメイン型の変換
// ========================================

impl<T: IdMarker> ToSql for Id<T> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_string()))
    }
}

impl<T: IdMarker> FromSql for Id<T> {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

impl ToSql for TaskStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TaskStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str().map(TaskStatus::new)
    }
}

impl ToSql for SprintStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for SprintStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str().map(SprintStatus::new)
    }
}

impl ToSql for EstimationType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for EstimationType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        EstimationType::parse(s)
            .ok_or_else(|| FromSqlError::Other(format!("unknown estimation_type: {s}").into()))
    }
}

fn sprint_from_row(row: &Row<'_>) -> rusqlite::Result<Sprint> {
    Ok(Sprint {
        id: row.get(0)?,
        project_id: row.get(1)?,
        name: row.get(2)?,
        goal: row.get(3)?,
        estimation_type: row.get(4)?,
        total_estimation: row.get(5)?,
        remaining_estimation: row.get(6)?,
        start_date: row.get(7)?,
        end_date: row.get(8)?,
        status: row.get(9)?,
        tasks: Vec::new(),
    })
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        sprint_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        status: row.get(4)?,
        assign_to: row.get(5)?,
        estimation: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

fn tasks_of_sprint(conn: &Connection, sprint: SprintId) -> rusqlite::Result<Vec<Task>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks WHERE sprint_id = ?1 ORDER BY id"
    ))?;
    let rows = stmt.query_map(params![sprint], task_from_row)?;
    rows.collect()
}

// ========================================
// SqliteBoardStore
// ========================================

/// SqliteBoardStore は SprintStore と TaskStore の SQLite 実装
///
/// # 使用例
/// ```ignore
/// let store = Arc::new(SqliteBoardStore::open("kanban.db")?);
/// let app = AppBuilder::new().with_store(store).build()?;
/// ```
#[derive(Clone)]
pub struct SqliteBoardStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteBoardStore {
    /// ファイルを開き（なければ作成し）、スキーマを用意する
    pub fn open(path: impl AsRef<Path>) -> BoardResult<Self> {
        Self::with_connection(Connection::open(path)?)
    }

    /// テスト用: プロセス内だけのデータベース
    pub fn open_in_memory() -> BoardResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> BoardResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;
        tracing::debug!("sqlite schema ready");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// `f` を blocking スレッドで実行する
    async fn run<F, R>(&self, f: F) -> BoardResult<R>
    where
        F: FnOnce(&mut Connection) -> rusqlite::Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| BoardError::Storage("sqlite connection mutex poisoned".to_string()))?;
            f(&mut guard).map_err(BoardError::from)
        })
        .await?
    }
}

#[async_trait]
impl SprintStore for SqliteBoardStore {
    async fn insert_sprint(&self, sprint: &Sprint) -> BoardResult<()> {
        let s = sprint.clone();
        self.run(move |conn| {
            conn.execute(
                &format!("INSERT INTO sprints ({SPRINT_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"),
                params![
                    s.id,
                    s.project_id,
                    s.name,
                    s.goal,
                    s.estimation_type,
                    s.total_estimation,
                    s.remaining_estimation,
                    s.start_date,
                    s.end_date,
                    s.status,
                ],
            )?;
            Ok(())
        })
        .await
    }

    async fn load_sprint(&self, id: SprintId) -> BoardResult<Option<Sprint>> {
        self.run(move |conn| {
            let sprint = conn
                .query_row(
                    &format!("SELECT {SPRINT_COLUMNS} FROM sprints WHERE id = ?1"),
                    params![id],
                    sprint_from_row,
                )
                .optional()?;
            match sprint {
                Some(mut sprint) => {
                    sprint.tasks = tasks_of_sprint(conn, id)?;
                    Ok(Some(sprint))
                }
                None => Ok(None),
            }
        })
        .await
    }

    async fn load_sprints(&self, project: Option<ProjectId>) -> BoardResult<Vec<Sprint>> {
        self.run(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SPRINT_COLUMNS} FROM sprints WHERE ?1 IS NULL OR project_id = ?1 ORDER BY id"
            ))?;
            let mut sprints = stmt
                .query_map(params![project], sprint_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            let mut stmt = conn.prepare(&format!(
                "SELECT {TASK_COLUMNS} FROM tasks WHERE sprint_id IN \
                 (SELECT id FROM sprints WHERE ?1 IS NULL OR project_id = ?1) ORDER BY id"
            ))?;
            let mut by_sprint: HashMap<SprintId, Vec<Task>> = HashMap::new();
            for task in stmt.query_map(params![project], task_from_row)? {
                let task = task?;
                by_sprint.entry(task.sprint_id).or_default().push(task);
            }

            for sprint in &mut sprints {
                sprint.tasks = by_sprint.remove(&sprint.id).unwrap_or_default();
            }
            Ok(sprints)
        })
        .await
    }

    async fn save_sprint_status(&self, id: SprintId, status: &SprintStatus) -> BoardResult<bool> {
        let status = status.clone();
        self.run(move |conn| {
            let n = conn.execute(
                "UPDATE sprints SET status = ?1 WHERE id = ?2",
                params![status, id],
            )?;
            Ok(n > 0)
        })
        .await
    }
}

#[async_trait]
impl TaskStore for SqliteBoardStore {
    async fn insert_task(&self, task: &Task) -> BoardResult<()> {
        let t = task.clone();
        self.run(move |conn| {
            conn.execute(
                &format!("INSERT INTO tasks ({TASK_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"),
                params![
                    t.id,
                    t.sprint_id,
                    t.title,
                    t.description,
                    t.status,
                    t.assign_to,
                    t.estimation,
                    t.created_at,
                    t.updated_at,
                ],
            )?;
            Ok(())
        })
        .await
    }

    async fn load_task(&self, id: TaskId) -> BoardResult<Option<Task>> {
        self.run(move |conn| {
            conn.query_row(
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
                params![id],
                task_from_row,
            )
            .optional()
        })
        .await
    }

    async fn load_tasks(&self, sprint: Option<SprintId>) -> BoardResult<Vec<Task>> {
        self.run(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {TASK_COLUMNS} FROM tasks WHERE ?1 IS NULL OR sprint_id = ?1 ORDER BY id"
            ))?;
            let rows = stmt.query_map(params![sprint], task_from_row)?;
            rows.collect()
        })
        .await
    }

    async fn save_task_status(
        &self,
        id: TaskId,
        status: &TaskStatus,
        updated_at: DateTime<Utc>,
    ) -> BoardResult<bool> {
        let status = status.clone();
        self.run(move |conn| {
            let n = conn.execute(
                "UPDATE tasks SET status = ?1, updated_at = ?2 WHERE id = ?3",
                params![status, updated_at, id],
            )?;
            Ok(n > 0)
        })
        .await
    }

    async fn save_task_assignee(
        &self,
        id: TaskId,
        assignee: Option<UserId>,
        updated_at: DateTime<Utc>,
    ) -> BoardResult<bool> {
        self.run(move |conn| {
            let n = conn.execute(
                "UPDATE tasks SET assign_to = ?1, updated_at = ?2 WHERE id = ?3",
                params![assignee, updated_at, id],
            )?;
            Ok(n > 0)
        })
        .await
    }

    async fn remove_task(&self, id: TaskId) -> BoardResult<bool> {
        self.run(move |conn| {
            let n = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
            Ok(n > 0)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::contract;

    fn store() -> SqliteBoardStore {
        SqliteBoardStore::open_in_memory().unwrap()
    }

    #[tokio::test]
    async fn sprint_roundtrip_with_tasks() {
        contract::sprint_roundtrip_with_tasks(&store()).await;
    }

    #[tokio::test]
    async fn sprints_filter_by_project() {
        contract::sprints_filter_by_project(&store()).await;
    }

    #[tokio::test]
    async fn sprint_status_overwrite() {
        contract::sprint_status_overwrite(&store()).await;
    }

    #[tokio::test]
    async fn stale_caches_are_returned_untouched() {
        contract::stale_caches_are_returned_untouched(&store()).await;
    }

    #[tokio::test]
    async fn task_mutations() {
        contract::task_mutations(&store()).await;
    }

    #[tokio::test]
    async fn missing_rows_report_false() {
        contract::missing_rows_report_false(&store()).await;
    }

    #[tokio::test]
    async fn task_for_unknown_sprint_violates_foreign_key() {
        let store = store();
        let task = crate::domain::NewTask::new(
            "orphan",
            "todo",
            SprintId::from_ulid(ulid::Ulid::new()),
            1.0,
        )
        .into_task(TaskId::from_ulid(ulid::Ulid::new()), Utc::now());

        let err = store.insert_task(&task).await.unwrap_err();
        assert!(matches!(err, BoardError::Storage(_)));
    }

    #[tokio::test]
    async fn reopening_a_file_keeps_rows() {
        let dir = std::env::temp_dir().join(format!("kanban-core-{}", ulid::Ulid::new()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("board.db");

        let sprint = crate::domain::NewSprint::new(
            "persisted",
            ProjectId::from_ulid(ulid::Ulid::new()),
            EstimationType::StoryPoint,
            Utc::now(),
            Utc::now(),
        )
        .into_sprint(SprintId::from_ulid(ulid::Ulid::new()));

        SqliteBoardStore::open(&path)
            .unwrap()
            .insert_sprint(&sprint)
            .await
            .unwrap();

        let reopened = SqliteBoardStore::open(&path).unwrap();
        let loaded = reopened.load_sprint(sprint.id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "persisted");
        assert_eq!(loaded.estimation_type, EstimationType::StoryPoint);

        std::fs::remove_dir_all(&dir).ok();
    }
}
