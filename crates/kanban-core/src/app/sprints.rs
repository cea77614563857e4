//! SprintService - スプリントの読み出し・作成・status 変更・集計
//!
//! # 不変条件
//! スプリントを返すすべての経路（create / get / list / list_by_project /
//! set_status）は、返す前に `Sprint::refresh_estimations` を通す。
//! ストアに残っている `total_estimation` / `remaining_estimation` は信用しない。

use std::sync::Arc;

use crate::analytics::SprintAnalytics;
use crate::domain::{
    BoardError, BoardResult, NewSprint, ProjectId, Sprint, SprintId, SprintStatus,
};
use crate::ports::{IdGenerator, SprintStore};

#[derive(Clone)]
pub struct SprintService {
    store: Arc<dyn SprintStore>,
    ids: Arc<dyn IdGenerator>,
}

impl SprintService {
    pub fn new(store: Arc<dyn SprintStore>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { store, ids }
    }

    /// スプリントを作成する
    ///
    /// 入力の `total_estimation` / `remaining_estimation` はそのまま保存されるが、
    /// 返り値を含め、以後の読み出しでは常に再計算された値になる。
    pub async fn create(&self, input: NewSprint) -> BoardResult<Sprint> {
        if input.name.trim().is_empty() {
            return Err(BoardError::InvalidInput("name is required".to_string()));
        }
        if input.status.is_blank() {
            return Err(BoardError::InvalidInput("status is required".to_string()));
        }

        let sprint = input.into_sprint(self.ids.generate_sprint_id());
        self.store.insert_sprint(&sprint).await?;
        tracing::info!(sprint_id = %sprint.id, project_id = %sprint.project_id, "sprint created");
        Ok(sprint.refreshed())
    }

    pub async fn get(&self, id: SprintId) -> BoardResult<Sprint> {
        tracing::debug!(sprint_id = %id, "loading sprint");
        self.load(id).await.map(Sprint::refreshed)
    }

    pub async fn list(&self) -> BoardResult<Vec<Sprint>> {
        let sprints = self.store.load_sprints(None).await?;
        tracing::debug!(count = sprints.len(), "listing sprints");
        Ok(sprints.into_iter().map(Sprint::refreshed).collect())
    }

    pub async fn list_by_project(&self, project: ProjectId) -> BoardResult<Vec<Sprint>> {
        let sprints = self.store.load_sprints(Some(project)).await?;
        tracing::debug!(project_id = %project, count = sprints.len(), "listing project sprints");
        Ok(sprints.into_iter().map(Sprint::refreshed).collect())
    }

    /// `GET /sprints/{id}/analytics` の中身
    pub async fn analytics(&self, id: SprintId) -> BoardResult<SprintAnalytics> {
        let sprint = self.load(id).await?;
        tracing::debug!(sprint_id = %id, tasks = sprint.tasks.len(), "assembling analytics");
        Ok(SprintAnalytics::assemble(sprint))
    }

    /// status を無条件に上書きする
    ///
    /// 遷移表は持たない。空文字列以外なら `planned` / `active` / `completed`
    /// 以外の値も受け付ける。
    pub async fn set_status(&self, id: SprintId, status: SprintStatus) -> BoardResult<Sprint> {
        if status.is_blank() {
            return Err(BoardError::InvalidInput("status is required".to_string()));
        }
        if !self.store.save_sprint_status(id, &status).await? {
            return Err(BoardError::sprint_not_found(id));
        }
        tracing::info!(sprint_id = %id, status = %status, "sprint status updated");
        self.get(id).await
    }

    async fn load(&self, id: SprintId) -> BoardResult<Sprint> {
        self.store
            .load_sprint(id)
            .await?
            .ok_or_else(|| BoardError::sprint_not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EstimationType, NewTask, TaskId};
    use crate::impls::InMemoryBoardStore;
    use crate::ports::{SystemClock, TaskStore, UlidGenerator};
    use chrono::{TimeZone, Utc};
    use ulid::Ulid;

    fn service() -> (SprintService, Arc<InMemoryBoardStore>) {
        let store = Arc::new(InMemoryBoardStore::new());
        let svc = SprintService::new(store.clone(), Arc::new(UlidGenerator::new(SystemClock)));
        (svc, store)
    }

    fn new_sprint(project: ProjectId) -> NewSprint {
        let start = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 2, 14, 0, 0, 0).unwrap();
        NewSprint::new("Sprint", project, EstimationType::Hour, start, end)
    }

    async fn add_task(store: &InMemoryBoardStore, sprint: SprintId, status: &str, est: f64) {
        let task = NewTask::new("t", status, sprint, est)
            .into_task(TaskId::from_ulid(Ulid::new()), Utc::now());
        store.insert_task(&task).await.unwrap();
    }

    #[tokio::test]
    async fn create_rejects_blank_name_and_status() {
        let (svc, _) = service();
        let project = ProjectId::from_ulid(Ulid::new());

        let mut input = new_sprint(project);
        input.name = "  ".to_string();
        assert!(matches!(svc.create(input).await, Err(BoardError::InvalidInput(_))));

        let input = new_sprint(project).with_status("");
        assert!(matches!(svc.create(input).await, Err(BoardError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn stored_caches_are_overwritten_on_every_read() {
        let (svc, store) = service();
        let mut input = new_sprint(ProjectId::from_ulid(Ulid::new()));
        input.total_estimation = 500.0;
        input.remaining_estimation = 400.0;

        let created = svc.create(input).await.unwrap();
        assert_eq!(created.total_estimation, 0.0);
        assert_eq!(created.remaining_estimation, 0.0);

        add_task(&store, created.id, "todo", 5.0).await;
        add_task(&store, created.id, "done", 3.0).await;
        add_task(&store, created.id, "in_progress", 2.0).await;

        let got = svc.get(created.id).await.unwrap();
        assert_eq!(got.total_estimation, 10.0);
        assert_eq!(got.remaining_estimation, 7.0);

        let listed = svc.list().await.unwrap();
        assert_eq!(listed[0].total_estimation, 10.0);
        assert_eq!(listed[0].remaining_estimation, 7.0);

        let by_project = svc.list_by_project(created.project_id).await.unwrap();
        assert_eq!(by_project[0].total_estimation, 10.0);
    }

    #[tokio::test]
    async fn list_by_project_only_returns_that_project() {
        let (svc, _) = service();
        let p1 = ProjectId::from_ulid(Ulid::new());
        let p2 = ProjectId::from_ulid(Ulid::new());
        svc.create(new_sprint(p1)).await.unwrap();
        svc.create(new_sprint(p2)).await.unwrap();
        svc.create(new_sprint(p1)).await.unwrap();

        let sprints = svc.list_by_project(p1).await.unwrap();
        assert_eq!(sprints.len(), 2);
        assert!(sprints.iter().all(|s| s.project_id == p1));
        assert_eq!(svc.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn unknown_sprint_is_not_found() {
        let (svc, _) = service();
        let id = SprintId::from_ulid(Ulid::new());

        assert!(svc.get(id).await.unwrap_err().is_not_found());
        assert!(svc.analytics(id).await.unwrap_err().is_not_found());
        assert!(
            svc.set_status(id, SprintStatus::new("active"))
                .await
                .unwrap_err()
                .is_not_found()
        );
    }

    #[tokio::test]
    async fn set_status_accepts_any_non_blank_value() {
        let (svc, store) = service();
        let sprint = svc.create(new_sprint(ProjectId::from_ulid(Ulid::new()))).await.unwrap();
        add_task(&store, sprint.id, "done", 4.0).await;

        let updated = svc.set_status(sprint.id, SprintStatus::ACTIVE.into()).await.unwrap();
        assert_eq!(updated.status.as_str(), SprintStatus::ACTIVE);
        assert_eq!(updated.total_estimation, 4.0);
        assert_eq!(updated.remaining_estimation, 0.0);

        // completed -> planned のような逆戻りも拒否しない
        svc.set_status(sprint.id, SprintStatus::COMPLETED.into()).await.unwrap();
        let back = svc.set_status(sprint.id, SprintStatus::planned()).await.unwrap();
        assert_eq!(back.status.as_str(), "planned");

        let odd = svc.set_status(sprint.id, SprintStatus::new("archived")).await.unwrap();
        assert_eq!(odd.status.as_str(), "archived");

        assert!(matches!(
            svc.set_status(sprint.id, SprintStatus::new("")).await,
            Err(BoardError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn analytics_reflects_current_task_state() {
        let (svc, store) = service();
        let sprint = svc.create(new_sprint(ProjectId::from_ulid(Ulid::new()))).await.unwrap();
        for (status, est) in [("todo", 8.0), ("done", 5.0), ("in_progress", 3.0), ("done", 2.0)] {
            add_task(&store, sprint.id, status, est).await;
        }

        let analytics = svc.analytics(sprint.id).await.unwrap();

        assert_eq!(analytics.sprint_info.id, sprint.id);
        assert_eq!(analytics.estimation_summary.total_estimation, 18.0);
        assert_eq!(analytics.estimation_summary.remaining_estimation, 11.0);
        assert_eq!(analytics.estimation_summary.completed_estimation, 7.0);
        assert!((analytics.estimation_summary.progress_percentage - 38.888_888_888).abs() < 1e-6);
        assert_eq!(analytics.burndown_chart[3].remaining, 11.0);
        assert_eq!(analytics.tasks.len(), 4);
    }
}
