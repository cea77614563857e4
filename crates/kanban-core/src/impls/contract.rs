//! ストア実装が共通で満たすべき振る舞い
//!
//! `InMemoryBoardStore` と `SqliteBoardStore` の両方のテストから呼ばれる。

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Duration, TimeZone, Utc};
use ulid::Ulid;

use crate::domain::{
    EstimationType, NewSprint, NewTask, ProjectId, Sprint, SprintId, SprintStatus, Task, TaskId,
    TaskStatus, UserId,
};
use crate::ports::BoardStore;

/// 生成順に並ぶ ULID（`Ulid::new()` は同一ミリ秒内の順序を保証しない）
fn next_ulid() -> Ulid {
    static SEQ: AtomicU64 = AtomicU64::new(1_700_000_000_000);
    Ulid::from_parts(SEQ.fetch_add(1, Ordering::Relaxed), 0)
}

fn sprint_in(project: ProjectId, name: &str) -> Sprint {
    let start = Utc.with_ymd_and_hms(2024, 5, 6, 9, 0, 0).unwrap();
    NewSprint::new(name, project, EstimationType::Hour, start, start + Duration::days(14))
        .with_goal("goal")
        .into_sprint(SprintId::from_ulid(next_ulid()))
}

fn task_in(sprint: SprintId, status: &str, estimation: f64) -> Task {
    let now = Utc.with_ymd_and_hms(2024, 5, 6, 10, 0, 0).unwrap();
    NewTask::new(format!("{status}-{estimation}"), status, sprint, estimation)
        .into_task(TaskId::from_ulid(next_ulid()), now)
}

pub(crate) async fn sprint_roundtrip_with_tasks<S: BoardStore>(store: &S) {
    let sprint = sprint_in(ProjectId::from_ulid(Ulid::new()), "S1");
    store.insert_sprint(&sprint).await.unwrap();

    let t1 = task_in(sprint.id, "todo", 5.0);
    let t2 = task_in(sprint.id, "done", 3.0);
    store.insert_task(&t1).await.unwrap();
    store.insert_task(&t2).await.unwrap();

    // 別スプリントのタスクは混ざらない
    let other = sprint_in(sprint.project_id, "S2");
    store.insert_sprint(&other).await.unwrap();
    store.insert_task(&task_in(other.id, "todo", 100.0)).await.unwrap();

    let loaded = store.load_sprint(sprint.id).await.unwrap().unwrap();
    assert_eq!(loaded.id, sprint.id);
    assert_eq!(loaded.name, "S1");
    assert_eq!(loaded.goal, "goal");
    assert_eq!(loaded.estimation_type, EstimationType::Hour);
    assert_eq!(loaded.start_date, sprint.start_date);
    assert_eq!(loaded.end_date, sprint.end_date);
    assert_eq!(loaded.tasks, vec![t1, t2]);

    assert!(store.load_sprint(SprintId::from_ulid(Ulid::new())).await.unwrap().is_none());
}

pub(crate) async fn sprints_filter_by_project<S: BoardStore>(store: &S) {
    let p1 = ProjectId::from_ulid(Ulid::new());
    let p2 = ProjectId::from_ulid(Ulid::new());
    let a = sprint_in(p1, "a");
    let b = sprint_in(p2, "b");
    let c = sprint_in(p1, "c");
    for s in [&a, &b, &c] {
        store.insert_sprint(s).await.unwrap();
    }
    store.insert_task(&task_in(c.id, "todo", 1.0)).await.unwrap();

    let all = store.load_sprints(None).await.unwrap();
    assert_eq!(all.len(), 3);

    let of_p1 = store.load_sprints(Some(p1)).await.unwrap();
    let names: Vec<&str> = of_p1.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["a", "c"]);
    assert_eq!(of_p1[1].tasks.len(), 1);

    let none = store
        .load_sprints(Some(ProjectId::from_ulid(Ulid::new())))
        .await
        .unwrap();
    assert!(none.is_empty());
}

pub(crate) async fn sprint_status_overwrite<S: BoardStore>(store: &S) {
    let sprint = sprint_in(ProjectId::from_ulid(Ulid::new()), "S");
    store.insert_sprint(&sprint).await.unwrap();

    let found = store
        .save_sprint_status(sprint.id, &SprintStatus::new("whatever"))
        .await
        .unwrap();
    assert!(found);

    let loaded = store.load_sprint(sprint.id).await.unwrap().unwrap();
    assert_eq!(loaded.status.as_str(), "whatever");
}

pub(crate) async fn stale_caches_are_returned_untouched<S: BoardStore>(store: &S) {
    let mut sprint = sprint_in(ProjectId::from_ulid(Ulid::new()), "S");
    sprint.total_estimation = 42.0;
    sprint.remaining_estimation = 41.0;
    store.insert_sprint(&sprint).await.unwrap();

    // ストアは再計算しない（サービス層の責務）
    let loaded = store.load_sprint(sprint.id).await.unwrap().unwrap();
    assert_eq!(loaded.total_estimation, 42.0);
    assert_eq!(loaded.remaining_estimation, 41.0);
}

pub(crate) async fn task_mutations<S: BoardStore>(store: &S) {
    let sprint = sprint_in(ProjectId::from_ulid(Ulid::new()), "S");
    store.insert_sprint(&sprint).await.unwrap();
    let task = task_in(sprint.id, "todo", 2.0);
    store.insert_task(&task).await.unwrap();

    let later = task.created_at + Duration::hours(1);
    assert!(store.save_task_status(task.id, &TaskStatus::done(), later).await.unwrap());

    let user = UserId::from_ulid(Ulid::new());
    assert!(store.save_task_assignee(task.id, Some(user), later).await.unwrap());

    let loaded = store.load_task(task.id).await.unwrap().unwrap();
    assert!(loaded.status.is_done());
    assert_eq!(loaded.assign_to, Some(user));
    assert_eq!(loaded.updated_at, later);
    assert_eq!(loaded.created_at, task.created_at);
    assert_eq!(loaded.estimation, 2.0);

    assert!(store.save_task_assignee(task.id, None, later).await.unwrap());
    assert_eq!(store.load_task(task.id).await.unwrap().unwrap().assign_to, None);

    assert_eq!(store.load_tasks(Some(sprint.id)).await.unwrap().len(), 1);
    assert!(store.remove_task(task.id).await.unwrap());
    assert!(store.load_task(task.id).await.unwrap().is_none());
    assert!(store.load_tasks(None).await.unwrap().is_empty());
}

pub(crate) async fn missing_rows_report_false<S: BoardStore>(store: &S) {
    let now = Utc::now();
    let task_id = TaskId::from_ulid(Ulid::new());

    assert!(!store
        .save_sprint_status(SprintId::from_ulid(Ulid::new()), &SprintStatus::planned())
        .await
        .unwrap());
    assert!(!store.save_task_status(task_id, &TaskStatus::todo(), now).await.unwrap());
    assert!(!store.save_task_assignee(task_id, None, now).await.unwrap());
    assert!(!store.remove_task(task_id).await.unwrap());
    assert!(store.load_task(task_id).await.unwrap().is_none());
}
