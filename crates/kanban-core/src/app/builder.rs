//! AppBuilder - アプリケーションの構築とワイヤリング
//!
//! ストア・時計・ID 生成器を明示的に受け取り、同じインスタンスを
//! `SprintService` と `TaskService` に配る。プロセス全体で共有される
//! グローバルなハンドルは持たない。

use std::sync::Arc;

use super::{SprintService, TaskService};
use crate::ports::{BoardStore, Clock, IdGenerator, SprintStore, SystemClock, TaskStore, UlidGenerator};

/// AppBuilder はアプリケーションを構築
///
/// # 使用例
/// ```ignore
/// let app = AppBuilder::new()
///     .with_store(Arc::new(InMemoryBoardStore::new()))
///     .build()?;
/// let sprint = app.sprints.get(id).await?;
/// ```
///
/// # Fail-fast 設計
/// - ストアが未設定なら build() が BuildError を返す
/// - clock / id_generator は省略時に SystemClock / UlidGenerator を使う
pub struct AppBuilder {
    stores: Option<(Arc<dyn SprintStore>, Arc<dyn TaskStore>)>,
    clock: Option<Arc<dyn Clock>>,
    ids: Option<Arc<dyn IdGenerator>>,
}

/// BuildError はアプリケーション構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("No store configured. Call with_store() before build().")]
    MissingStore,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            stores: None,
            clock: None,
            ids: None,
        }
    }

    /// SprintStore と TaskStore を兼ねるストアを設定
    pub fn with_store<S: BoardStore + 'static>(mut self, store: Arc<S>) -> Self {
        let sprints: Arc<dyn SprintStore> = store.clone();
        let tasks: Arc<dyn TaskStore> = store;
        self.stores = Some((sprints, tasks));
        self
    }

    pub fn with_clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    pub fn with_id_generator<G: IdGenerator + 'static>(mut self, ids: G) -> Self {
        self.ids = Some(Arc::new(ids));
        self
    }

    pub fn build(self) -> Result<App, BuildError> {
        let (sprint_store, task_store) = self.stores.ok_or(BuildError::MissingStore)?;
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let ids = self
            .ids
            .unwrap_or_else(|| Arc::new(UlidGenerator::new(SystemClock)));

        Ok(App {
            sprints: SprintService::new(sprint_store.clone(), ids.clone()),
            tasks: TaskService::new(task_store, sprint_store, clock, ids),
        })
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// App は組み立て済みのサービス群
///
/// 中身はすべて `Arc` なので、clone して各リクエストハンドラに渡せる。
#[derive(Clone)]
pub struct App {
    pub sprints: SprintService,
    pub tasks: TaskService,
}
