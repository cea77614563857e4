//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! 各 trait は外部システム（リレーショナルストア、時計、ID 採番）への
//! インターフェースを提供し、実装の詳細を隠蔽します。
//!
//! ストアはグローバルな共有ハンドルではなく、`AppBuilder` 経由で
//! 明示的にサービスへ渡します。集計ロジック（`analytics`）はどのポートにも依存しない。

pub mod clock;
pub mod id_generator;
pub mod sprint_store;
pub mod task_store;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::sprint_store::SprintStore;
pub use self::task_store::TaskStore;

/// 1 つの実装で両方のポートを提供するストア
///
/// `AppBuilder::with_store` はこれを受け取り、同じインスタンスを
/// `SprintService` と `TaskService` の両方に配る。
pub trait BoardStore: SprintStore + TaskStore {}

impl<T: SprintStore + TaskStore> BoardStore for T {}
