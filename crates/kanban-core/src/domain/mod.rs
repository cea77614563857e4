//! Domain model (IDs, records, statuses, errors).
//!
//! - ids: 型付き ID（ProjectId / SprintId / TaskId / UserId）
//! - state: TaskStatus / SprintStatus / EstimationType
//! - task, sprint: ストアに保存されるレコードと作成用入力
//! - errors: BoardError

pub mod errors;
pub mod ids;
pub mod sprint;
pub mod state;
pub mod task;

pub use self::errors::{BoardError, BoardResult};
pub use self::ids::{ParseIdError, ProjectId, SprintId, TaskId, UserId};
pub use self::sprint::{NewSprint, Sprint};
pub use self::state::{EstimationType, SprintStatus, TaskStatus};
pub use self::task::{NewTask, Task};
