//! App - アプリケーション層
//!
//! このモジュールは、ports を組み合わせてユースケースを実装します。
//!
//! # 主要コンポーネント
//! - **AppBuilder**: ストア・時計・ID 生成器のワイヤリング
//! - **SprintService**: スプリントの作成・読み出し・status 変更・集計
//! - **TaskService**: タスクの作成・参照・更新・削除

pub mod builder;
pub mod sprints;
pub mod tasks;

pub use self::builder::{App, AppBuilder, BuildError};
pub use self::sprints::SprintService;
pub use self::tasks::TaskService;
