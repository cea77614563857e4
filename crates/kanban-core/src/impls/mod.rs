//! Impls - ポートの実装
//!
//! # 含まれる実装
//! - **InMemoryBoardStore**: テスト・開発用のストア
//! - **SqliteBoardStore**: リレーショナルストア（rusqlite）
//!
//! 両者は同じ振る舞い（`contract` のテスト群）を満たす。

pub mod inmem_store;
pub mod sqlite_store;

#[cfg(test)]
pub(crate) mod contract;

pub use self::inmem_store::InMemoryBoardStore;
pub use self::sqlite_store::SqliteBoardStore;
