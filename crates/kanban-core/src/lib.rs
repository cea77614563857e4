//! kanban-core
//!
//! Core building blocks for the kanban sprint board backend.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, task, sprint, state, errors）
//! - **analytics**: スプリント集計（aggregate, burndown, report）。I/O なし
//! - **ports**: 抽象化レイヤー（SprintStore, TaskStore, Clock, IdGenerator）
//! - **impls**: 実装（InMemoryBoardStore, SqliteBoardStore）
//! - **app**: アプリケーションロジック（AppBuilder, SprintService, TaskService）

pub mod analytics;
pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;
