use std::sync::Arc;

use anyhow::Context;
use kanban_core::app::{App, AppBuilder};
use kanban_core::impls::{InMemoryBoardStore, SqliteBoardStore};
use kanban_server::config::{ServerConfig, StoreKind};
use tracing_subscriber::EnvFilter;

/// 設定に従ってストアを選び、App を組み立てる
fn build_app(config: &ServerConfig) -> anyhow::Result<App> {
    let builder = match config.store {
        StoreKind::Memory => {
            tracing::warn!("using in-memory store; data is lost on restart");
            AppBuilder::new().with_store(Arc::new(InMemoryBoardStore::new()))
        }
        StoreKind::Sqlite => {
            let store = SqliteBoardStore::open(&config.db_path)
                .with_context(|| format!("open sqlite store at {}", config.db_path.display()))?;
            tracing::info!(path = %config.db_path.display(), "sqlite store ready");
            AppBuilder::new().with_store(Arc::new(store))
        }
    };
    Ok(builder.build()?)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // (A) ログ: RUST_LOG がなければ info + kanban_core は debug
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,kanban_core=debug")),
        )
        .init();

    // (B) 設定とストア
    let config = ServerConfig::from_env()?;
    let app = build_app(&config)?;

    // (C) 待ち受け。Ctrl-C で処理中のリクエストを終えてから止まる
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("bind {}", config.bind))?;
    tracing::info!(addr = %config.bind, store = ?config.store, "listening");

    axum::serve(listener, kanban_server::router(app))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}
