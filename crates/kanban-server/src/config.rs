//! Config - サーバー設定
//!
//! 既定値を `KANBAN_BIND` / `KANBAN_STORE` / `KANBAN_DB_PATH` で上書きする。

use std::net::SocketAddr;
use std::path::PathBuf;

/// StoreKind はサービスの裏に置くストアの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreKind {
    /// プロセス内のマップ（再起動で消える）
    Memory,
    /// `db_path` の SQLite ファイル
    #[default]
    Sqlite,
}

impl StoreKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" => Some(Self::Memory),
            "sqlite" => Some(Self::Sqlite),
            _ => None,
        }
    }
}

/// 既定の bind アドレス
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// 既定の SQLite ファイル
pub const DEFAULT_DB_PATH: &str = "kanban.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub store: StoreKind,
    pub db_path: PathBuf,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: invalid socket address {value:?}")]
    InvalidBind { var: &'static str, value: String },

    #[error("{var}: unknown store {value:?} (expected memory or sqlite)")]
    InvalidStore { var: &'static str, value: String },
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8080)),
            store: StoreKind::default(),
            db_path: PathBuf::from(DEFAULT_DB_PATH),
        }
    }
}

impl ServerConfig {
    /// プロセスの環境変数から読む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 環境変数の代わりに `lookup` から読む（テスト用）
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(val) = lookup("KANBAN_BIND") {
            config.bind = val.parse().map_err(|_| ConfigError::InvalidBind {
                var: "KANBAN_BIND",
                value: val.clone(),
            })?;
        }
        if let Some(val) = lookup("KANBAN_STORE") {
            config.store = StoreKind::parse(&val).ok_or(ConfigError::InvalidStore {
                var: "KANBAN_STORE",
                value: val.clone(),
            })?;
        }
        if let Some(val) = lookup("KANBAN_DB_PATH") {
            config.db_path = PathBuf::from(val);
        }

        Ok(config)
    }
}
