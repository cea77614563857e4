//! Domain identifiers (strongly-typed IDs).
//!
//! # ULID ベースの ID + Phantom type
//! すべての ID は ULID を内部に持つ `Id<T>` で表現します。
//! `T` は実行時には使わないマーカー型で、`SprintId` と `TaskId` を
//! コンパイル時に区別するためだけに存在します。
//!
//! ## 文字列表現
//! - Display / Serialize: `"{prefix}{ulid}"`（例: `sprint-01HV...`）
//! - FromStr / Deserialize: prefix 付き・prefix なし（素の ULID）の両方を受け付ける
//!
//! HTTP の path パラメータと JSON body で同じ表現を使えるようにするためです。

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use ulid::Ulid;

/// IdMarker は各 ID 型のマーカー trait
///
/// Display で使うプレフィックス（"sprint-", "task-" など）を提供します。
pub trait IdMarker: Send + Sync + 'static {
    /// Display で使うプレフィックス（例: "sprint-"）
    fn prefix() -> &'static str;
}

/// ジェネリック ID 型
///
/// # 例
/// ```ignore
/// let sprint_id: SprintId = Id::from(Ulid::new());
/// let task_id: TaskId = Id::from(Ulid::new());
/// // sprint_id と task_id は異なる型なので、混同できない
/// ```
#[repr(transparent)]
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T: IdMarker> {
    ulid: Ulid,
    _marker: PhantomData<T>,
}

// derive(Clone, Copy) だと `T: Clone` が要求されるので手書き
impl<T: IdMarker> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: IdMarker> Copy for Id<T> {}

impl<T: IdMarker> Id<T> {
    /// ULID から Id を作成
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self {
            ulid,
            _marker: PhantomData,
        }
    }

    /// 内部の ULID を取得
    pub fn as_ulid(&self) -> Ulid {
        self.ulid
    }
}

impl<T: IdMarker> From<Ulid> for Id<T> {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.ulid)
    }
}

/// ID 文字列のパースエラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {prefix}id: {input}")]
pub struct ParseIdError {
    prefix: &'static str,
    input: String,
}

impl<T: IdMarker> FromStr for Id<T> {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix(T::prefix()).unwrap_or(s);
        Ulid::from_string(raw)
            .map(Self::from_ulid)
            .map_err(|_| ParseIdError {
                prefix: T::prefix(),
                input: s.to_string(),
            })
    }
}

impl<T: IdMarker> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T: IdMarker> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ========================================
// マーカー型の定義
// ========================================

/// Project のマーカー型（外部で管理される参照先）
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Project {}

impl IdMarker for Project {
    fn prefix() -> &'static str {
        "project-"
    }
}

/// Sprint のマーカー型
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sprint {}

impl IdMarker for Sprint {
    fn prefix() -> &'static str {
        "sprint-"
    }
}

/// Task のマーカー型
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Task {}

impl IdMarker for Task {
    fn prefix() -> &'static str {
        "task-"
    }
}

/// User のマーカー型（担当者の参照先）
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum User {}

impl IdMarker for User {
    fn prefix() -> &'static str {
        "user-"
    }
}

// ========================================
// Type Alias
// ========================================

/// Identifier of a Project (owner of sprints; managed outside this crate).
pub type ProjectId = Id<Project>;

/// Identifier of a Sprint.
pub type SprintId = Id<Sprint>;

/// Identifier of a Task (belongs to exactly one Sprint).
pub type TaskId = Id<Task>;

/// Identifier of a User (task assignee; managed outside this crate).
pub type UserId = Id<User>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_with_their_prefix() {
        let ulid = Ulid::new();

        assert_eq!(SprintId::from_ulid(ulid).to_string(), format!("sprint-{ulid}"));
        assert_eq!(TaskId::from_ulid(ulid).to_string(), format!("task-{ulid}"));
        assert_eq!(ProjectId::from_ulid(ulid).to_string(), format!("project-{ulid}"));
        assert_eq!(UserId::from_ulid(ulid).to_string(), format!("user-{ulid}"));
    }

    #[test]
    fn parse_accepts_prefixed_and_bare_forms() {
        let ulid = Ulid::new();

        let prefixed: SprintId = format!("sprint-{ulid}").parse().unwrap();
        let bare: SprintId = ulid.to_string().parse().unwrap();

        assert_eq!(prefixed.as_ulid(), ulid);
        assert_eq!(bare, prefixed);
    }

    #[test]
    fn parse_rejects_foreign_prefix() {
        let ulid = Ulid::new();

        // task- は SprintId の prefix ではないので ULID として解釈できない
        let err = format!("task-{ulid}").parse::<SprintId>().unwrap_err();
        assert!(err.to_string().contains("sprint-"));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("42".parse::<TaskId>().is_err());
        assert!("".parse::<TaskId>().is_err());
    }

    #[test]
    fn ids_serialize_as_prefixed_strings() {
        let task_id = TaskId::from_ulid(Ulid::new());

        let json = serde_json::to_value(task_id).unwrap();
        assert_eq!(json, serde_json::Value::String(task_id.to_string()));

        let back: TaskId = serde_json::from_value(json).unwrap();
        assert_eq!(back, task_id);
    }

    #[test]
    fn phantom_data_does_not_consume_memory() {
        use std::mem::size_of;

        assert_eq!(size_of::<SprintId>(), size_of::<Ulid>());
        assert_eq!(size_of::<TaskId>(), size_of::<Ulid>());
    }
}
