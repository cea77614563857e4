//! State - タスクとスプリントの状態
//!
//! どちらの status も「開いた文字列集合」です。慣習的な値は定数として
//! 提供しますが、それ以外の文字列も拒否せずにそのまま保存します。
//! 集計（`analytics::aggregate`）が特別扱いするのは `done` だけです。

use serde::{Deserialize, Serialize};
use std::fmt;

/// TaskStatus はタスクの状態
///
/// # 慣習的な値
/// - `todo`: 未着手
/// - `in_progress`: 作業中
/// - `done`: 完了（集計で completed に数えられる唯一の値）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskStatus(String);

impl TaskStatus {
    pub const TODO: &'static str = "todo";
    pub const IN_PROGRESS: &'static str = "in_progress";
    pub const DONE: &'static str = "done";

    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn todo() -> Self {
        Self::new(Self::TODO)
    }

    pub fn in_progress() -> Self {
        Self::new(Self::IN_PROGRESS)
    }

    pub fn done() -> Self {
        Self::new(Self::DONE)
    }

    /// 完全一致でのみ判定する（`"Done"` や `" done"` は done ではない）
    pub fn is_done(&self) -> bool {
        self.0 == Self::DONE
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for TaskStatus {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TaskStatus {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// SprintStatus はスプリントの状態
///
/// # 慣習的な値
/// - `planned` → `active` → `completed`
///
/// 遷移表は持たない。`SprintService::set_status` は任意の文字列で上書きする。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SprintStatus(String);

impl SprintStatus {
    pub const PLANNED: &'static str = "planned";
    pub const ACTIVE: &'static str = "active";
    pub const COMPLETED: &'static str = "completed";

    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn planned() -> Self {
        Self::new(Self::PLANNED)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for SprintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for SprintStatus {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for SprintStatus {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// EstimationType は estimation の単位を表すタグ
///
/// 表示用の情報に過ぎず、集計の計算には影響しない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimationType {
    Hour,
    StoryPoint,
}

impl EstimationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::StoryPoint => "story_point",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "hour" => Some(Self::Hour),
            "story_point" => Some(Self::StoryPoint),
            _ => None,
        }
    }
}

impl fmt::Display for EstimationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
