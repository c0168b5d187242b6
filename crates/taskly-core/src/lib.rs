//! Domain types and the pure task-list pipeline for Taskly.
//!
//! Records mirror the backend's JSON wire format (camelCase field names,
//! numeric identifiers). Everything in this crate is IO-free; fetching and
//! mutating records lives in the store and app crates.

/// CSV export of the task list.
pub mod csv;
/// Identifier types.
pub mod id;
/// Russian display labels and formatting.
pub mod labels;
/// Role capabilities.
pub mod permissions;
/// Task Filter: search, priority and status predicates.
pub mod query;
/// Task Sorter: stable comparator selection.
pub mod sort;
/// Aggregate statistics for the dashboard.
pub mod stats;

use serde::{Deserialize, Serialize};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::id::{TaskId, UserId};

/// Calendar dates travel as `YYYY-MM-DD` strings on the wire.
pub(crate) const ISO_DATE: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Parse a wire due-date string; `None` when it is not a calendar date.
pub(crate) fn parse_due_date(raw: &str) -> Option<Date> {
    Date::parse(raw.trim(), ISO_DATE).ok()
}

/// Task priority. A closed enumeration on the happy path, but values the
/// backend sends that we do not recognize are preserved verbatim instead of
/// being rejected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low priority.
    Low,
    /// Medium priority, the task form's preselected value.
    #[default]
    Medium,
    /// High priority.
    High,
    /// Unrecognized raw value, carried through unchanged.
    #[serde(untagged)]
    Other(String),
}

impl Priority {
    /// Ordering rank used by the priority sort. Unrecognized values rank 0
    /// and therefore sort last under the descending priority key.
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
            Self::Other(_) => 0,
        }
    }

    /// Wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Other(raw) => raw,
        }
    }
}

/// Account role. Unrecognized values are preserved, same as [`Priority`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Administrator: sees and manages everything.
    Admin,
    /// Regular account: sees own assignments only.
    #[default]
    User,
    /// Unrecognized raw value, carried through unchanged.
    #[serde(untagged)]
    Other(String),
}

impl Role {
    /// Whether this role grants administrator capabilities.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::Other(raw) => raw,
        }
    }
}

/// A task record as held by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable identifier.
    pub id: TaskId,
    /// Human-readable title. The backend may omit it; an absent title
    /// behaves as an empty string everywhere instead of failing.
    #[serde(default)]
    pub title: String,
    /// Calendar-date string, absent when the task has no due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Priority, defaulting to medium when the backend omits it.
    #[serde(default)]
    pub priority: Priority,
    /// Assignee. A non-owning reference; the user may be absent from the
    /// currently loaded user set.
    pub assigned_to: UserId,
    /// Completion flag.
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Copy of this task with the completion flag flipped. The optimistic
    /// update sends this to the store and commits it only on success.
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }
}

/// Payload for creating a task; the record store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    /// Title, required before submission.
    #[serde(default)]
    pub title: String,
    /// Calendar-date string, required before submission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Priority, medium by default as in the task form.
    #[serde(default)]
    pub priority: Priority,
    /// Assignee, required before submission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<UserId>,
    /// Completion flag, off by default.
    #[serde(default)]
    pub completed: bool,
}

impl TaskDraft {
    /// The stored record produced once the store assigned `id`. Falls back
    /// to the default assignee id only for drafts that skipped validation.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            title: self.title,
            due_date: self.due_date,
            priority: self.priority,
            assigned_to: self.assigned_to.unwrap_or_default(),
            completed: self.completed,
        }
    }
}

/// A user account as held by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable identifier.
    pub id: UserId,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Login name, unique across the store.
    pub username: String,
    /// Account role.
    #[serde(default)]
    pub role: Role,
    /// Registration timestamp as provided by the backend.
    #[serde(default)]
    pub created_at: String,
}
