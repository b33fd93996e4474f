//! Target-schema types produced by every import source

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Issue priority on the tracker's numeric scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum Priority {
    #[default]
    NoPriority = 0,
    Urgent = 1,
    High = 2,
    Normal = 3,
    Low = 4,
}

impl Priority {
    /// Map a source priority code to a priority level.
    ///
    /// Exact string match only; any unrecognized or absent code reads as
    /// no priority.
    pub fn from_code(code: &str) -> Self {
        match code {
            "1" => Priority::Urgent,
            "2" => Priority::High,
            "3" => Priority::Normal,
            "4" => Priority::Low,
            _ => Priority::NoPriority,
        }
    }

    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(Priority::NoPriority),
            1 => Some(Priority::Urgent),
            2 => Some(Priority::High),
            3 => Some(Priority::Normal),
            4 => Some(Priority::Low),
            _ => None,
        }
    }

    pub fn level(&self) -> u8 {
        *self as u8
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::NoPriority => write!(f, "no priority"),
            Priority::Urgent => write!(f, "urgent"),
            Priority::High => write!(f, "high"),
            Priority::Normal => write!(f, "normal"),
            Priority::Low => write!(f, "low"),
        }
    }
}

// Wire form is the bare number 0..4, matching the target schema.
impl Serialize for Priority {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.level())
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let level = u8::deserialize(deserializer)?;
        Priority::from_level(level)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid priority level: {}", level)))
    }
}

/// A unit of trackable work in the target system
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Short title (always non-empty; rows without one are skipped)
    pub title: String,

    /// Rich-text body, possibly empty
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub priority: Priority,

    /// Source workflow status, passed through verbatim
    #[serde(default)]
    pub status: String,

    /// Primary assignee name; empty when unassigned
    #[serde(default)]
    pub assignee_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    /// Unitless size on the tracker's 0-64 scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate: Option<u8>,

    /// Names of labels attached to this issue
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

/// A named tag attachable to multiple issues
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
}

/// A person referenced by issues, keyed by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
}

/// A workflow state in the target system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStatus {
    pub name: String,
}

/// Aggregate produced by one import run.
///
/// The maps are keyed by entity name; sorted keys keep the serialized form
/// deterministic across runs over identical input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportResult {
    pub issues: Vec<Issue>,
    pub labels: BTreeMap<String, Label>,
    pub users: BTreeMap<String, User>,
    pub statuses: BTreeMap<String, WorkflowStatus>,
}
