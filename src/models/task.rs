use serde::{Deserialize, Serialize};

use crate::store::Record;

pub type TaskId = i64;

pub const DEFAULT_TAG: &str = "Geral";
pub const DEFAULT_TAG_CLASS: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Todo,
    Doing,
    Paused,
    Done,
}

impl TaskStatus {
    /// Board order, left to right.
    pub const ALL: [TaskStatus; 4] = [Self::Todo, Self::Doing, Self::Paused, Self::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Paused => "paused",
            Self::Done => "done",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "todo" => Some(Self::Todo),
            "doing" => Some(Self::Doing),
            "paused" => Some(Self::Paused),
            "done" => Some(Self::Done),
            _ => None,
        }
    }

    /// Column heading shown on the board.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::Doing => "Doing",
            Self::Paused => "Paused",
            Self::Done => "Done",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub tag_class: Option<String>,
    pub project_id: i64,
}

impl Task {
    /// Decode a `tasks` record. Records with an unknown status or missing
    /// fields yield `None`.
    pub fn from_record(record: &Record) -> Option<Self> {
        serde_json::from_value(serde_json::Value::Object(record.clone())).ok()
    }
}

/// Row shape for inserting a task; the store assigns the id.
#[derive(Debug, Clone, Serialize)]
pub struct NewTask<'a> {
    pub title: &'a str,
    pub status: TaskStatus,
    pub tag: &'a str,
    pub tag_class: &'a str,
    pub project_id: i64,
}

impl<'a> NewTask<'a> {
    pub fn todo(project_id: i64, title: &'a str) -> Self {
        Self {
            title,
            status: TaskStatus::Todo,
            tag: DEFAULT_TAG,
            tag_class: DEFAULT_TAG_CLASS,
            project_id,
        }
    }
}
