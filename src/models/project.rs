use serde::{Deserialize, Serialize};

use crate::store::Record;

pub type ProjectId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Pending,
    Active,
    Paused,
    Finished,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Finished => "finished",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "active" => Some(Self::Active),
            "paused" => Some(Self::Paused),
            "finished" => Some(Self::Finished),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Active => "In Progress",
            Self::Paused => "Paused",
            Self::Finished => "Finished",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: ProjectStatus,
    #[serde(default)]
    pub created_at: String,
}

impl Project {
    pub fn from_record(record: &Record) -> Option<Self> {
        serde_json::from_value(serde_json::Value::Object(record.clone())).ok()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewProject<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub status: ProjectStatus,
    pub created_at: String,
}

/// Projects per status, for the overview chart.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectCounts {
    pub total: usize,
    pub pending: usize,
    pub active: usize,
    pub paused: usize,
    pub finished: usize,
}

impl ProjectCounts {
    pub fn from_projects(projects: &[Project]) -> Self {
        let mut counts = Self::default();
        for p in projects {
            match p.status {
                ProjectStatus::Pending => counts.pending += 1,
                ProjectStatus::Active => counts.active += 1,
                ProjectStatus::Paused => counts.paused += 1,
                ProjectStatus::Finished => counts.finished += 1,
            }
        }
        counts.total = projects.len();
        counts
    }
}
