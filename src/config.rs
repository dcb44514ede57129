use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::db::connection;
use crate::error::TaskboardError;
use crate::models::{Profile, ProjectId};

/// Per-board settings kept in `.taskboard/config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_project_id: Option<ProjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_project_name: Option<String>,
    #[serde(default)]
    pub profile: Profile,
}

impl Config {
    /// Read the config; a missing or unreadable file gives defaults.
    pub fn load() -> Self {
        match connection::config_path() {
            Ok(path) => Self::load_from(&path),
            Err(_) => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(error = %e, path = %path.display(), "ignoring malformed config");
            Self::default()
        })
    }

    pub fn save(&self) -> Result<(), TaskboardError> {
        self.save_to(&connection::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), TaskboardError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| TaskboardError::config(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn set_active_project(&mut self, id: ProjectId, name: &str) {
        self.active_project_id = Some(id);
        self.active_project_name = Some(name.to_string());
    }

    pub fn clear_active_project(&mut self) {
        self.active_project_id = None;
        self.active_project_name = None;
    }
}
