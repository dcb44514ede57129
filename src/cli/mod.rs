pub mod commands;
pub mod init;
pub mod project;
pub mod board;
pub mod task;
pub mod team;
pub mod profile;

pub use commands::*;

use crate::config::Config;
use crate::error::{ErrorCode, TaskboardError};
use crate::models::Project;
use crate::repo::project_repo;
use crate::store::DataStore;

/// The project a board command works on: `--project` if given, otherwise
/// the active one. An active project that no longer exists is cleared.
pub async fn resolve_project(
    store: &dyn DataStore,
    project_flag: Option<i64>,
) -> Result<Project, TaskboardError> {
    if let Some(id) = project_flag {
        return project_repo::get_project(store, id).await;
    }

    let mut config = Config::load();
    let id = config
        .active_project_id
        .ok_or_else(TaskboardError::no_active_project)?;
    match project_repo::get_project(store, id).await {
        Err(e) if e.code == ErrorCode::ProjectNotFound => {
            tracing::info!(project_id = id, "active project no longer exists, clearing it");
            config.clear_active_project();
            config.save()?;
            Err(TaskboardError::new(
                ErrorCode::NoActiveProject,
                format!("Active project #{id} no longer exists. Pick another with `taskboard project activate <id>`."),
            ))
        }
        other => other,
    }
}
