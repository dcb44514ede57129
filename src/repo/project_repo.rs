use chrono::Utc;

use crate::error::TaskboardError;
use crate::models::{NewProject, Project, ProjectId, ProjectStatus};
use crate::store::{patch, to_record, DataStore, Direction, Query, PROJECTS, TASKS};

/// Newest first.
pub async fn list_projects(store: &dyn DataStore) -> Result<Vec<Project>, TaskboardError> {
    let query = Query::new()
        .order_by("created_at", Direction::Desc)
        .order_by("id", Direction::Desc);
    let records = store.query(PROJECTS, &query).await?;
    Ok(records.iter().filter_map(Project::from_record).collect())
}

pub async fn get_project(store: &dyn DataStore, id: ProjectId) -> Result<Project, TaskboardError> {
    let records = store.query(PROJECTS, &Query::new().eq("id", id)).await?;
    records
        .first()
        .and_then(Project::from_record)
        .ok_or_else(|| TaskboardError::project_not_found(id))
}

pub async fn create_project(
    store: &dyn DataStore,
    name: &str,
    description: Option<&str>,
    status: ProjectStatus,
) -> Result<Project, TaskboardError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TaskboardError::validation("Project name must not be blank"));
    }
    let description = description.map(str::trim).filter(|d| !d.is_empty());

    let row = NewProject {
        name,
        description,
        status,
        created_at: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    };
    let record = store.insert(PROJECTS, to_record(&row)?).await?;
    Project::from_record(&record)
        .ok_or_else(|| TaskboardError::store("Store returned a malformed project record"))
}

/// Delete a project together with its tasks.
pub async fn delete_project(store: &dyn DataStore, id: ProjectId) -> Result<(), TaskboardError> {
    let tasks = store.query(TASKS, &Query::new().eq("project_id", id)).await?;
    for task in &tasks {
        let Some(task_id) = task.get("id").and_then(|v| v.as_i64()) else {
            continue;
        };
        match store.delete(TASKS, task_id).await {
            Err(e) if !e.is_missing_row() => return Err(e),
            _ => {}
        }
    }

    store.delete(PROJECTS, id).await.map_err(|e| {
        if e.is_missing_row() {
            TaskboardError::project_not_found(id)
        } else {
            e
        }
    })
}

pub async fn update_project_status(
    store: &dyn DataStore,
    id: ProjectId,
    status: ProjectStatus,
) -> Result<(), TaskboardError> {
    store.update(PROJECTS, id, patch("status", status.as_str())).await
}
