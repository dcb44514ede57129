use std::sync::Arc;

use crate::models::{NewTask, ProjectId, ProjectStatus, Task, TaskId, TaskStatus};
use crate::repo::{project_repo, task_repo, TaskCounts};
use crate::store::DataStore;

use super::columns::Columns;
use super::derive::derive_status;

pub type StatusCallback = Box<dyn Fn(ProjectStatus) + Send + Sync>;

/// A column and a slot in it, as reported by a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragLocation {
    pub column: TaskStatus,
    pub index: usize,
}

impl DragLocation {
    pub fn new(column: TaskStatus, index: usize) -> Self {
        Self { column, index }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Dropped outside any column, or the drag no longer matches the board.
    Ignored,
    /// Same column; local order only.
    Reordered,
    /// Changed column and status.
    Transferred,
    /// Changed column locally, but the status write failed.
    Unsaved,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BoardOptions {
    /// Re-fetch the board when a status write fails instead of keeping the
    /// optimistic view.
    pub reconcile_on_write_failure: bool,
}

/// Column view of one project's tasks, kept in step with the store.
///
/// Operations never return errors: a failed store call is logged and the
/// board keeps showing what it had.
pub struct BoardController {
    store: Arc<dyn DataStore>,
    project_id: Option<ProjectId>,
    columns: Columns,
    tasks: Vec<Task>,
    options: BoardOptions,
    on_status_change: Option<StatusCallback>,
}

impl BoardController {
    /// `project_id` of `None` means there is no active project; the board
    /// stays empty and every operation does nothing.
    pub fn new(store: Arc<dyn DataStore>, project_id: Option<ProjectId>) -> Self {
        Self {
            store,
            project_id,
            columns: Columns::default(),
            tasks: Vec::new(),
            options: BoardOptions::default(),
            on_status_change: None,
        }
    }

    pub fn with_options(mut self, options: BoardOptions) -> Self {
        self.options = options;
        self
    }

    pub fn on_status_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProjectStatus) + Send + Sync + 'static,
    {
        self.on_status_change = Some(Box::new(callback));
        self
    }

    pub fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    /// Flat task list as last known.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn counts(&self) -> TaskCounts {
        TaskCounts::from_tasks(&self.tasks)
    }

    /// Fetch the project's tasks and rebuild the columns from scratch.
    pub async fn load(&mut self) {
        let Some(project_id) = self.project_id else {
            return;
        };
        match task_repo::list_tasks_by_project(self.store.as_ref(), project_id).await {
            Ok(tasks) => {
                self.columns = Columns::from_tasks(&tasks);
                self.tasks = tasks;
                tracing::debug!(project_id, tasks = self.tasks.len(), "board loaded");
            }
            Err(e) => {
                tracing::warn!(project_id, error = %e, "failed to load tasks, keeping previous board");
            }
        }
    }

    /// Insert a new `todo` task and reload. Blank titles are ignored.
    /// Returns whether a task was created.
    pub async fn create_task(&mut self, title: &str) -> bool {
        let Some(project_id) = self.project_id else {
            return false;
        };
        if title.trim().is_empty() {
            return false;
        }

        let row = NewTask::todo(project_id, title);
        if let Err(e) = task_repo::create_task(self.store.as_ref(), &row).await {
            tracing::warn!(project_id, error = %e, "failed to create task");
            return false;
        }

        // A todo task means the project is at least pending.
        self.publish(ProjectStatus::Pending);
        self.load().await;
        true
    }

    /// Delete a task from the store and the board. Ids the board does not
    /// know about only get the store delete.
    pub async fn delete_task(&mut self, task_id: TaskId) {
        let Some(project_id) = self.project_id else {
            return;
        };

        match task_repo::delete_task(self.store.as_ref(), task_id).await {
            Ok(()) => {}
            Err(e) if e.is_missing_row() => {
                tracing::debug!(task_id, "task already gone from store");
            }
            Err(e) => {
                tracing::warn!(task_id, error = %e, "failed to delete task");
                return;
            }
        }

        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != task_id);
        if self.tasks.len() == before {
            tracing::debug!(project_id, task_id, "deleted task was not on the board");
            return;
        }

        self.sync_project_status().await;
        self.load().await;
    }

    /// Apply a drag-and-drop result.
    ///
    /// Within one column only the local order changes. Across columns the
    /// card moves at once, then the new status is written and the project
    /// status re-derived. A failed write leaves the card where it was
    /// dropped unless reconciliation is enabled, and the move reports
    /// `Unsaved`.
    pub async fn move_task(
        &mut self,
        task_id: TaskId,
        destination: Option<DragLocation>,
        source: DragLocation,
    ) -> MoveOutcome {
        let Some(destination) = destination else {
            return MoveOutcome::Ignored;
        };
        let id = task_id.to_string();
        let source_column = self.columns.get(source.column);
        if source_column.items.get(source.index).map(|item| item.id.as_str()) != Some(id.as_str()) {
            tracing::debug!(task_id, ?source, "drag source does not match board, ignoring");
            return MoveOutcome::Ignored;
        }

        if destination.column == source.column {
            self.columns.reorder(source.column, source.index, destination.index);
            return MoveOutcome::Reordered;
        }

        self.columns
            .transfer(source.column, source.index, destination.column, destination.index);
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) {
            task.status = destination.column;
        }

        let status = destination.column;
        match task_repo::update_task_status(self.store.as_ref(), task_id, status).await {
            Ok(()) => {
                tracing::debug!(task_id, status = status.as_str(), "task moved");
                self.sync_project_status().await;
                MoveOutcome::Transferred
            }
            Err(e) if e.is_missing_row() => {
                tracing::debug!(task_id, "moved task no longer exists in store");
                MoveOutcome::Unsaved
            }
            Err(e) => {
                tracing::warn!(task_id, error = %e, "failed to persist task status");
                if self.options.reconcile_on_write_failure {
                    self.load().await;
                }
                MoveOutcome::Unsaved
            }
        }
    }

    /// Derive the project status from the flat task list, write it to the
    /// project and publish it. Does nothing for an empty list.
    async fn sync_project_status(&mut self) {
        let Some(project_id) = self.project_id else {
            return;
        };
        let Some(status) = derive_status(self.tasks.iter().map(|t| t.status)) else {
            return;
        };

        match project_repo::update_project_status(self.store.as_ref(), project_id, status).await {
            Ok(()) => self.publish(status),
            Err(e) => {
                tracing::warn!(project_id, error = %e, "failed to persist project status");
            }
        }
    }

    fn publish(&self, status: ProjectStatus) {
        if let Some(callback) = &self.on_status_change {
            callback(status);
        }
    }
}
