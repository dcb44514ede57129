use serde::Serialize;

use crate::error::TaskboardError;
use crate::models::{NewTask, Task, TaskId, TaskStatus};
use crate::store::{patch, to_record, DataStore, Direction, Query, TASKS};

/// All decodable tasks of a project, ordered by id ascending. Records that
/// fail to decode are skipped.
pub async fn list_tasks_by_project(
    store: &dyn DataStore,
    project_id: i64,
) -> Result<Vec<Task>, TaskboardError> {
    let query = Query::new()
        .eq("project_id", project_id)
        .order_by("id", Direction::Asc);
    let records = store.query(TASKS, &query).await?;
    let total = records.len();
    let tasks: Vec<Task> = records.iter().filter_map(Task::from_record).collect();
    if tasks.len() < total {
        tracing::debug!(
            project_id,
            dropped = total - tasks.len(),
            "skipped task records with unknown status"
        );
    }
    Ok(tasks)
}

pub async fn create_task(store: &dyn DataStore, task: &NewTask<'_>) -> Result<Option<Task>, TaskboardError> {
    let record = store.insert(TASKS, to_record(task)?).await?;
    Ok(Task::from_record(&record))
}

pub async fn update_task_status(
    store: &dyn DataStore,
    id: TaskId,
    status: TaskStatus,
) -> Result<(), TaskboardError> {
    store.update(TASKS, id, patch("status", status.as_str())).await
}

pub async fn delete_task(store: &dyn DataStore, id: TaskId) -> Result<(), TaskboardError> {
    store.delete(TASKS, id).await
}

/// Task status counts, for the progress chart.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct TaskCounts {
    pub total: usize,
    pub todo: usize,
    pub doing: usize,
    pub paused: usize,
    pub done: usize,
    pub percentage: f64,
}

impl TaskCounts {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut counts = Self::default();
        for t in tasks {
            match t.status {
                TaskStatus::Todo => counts.todo += 1,
                TaskStatus::Doing => counts.doing += 1,
                TaskStatus::Paused => counts.paused += 1,
                TaskStatus::Done => counts.done += 1,
            }
        }
        counts.total = counts.todo + counts.doing + counts.paused + counts.done;
        counts.percentage = if counts.total > 0 {
            (counts.done as f64 / counts.total as f64) * 100.0
        } else {
            0.0
        };
        counts
    }

    pub fn get(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Todo => self.todo,
            TaskStatus::Doing => self.doing,
            TaskStatus::Paused => self.paused,
            TaskStatus::Done => self.done,
        }
    }
}
