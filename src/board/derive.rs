use crate::models::{ProjectStatus, TaskStatus};

/// Aggregate project status over a set of task statuses.
///
/// Work in progress dominates: any `doing` task makes the project active,
/// then `paused`, then `todo`; only a set of nothing but `done` tasks is
/// finished. An empty set has no derived status.
pub fn derive_status<I>(statuses: I) -> Option<ProjectStatus>
where
    I: IntoIterator<Item = TaskStatus>,
{
    let (mut any, mut todo, mut doing, mut paused) = (false, false, false, false);
    for status in statuses {
        any = true;
        match status {
            TaskStatus::Todo => todo = true,
            TaskStatus::Doing => doing = true,
            TaskStatus::Paused => paused = true,
            TaskStatus::Done => {}
        }
    }

    if !any {
        None
    } else if doing {
        Some(ProjectStatus::Active)
    } else if paused {
        Some(ProjectStatus::Paused)
    } else if todo {
        Some(ProjectStatus::Pending)
    } else {
        Some(ProjectStatus::Finished)
    }
}
