use std::collections::HashSet;

use serde_json::json;

use crate::board::{DragLocation, MoveOutcome};
use crate::cli::board::BoardSession;
use crate::cli::commands::TaskCommands;
use crate::config::Config;
use crate::error::TaskboardError;
use crate::models::{ProjectStatus, TaskId, TaskStatus};
use crate::output;

pub async fn run(cmd: TaskCommands, json_output: bool, project_flag: Option<i64>) -> i32 {
    let result = match cmd {
        TaskCommands::Add { title } => run_add(&title, json_output, project_flag).await,
        TaskCommands::Move { id, column, index } => {
            run_move(id, &column, index, json_output, project_flag).await
        }
        TaskCommands::Delete { id } => run_delete(id, json_output, project_flag).await,
    };
    match result {
        Ok(code) => code,
        Err(e) => output::report_error(&e, json_output),
    }
}

fn parse_column(s: &str) -> Result<TaskStatus, TaskboardError> {
    TaskStatus::from_str(s).ok_or_else(|| {
        TaskboardError::validation(format!(
            "Invalid column '{s}'. Expected one of: todo, doing, paused, done"
        ))
    })
}

fn status_line(status: Option<ProjectStatus>) {
    if let Some(status) = status {
        println!("Project status: {}", status.label());
    }
}

async fn run_add(title: &str, json_output: bool, project_flag: Option<i64>) -> Result<i32, TaskboardError> {
    if title.trim().is_empty() {
        return Err(TaskboardError::validation("Task title must not be blank"));
    }
    let mut session = BoardSession::open(project_flag).await?;
    let known: HashSet<TaskId> = session.board.tasks().iter().map(|t| t.id).collect();

    if !session.board.create_task(title).await {
        return Err(TaskboardError::store("Failed to create task"));
    }
    let status = session.take_published();
    let task = session
        .board
        .tasks()
        .iter()
        .filter(|t| !known.contains(&t.id))
        .max_by_key(|t| t.id)
        .cloned();

    if json_output {
        output::print_success(json!({
            "task": task.as_ref().map(output::json::task_json),
            "project_status": status.map(|s| s.as_str())
        }));
    } else {
        match &task {
            Some(t) => println!("Added task: {} (#{})", t.title, t.id),
            None => println!("Added task: {title}"),
        }
        status_line(status);
    }
    Ok(0)
}

async fn run_move(
    id: TaskId,
    column: &str,
    index: Option<usize>,
    json_output: bool,
    project_flag: Option<i64>,
) -> Result<i32, TaskboardError> {
    let destination_column = parse_column(column)?;
    let mut session = BoardSession::open(project_flag).await?;

    let (source_column, source_index) = session
        .board
        .columns()
        .locate(&id.to_string())
        .ok_or_else(|| TaskboardError::task_not_found(id))?;
    let index = index.unwrap_or_else(|| session.board.columns().get(destination_column).len());

    let outcome = session
        .board
        .move_task(
            id,
            Some(DragLocation::new(destination_column, index)),
            DragLocation::new(source_column, source_index),
        )
        .await;
    if outcome == MoveOutcome::Unsaved {
        return Err(TaskboardError::store(format!(
            "Failed to move task #{id} to {}",
            destination_column.as_str()
        )));
    }
    let status = session.take_published();
    let initials = Config::load().profile.initials();

    if json_output {
        let outcome = match outcome {
            MoveOutcome::Ignored => "ignored",
            MoveOutcome::Reordered => "reordered",
            MoveOutcome::Transferred => "transferred",
            MoveOutcome::Unsaved => "unsaved",
        };
        let mut data = session.to_json(&initials);
        data["moved"] = json!({
            "id": id,
            "from": source_column.as_str(),
            "to": destination_column.as_str(),
            "outcome": outcome
        });
        data["project_status"] = json!(status.map(|s| s.as_str()));
        output::print_success(data);
    } else {
        match outcome {
            MoveOutcome::Reordered => println!("Reordered task #{id} in {}", source_column.title()),
            MoveOutcome::Transferred => println!(
                "Moved task #{id}: {} -> {}",
                source_column.title(),
                destination_column.title()
            ),
            MoveOutcome::Ignored | MoveOutcome::Unsaved => println!("Task #{id} was not moved"),
        }
        status_line(status);
        session.print(&initials);
    }
    Ok(0)
}

async fn run_delete(id: TaskId, json_output: bool, project_flag: Option<i64>) -> Result<i32, TaskboardError> {
    let mut session = BoardSession::open(project_flag).await?;
    let task = session
        .board
        .tasks()
        .iter()
        .find(|t| t.id == id)
        .cloned()
        .ok_or_else(|| TaskboardError::task_not_found(id))?;

    session.board.delete_task(id).await;
    if session.board.tasks().iter().any(|t| t.id == id) {
        return Err(TaskboardError::store(format!("Failed to delete task #{id}")));
    }
    let status = session.take_published();

    if json_output {
        output::print_success(json!({
            "deleted": { "id": task.id, "title": task.title },
            "project_status": status.map(|s| s.as_str())
        }));
    } else {
        println!("Deleted task: {} (#{})", task.title, task.id);
        status_line(status);
    }
    Ok(0)
}
