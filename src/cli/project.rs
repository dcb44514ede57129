use serde_json::json;

use crate::cli::commands::ProjectCommands;
use crate::config::Config;
use crate::db::connection;
use crate::error::TaskboardError;
use crate::models::{ProjectCounts, ProjectStatus};
use crate::output;
use crate::repo::{project_repo, task_repo, TaskCounts};

pub async fn run(cmd: ProjectCommands, json_output: bool) -> i32 {
    let result = match cmd {
        ProjectCommands::Create { name, description, status } => {
            run_create(&name, description.as_deref(), &status, json_output).await
        }
        ProjectCommands::List => run_list(json_output).await,
        ProjectCommands::Show { id } => run_show(id, json_output).await,
        ProjectCommands::Activate { id } => run_activate(id, json_output).await,
        ProjectCommands::Delete { id } => run_delete(id, json_output).await,
        ProjectCommands::Stats => run_stats(json_output).await,
    };
    match result {
        Ok(code) => code,
        Err(e) => output::report_error(&e, json_output),
    }
}

fn parse_status(s: &str) -> Result<ProjectStatus, TaskboardError> {
    ProjectStatus::from_str(s).ok_or_else(|| {
        TaskboardError::validation(format!(
            "Invalid project status '{s}'. Expected one of: pending, active, paused, finished"
        ))
    })
}

async fn run_create(
    name: &str,
    description: Option<&str>,
    status: &str,
    json_output: bool,
) -> Result<i32, TaskboardError> {
    let status = parse_status(status)?;
    let store = connection::open_store()?;
    let project = project_repo::create_project(&store, name, description, status).await?;

    if json_output {
        output::print_success(output::json::project_json(&project));
    } else {
        println!("Created project: {} (#{})", project.name, project.id);
    }
    Ok(0)
}

async fn run_list(json_output: bool) -> Result<i32, TaskboardError> {
    let store = connection::open_store()?;
    let projects = project_repo::list_projects(&store).await?;
    let counts = ProjectCounts::from_projects(&projects);
    let active_id = Config::load().active_project_id;

    if json_output {
        let projects_json: Vec<_> = projects
            .iter()
            .map(|p| {
                let mut v = output::json::project_json(p);
                if Some(p.id) == active_id {
                    v["active"] = json!(true);
                }
                v
            })
            .collect();
        output::print_success(json!({
            "projects": projects_json,
            "counts": output::json::project_counts_json(&counts)
        }));
    } else {
        output::text::print_project_list(&projects, active_id);
        if !projects.is_empty() {
            println!();
            output::text::print_project_counts(&counts);
        }
    }
    Ok(0)
}

async fn run_show(id: i64, json_output: bool) -> Result<i32, TaskboardError> {
    let store = connection::open_store()?;
    let project = project_repo::get_project(&store, id).await?;
    let tasks = task_repo::list_tasks_by_project(&store, id).await?;
    let counts = TaskCounts::from_tasks(&tasks);

    if json_output {
        let tasks_json: Vec<_> = tasks.iter().map(output::json::task_json).collect();
        output::print_success(json!({
            "project": output::json::project_json(&project),
            "tasks": tasks_json,
            "counts": output::json::task_counts_json(&counts)
        }));
    } else {
        output::text::print_project(&project);
        println!();
        if counts.total == 0 {
            println!("No tasks yet.");
        } else {
            output::text::print_task_counts(&counts);
        }
    }
    Ok(0)
}

async fn run_activate(id: i64, json_output: bool) -> Result<i32, TaskboardError> {
    let store = connection::open_store()?;
    let project = project_repo::get_project(&store, id).await?;

    let mut config = Config::load();
    config.set_active_project(project.id, &project.name);
    config.save()?;
    tracing::debug!(project_id = project.id, "active project set");

    if json_output {
        output::print_success(json!({
            "activated": { "id": project.id, "name": project.name }
        }));
    } else {
        println!("Activated project: {} (#{})", project.name, project.id);
    }
    Ok(0)
}

async fn run_delete(id: i64, json_output: bool) -> Result<i32, TaskboardError> {
    let store = connection::open_store()?;
    let project = project_repo::get_project(&store, id).await?;
    project_repo::delete_project(&store, project.id).await?;

    let mut config = Config::load();
    if config.active_project_id == Some(project.id) {
        config.clear_active_project();
        config.save()?;
    }

    if json_output {
        output::print_success(json!({
            "deleted": { "id": project.id, "name": project.name }
        }));
    } else {
        println!("Deleted project: {} (#{})", project.name, project.id);
    }
    Ok(0)
}

async fn run_stats(json_output: bool) -> Result<i32, TaskboardError> {
    let store = connection::open_store()?;
    let projects = project_repo::list_projects(&store).await?;
    let counts = ProjectCounts::from_projects(&projects);

    if json_output {
        output::print_success(output::json::project_counts_json(&counts));
    } else {
        output::text::print_project_counts(&counts);
    }
    Ok(0)
}
