use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use crate::board::BoardController;
use crate::cli::resolve_project;
use crate::config::Config;
use crate::db::connection;
use crate::error::TaskboardError;
use crate::models::{Project, ProjectStatus};
use crate::output;
use crate::store::DataStore;

/// A loaded board plus the project it belongs to. Status changes the board
/// publishes are applied to `project`.
pub struct BoardSession {
    pub project: Project,
    pub board: BoardController,
    published: Arc<Mutex<Option<ProjectStatus>>>,
}

impl BoardSession {
    pub async fn open(project_flag: Option<i64>) -> Result<Self, TaskboardError> {
        let store: Arc<dyn DataStore> = Arc::new(connection::open_store()?);
        let project = resolve_project(store.as_ref(), project_flag).await?;

        let published = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&published);
        let mut board = BoardController::new(store, Some(project.id)).on_status_change(move |status| {
            if let Ok(mut slot) = sink.lock() {
                *slot = Some(status);
            }
        });
        board.load().await;

        Ok(Self {
            project,
            board,
            published,
        })
    }

    /// Latest status the board published since opening, also folded into
    /// `project`.
    pub fn take_published(&mut self) -> Option<ProjectStatus> {
        let status = self.published.lock().ok().and_then(|mut slot| slot.take());
        if let Some(status) = status {
            self.project.status = status;
        }
        status
    }

    pub fn to_json(&self, initials: &str) -> Value {
        json!({
            "project": output::json::project_json(&self.project),
            "columns": output::json::columns_json(self.board.columns()),
            "counts": output::json::task_counts_json(&self.board.counts()),
            "initials": initials
        })
    }

    pub fn print(&self, initials: &str) {
        println!("{} [{}]", self.project.name, self.project.status.label());
        output::text::print_task_counts(&self.board.counts());
        output::text::print_board(self.board.columns(), initials);
    }
}

pub async fn run(json_output: bool, project_flag: Option<i64>) -> i32 {
    match run_inner(json_output, project_flag).await {
        Ok(code) => code,
        Err(e) => output::report_error(&e, json_output),
    }
}

async fn run_inner(json_output: bool, project_flag: Option<i64>) -> Result<i32, TaskboardError> {
    let session = BoardSession::open(project_flag).await?;
    let initials = Config::load().profile.initials();

    if json_output {
        output::print_success(session.to_json(&initials));
    } else {
        session.print(&initials);
    }
    Ok(0)
}
