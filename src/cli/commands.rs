use clap::{Parser, Subcommand};

const VERSION: &str = env!("GIT_VERSION");

#[derive(Parser)]
#[command(
    name = "taskboard",
    version = VERSION,
    about = "Kanban project and task board",
    after_help = "\
NOTE:
  Data lives in <dir>/.taskboard/ (taskboard.db, config.json), found by walking up
  from the current directory. Run `taskboard init` before any other command.

COLUMNS:
  todo, doing, paused, done

PROJECT STATUS:
  Derived from the tasks whenever they change: any `doing` task -> active,
  else any `paused` -> paused, else any `todo` -> pending, else finished.

EXIT CODES:
  0  Success
  1  Error (store, validation, missing project, etc.)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use this project instead of the active one
    #[arg(long, global = true)]
    pub project: Option<i64>,

    /// Log debug output to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize taskboard in this directory
    Init,

    /// Project management
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Show the board of the active project
    Board,

    /// Task management on the active project's board
    #[command(subcommand)]
    Task(TaskCommands),

    /// Team roster
    #[command(subcommand)]
    Team(TeamCommands),

    /// Your profile
    #[command(subcommand)]
    Profile(ProfileCommands),
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Create a new project
    Create {
        /// Project name
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Initial status: pending, active, paused, finished
        #[arg(long, default_value = "active")]
        status: String,
    },
    /// List projects, newest first
    List,
    /// Show project details and task progress
    Show {
        /// Project ID
        id: i64,
    },
    /// Set the active project
    Activate {
        /// Project ID
        id: i64,
    },
    /// Delete a project and its tasks
    Delete {
        /// Project ID
        id: i64,
    },
    /// Count projects per status
    Stats,
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task to the `todo` column
    Add {
        /// Task title
        title: String,
    },
    /// Move a task to a column (drag and drop)
    #[command(after_help = "\
NOTE:
  Moving within the same column only reorders the printed board; order is not stored.
  Moving to another column stores the new status and re-derives the project status.")]
    Move {
        /// Task ID
        id: i64,
        /// Destination column: todo, doing, paused, done
        column: String,
        /// Position in the destination column (default: end)
        #[arg(long)]
        index: Option<usize>,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum TeamCommands {
    /// List team members
    List,
    /// Add a team member
    Add {
        /// Member email
        email: String,
        /// Display name (default: part of the email before @)
        #[arg(long)]
        name: Option<String>,
        #[arg(long, default_value = "Developer")]
        role: String,
        /// Grant admin rights
        #[arg(long)]
        admin: bool,
    },
    /// Remove a team member
    Remove {
        /// Member ID
        id: i64,
    },
    /// Add or refresh yourself on the roster from your profile
    Sync,
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show your profile
    Show,
    /// Update your profile
    Set {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
}
