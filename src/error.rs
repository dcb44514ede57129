use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NotInitialized,
    NoActiveProject,
    ProjectNotFound,
    TaskNotFound,
    MemberNotFound,
    RecordNotFound,
    ValidationError,
    StoreError,
    ConfigError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotInitialized => "NOT_INITIALIZED",
            Self::NoActiveProject => "NO_ACTIVE_PROJECT",
            Self::ProjectNotFound => "PROJECT_NOT_FOUND",
            Self::TaskNotFound => "TASK_NOT_FOUND",
            Self::MemberNotFound => "MEMBER_NOT_FOUND",
            Self::RecordNotFound => "RECORD_NOT_FOUND",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::StoreError => "STORE_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TaskboardError {
    pub code: ErrorCode,
    pub message: String,
}

impl TaskboardError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn not_initialized() -> Self {
        Self::new(
            ErrorCode::NotInitialized,
            "taskboard is not initialized. Run `taskboard init` first.",
        )
    }

    pub fn no_active_project() -> Self {
        Self::new(
            ErrorCode::NoActiveProject,
            "No active project. Use `taskboard project activate <id>` or `--project <id>`.",
        )
    }

    pub fn project_not_found(id: i64) -> Self {
        Self::new(ErrorCode::ProjectNotFound, format!("Project not found: {id}"))
    }

    pub fn task_not_found(id: i64) -> Self {
        Self::new(ErrorCode::TaskNotFound, format!("Task not found: {id}"))
    }

    pub fn member_not_found(id: i64) -> Self {
        Self::new(ErrorCode::MemberNotFound, format!("Team member not found: {id}"))
    }

    pub fn record_not_found(collection: &str, id: i64) -> Self {
        Self::new(
            ErrorCode::RecordNotFound,
            format!("No record {id} in {collection}"),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StoreError, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// True when the store reported that the addressed row does not exist.
    pub fn is_missing_row(&self) -> bool {
        self.code == ErrorCode::RecordNotFound
    }
}

impl From<rusqlite::Error> for TaskboardError {
    fn from(e: rusqlite::Error) -> Self {
        Self::store(e.to_string())
    }
}

impl From<serde_json::Error> for TaskboardError {
    fn from(e: serde_json::Error) -> Self {
        Self::store(format!("Malformed record: {e}"))
    }
}

impl From<std::io::Error> for TaskboardError {
    fn from(e: std::io::Error) -> Self {
        Self::config(e.to_string())
    }
}
