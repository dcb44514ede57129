use std::env;
use std::fs;
use std::path::PathBuf;

use rusqlite::Connection;

use crate::error::TaskboardError;

use super::{migrations, SqliteStore};

pub const DATA_DIR: &str = ".taskboard";
const DB_FILE: &str = "taskboard.db";
const CONFIG_FILE: &str = "config.json";

/// Find the nearest directory holding `.taskboard`, walking up from the
/// current directory.
pub fn find_board_root() -> Result<PathBuf, TaskboardError> {
    let mut dir = env::current_dir()?;
    loop {
        if dir.join(DATA_DIR).is_dir() {
            return Ok(dir);
        }
        if !dir.pop() {
            return Err(TaskboardError::not_initialized());
        }
    }
}

/// Get the path to the taskboard database.
pub fn db_path() -> Result<PathBuf, TaskboardError> {
    let root = find_board_root()?;
    Ok(root.join(DATA_DIR).join(DB_FILE))
}

/// Get the config file path.
pub fn config_path() -> Result<PathBuf, TaskboardError> {
    let root = find_board_root()?;
    Ok(root.join(DATA_DIR).join(CONFIG_FILE))
}

/// Open the store. Returns error if not initialized.
pub fn open_store() -> Result<SqliteStore, TaskboardError> {
    let path = db_path()?;
    if !path.exists() {
        return Err(TaskboardError::not_initialized());
    }
    let conn = Connection::open(&path)?;
    configure_connection(&conn)?;
    // Older databases pick up new tables here.
    migrations::run_migrations(&conn)?;
    Ok(SqliteStore::new(conn))
}

/// Initialize in the current directory: create `.taskboard`, the database,
/// and run migrations. Safe to repeat.
pub fn init_db() -> Result<PathBuf, TaskboardError> {
    let dir = env::current_dir()?.join(DATA_DIR);
    fs::create_dir_all(&dir)?;
    let path = dir.join(DB_FILE);
    let conn = Connection::open(&path)?;
    configure_connection(&conn)?;
    migrations::run_migrations(&conn)?;
    Ok(path)
}

pub fn configure_connection(conn: &Connection) -> Result<(), TaskboardError> {
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA busy_timeout=5000;
         PRAGMA foreign_keys=ON;",
    )?;
    Ok(())
}
