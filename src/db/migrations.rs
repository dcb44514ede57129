use rusqlite::Connection;

use crate::error::TaskboardError;

pub fn run_migrations(conn: &Connection) -> Result<(), TaskboardError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS projects (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT,
            status TEXT NOT NULL DEFAULT 'active'
                CHECK (status IN ('pending', 'active', 'paused', 'finished')),
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            project_id INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
            title TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'todo',
            tag TEXT DEFAULT 'Geral',
            tag_class TEXT DEFAULT 'default'
        );

        CREATE TABLE IF NOT EXISTS team_members (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            role TEXT NOT NULL DEFAULT 'Developer',
            is_admin INTEGER NOT NULL DEFAULT 0,
            avatar_url TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_tasks_project ON tasks(project_id, id);
        CREATE INDEX IF NOT EXISTS idx_team_members_email ON team_members(email);
        ",
    )?;
    Ok(())
}
