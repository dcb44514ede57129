use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use rusqlite::types::Value as SqlValue;
use rusqlite::{params, params_from_iter, Connection, Row};
use serde_json::{Number, Value};

use crate::error::TaskboardError;
use crate::store::{DataStore, Direction, Query, Record, PROJECTS, TASKS, TEAM_MEMBERS};

use super::{connection, migrations};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Integer,
    Text,
    Bool,
}

struct Table {
    name: &'static str,
    columns: &'static [(&'static str, Kind)],
}

const TABLES: &[Table] = &[
    Table {
        name: TASKS,
        columns: &[
            ("id", Kind::Integer),
            ("title", Kind::Text),
            ("status", Kind::Text),
            ("tag", Kind::Text),
            ("tag_class", Kind::Text),
            ("project_id", Kind::Integer),
        ],
    },
    Table {
        name: PROJECTS,
        columns: &[
            ("id", Kind::Integer),
            ("name", Kind::Text),
            ("description", Kind::Text),
            ("status", Kind::Text),
            ("created_at", Kind::Text),
        ],
    },
    Table {
        name: TEAM_MEMBERS,
        columns: &[
            ("id", Kind::Integer),
            ("name", Kind::Text),
            ("email", Kind::Text),
            ("role", Kind::Text),
            ("is_admin", Kind::Bool),
            ("avatar_url", Kind::Text),
        ],
    },
];

impl Table {
    fn lookup(collection: &str) -> Result<&'static Table, TaskboardError> {
        TABLES
            .iter()
            .find(|t| t.name == collection)
            .ok_or_else(|| TaskboardError::validation(format!("Unknown collection: {collection}")))
    }

    /// Only known column names ever reach the SQL text.
    fn column(&self, field: &str) -> Result<&'static str, TaskboardError> {
        self.columns
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(name, _)| *name)
            .ok_or_else(|| {
                TaskboardError::validation(format!("Unknown field '{field}' in {}", self.name))
            })
    }

    fn select_list(&self) -> String {
        self.columns
            .iter()
            .map(|(name, _)| *name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// `DataStore` over a local SQLite database.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Fresh migrated database in memory.
    pub fn open_in_memory() -> Result<Self, TaskboardError> {
        let conn = Connection::open_in_memory()?;
        connection::configure_connection(&conn)?;
        migrations::run_migrations(&conn)?;
        Ok(Self::new(conn))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, TaskboardError> {
        self.conn
            .lock()
            .map_err(|_| TaskboardError::store("connection lock poisoned"))
    }
}

fn to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => SqlValue::Real(n.as_f64().unwrap_or(0.0)),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        other => SqlValue::Text(other.to_string()),
    }
}

fn row_to_record(row: &Row, table: &Table) -> rusqlite::Result<Record> {
    let mut record = Record::new();
    for (i, (name, kind)) in table.columns.iter().enumerate() {
        let value = match (row.get::<_, SqlValue>(i)?, kind) {
            (SqlValue::Null, _) => Value::Null,
            (SqlValue::Integer(n), Kind::Bool) => Value::Bool(n != 0),
            (SqlValue::Integer(n), _) => Value::from(n),
            (SqlValue::Real(f), _) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
            (SqlValue::Text(s), _) => Value::String(s),
            (SqlValue::Blob(_), _) => Value::Null,
        };
        record.insert((*name).to_string(), value);
    }
    Ok(record)
}

fn fetch_by_id(conn: &Connection, table: &Table, id: i64) -> Result<Record, TaskboardError> {
    let sql = format!("SELECT {} FROM {} WHERE id = ?1", table.select_list(), table.name);
    conn.query_row(&sql, params![id], |row| row_to_record(row, table))
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => TaskboardError::record_not_found(table.name, id),
            _ => TaskboardError::from(e),
        })
}

#[async_trait]
impl DataStore for SqliteStore {
    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Record>, TaskboardError> {
        let table = Table::lookup(collection)?;
        let mut sql = format!("SELECT {} FROM {}", table.select_list(), table.name);
        let mut values = Vec::with_capacity(query.filters.len());

        if !query.filters.is_empty() {
            let mut clauses = Vec::with_capacity(query.filters.len());
            for (i, f) in query.filters.iter().enumerate() {
                clauses.push(format!("{} = ?{}", table.column(&f.field)?, i + 1));
                values.push(to_sql(&f.value));
            }
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }

        if !query.order.is_empty() {
            let mut keys = Vec::with_capacity(query.order.len());
            for o in &query.order {
                let dir = match o.direction {
                    Direction::Asc => "ASC",
                    Direction::Desc => "DESC",
                };
                keys.push(format!("{} {dir}", table.column(&o.field)?));
            }
            sql.push_str(" ORDER BY ");
            sql.push_str(&keys.join(", "));
        }

        let conn = self.lock()?;
        let mut stmt = conn.prepare(&sql)?;
        let records = stmt
            .query_map(params_from_iter(values.iter()), |row| row_to_record(row, table))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    async fn insert(&self, collection: &str, record: Record) -> Result<Record, TaskboardError> {
        let table = Table::lookup(collection)?;
        let mut columns = Vec::new();
        let mut values = Vec::new();
        for (field, value) in record.iter().filter(|(k, _)| k.as_str() != "id") {
            columns.push(table.column(field)?);
            values.push(to_sql(value));
        }

        let sql = if columns.is_empty() {
            format!("INSERT INTO {} DEFAULT VALUES", table.name)
        } else {
            let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();
            format!(
                "INSERT INTO {} ({}) VALUES ({})",
                table.name,
                columns.join(", "),
                placeholders.join(", ")
            )
        };

        let conn = self.lock()?;
        conn.execute(&sql, params_from_iter(values.iter()))?;
        let id = conn.last_insert_rowid();
        fetch_by_id(&conn, table, id)
    }

    async fn update(&self, collection: &str, id: i64, patch: Record) -> Result<(), TaskboardError> {
        let table = Table::lookup(collection)?;
        let mut sets = Vec::new();
        let mut values = Vec::new();
        for (field, value) in patch.iter().filter(|(k, _)| k.as_str() != "id") {
            sets.push(format!("{} = ?{}", table.column(field)?, sets.len() + 1));
            values.push(to_sql(value));
        }

        let conn = self.lock()?;
        if sets.is_empty() {
            fetch_by_id(&conn, table, id)?;
            return Ok(());
        }

        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?{}",
            table.name,
            sets.join(", "),
            values.len() + 1
        );
        values.push(SqlValue::Integer(id));
        let changed = conn.execute(&sql, params_from_iter(values.iter()))?;
        if changed == 0 {
            return Err(TaskboardError::record_not_found(table.name, id));
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: i64) -> Result<(), TaskboardError> {
        let table = Table::lookup(collection)?;
        let sql = format!("DELETE FROM {} WHERE id = ?1", table.name);
        let conn = self.lock()?;
        let changed = conn.execute(&sql, params![id])?;
        if changed == 0 {
            return Err(TaskboardError::record_not_found(table.name, id));
        }
        Ok(())
    }
}
