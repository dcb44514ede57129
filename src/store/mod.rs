//! Generic record store the board and services talk to.
//!
//! A store holds named collections of JSON-object records, each with an
//! integer `id` assigned on insert. Queries support equality filters and
//! multi-key ordering; nothing else is assumed about the backend.

pub mod memory;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::TaskboardError;

pub use memory::MemoryStore;

pub type Record = Map<String, Value>;

pub const TASKS: &str = "tasks";
pub const PROJECTS: &str = "projects";
pub const TEAM_MEMBERS: &str = "team_members";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// Equality filters (all must match) plus ordering keys, applied in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order: Vec<OrderBy>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            field: field.to_string(),
            value: value.into(),
        });
        self
    }

    pub fn order_by(mut self, field: &str, direction: Direction) -> Self {
        self.order.push(OrderBy {
            field: field.to_string(),
            direction,
        });
        self
    }
}

#[async_trait]
pub trait DataStore: Send + Sync {
    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Record>, TaskboardError>;

    /// Insert a record and return it as stored, including its new `id`.
    async fn insert(&self, collection: &str, record: Record) -> Result<Record, TaskboardError>;

    /// Merge `patch` into the record with `id`. Missing rows are reported
    /// as `RECORD_NOT_FOUND`.
    async fn update(&self, collection: &str, id: i64, patch: Record) -> Result<(), TaskboardError>;

    async fn delete(&self, collection: &str, id: i64) -> Result<(), TaskboardError>;
}

/// Serialize a row struct into a record.
pub fn to_record<T: Serialize>(row: &T) -> Result<Record, TaskboardError> {
    match serde_json::to_value(row)? {
        Value::Object(map) => Ok(map),
        other => Err(TaskboardError::validation(format!(
            "Expected an object record, got {other}"
        ))),
    }
}

/// Build a one-field patch.
pub fn patch(field: &str, value: impl Into<Value>) -> Record {
    let mut record = Record::new();
    record.insert(field.to_string(), value.into());
    record
}
