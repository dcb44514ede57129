//! In-process `DataStore` with call recording and fault injection.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::Value;

use super::{DataStore, Direction, Query, Record};
use crate::error::TaskboardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Query,
    Insert,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoreCall {
    pub op: Operation,
    pub collection: String,
    pub id: Option<i64>,
    pub record: Option<Record>,
}

#[derive(Default)]
struct Inner {
    collections: HashMap<String, Vec<Record>>,
    next_ids: HashMap<String, i64>,
    calls: Vec<StoreCall>,
    untracked: bool,
    failing: HashSet<Operation>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that keeps no call log, for long-lived use outside tests.
    pub fn untracked() -> Self {
        let store = Self::default();
        store.lock().untracked = true;
        store
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Put a record in place without recording a call. Keeps an explicit
    /// `id` if present, otherwise assigns the next one.
    pub fn seed(&self, collection: &str, mut record: Record) -> i64 {
        let mut inner = self.lock();
        let id = match record.get("id").and_then(Value::as_i64) {
            Some(id) => id,
            None => peek_next_id(&inner, collection),
        };
        record.insert("id".into(), Value::from(id));
        let next = inner.next_ids.entry(collection.to_string()).or_insert(1);
        *next = (*next).max(id + 1);
        inner
            .collections
            .entry(collection.to_string())
            .or_default()
            .push(record);
        id
    }

    /// Make every subsequent call of `op` fail with a store error.
    pub fn fail(&self, op: Operation) {
        self.lock().failing.insert(op);
    }

    pub fn recover(&self, op: Operation) {
        self.lock().failing.remove(&op);
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.lock().calls.clone()
    }

    pub fn calls_of(&self, op: Operation) -> Vec<StoreCall> {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.op == op)
            .cloned()
            .collect()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    pub fn records(&self, collection: &str) -> Vec<Record> {
        self.lock()
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn get(&self, collection: &str, id: i64) -> Option<Record> {
        self.records(collection)
            .into_iter()
            .find(|r| record_id(r) == Some(id))
    }
}

fn peek_next_id(inner: &Inner, collection: &str) -> i64 {
    inner.next_ids.get(collection).copied().unwrap_or(1)
}

fn record_id(record: &Record) -> Option<i64> {
    record.get("id").and_then(Value::as_i64)
}

fn begin(
    inner: &mut Inner,
    op: Operation,
    collection: &str,
    id: Option<i64>,
    record: Option<&Record>,
) -> Result<(), TaskboardError> {
    if !inner.untracked {
        inner.calls.push(StoreCall {
            op,
            collection: collection.to_string(),
            id,
            record: record.cloned(),
        });
    }
    if inner.failing.contains(&op) {
        return Err(TaskboardError::store(format!(
            "{op:?} on {collection} failed (injected)"
        )));
    }
    Ok(())
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(v: Option<&Value>) -> u8 {
        match v {
            None | Some(Value::Null) => 0,
            Some(Value::Bool(_)) => 1,
            Some(Value::Number(_)) => 2,
            Some(Value::String(_)) => 3,
            Some(_) => 4,
        }
    }
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => {
                let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
                x.partial_cmp(&y).unwrap_or(Ordering::Equal)
            }
        },
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

fn matches(record: &Record, query: &Query) -> bool {
    query.filters.iter().all(|f| {
        let v = record.get(&f.field);
        compare_values(v, Some(&f.value)) == Ordering::Equal && v.is_some()
    })
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Record>, TaskboardError> {
        let mut inner = self.lock();
        begin(&mut inner, Operation::Query, collection, None, None)?;

        let mut rows: Vec<Record> = inner
            .collections
            .get(collection)
            .map(|rows| rows.iter().filter(|r| matches(r, query)).cloned().collect())
            .unwrap_or_default();

        rows.sort_by(|a, b| {
            query
                .order
                .iter()
                .map(|o| {
                    let ord = compare_values(a.get(&o.field), b.get(&o.field));
                    match o.direction {
                        Direction::Asc => ord,
                        Direction::Desc => ord.reverse(),
                    }
                })
                .find(|ord| *ord != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });
        Ok(rows)
    }

    async fn insert(&self, collection: &str, mut record: Record) -> Result<Record, TaskboardError> {
        let mut inner = self.lock();
        begin(&mut inner, Operation::Insert, collection, None, Some(&record))?;

        let id = peek_next_id(&inner, collection);
        inner.next_ids.insert(collection.to_string(), id + 1);
        record.insert("id".into(), Value::from(id));
        inner
            .collections
            .entry(collection.to_string())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn update(&self, collection: &str, id: i64, patch: Record) -> Result<(), TaskboardError> {
        let mut inner = self.lock();
        begin(&mut inner, Operation::Update, collection, Some(id), Some(&patch))?;

        let row = inner
            .collections
            .get_mut(collection)
            .and_then(|rows| rows.iter_mut().find(|r| record_id(r) == Some(id)))
            .ok_or_else(|| TaskboardError::record_not_found(collection, id))?;
        for (k, v) in patch {
            if k != "id" {
                row.insert(k, v);
            }
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: i64) -> Result<(), TaskboardError> {
        let mut inner = self.lock();
        begin(&mut inner, Operation::Delete, collection, Some(id), None)?;

        let rows = inner
            .collections
            .get_mut(collection)
            .ok_or_else(|| TaskboardError::record_not_found(collection, id))?;
        let before = rows.len();
        rows.retain(|r| record_id(r) != Some(id));
        if rows.len() == before {
            return Err(TaskboardError::record_not_found(collection, id));
        }
        Ok(())
    }
}
