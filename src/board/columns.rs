use serde::Serialize;

use crate::models::{Task, TaskStatus, DEFAULT_TAG, DEFAULT_TAG_CLASS};

/// What a card on the board shows. `id` is the drag identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    pub id: String,
    pub content: String,
    pub tag: String,
    pub tag_class: String,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        let non_empty = |s: &Option<String>, fallback: &str| {
            s.as_deref()
                .filter(|v| !v.is_empty())
                .unwrap_or(fallback)
                .to_string()
        };
        Self {
            id: task.id.to_string(),
            content: task.title.clone(),
            tag: non_empty(&task.tag, DEFAULT_TAG),
            tag_class: non_empty(&task.tag_class, DEFAULT_TAG_CLASS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub key: TaskStatus,
    pub title: &'static str,
    pub items: Vec<TaskView>,
}

impl Column {
    fn new(key: TaskStatus) -> Self {
        Self {
            key,
            title: key.title(),
            items: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Ids in display order.
    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.id.as_str()).collect()
    }
}

/// The four status columns. One field per status, so a card can only ever
/// live in a column that exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Columns {
    pub todo: Column,
    pub doing: Column,
    pub paused: Column,
    pub done: Column,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            todo: Column::new(TaskStatus::Todo),
            doing: Column::new(TaskStatus::Doing),
            paused: Column::new(TaskStatus::Paused),
            done: Column::new(TaskStatus::Done),
        }
    }
}

impl Columns {
    /// Partition `tasks` by status, keeping their relative order.
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut columns = Self::default();
        for task in tasks {
            columns.get_mut(task.status).items.push(TaskView::from(task));
        }
        columns
    }

    pub fn get(&self, key: TaskStatus) -> &Column {
        match key {
            TaskStatus::Todo => &self.todo,
            TaskStatus::Doing => &self.doing,
            TaskStatus::Paused => &self.paused,
            TaskStatus::Done => &self.done,
        }
    }

    pub fn get_mut(&mut self, key: TaskStatus) -> &mut Column {
        match key {
            TaskStatus::Todo => &mut self.todo,
            TaskStatus::Doing => &mut self.doing,
            TaskStatus::Paused => &mut self.paused,
            TaskStatus::Done => &mut self.done,
        }
    }

    /// Columns in board order.
    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        TaskStatus::ALL.into_iter().map(move |key| self.get(key))
    }

    /// Number of cards across all columns.
    pub fn total(&self) -> usize {
        self.iter().map(Column::len).sum()
    }

    /// Which column holds the card, and where.
    pub fn locate(&self, id: &str) -> Option<(TaskStatus, usize)> {
        self.iter()
            .find_map(|column| column.position(id).map(|index| (column.key, index)))
    }

    /// Move the card at `from` within its column to `to`, clamped to the
    /// column end.
    pub(crate) fn reorder(&mut self, key: TaskStatus, from: usize, to: usize) {
        let items = &mut self.get_mut(key).items;
        let item = items.remove(from);
        let to = to.min(items.len());
        items.insert(to, item);
    }

    /// Take the card at `from` out of `source` and put it at `to` in
    /// `destination` (clamped). Both columns change in this one call.
    pub(crate) fn transfer(&mut self, source: TaskStatus, from: usize, destination: TaskStatus, to: usize) {
        let item = self.get_mut(source).items.remove(from);
        let items = &mut self.get_mut(destination).items;
        let to = to.min(items.len());
        items.insert(to, item);
    }
}
