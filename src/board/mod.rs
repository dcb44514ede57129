//! Kanban board state: the column view of a project's tasks and its
//! synchronization with the store.

pub mod columns;
pub mod controller;
pub mod derive;

pub use columns::{Column, Columns, TaskView};
pub use controller::{BoardController, BoardOptions, DragLocation, MoveOutcome, StatusCallback};
pub use derive::derive_status;
