//! Typed access to the store collections.

pub mod task_repo;
pub mod project_repo;
pub mod team_repo;

pub use task_repo::TaskCounts;
