pub mod task;
pub mod project;
pub mod team;
pub mod profile;

pub use task::*;
pub use project::*;
pub use team::*;
pub use profile::*;
