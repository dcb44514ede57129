pub mod connection;
pub mod migrations;
pub mod sqlite_store;

pub use connection::*;
pub use sqlite_store::SqliteStore;
