// Queue Board Infrastructure - SQLite Adapter
// Implements: SessionStore

mod connection;
mod error;
mod migration;
mod session_store;

pub use connection::create_pool;
pub use migration::run_migrations;
pub use session_store::SqliteSessionStore;
