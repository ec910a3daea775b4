// Port Layer - Interfaces for external dependencies

pub mod session_store;
pub mod time_provider;

// Re-exports
pub use session_store::{MemorySessionStore, SessionStore};
pub use time_provider::{SystemTimeProvider, TimeProvider};
