// Domain Layer - Pure board logic and entities

pub mod board;
pub mod edit;
pub mod entry;
pub mod error;
pub mod event;
pub mod history;
pub mod queue;

// Re-exports
pub use board::Board;
pub use edit::EditSession;
pub use entry::Entry;
pub use error::DomainError;
pub use event::{BoardEvent, Persistence};
pub use history::{HistoryLog, HistoryRecord};
pub use queue::Queue;
