// Queue Board Core - Domain Logic, Engine & Ports
// NO infrastructure dependencies: storage adapters live in their own crates

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use application::{BoardView, EngineConfig, QueueEngine};
pub use error::{AppError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
