// Application Layer - Queue engine and presentation-facing views

pub mod config;
pub mod constants;
pub mod engine;
pub mod view;

// Re-exports
pub use config::EngineConfig;
pub use engine::QueueEngine;
pub use view::{BoardView, EditView, SlotView};
