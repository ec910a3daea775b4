// Board constants (no magic values)
use std::time::Duration;

/// Delay before a removal is written to the session store (300ms),
/// long enough for the slot's exit transition to finish
pub const DEFAULT_PERSIST_DELAY: Duration = Duration::from_millis(300);

/// Number of numbered slots on the board
pub const DEFAULT_SLOT_COUNT: usize = 20;

/// Slots per display column (the board shows two columns of ten)
pub const SLOTS_PER_COLUMN: usize = 10;

/// Buffered change events per subscriber before it starts lagging
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Session store key holding the queue (JSON array of strings)
pub const QUEUE_KEY: &str = "queue";

/// Session store key holding the removal history
pub const HISTORY_KEY: &str = "history";

/// Environment overrides
pub const PERSIST_DELAY_ENV: &str = "QUEUEBOARD_PERSIST_DELAY_MS";
pub const SLOT_COUNT_ENV: &str = "QUEUEBOARD_SLOT_COUNT";
