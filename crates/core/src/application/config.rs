// Engine Configuration

use crate::application::constants::{
    DEFAULT_EVENT_CAPACITY, DEFAULT_PERSIST_DELAY, DEFAULT_SLOT_COUNT, PERSIST_DELAY_ENV,
    SLOT_COUNT_ENV,
};
use crate::error::{AppError, Result};
use std::time::Duration;

/// Queue engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// How long a removal waits before it is written to the store
    pub persist_delay: Duration,

    /// Number of numbered slots in the board view
    pub slot_count: usize,

    /// Change-event buffer per subscriber
    pub event_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            persist_delay: DEFAULT_PERSIST_DELAY,
            slot_count: DEFAULT_SLOT_COUNT,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Defaults, overridden by `QUEUEBOARD_PERSIST_DELAY_MS` and
    /// `QUEUEBOARD_SLOT_COUNT` when set
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`EngineConfig::from_env`] with an injectable variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(PERSIST_DELAY_ENV) {
            let millis: u64 = raw.trim().parse().map_err(|_| {
                AppError::Config(format!("{} must be milliseconds, got {:?}", PERSIST_DELAY_ENV, raw))
            })?;
            config.persist_delay = Duration::from_millis(millis);
        }

        if let Some(raw) = lookup(SLOT_COUNT_ENV) {
            let slots: usize = raw.trim().parse().map_err(|_| {
                AppError::Config(format!("{} must be a number, got {:?}", SLOT_COUNT_ENV, raw))
            })?;
            if slots == 0 {
                return Err(AppError::Config(format!("{} must be at least 1", SLOT_COUNT_ENV)));
            }
            config.slot_count = slots;
        }

        Ok(config)
    }
}
