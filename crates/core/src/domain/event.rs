// Board Change Events

use serde::Serialize;

/// One applied change to the board, broadcast to subscribers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoardEvent {
    Added { index: usize, value: String },
    Removed { index: usize, value: String },
    Restored { index: usize, value: String },
    Edited { index: usize, value: String },
    EditStarted { index: usize },
    EditCancelled,
    AdminToggled { admin: bool },
}

/// When a change has to reach the session store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    /// UI-only state, never stored
    None,
    Immediate,
    /// Written after the removal transition delay
    Deferred,
}

impl BoardEvent {
    pub fn persistence(&self) -> Persistence {
        match self {
            BoardEvent::Added { .. } | BoardEvent::Restored { .. } | BoardEvent::Edited { .. } => {
                Persistence::Immediate
            }
            BoardEvent::Removed { .. } => Persistence::Deferred,
            BoardEvent::EditStarted { .. }
            | BoardEvent::EditCancelled
            | BoardEvent::AdminToggled { .. } => Persistence::None,
        }
    }
}
