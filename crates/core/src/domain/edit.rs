// Edit Session State Machine
//
// Idle -> Editing(index) -> Idle. Only one slot is editable at a time.

/// In-progress edit of a single queue slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Idle,
    Editing { index: usize, buffer: String },
}

impl EditSession {
    /// Start editing `index`, replacing any edit already in progress
    pub fn begin(&mut self, index: usize, current: &str) {
        *self = EditSession::Editing {
            index,
            buffer: current.to_string(),
        };
    }

    /// Replace the buffer text. Returns false when idle.
    pub fn set_buffer(&mut self, text: &str) -> bool {
        match self {
            EditSession::Editing { buffer, .. } => {
                *buffer = text.to_string();
                true
            }
            EditSession::Idle => false,
        }
    }

    /// Return to Idle. Returns true if an edit was in progress.
    pub fn close(&mut self) -> bool {
        let was_editing = self.is_editing();
        *self = EditSession::Idle;
        was_editing
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, EditSession::Editing { .. })
    }

    pub fn target(&self) -> Option<(usize, &str)> {
        match self {
            EditSession::Editing { index, buffer } => Some((*index, buffer.as_str())),
            EditSession::Idle => None,
        }
    }
}
