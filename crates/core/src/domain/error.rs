// Domain Error Types

use thiserror::Error;

/// Why a board operation did not apply.
///
/// The engine treats every variant as a silent no-op; the variants exist so
/// callers and logs can tell the cases apart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Entry name is blank")]
    BlankEntry,

    #[error("Stored entry {0:?} has surrounding whitespace")]
    UntrimmedEntry(String),

    #[error("Index {index} out of range (queue length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Nothing to undo")]
    HistoryEmpty,

    #[error("No edit in progress")]
    NotEditing,
}

pub type Result<T> = std::result::Result<T, DomainError>;
