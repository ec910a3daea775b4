// History Domain Model

use crate::domain::entry::Entry;
use serde::{Deserialize, Serialize};

/// A removed entry and the index it occupied when it was removed.
///
/// `index` is `None` for records restored from the value-only layout; undo
/// then reinserts at the end of the queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub value: Entry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

impl HistoryRecord {
    pub fn new(value: Entry, index: usize) -> Self {
        Self {
            value,
            index: Some(index),
        }
    }

    /// Record whose original position is unknown
    pub fn unindexed(value: Entry) -> Self {
        Self { value, index: None }
    }
}

/// Single-branch removal history, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLog {
    records: Vec<HistoryRecord>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<HistoryRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryRecord> {
        self.records.iter()
    }

    pub fn push(&mut self, record: HistoryRecord) {
        self.records.push(record);
    }

    pub fn pop(&mut self) -> Option<HistoryRecord> {
        self.records.pop()
    }

    /// Drop every record, returning how many were dropped
    pub fn clear(&mut self) -> usize {
        let dropped = self.records.len();
        self.records.clear();
        dropped
    }
}
