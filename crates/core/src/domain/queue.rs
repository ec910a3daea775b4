// Queue Domain Model

use crate::domain::entry::Entry;
use crate::domain::error::{DomainError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered waiting queue. Index `i` is displayed as slot `i + 1`.
///
/// The sequence is unbounded; slot limits are a display concern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Queue {
    entries: Vec<Entry>,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn contains(&self, entry: &Entry) -> bool {
        self.entries.contains(entry)
    }

    /// Return `candidate` if free, otherwise the first free `"candidate (n)"`
    /// probing n = 1, 2, 3, ...
    pub fn disambiguate(&self, candidate: Entry) -> Entry {
        let taken: HashSet<&str> = self.entries.iter().map(Entry::as_str).collect();
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }

        let mut n = 1;
        loop {
            let probe = candidate.with_suffix(n);
            if !taken.contains(probe.as_str()) {
                return probe;
            }
            n += 1;
        }
    }

    /// Append at the end, returning the new index
    pub fn push(&mut self, entry: Entry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    /// Remove the entry at `index`, shifting later entries left
    pub fn remove(&mut self, index: usize) -> Result<Entry> {
        self.check_index(index)?;
        Ok(self.entries.remove(index))
    }

    /// Insert at `min(index, len)`, returning the index actually used
    pub fn insert_clamped(&mut self, index: usize, entry: Entry) -> usize {
        let at = index.min(self.entries.len());
        self.entries.insert(at, entry);
        at
    }

    /// Replace the entry at `index`, returning the previous value
    pub fn replace(&mut self, index: usize, entry: Entry) -> Result<Entry> {
        self.check_index(index)?;
        Ok(std::mem::replace(&mut self.entries[index], entry))
    }

    pub fn check_index(&self, index: usize) -> Result<()> {
        if index < self.entries.len() {
            Ok(())
        } else {
            Err(DomainError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })
        }
    }
}
