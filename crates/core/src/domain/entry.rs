// Entry Domain Model

use crate::domain::error::{DomainError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One named occupant of a queue slot.
///
/// Always trimmed and never empty. Deserialization is stricter than
/// [`Entry::parse`]: a stored name must already be in that form, so a blank
/// or untrimmed value is rejected as malformed instead of being rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Entry(String);

impl Entry {
    /// Trim `raw` and reject it if nothing is left
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::BlankEntry);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// `"name (n)"`, used to disambiguate duplicates
    pub(crate) fn with_suffix(&self, n: usize) -> Self {
        Self(format!("{} ({})", self.0, n))
    }
}

impl TryFrom<String> for Entry {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self> {
        let entry = Self::parse(&value)?;
        if entry.0 != value {
            return Err(DomainError::UntrimmedEntry(value));
        }
        Ok(entry)
    }
}

impl From<Entry> for String {
    fn from(entry: Entry) -> Self {
        entry.0
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
