// Persistence Bridge
//
// Maps the board to the two session store keys and back. Only the engine
// calls into this module; nothing else touches the keys.

use crate::application::constants::{HISTORY_KEY, QUEUE_KEY};
use crate::domain::{Board, Entry, HistoryLog, HistoryRecord, Queue};
use crate::error::Result;
use crate::port::SessionStore;
use serde::Deserialize;
use tracing::{debug, warn};

/// Serialized form of both keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StoredSnapshot {
    pub queue: String,
    pub history: String,
}

/// History records as they may appear in the store
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredRecord {
    /// Value-only layout: `["Bob"]`
    Legacy([Entry; 1]),
    /// `{"value": "Bob", "index": 1}`
    Indexed(HistoryRecord),
}

impl From<StoredRecord> for HistoryRecord {
    fn from(record: StoredRecord) -> Self {
        match record {
            StoredRecord::Legacy([value]) => HistoryRecord::unindexed(value),
            StoredRecord::Indexed(record) => record,
        }
    }
}

pub(crate) fn encode(board: &Board) -> Result<StoredSnapshot> {
    Ok(StoredSnapshot {
        queue: serde_json::to_string(board.queue())?,
        history: serde_json::to_string(board.history())?,
    })
}

/// Write both keys in one store call, so history never lands without the
/// queue its indices refer to
pub(crate) async fn write(store: &dyn SessionStore, board: &Board) -> Result<()> {
    let snapshot = encode(board)?;
    store
        .set_many(&[
            (QUEUE_KEY.to_string(), snapshot.queue),
            (HISTORY_KEY.to_string(), snapshot.history),
        ])
        .await
}

/// Read both keys and rebuild the board. Never fails: anything unreadable
/// counts as no prior session data.
pub(crate) async fn load(store: &dyn SessionStore) -> Board {
    let queue = read(store, QUEUE_KEY).await;
    let history = read(store, HISTORY_KEY).await;
    hydrate(queue.as_deref(), history.as_deref())
}

async fn read(store: &dyn SessionStore, key: &str) -> Option<String> {
    match store.get(key).await {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "Session store read failed, treating as empty");
            None
        }
    }
}

pub(crate) fn hydrate(queue: Option<&str>, history: Option<&str>) -> Board {
    let queue = match queue.map(serde_json::from_str::<Queue>) {
        None => Queue::new(),
        Some(Ok(queue)) => queue,
        Some(Err(e)) => {
            // history indices are meaningless without the queue they refer to
            warn!(key = QUEUE_KEY, error = %e, "Malformed session state, starting empty");
            return Board::new();
        }
    };

    let history = match history.map(decode_history) {
        None => HistoryLog::new(),
        Some(Ok(history)) => history,
        Some(Err(e)) => {
            warn!(key = HISTORY_KEY, error = %e, "Malformed history, dropping it");
            HistoryLog::new()
        }
    };

    debug!(
        entries = queue.len(),
        history = history.len(),
        "Hydrated board from session store"
    );
    Board::restore(queue, history)
}

fn decode_history(raw: &str) -> serde_json::Result<HistoryLog> {
    let records: Vec<StoredRecord> = serde_json::from_str(raw)?;
    Ok(HistoryLog::from_records(
        records.into_iter().map(HistoryRecord::from).collect(),
    ))
}
