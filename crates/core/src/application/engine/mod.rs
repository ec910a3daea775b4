// Queue Engine - owns one session's board
//
// All operations lock the board, apply a domain operation, notify
// subscribers and persist. Store writes happen while the lock is held, so
// writes reach the store in the same order as the changes they describe.

mod persistence;

use crate::application::config::EngineConfig;
use crate::application::view::{entry_values, BoardView};
use crate::domain::error::Result as DomainResult;
use crate::domain::{Board, BoardEvent, HistoryRecord, Persistence};
use crate::error::Result;
use crate::port::SessionStore;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, info};

/// Queue state engine for a single session.
///
/// Cheap to clone; clones share the same board. Operations that do not apply
/// (blank names, bad indices, nothing to undo) return `Ok(None)` and change
/// nothing. `Err` is only returned when the session store rejects a write;
/// the in-memory change has been applied by then.
#[derive(Clone)]
pub struct QueueEngine {
    inner: Arc<Shared>,
}

struct Shared {
    state: Mutex<EngineState>,
    store: Arc<dyn SessionStore>,
    events: broadcast::Sender<BoardEvent>,
    config: EngineConfig,
}

struct EngineState {
    board: Board,
    /// Bumped on every change that has to reach the store
    revision: u64,
    /// Last revision written to the store
    persisted: u64,
}

impl Shared {
    async fn persist(&self, state: &mut EngineState) -> Result<()> {
        if state.persisted == state.revision {
            return Ok(());
        }
        persistence::write(self.store.as_ref(), &state.board).await?;
        state.persisted = state.revision;
        debug!(revision = state.revision, "Session state written");
        Ok(())
    }
}

impl QueueEngine {
    /// Create the engine, hydrating from `store` if it holds a snapshot
    /// from earlier in this session
    pub async fn open(store: Arc<dyn SessionStore>, config: EngineConfig) -> Self {
        let board = persistence::load(store.as_ref()).await;
        info!(
            entries = board.queue().len(),
            history = board.history().len(),
            "Queue engine opened"
        );

        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        Self {
            inner: Arc::new(Shared {
                state: Mutex::new(EngineState {
                    board,
                    revision: 0,
                    persisted: 0,
                }),
                store,
                events,
                config,
            }),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.inner.config
    }

    /// Receive one [`BoardEvent`] per applied change
    pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
        self.inner.events.subscribe()
    }

    // ----- Mutations -----

    /// Append a name, disambiguating duplicates. Clears the undo history.
    pub async fn add(&self, name: &str) -> Result<Option<BoardEvent>> {
        self.apply("add", |board| board.add(name)).await
    }

    /// Remove the entry at `index` and remember it for undo.
    /// The store write is deferred by `persist_delay`.
    pub async fn remove(&self, index: usize) -> Result<Option<BoardEvent>> {
        self.apply("remove", |board| board.remove(index)).await
    }

    /// Restore the most recently removed entry
    pub async fn undo(&self) -> Result<Option<BoardEvent>> {
        self.apply("undo", Board::undo).await
    }

    /// Replace the entry at `index`. Clears the undo history.
    pub async fn edit_at(&self, index: usize, new_name: &str) -> Result<Option<BoardEvent>> {
        self.apply("edit_at", |board| board.edit_at(index, new_name))
            .await
    }

    /// Start editing `index`, abandoning any other edit in progress
    pub async fn begin_edit(&self, index: usize) -> Result<Option<BoardEvent>> {
        self.apply("begin_edit", |board| board.begin_edit(index))
            .await
    }

    /// Update the unsaved edit text. Returns false when no edit is open.
    pub async fn set_edit_buffer(&self, text: &str) -> bool {
        let mut state = self.inner.state.lock().await;
        state.board.set_edit_buffer(text).is_ok()
    }

    /// Commit the edit buffer
    pub async fn save_edit(&self) -> Result<Option<BoardEvent>> {
        self.apply("save_edit", Board::save_edit).await
    }

    /// The edit field lost focus: commit like [`QueueEngine::save_edit`]
    pub async fn focus_lost(&self) -> Result<Option<BoardEvent>> {
        self.apply("focus_lost", Board::save_edit).await
    }

    /// Discard the edit buffer
    pub async fn cancel_edit(&self) -> Result<Option<BoardEvent>> {
        self.apply("cancel_edit", Board::cancel_edit).await
    }

    pub async fn toggle_admin_mode(&self) -> Result<Option<BoardEvent>> {
        self.apply("toggle_admin_mode", |board| Ok(board.toggle_admin()))
            .await
    }

    /// Write any change not yet in the store (e.g. a removal still waiting
    /// out its delay)
    pub async fn flush(&self) -> Result<()> {
        let mut state = self.inner.state.lock().await;
        self.inner.persist(&mut state).await
    }

    // ----- Read accessors -----

    /// Full queue, including entries past the last slot
    pub async fn entries(&self) -> Vec<String> {
        entry_values(&self.inner.state.lock().await.board)
    }

    pub async fn history(&self) -> Vec<HistoryRecord> {
        let state = self.inner.state.lock().await;
        state.board.history().iter().cloned().collect()
    }

    pub async fn history_len(&self) -> usize {
        self.inner.state.lock().await.board.history().len()
    }

    pub async fn can_undo(&self) -> bool {
        self.history_len().await > 0
    }

    pub async fn is_admin(&self) -> bool {
        self.inner.state.lock().await.board.is_admin()
    }

    /// Index and unsaved text of the slot being edited
    pub async fn edit_target(&self) -> Option<(usize, String)> {
        let state = self.inner.state.lock().await;
        state
            .board
            .edit()
            .target()
            .map(|(index, buffer)| (index, buffer.to_string()))
    }

    pub async fn view(&self) -> BoardView {
        let state = self.inner.state.lock().await;
        BoardView::from_board(&state.board, self.inner.config.slot_count)
    }

    async fn apply<F>(&self, op: &'static str, f: F) -> Result<Option<BoardEvent>>
    where
        F: FnOnce(&mut Board) -> DomainResult<BoardEvent>,
    {
        let mut state = self.inner.state.lock().await;

        let event = match f(&mut state.board) {
            Ok(event) => event,
            Err(reason) => {
                debug!(op, %reason, "Board operation ignored");
                return Ok(None);
            }
        };
        debug!(op, event = ?event, "Board changed");

        // No subscribers is fine
        let _ = self.inner.events.send(event.clone());

        match event.persistence() {
            Persistence::None => {}
            Persistence::Immediate => {
                state.revision += 1;
                self.inner.persist(&mut state).await?;
            }
            Persistence::Deferred => {
                state.revision += 1;
                self.schedule_persist();
            }
        }

        Ok(Some(event))
    }

    /// Write the store after `persist_delay`. The task holds only the shared
    /// handle and serializes whatever the board looks like when it wakes up.
    fn schedule_persist(&self) {
        let shared = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(shared.config.persist_delay).await;

            let mut state = shared.state.lock().await;
            if state.persisted == state.revision {
                debug!(revision = state.revision, "Deferred write already covered");
                return;
            }
            if let Err(e) = shared.persist(&mut state).await {
                error!(error = ?e, "Deferred session write failed");
            }
        });
    }
}
