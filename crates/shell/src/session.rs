// Shell session - dispatches commands to the engine, enforcing admin gating

use crate::command::{Command, HELP};
use crate::render::render;
use anyhow::{Context, Result};
use queueboard_core::{EngineConfig, QueueEngine};
use queueboard_infra_sqlite::SqliteSessionStore;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

/// Whether the read loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell {
    engine: QueueEngine,
    store: Arc<SqliteSessionStore>,
    config: EngineConfig,
}

impl Shell {
    pub async fn open(store: Arc<SqliteSessionStore>, config: EngineConfig) -> Self {
        let engine = open_engine(&store, &config).await;
        Self {
            engine,
            store,
            config,
        }
    }

    pub fn engine(&self) -> &QueueEngine {
        &self.engine
    }

    /// Run one command, returning the text to show the user
    pub async fn execute(&mut self, command: Command) -> Result<(Flow, String)> {
        // Anything done outside the edit field takes focus from it first
        if command.leaves_edit_field() && self.engine.edit_target().await.is_some() {
            self.engine.focus_lost().await?;
        }
        let admin = self.engine.is_admin().await;

        let message = match command {
            Command::Add(name) => {
                self.engine.add(&name).await?;
                None
            }
            Command::Undo => {
                if self.engine.undo().await?.is_none() {
                    Some("nothing to undo".to_string())
                } else {
                    None
                }
            }
            Command::Remove(_) | Command::Edit(_) if !admin => {
                Some("admin mode is off (type `admin`)".to_string())
            }
            Command::Remove(index) => {
                self.engine.remove(index).await?;
                None
            }
            Command::Edit(index) => {
                if self.engine.begin_edit(index).await?.is_none() {
                    Some(format!("slot {} is empty", index + 1))
                } else {
                    None
                }
            }
            Command::Type(text) => {
                if self.engine.set_edit_buffer(&text).await {
                    None
                } else {
                    Some("no edit in progress".to_string())
                }
            }
            Command::Save => {
                self.engine.save_edit().await?;
                None
            }
            Command::Blur => {
                self.engine.focus_lost().await?;
                None
            }
            Command::Cancel => {
                if self.engine.cancel_edit().await?.is_none() {
                    Some("no edit in progress".to_string())
                } else {
                    None
                }
            }
            Command::Admin => {
                self.engine.toggle_admin_mode().await?;
                None
            }
            Command::Show => None,
            Command::Reload => {
                self.reload().await?;
                Some("board reloaded from session store".to_string())
            }
            Command::Help => return Ok((Flow::Continue, HELP.to_string())),
            Command::Quit => {
                self.end().await?;
                return Ok((Flow::Quit, "session ended".to_string()));
            }
        };

        let mut out = render(&self.engine.view().await);
        if let Some(message) = message {
            out.push_str(&message);
            out.push('\n');
        }
        Ok((Flow::Continue, out))
    }

    /// Like a page reload: write pending changes, then rebuild the engine
    /// from the store
    pub async fn reload(&mut self) -> Result<()> {
        self.engine
            .flush()
            .await
            .context("Failed to write session state before reload")?;
        self.engine = open_engine(&self.store, &self.config).await;
        Ok(())
    }

    /// Write pending changes and discard the session's stored state
    pub async fn end(&self) -> Result<()> {
        self.engine
            .flush()
            .await
            .context("Failed to write session state")?;
        self.store
            .end_session()
            .await
            .context("Failed to clear session")?;
        Ok(())
    }
}

async fn open_engine(store: &Arc<SqliteSessionStore>, config: &EngineConfig) -> QueueEngine {
    let engine = QueueEngine::open(store.clone(), config.clone()).await;
    info!(session_id = store.session_id(), "Board ready");

    // Log every change; ends when the engine is dropped
    let mut events = engine.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => debug!(?event, "Board event"),
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "Event log lagging"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    engine
}
