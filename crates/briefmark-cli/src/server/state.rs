//! Application state for the web server.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;

use briefmark::persistence::snapshot_path;
use briefmark::{BriefmarkError, ReviewConfig, ReviewSession, SessionSlot};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The reviewer's session, if a file has been loaded.
    pub slot: Arc<RwLock<SessionSlot>>,
    /// Output location, reload policy and autosave.
    pub config: Arc<ReviewConfig>,
}

impl AppState {
    /// Create new application state.
    pub fn new(slot: SessionSlot, config: ReviewConfig) -> Self {
        Self {
            slot: Arc::new(RwLock::new(slot)),
            config: Arc::new(config),
        }
    }

    /// Where the snapshot for `session` lives.
    pub fn snapshot_path(&self, session: &ReviewSession) -> PathBuf {
        snapshot_path(&self.config.output_dir, session.source())
    }

    /// Write the snapshot for `session`.
    ///
    /// Callers hold the slot's write lock, so snapshots land in the same
    /// order as the changes they record.
    pub fn save_session(&self, session: &ReviewSession) -> Result<PathBuf, BriefmarkError> {
        let path = self.snapshot_path(session);
        session.save_snapshot(&path)?;
        Ok(path)
    }

    /// Save the current session snapshot, if a session is loaded.
    pub async fn save(&self) -> Result<Option<PathBuf>, BriefmarkError> {
        let slot = self.slot.write().await;
        slot.get().map(|session| self.save_session(session)).transpose()
    }

    /// Save the snapshot for `session` when autosave is on.
    pub fn autosave(&self, session: &ReviewSession) -> Result<(), BriefmarkError> {
        if self.config.autosave {
            self.save_session(session)?;
        }
        Ok(())
    }
}
