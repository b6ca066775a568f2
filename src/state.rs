//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is cheap to clone and handed to every service. It owns the
//! single board store behind an async `RwLock`, the storage backend the
//! persistence task flushes to, and the AI transport. `epoch` anchors the
//! frame clock so every tidy driver measures time from the same origin.

use std::sync::Arc;

use board::clock::Clock;
use board::storage::Storage;
use board::store::BoardStore;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::ai::AiTransport;

#[derive(Clone)]
pub struct AppState {
    pub board: Arc<RwLock<BoardStore>>,
    pub storage: Arc<dyn Storage>,
    pub ai: Arc<dyn AiTransport>,
    pub epoch: Instant,
}

impl AppState {
    #[must_use]
    pub fn new(store: BoardStore, storage: Arc<dyn Storage>, ai: Arc<dyn AiTransport>) -> Self {
        Self { board: Arc::new(RwLock::new(store)), storage, ai, epoch: Instant::now() }
    }

    /// Restore the board from `storage`, or start empty.
    #[must_use]
    pub fn hydrate(storage: Arc<dyn Storage>, ai: Arc<dyn AiTransport>, clock: Arc<dyn Clock>) -> Self {
        let store = BoardStore::hydrate(storage.as_ref(), clock);
        Self::new(store, storage, ai)
    }

    /// Milliseconds on the frame clock since this state was created.
    #[must_use]
    pub fn frame_millis(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
