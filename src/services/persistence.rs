//! Persistence service: background flush of the dirty board.
//!
//! DESIGN
//! ======
//! Mutations only mark the store dirty. A background task wakes once per
//! flush interval and writes the snapshot if anything changed, so a burst
//! of drags costs one write. Callers flush once more before exit.
//!
//! ERROR HANDLING
//! ==============
//! The dirty flag is cleared only after a successful write, so a failed
//! flush is retried on the next tick.

use std::time::Duration;

use board::store::FlushError;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::state::AppState;

/// Write the board snapshot if it is dirty. Returns true when a write happened.
///
/// # Errors
///
/// Returns an error if encoding or the storage write fails.
pub async fn flush(state: &AppState) -> Result<bool, FlushError> {
    let mut store = state.board.write().await;
    let wrote = store.flush(state.storage.as_ref())?;
    if wrote {
        debug!(nodes = store.len(), "persistence: board flushed");
    }
    Ok(wrote)
}

/// Spawn the background persistence task. Returns a handle for shutdown.
pub fn spawn_persistence_task(state: AppState, interval: Duration) -> JoinHandle<()> {
    info!(flush_interval_ms = interval.as_millis(), "persistence: flush task started");
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if let Err(e) = flush(&state).await {
                error!(error = %e, "persistence: flush failed");
            }
        }
    })
}

#[cfg(test)]
#[path = "persistence_test.rs"]
mod tests;
