//! Tidy driver: paces the board's arrange animation on a frame interval.
//!
//! The store computes frames from a caller-supplied clock. This driver
//! supplies tokio time measured from [`AppState::epoch`], takes the board
//! lock once per frame, and stops when the animation is finished,
//! cancelled, or replaced by one that another driver is already pacing.

use std::time::Duration;

use board::animation::AnimationHandle;
use board::consts::TIDY_DURATION_MS;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::state::AppState;

/// How a tidy run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TidyOutcome {
    /// Nothing to arrange.
    Empty,
    /// Every node reached its grid cell; carries the frame count.
    Finished { frames: u32 },
    /// Cancelled or superseded before the last frame.
    Interrupted { frames: u32 },
}

/// Start a tidy and drive it to completion at `frame_interval`.
pub async fn animate(state: &AppState, frame_interval: Duration) -> TidyOutcome {
    let Some(handle) = start(state).await else {
        return TidyOutcome::Empty;
    };
    drive(state, handle, frame_interval).await
}

/// Start a tidy without driving it. Returns `None` on an empty board.
pub async fn start(state: &AppState) -> Option<AnimationHandle> {
    let now = state.frame_millis();
    let mut store = state.board.write().await;
    let handle = store.rearrange_nodes(now)?;
    info!(nodes = store.len(), "tidy: started");
    Some(handle)
}

/// Drive the animation identified by `handle` until it stops.
pub async fn drive(state: &AppState, handle: AnimationHandle, frame_interval: Duration) -> TidyOutcome {
    let mut ticker = tokio::time::interval(frame_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut frames = 0u32;
    loop {
        ticker.tick().await;
        let now = state.frame_millis();
        let mut store = state.board.write().await;
        if store.active_animation() != Some(handle) {
            debug!(frames, "tidy: interrupted");
            return TidyOutcome::Interrupted { frames };
        }
        frames += 1;
        if !store.advance_animation(now) {
            info!(frames, "tidy: finished");
            return TidyOutcome::Finished { frames };
        }
    }
}

/// Arrange immediately, writing only the final frame.
pub async fn instant(state: &AppState) -> TidyOutcome {
    let mut store = state.board.write().await;
    if store.rearrange_nodes(0.0).is_none() {
        return TidyOutcome::Empty;
    }
    store.advance_animation(TIDY_DURATION_MS);
    TidyOutcome::Finished { frames: 1 }
}

#[cfg(test)]
#[path = "tidy_test.rs"]
mod tests;
