//! Position tweens driven by an external frame source.
//!
//! The [`Animator`] holds at most one active tween. Starting a new one
//! replaces whatever was in flight, so two tidies can never fight over the
//! same frame. The animator never touches nodes directly: each call to
//! [`Animator::frame`] yields the positions to write for that frame and the
//! store applies them.

#[cfg(test)]
#[path = "animation_test.rs"]
mod animation_test;

use crate::layout::{ease_in_out_quart, lerp};
use crate::node::{NodeId, Position};

/// Token identifying one started animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationHandle {
    token: u64,
}

/// A single node's start and end positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: NodeId,
    pub from: Position,
    pub to: Position,
}

/// Positions to write for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub positions: Vec<(NodeId, Position)>,
    /// Eased progress in `[0, 1]`.
    pub eased: f64,
    /// True on the last frame; the animator is idle afterwards.
    pub finished: bool,
}

#[derive(Debug)]
struct Tween {
    handle: AnimationHandle,
    started_at_ms: f64,
    duration_ms: f64,
    tracks: Vec<Track>,
}

#[derive(Debug, Default)]
pub struct Animator {
    active: Option<Tween>,
    next_token: u64,
}

impl Animator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tweening `tracks` from `now_ms`, cancelling any running tween.
    pub fn start(&mut self, tracks: Vec<Track>, now_ms: f64, duration_ms: f64) -> AnimationHandle {
        self.next_token += 1;
        let handle = AnimationHandle { token: self.next_token };
        self.active = Some(Tween { handle, started_at_ms: now_ms, duration_ms, tracks });
        handle
    }

    /// Stop the animation identified by `handle`. Returns false if it is no
    /// longer the active one.
    pub fn cancel(&mut self, handle: AnimationHandle) -> bool {
        if self.active_handle() == Some(handle) {
            self.active = None;
            true
        } else {
            false
        }
    }

    /// Stop animating a single node, e.g. because the user grabbed it.
    pub fn release(&mut self, id: &str) {
        if let Some(tween) = self.active.as_mut() {
            tween.tracks.retain(|t| t.id != id);
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    #[must_use]
    pub fn active_handle(&self) -> Option<AnimationHandle> {
        self.active.as_ref().map(|t| t.handle)
    }

    /// Compute the frame at `now_ms`. Returns `None` when idle.
    pub fn frame(&mut self, now_ms: f64) -> Option<Frame> {
        let tween = self.active.as_ref()?;
        let progress = if tween.duration_ms > 0.0 {
            ((now_ms - tween.started_at_ms) / tween.duration_ms).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let eased = ease_in_out_quart(progress);
        let positions = tween
            .tracks
            .iter()
            .map(|t| {
                let pos = if progress >= 1.0 { t.to } else { lerp(t.from, t.to, eased) };
                (t.id.clone(), pos)
            })
            .collect();
        let finished = progress >= 1.0;
        if finished {
            self.active = None;
        }
        Some(Frame { positions, eased, finished })
    }
}
