//! Services layered over the board store.
//!
//! ARCHITECTURE
//! ============
//! The board store is synchronous. Services own everything that waits:
//! periodic flushing, frame-paced animation, and calls to the AI service.
//! Each takes the shared [`AppState`](crate::state::AppState) and holds the
//! board lock only for the synchronous part of its work.

pub mod ai;
pub mod persistence;
pub mod tidy;
