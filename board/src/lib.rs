//! Board core for the InchDesk dashboard.
//!
//! This crate owns the state behind the widget canvas: the list of
//! positioned, resizable widget cards, the reducer that applies canvas
//! change events to it, the tidy grid layout and its tween, and the
//! snapshot that survives restarts. Rendering and gesture handling live
//! outside; they read [`store::BoardStore`] and feed it
//! [`change::NodeChange`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`store`] | The board store and its mutation operations |
//! | [`node`] | Node, data bag, widget type and theme types |
//! | [`change`] | Canvas change events and the node reducer |
//! | [`widget`] | Default content and size per widget type |
//! | [`content`] | Typed validation of widget content at the render boundary |
//! | [`layout`] | Tidy grid targets and easing |
//! | [`animation`] | Single-slot tween driven by an external frame clock |
//! | [`snapshot`] | Persisted `{nodes, theme}` encoding and defensive decoding |
//! | [`storage`] | Key/value blob storage backends |
//! | [`export`] | Timestamped JSON export of the node list |
//! | [`clock`] | Wall-clock sources |
//! | [`consts`] | Shared numeric constants (sizes, gap, durations, keys) |

pub mod animation;
pub mod change;
pub mod clock;
pub mod consts;
pub mod content;
pub mod export;
pub mod layout;
pub mod node;
pub mod snapshot;
pub mod storage;
pub mod store;
pub mod widget;
