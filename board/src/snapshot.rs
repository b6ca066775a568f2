//! Persisted board snapshot: `{nodes, theme}` and nothing else.
//!
//! Decoding is defensive. A blob that is not JSON, or whose `nodes` is not a
//! list, is an error and the caller starts from an empty board. Inside a
//! well-formed blob, entries that fail to parse as nodes and entries that
//! repeat an earlier id are dropped, and an unknown theme reads as light.
//! The browser envelope `{state: {nodes, theme}, version}` is unwrapped.

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::node::{Node, Theme};

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot has unexpected shape: {0}")]
    Shape(&'static str),
}

/// The persisted subset of board state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub theme: Theme,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    nodes: &'a [Arc<Node>],
    theme: Theme,
}

/// Result of decoding a stored blob.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub snapshot: BoardSnapshot,
    /// Entries discarded as malformed or duplicate.
    pub dropped: usize,
}

/// Serialize the persisted subset. Transient fields such as `selected` are
/// never written.
///
/// # Errors
///
/// Returns [`SnapshotError::Json`] if serialization fails.
pub fn encode(nodes: &[Arc<Node>], theme: Theme) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(&SnapshotRef { nodes, theme })?)
}

/// Parse and repair a stored blob.
///
/// # Errors
///
/// Returns an error when the blob is not JSON, is not an object, or its
/// `nodes` field is not an array.
pub fn decode(raw: &str) -> Result<Decoded, SnapshotError> {
    let root: Value = serde_json::from_str(raw)?;
    let Value::Object(mut map) = unwrap_envelope(root) else {
        return Err(SnapshotError::Shape("expected an object"));
    };

    let theme = match map.remove("theme") {
        None | Some(Value::Null) => Theme::default(),
        Some(raw_theme) => match Theme::deserialize(&raw_theme) {
            Ok(theme) => theme,
            Err(e) => {
                warn!(error = %e, "snapshot: unknown theme, using light");
                Theme::default()
            }
        },
    };

    let items = match map.remove("nodes") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(SnapshotError::Shape("`nodes` is not an array")),
    };

    let mut seen = HashSet::new();
    let mut nodes = Vec::with_capacity(items.len());
    let mut dropped = 0usize;
    for (index, item) in items.iter().enumerate() {
        match Node::deserialize(item) {
            Ok(node) if seen.insert(node.id.clone()) => nodes.push(node),
            Ok(node) => {
                warn!(index, id = %node.id, "snapshot: duplicate node id dropped");
                dropped += 1;
            }
            Err(e) => {
                warn!(index, error = %e, "snapshot: malformed node dropped");
                dropped += 1;
            }
        }
    }

    Ok(Decoded { snapshot: BoardSnapshot { nodes, theme }, dropped })
}

fn unwrap_envelope(root: Value) -> Value {
    match root {
        Value::Object(mut map) if !map.contains_key("nodes") && map.get("state").is_some_and(Value::is_object) => {
            map.remove("state").unwrap_or(Value::Null)
        }
        other => other,
    }
}
