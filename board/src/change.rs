//! Canvas change events and the reducer that folds them into the node list.
//!
//! The canvas reports gestures as a batch of [`NodeChange`]s. The reducer
//! returns a fresh collection in which untouched nodes are the *same*
//! `Arc`s as before, so a renderer can skip them by pointer comparison.

#[cfg(test)]
#[path = "change_test.rs"]
mod change_test;

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::node::{Dimensions, Node, NodeId, Position};

/// A single canvas-originated mutation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeChange {
    /// Drag. A missing `position` only reports drag state and changes nothing.
    #[serde(alias = "position")]
    Move {
        id: NodeId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        position: Option<Position>,
    },
    /// Resize. A missing `dimensions` changes nothing.
    #[serde(alias = "dimensions")]
    Resize {
        id: NodeId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dimensions: Option<Dimensions>,
    },
    Remove { id: NodeId },
    Select { id: NodeId, selected: bool },
}

impl NodeChange {
    /// Move `id` to `position`.
    #[must_use]
    pub fn moved(id: impl Into<NodeId>, position: Position) -> Self {
        Self::Move { id: id.into(), position: Some(position) }
    }

    /// Resize `id` to `dimensions`.
    #[must_use]
    pub fn resized(id: impl Into<NodeId>, dimensions: Dimensions) -> Self {
        Self::Resize { id: id.into(), dimensions: Some(dimensions) }
    }

    #[must_use]
    pub fn removed(id: impl Into<NodeId>) -> Self {
        Self::Remove { id: id.into() }
    }

    #[must_use]
    pub fn selected(id: impl Into<NodeId>, selected: bool) -> Self {
        Self::Select { id: id.into(), selected }
    }

    /// The node this change targets.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Move { id, .. } | Self::Resize { id, .. } | Self::Remove { id } | Self::Select { id, .. } => id,
        }
    }

    /// Whether applying this change can alter the persisted board.
    #[must_use]
    pub fn touches_persisted_state(&self) -> bool {
        !matches!(self, Self::Select { .. })
    }
}

/// Fold `changes`, in order, over `nodes`.
///
/// Changes naming unknown ids are ignored. Nodes without a matching change
/// are passed through as the same `Arc`; a node is cloned only when a change
/// actually targets it.
#[must_use]
pub fn apply_node_changes(changes: &[NodeChange], nodes: &[Arc<Node>]) -> Vec<Arc<Node>> {
    if changes.is_empty() {
        return nodes.to_vec();
    }

    let mut by_id: HashMap<&str, Vec<&NodeChange>> = HashMap::new();
    for change in changes {
        by_id.entry(change.id()).or_default().push(change);
    }

    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        let Some(pending) = by_id.get(node.id.as_str()) else {
            out.push(Arc::clone(node));
            continue;
        };
        if let Some(updated) = apply_to_node(node, pending) {
            out.push(updated);
        }
    }
    out
}

/// Apply one node's changes; `None` means the node was removed.
fn apply_to_node(node: &Arc<Node>, changes: &[&NodeChange]) -> Option<Arc<Node>> {
    let mut node = Arc::clone(node);
    for change in changes {
        match change {
            NodeChange::Move { position: Some(position), .. } => {
                Arc::make_mut(&mut node).position = *position;
            }
            NodeChange::Resize { dimensions: Some(dims), .. } => {
                let n = Arc::make_mut(&mut node);
                n.width = Some(dims.width);
                n.height = Some(dims.height);
            }
            NodeChange::Select { selected, .. } => {
                Arc::make_mut(&mut node).selected = *selected;
            }
            NodeChange::Remove { .. } => return None,
            NodeChange::Move { position: None, .. } | NodeChange::Resize { dimensions: None, .. } => {}
        }
    }
    Some(node)
}
