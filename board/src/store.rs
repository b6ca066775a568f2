//! Board store: the single owner of the node list and theme.
//!
//! DESIGN
//! ======
//! Every mutation replaces `nodes` with a new `Vec<Arc<Node>>` in which only
//! the touched nodes are new allocations. Mutations that change the
//! persisted subset set a dirty flag; [`BoardStore::flush`] writes the
//! snapshot and clears it, and callers decide how often to flush.
//!
//! Not-found ids are never errors. Operations that target a node return
//! `bool` so callers can tell, but nothing fails.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::animation::{AnimationHandle, Animator, Track};
use crate::change::{NodeChange, apply_node_changes};
use crate::clock::{Clock, SystemClock};
use crate::consts::{STORAGE_KEY, TIDY_DURATION_MS};
use crate::export::{ExportArtifact, ExportError};
use crate::layout::tidy_targets;
use crate::node::{CardTheme, Node, NodeData, NodeDataPatch, NodeId, Position, Theme, WidgetType};
use crate::snapshot::{self, BoardSnapshot, SnapshotError};
use crate::storage::{Storage, StorageError};
use crate::widget::WidgetDefaults;

#[derive(Debug, thiserror::Error)]
pub enum FlushError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub struct BoardStore {
    nodes: Vec<Arc<Node>>,
    theme: Theme,
    dirty: bool,
    last_id_millis: i64,
    animator: Animator,
    clock: Arc<dyn Clock>,
}

impl BoardStore {
    /// An empty, light-themed board on the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// An empty, light-themed board on the given clock.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            nodes: Vec::new(),
            theme: Theme::default(),
            dirty: false,
            last_id_millis: i64::MIN,
            animator: Animator::new(),
            clock,
        }
    }

    /// A board restored from `snapshot`. Selection state starts cleared.
    #[must_use]
    pub fn from_snapshot(snapshot: BoardSnapshot, clock: Arc<dyn Clock>) -> Self {
        let mut store = Self::with_clock(clock);
        store.theme = snapshot.theme;
        store.nodes = snapshot.nodes.into_iter().map(Arc::new).collect();
        store
    }

    /// Restore from the last persisted snapshot in `storage`, or start empty.
    ///
    /// Read failures and corrupt blobs are logged and yield an empty board;
    /// hydration itself never fails.
    pub fn hydrate(storage: &dyn Storage, clock: Arc<dyn Clock>) -> Self {
        let raw = match storage.get_item(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("board: no persisted snapshot, starting empty");
                return Self::with_clock(clock);
            }
            Err(e) => {
                warn!(error = %e, "board: snapshot read failed, starting empty");
                return Self::with_clock(clock);
            }
        };

        match snapshot::decode(&raw) {
            Ok(decoded) => {
                info!(
                    nodes = decoded.snapshot.nodes.len(),
                    dropped = decoded.dropped,
                    theme = %decoded.snapshot.theme,
                    "board: hydrated"
                );
                let mut store = Self::from_snapshot(decoded.snapshot, clock);
                // Rewrite the repaired blob on the next flush.
                store.dirty = decoded.dropped > 0;
                store
            }
            Err(e) => {
                warn!(error = %e, "board: snapshot unreadable, starting empty");
                Self::with_clock(clock)
            }
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn nodes(&self) -> &[Arc<Node>] {
        &self.nodes
    }

    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id).map(|n| &**n)
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether there are changes not yet written by [`BoardStore::flush`].
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The persisted subset as an owned value.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot { nodes: self.nodes.iter().map(|n| Node::clone(n)).collect(), theme: self.theme }
    }

    // --- Mutations ---

    /// Create a node of `widget_type` at `position` and put it on top.
    ///
    /// Returns the new node's id.
    pub fn add_node(&mut self, widget_type: WidgetType, position: Position) -> NodeId {
        let id = self.next_id(&widget_type);
        let defaults = WidgetDefaults::for_type(&widget_type, self.clock.now().date());
        debug!(%id, %widget_type, x = position.x, y = position.y, "board: node added");
        let node = Node {
            id: id.clone(),
            position,
            data: NodeData {
                title: widget_type.as_str().to_string(),
                widget_type,
                theme: CardTheme::Glass,
                content: defaults.content,
                extra: serde_json::Map::new(),
            },
            width: Some(defaults.size.width),
            height: Some(defaults.size.height),
            selected: false,
        };

        let mut nodes = self.nodes.clone();
        nodes.push(Arc::new(node));
        self.commit(nodes);
        id
    }

    /// Remove the node with `id`. Returns false (and does nothing) if absent.
    pub fn remove_node(&mut self, id: &str) -> bool {
        if !self.contains(id) {
            return false;
        }
        let nodes = self.nodes.iter().filter(|n| n.id != id).cloned().collect();
        self.commit(nodes);
        self.animator.release(id);
        debug!(%id, "board: node removed");
        true
    }

    /// Shallow-merge `patch` into the data bag of `id`. Returns false if absent.
    pub fn update_node_data(&mut self, id: &str, patch: &NodeDataPatch) -> bool {
        if !self.contains(id) {
            return false;
        }
        let nodes = self
            .nodes
            .iter()
            .map(|n| {
                if n.id == id {
                    let mut updated = Node::clone(n);
                    patch.apply_to(&mut updated.data);
                    Arc::new(updated)
                } else {
                    Arc::clone(n)
                }
            })
            .collect();
        self.commit(nodes);
        debug!(%id, "board: node data updated");
        true
    }

    /// Apply a batch of canvas changes in order.
    ///
    /// A drag on a node that is mid-tidy takes it out of the tween.
    pub fn on_nodes_change(&mut self, changes: &[NodeChange]) {
        if changes.is_empty() {
            return;
        }
        for change in changes {
            if let NodeChange::Move { id, position: Some(_) } = change {
                self.animator.release(id);
            }
        }
        let nodes = apply_node_changes(changes, &self.nodes);
        if changes.iter().any(NodeChange::touches_persisted_state) {
            self.commit(nodes);
        } else {
            self.nodes = nodes;
        }
        debug!(count = changes.len(), "board: changes applied");
    }

    /// Overwrite positions by id. Unknown ids are skipped.
    ///
    /// This is the only write path used by animations.
    pub fn set_node_positions(&mut self, updates: &[(NodeId, Position)]) {
        let changes: Vec<NodeChange> = updates
            .iter()
            .map(|(id, pos)| NodeChange::moved(id.clone(), *pos))
            .collect();
        let nodes = apply_node_changes(&changes, &self.nodes);
        self.commit(nodes);
    }

    /// Flip between light and dark. Returns the new theme.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.dirty = true;
        debug!(theme = %self.theme, "board: theme toggled");
        self.theme
    }

    // --- Tidy ---

    /// Start animating every node to its tidy grid cell, beginning at
    /// `now_ms` on the caller's frame clock.
    ///
    /// Replaces any tidy already in flight. Returns `None` on an empty board.
    pub fn rearrange_nodes(&mut self, now_ms: f64) -> Option<AnimationHandle> {
        let targets = tidy_targets(&self.nodes);
        if targets.is_empty() {
            return None;
        }
        let tracks = self
            .nodes
            .iter()
            .zip(targets)
            .map(|(node, target)| Track { id: target.id, from: node.position, to: target.position })
            .collect();
        let handle = self.animator.start(tracks, now_ms, TIDY_DURATION_MS);
        info!(nodes = self.nodes.len(), "board: tidy started");
        Some(handle)
    }

    /// Write the tidy frame for `now_ms`. Returns true while the animation
    /// still has frames left.
    pub fn advance_animation(&mut self, now_ms: f64) -> bool {
        let Some(frame) = self.animator.frame(now_ms) else {
            return false;
        };
        self.set_node_positions(&frame.positions);
        if frame.finished {
            debug!("board: tidy finished");
        }
        !frame.finished
    }

    /// Stop the tidy identified by `handle`, leaving nodes where they are.
    pub fn cancel_animation(&mut self, handle: AnimationHandle) -> bool {
        self.animator.cancel(handle)
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animator.is_running()
    }

    /// Handle of the tidy in flight, if any.
    #[must_use]
    pub fn active_animation(&self) -> Option<AnimationHandle> {
        self.animator.active_handle()
    }

    // --- Persistence / export ---

    /// Build the export artifact for the current nodes. No state changes.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or timestamp formatting fails.
    pub fn export_board(&self) -> Result<ExportArtifact, ExportError> {
        ExportArtifact::build(&self.nodes, self.clock.now())
    }

    /// Write the snapshot if anything changed since the last flush.
    ///
    /// Returns true when a write happened. The dirty flag is cleared only
    /// after a successful write.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the storage write fails.
    pub fn flush(&mut self, storage: &dyn Storage) -> Result<bool, FlushError> {
        if !self.dirty {
            return Ok(false);
        }
        let blob = snapshot::encode(&self.nodes, self.theme)?;
        storage.set_item(STORAGE_KEY, &blob)?;
        self.dirty = false;
        debug!(bytes = blob.len(), "board: snapshot flushed");
        Ok(true)
    }

    // --- Internals ---

    fn contains(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    fn commit(&mut self, nodes: Vec<Arc<Node>>) {
        self.nodes = nodes;
        self.dirty = true;
    }

    /// `<widgetType>-<millis>`, where millis never repeats within this store
    /// and skips ids already on the board.
    fn next_id(&mut self, widget_type: &WidgetType) -> NodeId {
        let mut millis = self.clock.now_millis().max(self.last_id_millis.saturating_add(1));
        loop {
            let id = format!("{widget_type}-{millis}");
            if !self.contains(&id) {
                self.last_id_millis = millis;
                return id;
            }
            millis = millis.saturating_add(1);
        }
    }
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::new()
    }
}
