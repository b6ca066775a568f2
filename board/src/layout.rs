//! Tidy layout: a roughly square grid centred on the canvas origin.
//!
//! Cells are laid out on a fixed pitch of baseline size plus gap. A card's
//! own size only affects the bounding box used for centring, so oversized
//! cards may overlap their neighbours; equal baseline-sized cards never do.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use std::sync::Arc;

use crate::consts::{DEFAULT_NODE_HEIGHT, DEFAULT_NODE_WIDTH, TIDY_GAP};
use crate::node::{Node, NodeId, Position};

/// Where one node should end up after a tidy.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub id: NodeId,
    pub position: Position,
}

/// Axis-aligned rectangle given by its min and max corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    #[must_use]
    pub fn center(&self) -> Position {
        Position::new((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
    }

    fn include(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x + w);
        self.max_y = self.max_y.max(y + h);
    }

    fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }
}

/// Number of grid columns for `count` nodes: `ceil(sqrt(count))`.
#[must_use]
pub fn column_count(count: usize) -> usize {
    let mut columns = 0usize;
    while columns.saturating_mul(columns) < count {
        columns += 1;
    }
    columns
}

/// Centred grid targets for `nodes`, in collection order. Empty in, empty out.
#[must_use]
pub fn tidy_targets(nodes: &[Arc<Node>]) -> Vec<Target> {
    if nodes.is_empty() {
        return Vec::new();
    }

    let columns = column_count(nodes.len());
    let pitch_x = DEFAULT_NODE_WIDTH + TIDY_GAP;
    let pitch_y = DEFAULT_NODE_HEIGHT + TIDY_GAP;

    let mut bounds = Bounds::empty();
    let mut cells = Vec::with_capacity(nodes.len());
    for (index, node) in nodes.iter().enumerate() {
        let col = index % columns;
        let row = index / columns;
        #[allow(clippy::cast_precision_loss)]
        let (x, y) = (col as f64 * pitch_x, row as f64 * pitch_y);
        let size = node.effective_size();
        bounds.include(x, y, size.width, size.height);
        cells.push((node.id.clone(), x, y));
    }

    let center = bounds.center();
    cells
        .into_iter()
        .map(|(id, x, y)| Target { id, position: Position::new(x - center.x, y - center.y) })
        .collect()
}

/// Quartic ease-in-out on `t` in `[0, 1]`.
#[must_use]
pub fn ease_in_out_quart(t: f64) -> f64 {
    if t < 0.5 {
        8.0 * t * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
    }
}

/// Linear interpolation between two positions.
#[must_use]
pub fn lerp(from: Position, to: Position, t: f64) -> Position {
    Position::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t)
}
