//! Type definitions for the simulation.
//!
//! Contains the plain data structures shared by the mobility models and the
//! network loop:
//! - Points and displacements in world coordinates
//! - Nodes (stable identity plus mutable position)
//! - Read-only snapshots handed to observers after each iteration

use serde::{Deserialize, Serialize};

/// Side length of the square area nodes and landmarks are placed in.
///
/// Placement draws from `[0, WORLD_SIZE)` on both axes. Nodes are free to
/// leave the area afterwards; positions are never clamped.
pub const WORLD_SIZE: f64 = 100.0;

/// Simple 2D point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Per-step movement produced by a mobility model.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Displacement {
    pub dx: f64,
    pub dy: f64,
}

impl Displacement {
    pub const ZERO: Displacement = Displacement { dx: 0.0, dy: 0.0 };

    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Euclidean length of the displacement vector.
    pub fn length(&self) -> f64 {
        (self.dx * self.dx + self.dy * self.dy).sqrt()
    }
}

/// A mobile node. `node_id` equals the node's index in the network and never
/// changes; only the position is mutated, and only through `apply`.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub node_id: u32,
    pub position: Point,
}

impl Node {
    pub fn new(node_id: u32, position: Point) -> Self {
        Self { node_id, position }
    }

    /// Move the node by the given displacement.
    pub fn apply(&mut self, displacement: Displacement) {
        self.position.x += displacement.dx;
        self.position.y += displacement.dy;
    }
}

/// Position of a single node inside a [`NetworkSnapshot`].
#[derive(Debug, Clone, Serialize)]
pub struct NodeSnapshot {
    pub node_id: u32,
    pub x: f64,
    pub y: f64,
}

impl From<&Node> for NodeSnapshot {
    fn from(node: &Node) -> Self {
        NodeSnapshot {
            node_id: node.node_id,
            x: node.position.x,
            y: node.position.y,
        }
    }
}

/// Read-only view of the network after an iteration has completed
/// (movement and delivery passes both applied).
#[derive(Debug, Clone, Serialize)]
pub struct NetworkSnapshot {
    /// Zero-based iteration index this snapshot was taken after.
    pub iteration: u64,
    pub nodes: Vec<NodeSnapshot>,
    pub delivered_msgs: u64,
    pub total_msgs: u64,
}
