use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier for a sensor node, assigned in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A point in the simulation area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Position {
    /// Create a position from its coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Planar Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Liveness of a node. `Inactive` is absorbing: there is no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeState {
    /// The node still has energy.
    Active,
    /// The node's energy reached zero.
    Inactive,
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
        }
    }
}

/// A single sensor node.
///
/// Identity and position are fixed at construction. Energy only changes
/// through [`crate::energy::drain`], which keeps it non-negative and flips
/// the node to [`NodeState::Inactive`] once it hits zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    id: NodeId,
    position: Position,
    pub(crate) energy: f64,
    pub(crate) state: NodeState,
}

impl Node {
    /// Create an active node. A non-positive `energy` yields an inactive node at zero.
    pub fn new(id: NodeId, position: Position, energy: f64) -> Self {
        if energy > 0.0 {
            Self {
                id,
                position,
                energy,
                state: NodeState::Active,
            }
        } else {
            Self {
                id,
                position,
                energy: 0.0,
                state: NodeState::Inactive,
            }
        }
    }

    /// The node's identifier.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The node's fixed position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Remaining energy, never negative.
    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// Current liveness state.
    pub fn state(&self) -> NodeState {
        self.state
    }

    /// Returns `true` while the node has energy left.
    pub fn is_alive(&self) -> bool {
        self.energy > 0.0
    }

    /// Distance between this node and another.
    pub fn distance_to(&self, other: &Node) -> f64 {
        self.position.distance_to(&other.position)
    }
}
