//! Core types for the WSN simulator: sensor nodes, the node field, and the
//! two primitives every protocol shares.
//!
//! Energy only ever moves downwards through [`energy::drain`], and proximity
//! is answered by [`neighbor::within`]. Nothing here knows about rounds or
//! protocols; that lives in `wsn-simulation`.

/// Energy drain with clamp-at-zero and depletion signalling.
pub mod energy;
/// Error types used throughout the crate.
pub mod error;
/// The fixed, ordered collection of nodes.
pub mod field;
/// Euclidean proximity queries between nodes.
pub mod neighbor;
/// Node identity, position, and liveness.
pub mod node;

/// Re-export energy types.
pub use energy::{Depletion, drain};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export the node field.
pub use field::NodeField;
/// Re-export node types.
pub use node::{Node, NodeId, NodeState, Position};
