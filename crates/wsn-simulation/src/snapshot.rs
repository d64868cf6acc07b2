use serde::{Deserialize, Serialize};
use wsn_core::{NodeField, NodeId, NodeState, Position};

use crate::protocol::{Annotations, ProtocolKind};

/// One node as it stood at the end of a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    /// Node identifier.
    pub id: NodeId,
    /// Fixed position.
    pub position: Position,
    /// Remaining energy.
    pub energy: f64,
    /// Liveness at the end of the round.
    pub state: NodeState,
    /// Flags computed by the protocol during the round.
    pub tags: Annotations,
}

/// Immutable record of every node at the end of a round.
///
/// Round 0 is the setup state before any protocol step ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    /// Round number.
    pub round: u32,
    /// The protocol that produced this round.
    pub protocol: ProtocolKind,
    /// Energy actually removed during the round, after clamping.
    pub drained: f64,
    /// Every node in id order.
    pub nodes: Vec<NodeSnapshot>,
}

impl RoundSnapshot {
    /// Copy the field and this round's tags into a snapshot.
    ///
    /// Missing tags (as for round 0) default to all-clear.
    pub fn capture(
        round: u32,
        protocol: ProtocolKind,
        field: &NodeField,
        tags: &[Annotations],
        drained: f64,
    ) -> Self {
        let nodes = field
            .iter()
            .enumerate()
            .map(|(i, node)| NodeSnapshot {
                id: node.id(),
                position: node.position(),
                energy: node.energy(),
                state: node.state(),
                tags: tags.get(i).copied().unwrap_or_default(),
            })
            .collect();
        Self {
            round,
            protocol,
            drained,
            nodes,
        }
    }

    /// Look up one node.
    pub fn node(&self, id: NodeId) -> Option<&NodeSnapshot> {
        self.nodes.get(id.0 as usize)
    }

    /// Aggregate energy figures for this round.
    pub fn summary(&self) -> RoundSummary {
        let alive = self
            .nodes
            .iter()
            .filter(|n| n.state == NodeState::Active)
            .count();
        let energies = self.nodes.iter().map(|n| n.energy);
        let total_energy: f64 = energies.clone().sum();
        let mean_energy = if self.nodes.is_empty() {
            0.0
        } else {
            total_energy / self.nodes.len() as f64
        };
        RoundSummary {
            round: self.round,
            alive,
            depleted: self.nodes.len() - alive,
            total_energy,
            mean_energy,
            min_energy: energies.clone().min_by(f64::total_cmp).unwrap_or(0.0),
            max_energy: energies.max_by(f64::total_cmp).unwrap_or(0.0),
            drained: self.drained,
        }
    }
}

/// Aggregate energy statistics of a single round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    /// Round number.
    pub round: u32,
    /// Nodes still active.
    pub alive: usize,
    /// Nodes that are inactive.
    pub depleted: usize,
    /// Sum of remaining energy.
    pub total_energy: f64,
    /// Mean remaining energy per node.
    pub mean_energy: f64,
    /// Lowest remaining energy.
    pub min_energy: f64,
    /// Highest remaining energy.
    pub max_energy: f64,
    /// Energy removed during the round.
    pub drained: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> NodeField {
        let mut field = NodeField::from_positions(
            [
                Position::new(0.0, 0.0),
                Position::new(1.0, 0.0),
                Position::new(2.0, 0.0),
            ],
            2.0,
        );
        field.drain(NodeId(0), 5.0).unwrap();
        field.drain(NodeId(1), 0.5).unwrap();
        field
    }

    #[test]
    fn capture_copies_nodes_and_tags() {
        let tags = [
            Annotations::default(),
            Annotations {
                transmitting: true,
                ..Default::default()
            },
        ];
        let snap = RoundSnapshot::capture(3, ProtocolKind::Contention, &field(), &tags, 2.5);
        assert_eq!(snap.round, 3);
        assert_eq!(snap.nodes.len(), 3);
        assert!(snap.node(NodeId(1)).unwrap().tags.transmitting);
        assert_eq!(snap.node(NodeId(2)).unwrap().tags, Annotations::default());
        assert_eq!(snap.node(NodeId(0)).unwrap().state, NodeState::Inactive);
    }

    #[test]
    fn summary_aggregates_energy() {
        let snap = RoundSnapshot::capture(1, ProtocolKind::Clustering, &field(), &[], 2.5);
        let summary = snap.summary();
        assert_eq!(summary.alive, 2);
        assert_eq!(summary.depleted, 1);
        assert!((summary.total_energy - 3.5).abs() < 1e-12);
        assert!((summary.mean_energy - 3.5 / 3.0).abs() < 1e-12);
        assert_eq!(summary.min_energy, 0.0);
        assert_eq!(summary.max_energy, 2.0);
        assert!((summary.drained - 2.5).abs() < 1e-12);
    }

    #[test]
    fn summary_of_empty_snapshot() {
        let snap = RoundSnapshot::capture(0, ProtocolKind::Diffusion, &NodeField::default(), &[], 0.0);
        let summary = snap.summary();
        assert_eq!(summary.alive, 0);
        assert_eq!(summary.mean_energy, 0.0);
    }

    #[test]
    fn serializes_to_json() {
        let snap = RoundSnapshot::capture(1, ProtocolKind::Diffusion, &field(), &[], 0.0);
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["protocol"], "diffusion");
        assert_eq!(json["nodes"][0]["state"], "inactive");
        assert_eq!(json["nodes"].as_array().unwrap().len(), 3);
    }
}
