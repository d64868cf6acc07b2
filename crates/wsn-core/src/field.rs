use rand::Rng;
use serde::Serialize;

use crate::energy::{self, Depletion};
use crate::error::{CoreError, CoreResult};
use crate::node::{Node, NodeId, Position};

/// The fixed set of sensor nodes taking part in a simulation.
///
/// Nodes are stored in id order and `NodeId(i)` always lives at index `i`.
/// The count and every position are frozen at construction; only energy
/// changes afterwards, through [`NodeField::drain`].
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NodeField {
    nodes: Vec<Node>,
}

impl NodeField {
    /// Scatter `count` nodes uniformly over `[margin, area - margin]` on both axes.
    ///
    /// Draws two values (x then y) per node in id order, so the layout is a
    /// pure function of the RNG state.
    pub fn generate<R: Rng>(
        count: usize,
        area: f64,
        margin: f64,
        initial_energy: f64,
        rng: &mut R,
    ) -> Self {
        let span = (area - 2.0 * margin).max(0.0);
        let positions: Vec<_> = (0..count)
            .map(|_| {
                let x = margin + rng.random::<f64>() * span;
                let y = margin + rng.random::<f64>() * span;
                Position::new(x, y)
            })
            .collect();
        Self::from_positions(positions, initial_energy)
    }

    /// Build a field from explicit positions, numbering nodes from zero.
    pub fn from_positions<I>(positions: I, initial_energy: f64) -> Self
    where
        I: IntoIterator<Item = Position>,
    {
        let nodes = positions
            .into_iter()
            .enumerate()
            .map(|(i, pos)| Node::new(NodeId(i as u32), pos, initial_energy))
            .collect();
        Self { nodes }
    }

    /// Number of nodes in the field.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the field has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in id order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Iterate nodes in id order.
    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    /// Look up a node by id.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// Drain energy from one node. See [`energy::drain`].
    pub fn drain(&mut self, id: NodeId, amount: f64) -> CoreResult<Option<Depletion>> {
        let node = self
            .nodes
            .get_mut(id.0 as usize)
            .ok_or(CoreError::NodeNotFound(id))?;
        Ok(energy::drain(node, amount))
    }

    /// Number of nodes that still have energy.
    pub fn alive_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_alive()).count()
    }

    /// Sum of remaining energy across all nodes.
    pub fn total_energy(&self) -> f64 {
        self.nodes.iter().map(Node::energy).sum()
    }
}

impl<'a> IntoIterator for &'a NodeField {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeState;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn generate_respects_margin() {
        let mut rng = StdRng::seed_from_u64(42);
        let field = NodeField::generate(200, 100.0, 10.0, 10.0, &mut rng);
        assert_eq!(field.len(), 200);
        for node in &field {
            let p = node.position();
            assert!((10.0..=90.0).contains(&p.x), "x out of range: {}", p.x);
            assert!((10.0..=90.0).contains(&p.y), "y out of range: {}", p.y);
            assert_eq!(node.energy(), 10.0);
        }
    }

    #[test]
    fn generate_is_deterministic() {
        let a = NodeField::generate(20, 100.0, 0.0, 1.0, &mut StdRng::seed_from_u64(7));
        let b = NodeField::generate(20, 100.0, 0.0, 1.0, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn ids_match_indices() {
        let field = NodeField::generate(5, 50.0, 0.0, 1.0, &mut StdRng::seed_from_u64(1));
        for (i, node) in field.iter().enumerate() {
            assert_eq!(node.id(), NodeId(i as u32));
            assert_eq!(field.get(node.id()).unwrap().id(), node.id());
        }
    }

    #[test]
    fn zero_width_area_collapses_to_margin() {
        let field = NodeField::generate(3, 20.0, 10.0, 1.0, &mut StdRng::seed_from_u64(0));
        for node in &field {
            assert_eq!(node.position(), Position::new(10.0, 10.0));
        }
    }

    #[test]
    fn drain_unknown_node() {
        let mut field = NodeField::from_positions([Position::new(0.0, 0.0)], 1.0);
        let err = field.drain(NodeId(9), 1.0).unwrap_err();
        assert!(matches!(err, CoreError::NodeNotFound(NodeId(9))));
    }

    #[test]
    fn drain_updates_totals() {
        let mut field = NodeField::from_positions(
            [Position::new(0.0, 0.0), Position::new(1.0, 1.0)],
            1.0,
        );
        let depleted = field.drain(NodeId(0), 2.0).unwrap();
        assert!(depleted.is_some());
        assert_eq!(field.alive_count(), 1);
        assert!((field.total_energy() - 1.0).abs() < f64::EPSILON);
        assert_eq!(field.get(NodeId(0)).unwrap().state(), NodeState::Inactive);
    }

    #[test]
    fn layouts_without_energy_start_inactive() {
        for energy in [0.0, -3.0, f64::NAN] {
            let field = NodeField::from_positions(
                [Position::new(0.0, 0.0), Position::new(5.0, 5.0)],
                energy,
            );
            assert_eq!(field.alive_count(), 0);
            for node in &field {
                assert_eq!(node.energy(), 0.0);
                assert_eq!(node.state(), NodeState::Inactive);
            }
        }
    }

    #[test]
    fn field_serializes_for_export() {
        let field = NodeField::from_positions([Position::new(1.0, 2.0)], 0.0);
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["nodes"][0]["energy"], 0.0);
        assert_eq!(json["nodes"][0]["state"], "inactive");
    }

    #[test]
    fn empty_field() {
        let field = NodeField::generate(0, 100.0, 10.0, 10.0, &mut StdRng::seed_from_u64(0));
        assert!(field.is_empty());
        assert_eq!(field.alive_count(), 0);
        assert_eq!(field.total_energy(), 0.0);
    }
}
