use serde::{Deserialize, Serialize};

use crate::node::{Node, NodeId, NodeState};

/// Emitted when a drain takes a node's energy to zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Depletion {
    /// The node that ran out of energy.
    pub node: NodeId,
    /// The part of the drain that could not be paid.
    pub overdraft: f64,
}

/// Subtract `amount` from the node's energy, clamping at zero.
///
/// Returns a [`Depletion`] the first time the node reaches zero. Draining an
/// inactive node changes nothing and returns `None`. Negative and NaN
/// amounts are treated as zero.
pub fn drain(node: &mut Node, amount: f64) -> Option<Depletion> {
    if node.state == NodeState::Inactive {
        node.energy = 0.0;
        return None;
    }

    let amount = if amount > 0.0 { amount } else { 0.0 };
    let remaining = node.energy - amount;
    if remaining > 0.0 {
        node.energy = remaining;
        return None;
    }

    node.energy = 0.0;
    node.state = NodeState::Inactive;
    Some(Depletion {
        node: node.id(),
        overdraft: -remaining,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Position;

    fn node(energy: f64) -> Node {
        Node::new(NodeId(1), Position::new(0.0, 0.0), energy)
    }

    #[test]
    fn drain_subtracts() {
        let mut n = node(10.0);
        assert!(drain(&mut n, 0.5).is_none());
        assert!((n.energy() - 9.5).abs() < f64::EPSILON);
        assert_eq!(n.state(), NodeState::Active);
    }

    #[test]
    fn drain_to_exactly_zero_depletes() {
        let mut n = node(1.0);
        drain(&mut n, 0.5);
        let signal = drain(&mut n, 0.5).unwrap();
        assert_eq!(signal.node, NodeId(1));
        assert_eq!(signal.overdraft, 0.0);
        assert_eq!(n.energy(), 0.0);
        assert_eq!(n.state(), NodeState::Inactive);
    }

    #[test]
    fn overdraft_clamps_at_zero() {
        let mut n = node(0.2);
        let signal = drain(&mut n, 1.0).unwrap();
        assert!((signal.overdraft - 0.8).abs() < 1e-12);
        assert_eq!(n.energy(), 0.0);
    }

    #[test]
    fn depletion_is_idempotent() {
        let mut n = node(0.1);
        assert!(drain(&mut n, 5.0).is_some());
        assert!(drain(&mut n, 5.0).is_none());
        assert!(drain(&mut n, 0.0).is_none());
        assert_eq!(n.energy(), 0.0);
        assert_eq!(n.state(), NodeState::Inactive);
    }

    #[test]
    fn negative_amount_is_ignored() {
        let mut n = node(2.0);
        assert!(drain(&mut n, -3.0).is_none());
        assert_eq!(n.energy(), 2.0);
        assert!(drain(&mut n, f64::NAN).is_none());
        assert_eq!(n.energy(), 2.0);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn energy_never_negative_or_increasing(
                start in 0.0f64..50.0,
                drains in proptest::collection::vec(-5.0f64..5.0, 0..40),
            ) {
                let mut n = node(start);
                let mut last = n.energy();
                for amount in drains {
                    drain(&mut n, amount);
                    prop_assert!(n.energy() >= 0.0);
                    prop_assert!(n.energy() <= last);
                    if n.energy() == 0.0 {
                        prop_assert_eq!(n.state(), NodeState::Inactive);
                    }
                    last = n.energy();
                }
            }
        }
    }
}
