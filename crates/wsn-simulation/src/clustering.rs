use wsn_core::neighbor;

use crate::context::RoundContext;
use crate::protocol::{Protocol, ProtocolKind, RoundAnnotations};

/// LEACH-style clustering without rotation memory.
///
/// Every live node independently becomes cluster head with
/// `cluster_head_probability`. Members farther than `isolation_threshold`
/// from every head (or all members, when no head was elected) are isolated
/// and pay a doubled transmission cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClusteringProtocol;

impl Protocol for ClusteringProtocol {
    fn kind(&self) -> ProtocolKind {
        ProtocolKind::Clustering
    }

    fn step(&self, ctx: &mut RoundContext<'_>) -> RoundAnnotations {
        let field = ctx.field;
        let config = ctx.config;
        let mut out = RoundAnnotations::new(field.len());

        let mut heads = Vec::new();
        for node in field {
            if node.is_alive() && ctx.draw(config.cluster_head_probability) {
                heads.push(node);
            }
        }

        for node in field {
            let tags = match out.tags_mut(node.id()) {
                Some(tags) => tags,
                None => continue,
            };
            let is_head = heads.iter().any(|h| h.id() == node.id());
            let cost = if is_head {
                tags.cluster_head = true;
                config.tx_cost
            } else {
                // Min over an empty head set is infinite, so every member is isolated.
                let nearest =
                    neighbor::nearest_distance(node, heads.iter().copied()).unwrap_or(f64::INFINITY);
                if nearest > config.isolation_threshold {
                    tags.isolated = true;
                    2.0 * config.tx_cost
                } else {
                    config.rx_cost
                }
            };
            out.charge(node.id(), cost);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WsnConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use wsn_core::{NodeField, NodeId, Position};

    fn step(field: &NodeField, config: &WsnConfig, seed: u64) -> RoundAnnotations {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut ctx = RoundContext {
            round: 1,
            field,
            config,
            rng: &mut rng,
        };
        ClusteringProtocol.step(&mut ctx)
    }

    fn line(n: usize, spacing: f64) -> NodeField {
        NodeField::from_positions((0..n).map(|i| Position::new(i as f64 * spacing, 0.0)), 1.0)
    }

    #[test]
    fn certain_election_makes_everyone_head() {
        let field = line(3, 5.0);
        let config = WsnConfig::default().with_costs(0.5, 0.3).with_clustering(1.0, 20.0);
        let out = step(&field, &config, 1);
        assert_eq!(out.count(|t| t.cluster_head), 3);
        assert_eq!(out.count(|t| t.isolated), 0);
        assert!(out.drains().iter().all(|(_, amount)| *amount == 0.5));
    }

    #[test]
    fn no_heads_means_everyone_isolated() {
        let field = line(4, 1.0);
        let config = WsnConfig::default().with_costs(0.5, 0.3).with_clustering(0.0, 1000.0);
        let out = step(&field, &config, 1);
        assert_eq!(out.count(|t| t.cluster_head), 0);
        assert_eq!(out.count(|t| t.isolated), 4);
        let total: f64 = out.drains().iter().map(|(_, a)| a).sum();
        assert!((total - 4.0).abs() < 1e-12);
    }

    #[test]
    fn members_near_a_head_pay_reception() {
        // Node 0 at the origin is the only live candidate, so it must be head.
        let mut field = NodeField::from_positions(
            [
                Position::new(0.0, 0.0),
                Position::new(10.0, 0.0),
                Position::new(50.0, 0.0),
            ],
            1.0,
        );
        field.drain(NodeId(1), 5.0).unwrap();
        field.drain(NodeId(2), 5.0).unwrap();
        let config = WsnConfig::default().with_costs(0.5, 0.3).with_clustering(1.0, 20.0);
        let out = step(&field, &config, 3);

        assert!(out.tags(NodeId(0)).cluster_head);
        assert!(!out.tags(NodeId(1)).isolated);
        assert!(out.tags(NodeId(2)).isolated);
        assert_eq!(
            out.drains(),
            &[(NodeId(0), 0.5), (NodeId(1), 0.3), (NodeId(2), 1.0)]
        );
    }

    #[test]
    fn threshold_is_exclusive() {
        let mut field = NodeField::from_positions(
            [Position::new(0.0, 0.0), Position::new(20.0, 0.0)],
            1.0,
        );
        field.drain(NodeId(1), 5.0).unwrap();
        let config = WsnConfig::default().with_clustering(1.0, 20.0);
        let out = step(&field, &config, 0);
        assert!(!out.tags(NodeId(1)).isolated);
    }

    #[test]
    fn empty_field_is_fine() {
        let field = NodeField::default();
        let out = step(&field, &WsnConfig::default(), 0);
        assert!(out.drains().is_empty());
        assert!(out.all_tags().is_empty());
    }

    #[test]
    fn same_seed_same_heads() {
        let field = line(30, 3.0);
        let config = WsnConfig::default();
        assert_eq!(step(&field, &config, 9), step(&field, &config, 9));
    }
}
