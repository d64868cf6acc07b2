use crate::context::RoundContext;
use crate::protocol::{Protocol, ProtocolKind, RoundAnnotations};

/// CSMA-style channel access without back-off or collision handling.
///
/// Each live node draws once against `channel_busy_probability`; a hit
/// means it transmits this round and pays `tx_cost`. Outcomes are
/// independent across nodes and across rounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentionProtocol;

impl Protocol for ContentionProtocol {
    fn kind(&self) -> ProtocolKind {
        ProtocolKind::Contention
    }

    fn step(&self, ctx: &mut RoundContext<'_>) -> RoundAnnotations {
        let field = ctx.field;
        let config = ctx.config;
        let mut out = RoundAnnotations::new(field.len());

        for node in field {
            if !node.is_alive() || !ctx.draw(config.channel_busy_probability) {
                continue;
            }
            if let Some(tags) = out.tags_mut(node.id()) {
                tags.transmitting = true;
            }
            out.charge(node.id(), config.tx_cost);
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

    fn field(n: usize) -> NodeField {
        NodeField::from_positions((0..n).map(|i| Position::new(i as f64, 0.0)), 1.0)
    }

    fn step(field: &NodeField, config: &WsnConfig, seed: u64) -> RoundAnnotations {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut ctx = RoundContext {
            round: 1,
            field,
            config,
            rng: &mut rng,
        };
        ContentionProtocol.step(&mut ctx)
    }

    #[test]
    fn zero_probability_never_transmits() {
        let config = WsnConfig::default().with_contention(0.0);
        for seed in 0..20 {
            let out = step(&field(25), &config, seed);
            assert_eq!(out.count(|t| t.transmitting), 0);
            assert!(out.drains().is_empty());
        }
    }

    #[test]
    fn certain_access_charges_every_live_node() {
        let mut f = field(4);
        f.drain(NodeId(2), 10.0).unwrap();
        let config = WsnConfig::default().with_costs(0.5, 0.3).with_contention(1.0);
        let out = step(&f, &config, 5);
        assert_eq!(out.count(|t| t.transmitting), 3);
        assert!(!out.tags(NodeId(2)).transmitting);
        assert_eq!(
            out.drains(),
            &[(NodeId(0), 0.5), (NodeId(1), 0.5), (NodeId(3), 0.5)]
        );
    }

    #[test]
    fn only_transmitters_are_charged() {
        let config = WsnConfig::default().with_contention(0.5);
        let out = step(&field(40), &config, 11);
        assert_eq!(out.drains().len(), out.count(|t| t.transmitting));
        for (id, _) in out.drains() {
            assert!(out.tags(*id).transmitting);
        }
    }
}
