use wsn_core::neighbor;

use crate::context::RoundContext;
use crate::protocol::{Protocol, ProtocolKind, RoundAnnotations};

/// Directed-diffusion-style interest flooding.
///
/// Live nodes originate an interest with `interest_probability` and pay
/// `tx_cost`. Every node that had energy at the start of the round and lies
/// within `flood_radius` of an originator pays `rx_cost` once per flood it
/// hears, whether or not it originated one itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffusionProtocol;

impl Protocol for DiffusionProtocol {
    fn kind(&self) -> ProtocolKind {
        ProtocolKind::Diffusion
    }

    fn step(&self, ctx: &mut RoundContext<'_>) -> RoundAnnotations {
        let field = ctx.field;
        let config = ctx.config;
        let mut out = RoundAnnotations::new(field.len());

        let mut originators = Vec::new();
        for node in field {
            if node.is_alive() && ctx.draw(config.interest_probability) {
                originators.push(node);
            }
        }

        for origin in originators {
            if let Some(tags) = out.tags_mut(origin.id()) {
                tags.originator = true;
            }
            out.charge(origin.id(), config.tx_cost);

            let live = field.iter().filter(|n| n.is_alive());
            for receiver in neighbor::within(origin, live, config.flood_radius) {
                if let Some(tags) = out.tags_mut(receiver.id()) {
                    tags.receptions += 1;
                }
                out.charge(receiver.id(), config.rx_cost);
            }
        }

        out
    }
}
