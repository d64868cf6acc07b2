use rand::Rng;
use rand::rngs::StdRng;
use wsn_core::NodeField;

use crate::config::WsnConfig;

/// Read-only view of the start-of-round state handed to a protocol step.
///
/// The field is shared, not mutable: protocols describe drains, the
/// scheduler applies them.
pub struct RoundContext<'a> {
    /// The round being computed, starting at 1.
    pub round: u32,
    /// Nodes as they were at the end of the previous round.
    pub field: &'a NodeField,
    /// Simulation parameters.
    pub config: &'a WsnConfig,
    /// The simulation's seeded RNG.
    pub rng: &'a mut StdRng,
}

impl RoundContext<'_> {
    /// One Bernoulli trial: a single uniform draw compared against `probability`.
    ///
    /// Always consumes exactly one value, so `0.0` never succeeds and `1.0`
    /// always does without shifting later draws.
    pub fn draw(&mut self, probability: f64) -> bool {
        self.rng.random::<f64>() < probability
    }
}
