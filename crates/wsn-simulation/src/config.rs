use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for a simulation run.
///
/// Shared options apply to every protocol; the remaining fields are read
/// only by the protocol they are named after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WsnConfig {
    /// Number of sensor nodes.
    pub node_count: usize,
    /// Side length of the square simulation area.
    pub area_size: f64,
    /// Distance kept free along each edge of the area when placing nodes.
    pub placement_margin: f64,
    /// Energy every node starts with.
    pub initial_energy: f64,
    /// Energy charged per transmission.
    pub tx_cost: f64,
    /// Energy charged per reception.
    pub rx_cost: f64,
    /// Last round the scheduler will simulate.
    pub max_rounds: u32,
    /// RNG seed for node placement and protocol draws.
    pub seed: u64,
    /// Maximum event log size (oldest events dropped when exceeded). 0 = unlimited.
    pub max_events: usize,
    /// Clustering: chance that a live node becomes cluster head in a round.
    pub cluster_head_probability: f64,
    /// Clustering: a member farther than this from every head is isolated.
    pub isolation_threshold: f64,
    /// Contention: chance that a live node transmits in a round.
    pub channel_busy_probability: f64,
    /// Diffusion: chance that a live node originates an interest in a round.
    pub interest_probability: f64,
    /// Diffusion: reach of an interest flood.
    pub flood_radius: f64,
}

impl Default for WsnConfig {
    fn default() -> Self {
        Self {
            node_count: 50,
            area_size: 100.0,
            placement_margin: 10.0,
            initial_energy: 10.0,
            tx_cost: 0.5,
            rx_cost: 0.3,
            max_rounds: 50,
            seed: 42,
            max_events: 0,
            cluster_head_probability: 0.2,
            isolation_threshold: 20.0,
            channel_busy_probability: 0.3,
            interest_probability: 0.2,
            flood_radius: 20.0,
        }
    }
}

impl WsnConfig {
    /// Set the number of nodes.
    pub fn with_node_count(mut self, count: usize) -> Self {
        self.node_count = count;
        self
    }

    /// Set the side length of the simulation area.
    pub fn with_area_size(mut self, size: f64) -> Self {
        self.area_size = size;
        self
    }

    /// Set the placement margin.
    pub fn with_placement_margin(mut self, margin: f64) -> Self {
        self.placement_margin = margin;
        self
    }

    /// Set the starting energy of every node.
    pub fn with_initial_energy(mut self, energy: f64) -> Self {
        self.initial_energy = energy;
        self
    }

    /// Set the transmission and reception costs.
    pub fn with_costs(mut self, tx: f64, rx: f64) -> Self {
        self.tx_cost = tx;
        self.rx_cost = rx;
        self
    }

    /// Set the round limit.
    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = rounds;
        self
    }

    /// Set the RNG seed for deterministic simulation.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the maximum event log size (0 = unlimited).
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }

    /// Set the clustering parameters.
    pub fn with_clustering(mut self, head_probability: f64, isolation_threshold: f64) -> Self {
        self.cluster_head_probability = head_probability;
        self.isolation_threshold = isolation_threshold;
        self
    }

    /// Set the contention parameter.
    pub fn with_contention(mut self, busy_probability: f64) -> Self {
        self.channel_busy_probability = busy_probability;
        self
    }

    /// Set the diffusion parameters.
    pub fn with_diffusion(mut self, interest_probability: f64, flood_radius: f64) -> Self {
        self.interest_probability = interest_probability;
        self.flood_radius = flood_radius;
        self
    }

    /// Check every option, reporting the first invalid one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.node_count == 0 {
            return Err(ConfigError::NoNodes);
        }
        if !positive(self.area_size) {
            return Err(ConfigError::NonPositiveArea(self.area_size));
        }
        if self.max_rounds == 0 {
            return Err(ConfigError::NoRounds);
        }
        if !positive(self.initial_energy) {
            return Err(ConfigError::NonPositiveEnergy(self.initial_energy));
        }
        non_negative("placement_margin", self.placement_margin)?;
        if 2.0 * self.placement_margin > self.area_size {
            return Err(ConfigError::MarginTooLarge {
                margin: self.placement_margin,
                area: self.area_size,
            });
        }
        non_negative("tx_cost", self.tx_cost)?;
        non_negative("rx_cost", self.rx_cost)?;
        non_negative("isolation_threshold", self.isolation_threshold)?;
        non_negative("flood_radius", self.flood_radius)?;
        probability("cluster_head_probability", self.cluster_head_probability)?;
        probability("channel_busy_probability", self.channel_busy_probability)?;
        probability("interest_probability", self.interest_probability)?;
        Ok(())
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

fn probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ProbabilityOutOfRange { name, value })
    }
}
