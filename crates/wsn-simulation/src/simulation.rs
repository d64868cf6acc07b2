use rand::SeedableRng;
use rand::rngs::StdRng;
use wsn_core::{Depletion, NodeField, NodeId};

use crate::config::WsnConfig;
use crate::context::RoundContext;
use crate::error::{SequencingError, SimResult};
use crate::event::{EventLog, SimEvent, SimEventKind};
use crate::protocol::{Protocol, ProtocolKind};
use crate::snapshot::RoundSnapshot;

/// Where the scheduler's cursor stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Set up, no round simulated yet.
    Idle,
    /// The given round is current.
    Running {
        /// The current round.
        round: u32,
    },
    /// Every round up to `max_rounds` has been simulated and shown.
    Completed,
}

/// What a call to [`Simulation::advance`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// A new round was computed.
    Simulated(u32),
    /// The cursor moved forward onto an already recorded round.
    Replayed(u32),
    /// Nothing left to do.
    Completed,
}

/// The round scheduler.
///
/// Owns the live node field, the seeded RNG, one protocol, and the history
/// of every round simulated so far. New rounds are only ever computed at
/// the live edge; moving the cursor backwards and forwards replays recorded
/// snapshots and never touches the RNG.
pub struct Simulation {
    config: WsnConfig,
    protocol: Box<dyn Protocol>,
    field: NodeField,
    rng: StdRng,
    initial: RoundSnapshot,
    history: Vec<RoundSnapshot>,
    cursor: usize,
    state: SchedulerState,
    events: EventLog,
    first_depletion: Option<u32>,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("protocol", &self.protocol.kind())
            .field("state", &self.state)
            .field("rounds", &self.history.len())
            .field("events", &self.events.len())
            .finish()
    }
}

impl Simulation {
    /// Validate the configuration and scatter nodes over the area.
    ///
    /// `seed` overrides `config.seed` when given. Placement and every later
    /// protocol draw come from the same RNG stream.
    pub fn initialize(
        config: WsnConfig,
        protocol: ProtocolKind,
        seed: Option<u64>,
    ) -> SimResult<Self> {
        config.validate()?;
        let seed = seed.unwrap_or(config.seed);
        let mut rng = StdRng::seed_from_u64(seed);
        let field = NodeField::generate(
            config.node_count,
            config.area_size,
            config.placement_margin,
            config.initial_energy,
            &mut rng,
        );
        tracing::info!(%protocol, nodes = field.len(), seed, "simulation initialized");
        Ok(Self::assemble(config, protocol, field, rng))
    }

    /// Like [`Simulation::initialize`], but with a caller-supplied layout.
    ///
    /// `config.node_count` is replaced by the field's size before validation.
    pub fn with_field(
        mut config: WsnConfig,
        protocol: ProtocolKind,
        field: NodeField,
        seed: Option<u64>,
    ) -> SimResult<Self> {
        config.node_count = field.len();
        config.validate()?;
        let rng = StdRng::seed_from_u64(seed.unwrap_or(config.seed));
        tracing::info!(%protocol, nodes = field.len(), "simulation initialized with fixed layout");
        Ok(Self::assemble(config, protocol, field, rng))
    }

    fn assemble(config: WsnConfig, kind: ProtocolKind, field: NodeField, rng: StdRng) -> Self {
        let initial = RoundSnapshot::capture(0, kind, &field, &[], 0.0);
        let events = EventLog::new(config.max_events);
        Self {
            config,
            protocol: kind.build(),
            field,
            rng,
            initial,
            history: Vec::new(),
            cursor: 0,
            state: SchedulerState::Idle,
            events,
            first_depletion: None,
        }
    }

    /// Move to the next round, computing it if it has not been simulated yet.
    pub fn advance(&mut self) -> SimResult<Advance> {
        if self.state == SchedulerState::Completed {
            return Ok(Advance::Completed);
        }

        if self.cursor < self.history.len() {
            self.cursor += 1;
            let round = self.cursor as u32;
            self.state = SchedulerState::Running { round };
            return Ok(Advance::Replayed(round));
        }

        let next = self.latest_round() + 1;
        if next > self.config.max_rounds {
            self.state = SchedulerState::Completed;
            tracing::info!(
                protocol = %self.protocol.kind(),
                rounds = self.history.len(),
                alive = self.field.alive_count(),
                "simulation completed"
            );
            return Ok(Advance::Completed);
        }

        self.simulate_round(next)?;
        Ok(Advance::Simulated(next))
    }

    /// Step the cursor back one recorded round without recomputing anything.
    pub fn rewind(&mut self) -> SimResult<&RoundSnapshot> {
        if self.history.is_empty() {
            return Err(SequencingError::NothingToRewind.into());
        }
        if self.cursor <= 1 {
            return Err(SequencingError::AtFirstRound.into());
        }
        self.cursor -= 1;
        self.state = SchedulerState::Running {
            round: self.cursor as u32,
        };
        Ok(self.current_snapshot())
    }

    /// Put the cursor on `round`.
    ///
    /// Recorded rounds are replayed; the round right after the latest one is
    /// simulated. Anything else fails without changing the scheduler.
    pub fn jump_to(&mut self, round: u32) -> SimResult<&RoundSnapshot> {
        let latest = self.latest_round();
        if (1..=latest).contains(&round) {
            self.cursor = round as usize;
            self.state = SchedulerState::Running { round };
            return Ok(self.current_snapshot());
        }
        if round == latest + 1 && round <= self.config.max_rounds {
            self.cursor = self.history.len();
            self.simulate_round(round)?;
            return Ok(self.current_snapshot());
        }
        Err(SequencingError::RoundNotReachable {
            requested: round,
            latest,
        }
        .into())
    }

    /// Advance until [`SchedulerState::Completed`].
    pub fn run_to_completion(&mut self) -> SimResult<()> {
        while self.advance()? != Advance::Completed {}
        Ok(())
    }

    /// The snapshot under the cursor; round 0 before anything was simulated.
    pub fn current_snapshot(&self) -> &RoundSnapshot {
        match self.cursor.checked_sub(1) {
            Some(i) => &self.history[i],
            None => &self.initial,
        }
    }

    /// Look up a recorded round, with 0 meaning the setup state.
    pub fn snapshot(&self, round: u32) -> Option<&RoundSnapshot> {
        match round {
            0 => Some(&self.initial),
            r => self.history.get(r as usize - 1),
        }
    }

    /// Returns `true` once every round has been simulated and the cursor ran past the last one.
    ///
    /// Simulating round `max_rounds` leaves the scheduler at
    /// `Running { round: max_rounds }`, so this is still `false` right after
    /// the last round. The next [`Simulation::advance`] reports
    /// [`Advance::Completed`] and flips it to `true`.
    pub fn is_complete(&self) -> bool {
        self.state == SchedulerState::Completed
    }

    /// Current scheduler state.
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Round under the cursor (0 before the first round).
    pub fn current_round(&self) -> u32 {
        self.cursor as u32
    }

    /// Highest round simulated so far.
    pub fn latest_round(&self) -> u32 {
        self.history.len() as u32
    }

    /// Every simulated round, oldest first.
    pub fn history(&self) -> &[RoundSnapshot] {
        &self.history
    }

    /// The setup state before round 1.
    pub fn initial_snapshot(&self) -> &RoundSnapshot {
        &self.initial
    }

    /// The live field as of the latest simulated round.
    pub fn field(&self) -> &NodeField {
        &self.field
    }

    /// The validated configuration.
    pub fn config(&self) -> &WsnConfig {
        &self.config
    }

    /// The protocol driving this simulation.
    pub fn protocol(&self) -> ProtocolKind {
        self.protocol.kind()
    }

    /// Events recorded while simulating.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Round in which the first node ran out of energy, if any has.
    ///
    /// Unaffected by `max_events` trimming the event log.
    pub fn first_depletion(&self) -> Option<u32> {
        self.first_depletion
    }

    fn simulate_round(&mut self, round: u32) -> SimResult<()> {
        let kind = self.protocol.kind();
        let annotations = {
            let mut ctx = RoundContext {
                round,
                field: &self.field,
                config: &self.config,
                rng: &mut self.rng,
            };
            self.protocol.step(&mut ctx)
        };

        let alive_before = self.field.alive_count();
        if kind == ProtocolKind::Clustering
            && alive_before > 0
            && annotations.count(|t| t.cluster_head) == 0
        {
            self.events.push(SimEvent::new(
                round,
                SimEventKind::NoClusterHeads,
                format!("round {round}: no cluster head elected"),
            ));
        }

        let (next, depletions) = apply_drains(&self.field, annotations.drains())?;
        let drained = self.field.total_energy() - next.total_energy();

        if !depletions.is_empty() && self.first_depletion.is_none() {
            self.first_depletion = Some(round);
        }
        for depletion in &depletions {
            tracing::trace!(round, node = %depletion.node, "node depleted");
            self.events.push(SimEvent::new(
                round,
                SimEventKind::NodeDepleted {
                    node: depletion.node,
                },
                format!("round {round}: node {} ran out of energy", depletion.node),
            ));
        }
        if alive_before > 0 && next.alive_count() == 0 {
            self.events.push(SimEvent::new(
                round,
                SimEventKind::NetworkDepleted,
                format!("round {round}: every node is depleted"),
            ));
        }

        let (tags, _) = annotations.into_parts();
        let snapshot = RoundSnapshot::capture(round, kind, &next, &tags, drained);
        tracing::debug!(
            protocol = %kind,
            round,
            alive = next.alive_count(),
            drained,
            "round simulated"
        );

        self.field = next;
        self.history.push(snapshot);
        self.cursor = self.history.len();
        self.state = SchedulerState::Running { round };
        Ok(())
    }
}

/// Apply drains in order to a copy of `field`, returning the new field and
/// every depletion signal raised along the way.
fn apply_drains(
    field: &NodeField,
    drains: &[(NodeId, f64)],
) -> SimResult<(NodeField, Vec<Depletion>)> {
    let mut next = field.clone();
    let mut depletions = Vec::new();
    for &(id, amount) in drains {
        if let Some(depletion) = next.drain(id, amount)? {
            depletions.push(depletion);
        }
    }
    Ok((next, depletions))
}
