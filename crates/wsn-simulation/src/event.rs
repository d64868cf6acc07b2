use wsn_core::NodeId;

/// What kind of simulation event occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEventKind {
    /// A node's energy reached zero.
    NodeDepleted {
        /// The node that became inactive.
        node: NodeId,
    },
    /// The clustering protocol elected no head this round.
    NoClusterHeads,
    /// The last live node was depleted.
    NetworkDepleted,
}

/// A record of something that happened during simulation.
#[derive(Debug, Clone)]
pub struct SimEvent {
    /// The round in which this event occurred.
    pub round: u32,
    /// The specific kind of event that occurred.
    pub kind: SimEventKind,
    /// A human-readable description of the event.
    pub description: String,
}

impl SimEvent {
    /// Create a new simulation event with the given round, kind, and description.
    pub fn new(round: u32, kind: SimEventKind, description: impl Into<String>) -> Self {
        Self {
            round,
            kind,
            description: description.into(),
        }
    }
}

/// Accumulates events during a simulation run.
///
/// A capped log forgets its oldest entries, so run-wide facts such as the
/// first depletion are tracked by [`crate::Simulation`] instead.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<SimEvent>,
    max_events: usize,
}

impl EventLog {
    /// Create a new event log with the given maximum capacity (0 = unlimited).
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    /// Append an event, dropping the oldest events if the log exceeds its capacity.
    pub fn push(&mut self, event: SimEvent) {
        self.events.push(event);
        if self.max_events > 0 && self.events.len() > self.max_events {
            let drain_count = self.events.len() - self.max_events;
            self.events.drain(..drain_count);
        }
    }

    /// Return a slice of all recorded events.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Return the number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Return `true` if no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depleted(round: u32, node: u32) -> SimEvent {
        SimEvent::new(
            round,
            SimEventKind::NodeDepleted { node: NodeId(node) },
            format!("node #{node} depleted"),
        )
    }

    #[test]
    fn push_and_query() {
        let mut log = EventLog::new(0);
        log.push(SimEvent::new(1, SimEventKind::NoClusterHeads, "no heads"));
        log.push(depleted(2, 4));
        log.push(depleted(2, 5));

        assert_eq!(log.len(), 3);
        assert_eq!(log.events()[0].kind, SimEventKind::NoClusterHeads);
        assert_eq!(
            log.events()[2].kind,
            SimEventKind::NodeDepleted { node: NodeId(5) }
        );
    }

    #[test]
    fn capacity_drops_oldest() {
        let mut log = EventLog::new(2);
        for round in 1..=5 {
            log.push(depleted(round, round));
        }
        assert_eq!(log.len(), 2);
        assert_eq!(log.events()[0].round, 4);
        assert_eq!(log.events()[1].round, 5);
    }

    #[test]
    fn empty_log() {
        let log = EventLog::default();
        assert!(log.is_empty());
        assert!(log.events().is_empty());
    }
}
