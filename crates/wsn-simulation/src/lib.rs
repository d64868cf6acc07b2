//! Round-based simulation of energy-constrained wireless sensor networks.
//!
//! A [`Simulation`] owns a [`wsn_core::NodeField`] and drives one of three
//! interchangeable [`Protocol`]s round by round: LEACH-style clustering,
//! CSMA-style contention, or directed-diffusion-style flooding. Each round
//! produces an immutable [`RoundSnapshot`]; the scheduler keeps them all so
//! earlier rounds can be revisited without re-drawing any randomness.

/// LEACH-style cluster-head election.
pub mod clustering;
/// Configuration types for simulation runs.
pub mod config;
/// CSMA-style channel contention.
pub mod contention;
/// Read-only state handed to a protocol step.
pub mod context;
/// Directed-diffusion-style interest flooding.
pub mod diffusion;
/// Error types for the simulation crate.
pub mod error;
/// Simulation event types and the event log.
pub mod event;
/// The protocol contract and per-round annotations.
pub mod protocol;
/// The round scheduler.
pub mod simulation;
/// Immutable per-round records.
pub mod snapshot;

/// Re-export of [`config::WsnConfig`].
pub use config::WsnConfig;
/// Re-export of [`context::RoundContext`].
pub use context::RoundContext;
/// Re-exports of the error types.
pub use error::{ConfigError, SequencingError, SimError, SimResult};
/// Re-exports of [`event::EventLog`], [`event::SimEvent`], and [`event::SimEventKind`].
pub use event::{EventLog, SimEvent, SimEventKind};
/// Re-exports of the protocol contract.
pub use protocol::{Annotations, Protocol, ProtocolKind, RoundAnnotations};
/// Re-exports of the scheduler types.
pub use simulation::{Advance, SchedulerState, Simulation};
/// Re-exports of the snapshot types.
pub use snapshot::{NodeSnapshot, RoundSnapshot, RoundSummary};
