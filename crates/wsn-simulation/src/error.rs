/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised by the scheduler's public operations.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// The configuration was rejected before any state was created.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A navigation request could not be honoured; nothing was changed.
    #[error("{0}")]
    Sequencing(#[from] SequencingError),

    /// A drain addressed a node outside the field.
    #[error(transparent)]
    Core(#[from] wsn_core::CoreError),
}

/// An invalid configuration option.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// `node_count` is zero.
    #[error("node count must be at least 1")]
    NoNodes,

    /// `area_size` is zero, negative, or not finite.
    #[error("area size must be positive, got {0}")]
    NonPositiveArea(f64),

    /// `max_rounds` is zero.
    #[error("max rounds must be at least 1")]
    NoRounds,

    /// `initial_energy` is zero, negative, or not finite.
    #[error("initial energy must be positive, got {0}")]
    NonPositiveEnergy(f64),

    /// A cost, distance, or margin is negative or NaN.
    #[error("{name} must not be negative, got {value}")]
    Negative {
        /// The offending option.
        name: &'static str,
        /// Its value.
        value: f64,
    },

    /// A probability lies outside `[0, 1]`.
    #[error("{name} must lie in [0, 1], got {value}")]
    ProbabilityOutOfRange {
        /// The offending option.
        name: &'static str,
        /// Its value.
        value: f64,
    },

    /// The placement margin leaves no room inside the area.
    #[error("placement margin {margin} does not fit twice into area size {area}")]
    MarginTooLarge {
        /// The configured margin.
        margin: f64,
        /// The configured area size.
        area: f64,
    },
}

/// A navigation request the history cannot serve.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SequencingError {
    /// `rewind` was called before any round was simulated.
    #[error("no round has been simulated yet")]
    NothingToRewind,

    /// `rewind` was called while round 1 is current.
    #[error("already at the first round")]
    AtFirstRound,

    /// `jump_to` targeted a round that is neither recorded nor next.
    #[error("round {requested} is not reachable (latest simulated round is {latest})")]
    RoundNotReachable {
        /// The round that was asked for.
        requested: u32,
        /// The latest round present in history (0 if none).
        latest: u32,
    },
}
