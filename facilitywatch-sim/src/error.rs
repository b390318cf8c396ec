//! Error types for the simulation engine.

use thiserror::Error;

/// Errors raised while building stores, threshold tables or walks.
///
/// All of these are raised before anything becomes observable: a store that
/// fails validation is never constructed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// `min > max`, or a bound is not a number.
    #[error("entity `{id}` has invalid bounds [{min}, {max}]")]
    InvalidBounds { id: String, min: f64, max: f64 },

    /// The starting metric lies outside the entity's bounds.
    #[error("entity `{id}` starts at {metric}, outside [{min}, {max}]")]
    MetricOutOfBounds {
        id: String,
        metric: f64,
        min: f64,
        max: f64,
    },

    /// Two entities share an identifier.
    #[error("duplicate entity id `{0}`")]
    DuplicateId(String),

    /// A threshold band does not sit strictly above the band before it.
    #[error("threshold band {index} does not lie above the band below it")]
    UnorderedThresholds { index: usize },

    /// The same label is reachable from more than one band.
    #[error("label `{0}` is assigned to more than one band")]
    DuplicateLabel(&'static str),

    /// A replacement set does not carry exactly the store's identities, in order.
    #[error("replacement entity set does not match the store's identities")]
    IdentityMismatch,

    /// Walk step sizes must be positive and finite.
    #[error("walk step size must be positive and finite, got {0}")]
    InvalidStep(f64),
}

/// Misuse of the scheduler lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// `start` was called while ticks are already firing.
    #[error("scheduler is already running")]
    AlreadyRunning,

    /// A zero interval would fire ticks in a busy loop.
    #[error("scheduler interval must be greater than zero")]
    ZeroInterval,

    /// `start` was called outside a tokio runtime.
    #[error("scheduler must be started from within a tokio runtime")]
    NoRuntime,
}
