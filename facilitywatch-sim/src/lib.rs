//! # facilitywatch-sim
//!
//! Metric simulation and status classification engine for simulated
//! building telemetry.
//!
//! Each monitored domain (cafeteria queues, indoor air quality, restroom
//! hygiene, energy meters) is a [`Simulation`]: a fixed set of entities
//! whose metrics take bounded random walks and are reclassified into
//! status bands on every tick.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use facilitywatch_sim::{presets, RngSource, Scheduler, Simulation};
//!
//! #[tokio::main]
//! async fn main() {
//!     // Build the cafeteria with its compiled-in counters
//!     let sim = Simulation::new("cafeteria", &presets::cafeteria_counters(), presets::cafeteria_profile())
//!         .unwrap();
//!
//!     // Tick every five seconds in the background
//!     let mut scheduler = Scheduler::new(sim.clone(), presets::DEFAULT_INTERVAL, RngSource::system());
//!     scheduler.start().unwrap();
//!
//!     // Re-render whenever a new snapshot is published
//!     let mut published = sim.store().subscribe();
//!     while published.changed().await.is_ok() {
//!         for counter in sim.snapshot().iter() {
//!             println!("{}: {} ({})", counter.id(), counter.metric(), counter.status());
//!         }
//!     }
//! }
//! ```
//!
//! ## Features
//!
//! - **Bounded walks**: metrics never leave their configured range
//! - **Consistent status**: labels are always recomputed from the metric
//! - **Atomic snapshots**: readers see whole ticks, never a partial update
//! - **Injectable randomness**: seed it, script it or draw from the OS

mod aggregate;
mod classify;
mod entity;
mod error;
mod perturb;
mod profile;
mod random;
mod scheduler;
mod simulation;
mod store;

pub mod presets;

pub use aggregate::{alerts, by_floor, share_nominal, Summary};
pub use classify::{classify, Band, ThresholdTable};
pub use entity::{Entity, Snapshot};
pub use error::{ConfigError, SchedulerError};
pub use perturb::{perturb, Walk};
pub use profile::Profile;
pub use random::{FixedStep, RngSource, ScriptedSteps, StepSource};
pub use scheduler::{CancellationHandle, Scheduler, SchedulerState};
pub use simulation::Simulation;
pub use store::EntityStore;

// Re-export types for convenience
pub use facilitywatch_types::{
    AirQuality, BatteryLevel, Bounds, EntityConfig, PowerFactorBand, QueueStatus, RestroomCondition, Severity, StatusLabel,
};
