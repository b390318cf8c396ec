//! # facilitywatch-types
//!
//! Core types for simulated building telemetry. This crate defines the
//! vocabulary shared by the simulation engine and any consumer that renders
//! its output: static entity configuration, metric bounds, severities and the
//! status labels of each monitored domain.
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: Core types work without any serialization framework
//! - **Optional serialization**: Enable the `serde` feature to load configs and export state
//! - **Closed label sets**: Every domain's statuses are an enum, ordered by band
//!
//! ## Example
//!
//! ```rust
//! use facilitywatch_types::{Bounds, EntityConfig, QueueStatus, Severity, StatusLabel};
//!
//! let config = EntityConfig::new("Two Good", 0.0, 0.0, 10.0);
//! assert_eq!(config.bounds(), Bounds::new(0.0, 10.0));
//!
//! assert_eq!(QueueStatus::Crowded.severity(), Severity::Critical);
//! assert_eq!(QueueStatus::ALL.len(), 3);
//! ```

mod entity;
mod label;
mod severity;

pub use entity::*;
pub use label::*;
pub use severity::*;
