//! # facilitywatch-tui
//!
//! A terminal dashboard over four simulated building telemetry domains:
//! cafeteria queues, indoor air quality, restroom conditions and energy
//! meter power factor.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Application                          │
//! │  ┌─────────┐    ┌───────────┐    ┌─────────┐   ┌──────────┐ │
//! │  │ config  │───▶│   data    │───▶│   app   │──▶│    ui    │ │
//! │  │ (layers)│    │(Dashboard)│    │ (state) │   │(ratatui) │ │
//! │  └─────────┘    └─────┬─────┘    └────┬────┘   └──────────┘ │
//! │                       │               │                      │
//! │                       ▼               ▼                      │
//! │            Simulation + Scheduler   export (JSON)            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`config`]**: Defaults, an optional TOML file and `FACILITYWATCH__*`
//!   environment overrides
//! - **[`data`]**: The [`Dashboard`] of domain simulations and the
//!   label-erased [`DomainView`]s the screens render from
//! - **[`app`]**: Screen navigation, selection, floor filter and pause state
//! - **[`ui`]**: Overview and per-domain screens, theme support
//! - **[`export`]**: JSON export of every domain
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Live dashboard with the default configuration
//! facilitywatch
//!
//! # Reproducible run from a config file
//! facilitywatch --config facility.toml --seed 42
//!
//! # Advance every domain 100 ticks and write JSON, no terminal
//! facilitywatch --seed 7 --ticks 100 --export facility.json
//! ```
//!
//! ### As a library
//!
//! ```
//! use facilitywatch_tui::{Dashboard, Domain, FacilityConfig};
//!
//! let config = FacilityConfig {
//!     seed: Some(42),
//!     ..FacilityConfig::default()
//! };
//! let mut dashboard = Dashboard::from_config(&config).unwrap();
//! dashboard.advance(10);
//!
//! let view = dashboard.view(Domain::AirQuality);
//! assert_eq!(view.tick, 10);
//! assert_eq!(view.rows.len(), 10);
//! ```
//!
//! ### Live ticking
//!
//! Schedulers run on the current tokio runtime:
//!
//! ```no_run
//! use facilitywatch_tui::{App, Dashboard, FacilityConfig};
//!
//! # tokio_test::block_on(async {
//! let mut dashboard = Dashboard::from_config(&FacilityConfig::default()).unwrap();
//! dashboard.start_live().unwrap();
//! let app = App::new(dashboard);
//! # });
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod export;
pub mod ui;

pub use app::{App, View};
pub use config::{DomainConfig, FacilityConfig};
pub use data::{Dashboard, Domain, DomainView, History, LabelCount, Row, Trend};
