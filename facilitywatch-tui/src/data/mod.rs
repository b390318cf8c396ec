//! Data models behind the dashboard.
//!
//! ## Submodules
//!
//! - [`dashboard`]: the four domain simulations with their schedulers, and
//!   [`DomainView`], a label-erased projection every screen renders from
//! - [`duration`]: parsing and formatting of interval strings (e.g. "5s", "500ms")
//! - [`history`]: recent readings per entity for sparklines and trend arrows
//!
//! ## Data Flow
//!
//! ```text
//! Simulation<L> (ticked by its Scheduler)
//!        │
//!        ▼
//! Dashboard::view(domain)
//!        │
//!        ├──▶ DomainView (rows, label counts, alerts)
//!        │
//!        └──▶ History::record() (once per new tick)
//! ```

pub mod dashboard;
pub mod duration;
pub mod history;

pub use dashboard::{Dashboard, Domain, DomainView, LabelCount, Row};
pub use history::{History, Trend};
