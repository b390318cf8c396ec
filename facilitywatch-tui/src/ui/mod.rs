//! Terminal UI rendering using ratatui.
//!
//! Each screen lives in its own submodule with a `render` function.
//!
//! ## Submodules
//!
//! - [`overview`]: Per-domain severity cards plus the facility-wide alert list
//! - [`domain`]: Entity table for one domain with trends and a summary panel
//! - [`common`]: Shared components (header, tabs, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Tabs (common::render_tabs)           │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ overview::render / domain::render    │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    common::render_help drawn on top
//! ```

pub mod common;
pub mod domain;
pub mod overview;
pub mod theme;

pub use theme::Theme;
