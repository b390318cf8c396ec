//! Severity levels shared by every domain.

use core::fmt;

/// How much attention an entity needs, independent of its domain label.
///
/// Ordered so that `max()` over a collection yields the worst entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    #[default]
    Nominal,
    Elevated,
    Critical,
}

impl Severity {
    /// All severities, least severe first.
    pub const ALL: &'static [Severity] = &[Severity::Nominal, Severity::Elevated, Severity::Critical];

    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            Severity::Nominal => "OK",
            Severity::Elevated => "WARN",
            Severity::Critical => "CRIT",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
