//! Status labels for each monitored domain.
//!
//! Every label enum is declared in band order: the variant reached by the
//! lowest threshold first, the one reached by the highest threshold last.
//! Severity is a separate mapping because "higher" is not always "worse"
//! (a high power factor is good, a long queue is not).

use core::fmt;
use core::hash::Hash;

use crate::Severity;

/// A discrete status band produced by classifying a metric.
pub trait StatusLabel:
    Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Every label of the domain, in band order.
    const ALL: &'static [Self];

    /// Stable lowercase name used in exports and the UI.
    fn name(&self) -> &'static str;

    /// How much attention this band needs.
    fn severity(&self) -> Severity;
}

/// Cafeteria counter queue status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum QueueStatus {
    Ready,
    Busy,
    Crowded,
}

impl StatusLabel for QueueStatus {
    const ALL: &'static [Self] = &[QueueStatus::Ready, QueueStatus::Busy, QueueStatus::Crowded];

    fn name(&self) -> &'static str {
        match self {
            QueueStatus::Ready => "ready",
            QueueStatus::Busy => "busy",
            QueueStatus::Crowded => "crowded",
        }
    }

    fn severity(&self) -> Severity {
        match self {
            QueueStatus::Ready => Severity::Nominal,
            QueueStatus::Busy => Severity::Elevated,
            QueueStatus::Crowded => Severity::Critical,
        }
    }
}

/// Indoor air quality band for a single parameter.
///
/// The zones walk CO₂; the same bands apply to PM2.5, PM10 and TVOC
/// readings through their own threshold tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum AirQuality {
    Good,
    Moderate,
    Poor,
}

impl StatusLabel for AirQuality {
    const ALL: &'static [Self] = &[AirQuality::Good, AirQuality::Moderate, AirQuality::Poor];

    fn name(&self) -> &'static str {
        match self {
            AirQuality::Good => "good",
            AirQuality::Moderate => "moderate",
            AirQuality::Poor => "poor",
        }
    }

    fn severity(&self) -> Severity {
        match self {
            AirQuality::Good => Severity::Nominal,
            AirQuality::Moderate => Severity::Elevated,
            AirQuality::Poor => Severity::Critical,
        }
    }
}

/// Restroom hygiene condition derived from the odor sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum RestroomCondition {
    Excellent,
    Good,
    NeedsAttention,
    CleaningRequired,
}

impl StatusLabel for RestroomCondition {
    const ALL: &'static [Self] = &[
        RestroomCondition::Excellent,
        RestroomCondition::Good,
        RestroomCondition::NeedsAttention,
        RestroomCondition::CleaningRequired,
    ];

    fn name(&self) -> &'static str {
        match self {
            RestroomCondition::Excellent => "excellent",
            RestroomCondition::Good => "good",
            RestroomCondition::NeedsAttention => "needs-attention",
            RestroomCondition::CleaningRequired => "cleaning-required",
        }
    }

    fn severity(&self) -> Severity {
        match self {
            RestroomCondition::Excellent | RestroomCondition::Good => Severity::Nominal,
            RestroomCondition::NeedsAttention => Severity::Elevated,
            RestroomCondition::CleaningRequired => Severity::Critical,
        }
    }
}

/// Energy meter power factor band. Higher is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum PowerFactorBand {
    Poor,
    Fair,
    Good,
}

impl StatusLabel for PowerFactorBand {
    const ALL: &'static [Self] = &[PowerFactorBand::Poor, PowerFactorBand::Fair, PowerFactorBand::Good];

    fn name(&self) -> &'static str {
        match self {
            PowerFactorBand::Poor => "poor",
            PowerFactorBand::Fair => "fair",
            PowerFactorBand::Good => "good",
        }
    }

    fn severity(&self) -> Severity {
        match self {
            PowerFactorBand::Poor => Severity::Critical,
            PowerFactorBand::Fair => Severity::Elevated,
            PowerFactorBand::Good => Severity::Nominal,
        }
    }
}

/// Battery charge band of a wireless sensor. Higher is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum BatteryLevel {
    Low,
    Medium,
    High,
}

impl StatusLabel for BatteryLevel {
    const ALL: &'static [Self] = &[BatteryLevel::Low, BatteryLevel::Medium, BatteryLevel::High];

    fn name(&self) -> &'static str {
        match self {
            BatteryLevel::Low => "low",
            BatteryLevel::Medium => "medium",
            BatteryLevel::High => "high",
        }
    }

    fn severity(&self) -> Severity {
        match self {
            BatteryLevel::Low => Severity::Critical,
            BatteryLevel::Medium => Severity::Elevated,
            BatteryLevel::High => Severity::Nominal,
        }
    }
}

macro_rules! display_by_name {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.name())
                }
            }
        )*
    };
}

display_by_name!(QueueStatus, AirQuality, RestroomCondition, PowerFactorBand, BatteryLevel);

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_all_sorted<L: StatusLabel>() {
        let mut sorted = L::ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, L::ALL, "ALL must be declared in band order");
    }

    #[test]
    fn label_lists_are_in_band_order() {
        assert_all_sorted::<QueueStatus>();
        assert_all_sorted::<AirQuality>();
        assert_all_sorted::<RestroomCondition>();
        assert_all_sorted::<PowerFactorBand>();
        assert_all_sorted::<BatteryLevel>();
    }

    #[test]
    fn power_factor_severity_is_inverted() {
        assert_eq!(PowerFactorBand::Poor.severity(), Severity::Critical);
        assert_eq!(PowerFactorBand::Good.severity(), Severity::Nominal);
        assert_eq!(BatteryLevel::Low.severity(), Severity::Critical);
        assert_eq!(BatteryLevel::High.to_string(), "high");
    }

    #[test]
    fn display_uses_stable_names() {
        assert_eq!(RestroomCondition::NeedsAttention.to_string(), "needs-attention");
        assert_eq!(QueueStatus::Crowded.to_string(), "crowded");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_names_match_display() {
        let json = serde_json::to_string(&RestroomCondition::CleaningRequired).unwrap();
        assert_eq!(json, "\"cleaning-required\"");
        let parsed: QueueStatus = serde_json::from_str("\"busy\"").unwrap();
        assert_eq!(parsed, QueueStatus::Busy);
    }
}
