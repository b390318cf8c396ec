//! Threshold-based classification of metrics into status bands.
//!
//! One generic table replaces the per-screen conditional chains: each domain
//! instantiates [`ThresholdTable`] with its own label enum and thresholds.

use facilitywatch_types::StatusLabel;

use crate::error::ConfigError;

/// One band of a threshold table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band<L> {
    /// Lower edge of the band.
    pub threshold: f64,
    /// `true` for `value >= threshold`, `false` for `value > threshold`.
    pub inclusive: bool,
    /// Label returned when the band is the highest one admitting the value.
    pub label: L,
}

impl<L> Band<L> {
    /// Band entered once the value reaches `threshold`.
    pub fn at_least(threshold: f64, label: L) -> Self {
        Self {
            threshold,
            inclusive: true,
            label,
        }
    }

    /// Band entered once the value exceeds `threshold`.
    pub fn above(threshold: f64, label: L) -> Self {
        Self {
            threshold,
            inclusive: false,
            label,
        }
    }

    fn admits(&self, value: f64) -> bool {
        if self.inclusive {
            value >= self.threshold
        } else {
            value > self.threshold
        }
    }
}

/// An ordered set of bands over a default label.
///
/// Bands are evaluated from the highest threshold down; the first band that
/// admits the value wins, and the default label covers everything below the
/// lowest band. The table is therefore total: every value, NaN included,
/// maps to exactly one label.
///
/// # Example
///
/// ```rust
/// use facilitywatch_sim::{Band, ThresholdTable};
/// use facilitywatch_types::QueueStatus;
///
/// let table = ThresholdTable::new(
///     QueueStatus::Ready,
///     vec![
///         Band::at_least(3.0, QueueStatus::Busy),
///         Band::at_least(6.0, QueueStatus::Crowded),
///     ],
/// )
/// .unwrap();
///
/// assert_eq!(table.classify(2.0), QueueStatus::Ready);
/// assert_eq!(table.classify(3.0), QueueStatus::Busy);
/// assert_eq!(table.classify(6.0), QueueStatus::Crowded);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdTable<L> {
    default: L,
    bands: Vec<Band<L>>,
}

impl<L: StatusLabel> ThresholdTable<L> {
    /// Build a table, checking that thresholds strictly ascend and that no
    /// label is reachable from two bands.
    pub fn new(default: L, bands: Vec<Band<L>>) -> Result<Self, ConfigError> {
        for (index, band) in bands.iter().enumerate() {
            if band.threshold.is_nan() {
                return Err(ConfigError::UnorderedThresholds { index });
            }
            if index > 0 && band.threshold <= bands[index - 1].threshold {
                return Err(ConfigError::UnorderedThresholds { index });
            }
            let repeated = band.label == default
                || bands[..index].iter().any(|earlier| earlier.label == band.label);
            if repeated {
                return Err(ConfigError::DuplicateLabel(band.label.name()));
            }
        }
        Ok(Self { default, bands })
    }

    /// Build a table known to be valid. Used by the compiled-in presets,
    /// which are checked by their own tests.
    pub(crate) fn from_sorted(default: L, bands: Vec<Band<L>>) -> Self {
        Self { default, bands }
    }

    /// Map a value to its label.
    pub fn classify(&self, value: f64) -> L {
        self.bands
            .iter()
            .rev()
            .find(|band| band.admits(value))
            .map_or(self.default, |band| band.label)
    }

    /// The label below the lowest band.
    pub fn default_label(&self) -> L {
        self.default
    }

    /// Bands in ascending threshold order.
    pub fn bands(&self) -> &[Band<L>] {
        &self.bands
    }

    /// Every label the table can produce, lowest band first.
    pub fn labels(&self) -> impl Iterator<Item = L> + '_ {
        std::iter::once(self.default).chain(self.bands.iter().map(|band| band.label))
    }
}

/// Free-function form of [`ThresholdTable::classify`].
pub fn classify<L: StatusLabel>(value: f64, thresholds: &ThresholdTable<L>) -> L {
    thresholds.classify(value)
}
