//! Static entity configuration and metric bounds.

/// A closed interval `[min, max]` that a metric may never leave.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    /// Lowest permitted value (inclusive).
    pub min: f64,
    /// Highest permitted value (inclusive).
    pub max: f64,
}

impl Bounds {
    /// Create bounds, returning `None` when `min > max` or either side is NaN.
    pub fn new(min: f64, max: f64) -> Option<Self> {
        if min.is_nan() || max.is_nan() || min > max {
            return None;
        }
        Some(Self { min, max })
    }

    /// Clamp a value into the interval. NaN collapses to `min`.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }

    /// Check whether a value lies inside the interval.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Width of the interval.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Startup configuration for one simulated entity.
///
/// Supplied once by the surrounding screen (or a config file) and never
/// changed while the store is alive.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityConfig {
    /// Stable identifier, unique within a store.
    pub id: String,
    /// Metric value before the first tick.
    #[cfg_attr(feature = "serde", serde(alias = "metric"))]
    pub initial_metric: f64,
    /// Lower metric bound.
    pub min: f64,
    /// Upper metric bound.
    pub max: f64,
    /// Floor the entity is installed on, for floor-grouped views.
    #[cfg_attr(feature = "serde", serde(default))]
    pub floor: Option<u8>,
    /// Free-form location (wing, zone, panel).
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Option<String>,
}

impl EntityConfig {
    /// Create a config without placement metadata.
    pub fn new(id: impl Into<String>, initial_metric: f64, min: f64, max: f64) -> Self {
        Self {
            id: id.into(),
            initial_metric,
            min,
            max,
            floor: None,
            location: None,
        }
    }

    /// Attach the floor the entity lives on.
    pub fn on_floor(mut self, floor: u8) -> Self {
        self.floor = Some(floor);
        self
    }

    /// Attach a location label.
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// The configured bounds, or `None` if they are invalid.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::new(self.min, self.max)
    }
}
