//! Per-domain simulation profiles.

use std::sync::Arc;

use facilitywatch_types::{EntityConfig, StatusLabel};

use crate::classify::ThresholdTable;
use crate::entity::Entity;
use crate::perturb::Walk;

/// Everything the engine needs to know about one domain: how metrics move,
/// how they are classified and what is derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile<L> {
    thresholds: ThresholdTable<L>,
    walk: Walk,
    derived_factor: Option<f64>,
}

impl<L: StatusLabel> Profile<L> {
    pub fn new(thresholds: ThresholdTable<L>, walk: Walk) -> Self {
        Self {
            thresholds,
            walk,
            derived_factor: None,
        }
    }

    /// Derive a secondary metric as `metric * factor` on every update.
    pub fn with_derived_factor(mut self, factor: f64) -> Self {
        self.derived_factor = Some(factor);
        self
    }

    /// Replace the walk's maximum step count.
    pub fn with_delta(mut self, delta: u32) -> Self {
        self.walk = self.walk.with_delta(delta);
        self
    }

    pub fn thresholds(&self) -> &ThresholdTable<L> {
        &self.thresholds
    }

    pub fn walk(&self) -> Walk {
        self.walk
    }

    pub fn derived_factor(&self) -> Option<f64> {
        self.derived_factor
    }

    /// Status and derived metric for a metric value.
    pub fn evaluate(&self, metric: f64) -> (L, Option<f64>) {
        let status = self.thresholds.classify(metric);
        let derived = self.derived_factor.map(|factor| metric * factor);
        (status, derived)
    }

    pub(crate) fn build(&self, config: &EntityConfig) -> Entity<L> {
        let (status, derived) = self.evaluate(config.initial_metric);
        Entity::new(
            Arc::from(config.id.as_str()),
            config.initial_metric,
            derived,
            status,
            config.floor,
            config.location.as_deref().map(Arc::from),
        )
    }

    pub(crate) fn reclassify(&self, entity: &Entity<L>, metric: f64) -> Entity<L> {
        let (status, derived) = self.evaluate(metric);
        entity.with_reading(metric, derived, status)
    }
}
