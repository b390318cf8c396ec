//! Classified entities and the immutable snapshots that carry them.

use std::sync::Arc;

use facilitywatch_types::{Severity, StatusLabel};

/// A simulated sensor, counter or meter at one point in time.
///
/// Entities can only be produced by the engine: `status` and
/// `derived_metric` are always computed from `metric` by a [`Profile`], so a
/// stale status can never be paired with a fresh metric.
///
/// [`Profile`]: crate::Profile
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Entity<L> {
    id: Arc<str>,
    metric: f64,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    derived_metric: Option<f64>,
    status: L,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    floor: Option<u8>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    location: Option<Arc<str>>,
}

impl<L: StatusLabel> Entity<L> {
    pub(crate) fn new(
        id: Arc<str>,
        metric: f64,
        derived_metric: Option<f64>,
        status: L,
        floor: Option<u8>,
        location: Option<Arc<str>>,
    ) -> Self {
        Self {
            id,
            metric,
            derived_metric,
            status,
            floor,
            location,
        }
    }

    /// Same identity and placement, new reading.
    pub(crate) fn with_reading(&self, metric: f64, derived_metric: Option<f64>, status: L) -> Self {
        Self {
            id: Arc::clone(&self.id),
            metric,
            derived_metric,
            status,
            floor: self.floor,
            location: self.location.clone(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn metric(&self) -> f64 {
        self.metric
    }

    /// Value computed from the metric (for example a wait time), if the
    /// domain defines one.
    pub fn derived_metric(&self) -> Option<f64> {
        self.derived_metric
    }

    pub fn status(&self) -> L {
        self.status
    }

    pub fn severity(&self) -> Severity {
        self.status.severity()
    }

    pub fn floor(&self) -> Option<u8> {
        self.floor
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

/// A complete, immutable copy of a store's entities.
///
/// `tick` counts how many times the store has been replaced; the initial
/// snapshot has tick 0.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Snapshot<L> {
    tick: u64,
    entities: Vec<Entity<L>>,
}

impl<L: StatusLabel> Snapshot<L> {
    pub(crate) fn new(tick: u64, entities: Vec<Entity<L>>) -> Self {
        Self { tick, entities }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn entities(&self) -> &[Entity<L>] {
        &self.entities
    }

    /// Look up an entity by id.
    pub fn get(&self, id: &str) -> Option<&Entity<L>> {
        self.entities.iter().find(|entity| entity.id() == id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity<L>> {
        self.entities.iter()
    }

    /// The most severe status in the snapshot.
    pub fn worst(&self) -> Severity {
        self.iter().map(Entity::severity).max().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facilitywatch_types::{QueueStatus, RestroomCondition};

    fn snapshot() -> Snapshot<QueueStatus> {
        Snapshot::new(
            3,
            vec![
                Entity::new("main".into(), 4.0, Some(12.0), QueueStatus::Busy, Some(1), Some("North".into())),
                Entity::new("deli".into(), 7.0, None, QueueStatus::Crowded, None, None),
            ],
        )
    }

    #[test]
    fn lookup_and_worst() {
        let snapshot = snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("deli").map(Entity::metric), Some(7.0));
        assert!(snapshot.get("grill").is_none());
        assert_eq!(snapshot.worst(), Severity::Critical);
        assert_eq!(Snapshot::<QueueStatus>::new(0, Vec::new()).worst(), Severity::Nominal);
    }

    #[test]
    fn with_reading_keeps_placement() {
        let entity = Entity::new("SL27".into(), 2.1, None, RestroomCondition::Good, Some(2), Some("South".into()));
        let next = entity.with_reading(4.2, None, RestroomCondition::CleaningRequired);
        assert_eq!(next.id(), "SL27");
        assert_eq!(next.floor(), Some(2));
        assert_eq!(next.location(), Some("South"));
        assert_eq!(next.metric(), 4.2);
        assert_eq!(next.status(), RestroomCondition::CleaningRequired);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn absent_fields_are_left_out_of_json() {
        let value = serde_json::to_value(snapshot()).unwrap();
        assert_eq!(value["tick"], 3);

        let placed = &value["entities"][0];
        assert_eq!(placed["id"], "main");
        assert_eq!(placed["status"], "busy");
        assert_eq!(placed["derived_metric"], 12.0);
        assert_eq!(placed["floor"], 1);
        assert_eq!(placed["location"], "North");

        let bare = value["entities"][1].as_object().unwrap();
        assert_eq!(bare["metric"], 7.0);
        assert_eq!(bare["status"], "crowded");
        assert!(!bare.contains_key("derived_metric"));
        assert!(!bare.contains_key("floor"));
        assert!(!bare.contains_key("location"));
    }
}
