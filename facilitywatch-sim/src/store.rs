//! The entity store: the authoritative snapshot of one domain's entities.

use std::collections::HashSet;
use std::sync::Arc;

use facilitywatch_types::{Bounds, EntityConfig, StatusLabel};
use parking_lot::RwLock;
use tokio::sync::watch;
use tracing::warn;

use crate::entity::{Entity, Snapshot};
use crate::error::ConfigError;
use crate::profile::Profile;

/// Holds the current snapshot of a fixed set of entities.
///
/// Writers publish whole snapshots; readers clone an `Arc` to the current
/// one. A reader therefore sees either the complete old set or the complete
/// new set, never a mixture.
#[derive(Debug)]
pub struct EntityStore<L> {
    current: RwLock<Arc<Snapshot<L>>>,
    /// Bounds aligned with the entity order.
    bounds: Vec<Bounds>,
    published: watch::Sender<u64>,
}

impl<L: StatusLabel> EntityStore<L> {
    /// Build a store from static configuration.
    ///
    /// Every config is validated before anything is built, so a failure
    /// leaves nothing behind.
    pub fn initialize(configs: &[EntityConfig], profile: &Profile<L>) -> Result<Self, ConfigError> {
        let bounds = validate(configs).inspect_err(|err| {
            warn!("Rejected entity configuration: {}", err);
        })?;

        let entities = configs.iter().map(|config| profile.build(config)).collect();
        let (published, _) = watch::channel(0);

        Ok(Self {
            current: RwLock::new(Arc::new(Snapshot::new(0, entities))),
            bounds,
            published,
        })
    }

    /// The current snapshot. Cheap: only an `Arc` is cloned.
    pub fn current_snapshot(&self) -> Arc<Snapshot<L>> {
        Arc::clone(&self.current.read())
    }

    /// Atomically replace every entity.
    ///
    /// The new set must carry exactly the store's identities in the same
    /// order. Returns the new tick number.
    pub fn replace_all(&self, entities: Vec<Entity<L>>) -> Result<u64, ConfigError> {
        {
            let current = self.current.read();
            let same_identities = current.len() == entities.len()
                && current.iter().zip(&entities).all(|(old, new)| old.id() == new.id());
            if !same_identities {
                return Err(ConfigError::IdentityMismatch);
            }
        }
        Ok(self.publish(entities))
    }

    /// Swap in a new entity set that is known to match the identity set.
    pub(crate) fn publish(&self, entities: Vec<Entity<L>>) -> u64 {
        let tick = {
            let mut current = self.current.write();
            let tick = current.tick() + 1;
            *current = Arc::new(Snapshot::new(tick, entities));
            tick
        };
        self.published.send_replace(tick);
        tick
    }

    /// Receive the tick number every time a new snapshot is published.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.published.subscribe()
    }

    /// Bounds of each entity, in entity order.
    pub fn bounds(&self) -> &[Bounds] {
        &self.bounds
    }

    /// Bounds of a single entity.
    pub fn bounds_of(&self, id: &str) -> Option<Bounds> {
        let snapshot = self.current_snapshot();
        let index = snapshot.iter().position(|entity| entity.id() == id)?;
        self.bounds.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }
}

fn validate(configs: &[EntityConfig]) -> Result<Vec<Bounds>, ConfigError> {
    let mut seen = HashSet::with_capacity(configs.len());
    configs
        .iter()
        .map(|config| {
            let bounds = config.bounds().ok_or_else(|| ConfigError::InvalidBounds {
                id: config.id.clone(),
                min: config.min,
                max: config.max,
            })?;
            if !bounds.contains(config.initial_metric) {
                return Err(ConfigError::MetricOutOfBounds {
                    id: config.id.clone(),
                    metric: config.initial_metric,
                    min: config.min,
                    max: config.max,
                });
            }
            if !seen.insert(config.id.as_str()) {
                return Err(ConfigError::DuplicateId(config.id.clone()));
            }
            Ok(bounds)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{Band, ThresholdTable};
    use crate::perturb::Walk;
    use facilitywatch_types::QueueStatus;

    fn profile() -> Profile<QueueStatus> {
        let table = ThresholdTable::new(
            QueueStatus::Ready,
            vec![
                Band::at_least(3.0, QueueStatus::Busy),
                Band::at_least(6.0, QueueStatus::Crowded),
            ],
        )
        .unwrap();
        Profile::new(table, Walk::unit(1)).with_derived_factor(2.0)
    }

    fn counters() -> Vec<EntityConfig> {
        vec![
            EntityConfig::new("Two Good", 0.0, 0.0, 10.0),
            EntityConfig::new("Uttar Dakshin", 4.0, 0.0, 10.0),
        ]
    }

    #[test]
    fn initialize_classifies_starting_metrics() {
        let store = EntityStore::initialize(&counters(), &profile()).unwrap();
        let snapshot = store.current_snapshot();

        assert_eq!(snapshot.tick(), 0);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("Two Good").unwrap().status(), QueueStatus::Ready);
        assert_eq!(snapshot.get("Uttar Dakshin").unwrap().status(), QueueStatus::Busy);
        assert_eq!(snapshot.get("Uttar Dakshin").unwrap().derived_metric(), Some(8.0));
    }

    #[test]
    fn inverted_bounds_fail_initialization() {
        let configs = vec![EntityConfig::new("A", 5.0, 10.0, 0.0)];
        let err = EntityStore::initialize(&configs, &profile()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBounds { ref id, .. } if id == "A"));
    }

    #[test]
    fn starting_metric_outside_bounds_fails() {
        let configs = vec![
            EntityConfig::new("ok", 1.0, 0.0, 10.0),
            EntityConfig::new("bad", 11.0, 0.0, 10.0),
        ];
        let err = EntityStore::initialize(&configs, &profile()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MetricOutOfBounds {
                id: "bad".to_string(),
                metric: 11.0,
                min: 0.0,
                max: 10.0,
            }
        );
    }

    #[test]
    fn duplicate_ids_fail() {
        let configs = vec![
            EntityConfig::new("A", 1.0, 0.0, 10.0),
            EntityConfig::new("A", 2.0, 0.0, 10.0),
        ];
        let err = EntityStore::initialize(&configs, &profile()).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateId("A".to_string()));
    }

    #[test]
    fn empty_store_is_valid() {
        let store = EntityStore::initialize(&[], &profile()).unwrap();
        assert!(store.is_empty());
        assert!(store.current_snapshot().is_empty());
    }

    #[test]
    fn replace_all_swaps_whole_set_and_bumps_tick() {
        let p = profile();
        let store = EntityStore::initialize(&counters(), &p).unwrap();
        let before = store.current_snapshot();

        let next: Vec<_> = before.iter().map(|e| p.reclassify(e, 7.0)).collect();
        let tick = store.replace_all(next).unwrap();

        assert_eq!(tick, 1);
        let after = store.current_snapshot();
        assert!(after.iter().all(|e| e.status() == QueueStatus::Crowded));
        // The old snapshot is untouched
        assert_eq!(before.get("Two Good").unwrap().metric(), 0.0);
        assert_eq!(before.tick(), 0);
    }

    #[test]
    fn replace_all_rejects_foreign_identities() {
        let p = profile();
        let store = EntityStore::initialize(&counters(), &p).unwrap();
        let other = EntityStore::initialize(&[EntityConfig::new("X", 0.0, 0.0, 10.0)], &p).unwrap();

        let foreign = other.current_snapshot().entities().to_vec();
        assert_eq!(store.replace_all(foreign), Err(ConfigError::IdentityMismatch));

        let mut reordered = store.current_snapshot().entities().to_vec();
        reordered.reverse();
        assert_eq!(store.replace_all(reordered), Err(ConfigError::IdentityMismatch));
        assert_eq!(store.current_snapshot().tick(), 0);
    }

    #[test]
    fn subscribers_see_published_ticks() {
        let p = profile();
        let store = EntityStore::initialize(&counters(), &p).unwrap();
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        let same = store.current_snapshot().entities().to_vec();
        store.replace_all(same).unwrap();

        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), 1);
    }

    #[test]
    fn bounds_follow_entity_order() {
        let configs = vec![
            EntityConfig::new("A", 1.0, 0.0, 10.0),
            EntityConfig::new("B", 500.0, 400.0, 2000.0),
        ];
        let store = EntityStore::initialize(&configs, &profile()).unwrap();
        assert_eq!(store.bounds_of("B"), Bounds::new(400.0, 2000.0));
        assert_eq!(store.bounds_of("missing"), None);
        assert_eq!(store.bounds().len(), 2);
    }

    #[test]
    fn concurrent_readers_never_see_mixed_sets() {
        use std::thread;

        let p = Arc::new(profile());
        let configs: Vec<_> =
            (0..8).map(|i| EntityConfig::new(format!("C{i}"), 0.0, 0.0, 10.0)).collect();
        let store = Arc::new(EntityStore::initialize(&configs, &p).unwrap());

        let writer = {
            let store = Arc::clone(&store);
            let p = Arc::clone(&p);
            thread::spawn(move || {
                for round in 1..=200u64 {
                    let value = (round % 11) as f64;
                    let next = store.current_snapshot().iter().map(|e| p.reclassify(e, value)).collect();
                    store.publish(next);
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..500 {
                        let snapshot = store.current_snapshot();
                        let first = snapshot.entities()[0].metric();
                        assert!(snapshot.iter().all(|e| e.metric() == first));
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(store.current_snapshot().tick(), 200);
    }
}
