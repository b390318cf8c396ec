//! One domain's store together with its profile.

use std::sync::Arc;

use facilitywatch_types::{EntityConfig, StatusLabel};
use parking_lot::Mutex;
use tracing::debug;

use crate::entity::{Entity, Snapshot};
use crate::error::ConfigError;
use crate::profile::Profile;
use crate::random::StepSource;
use crate::store::EntityStore;

/// A simulated domain: an [`EntityStore`] driven by a [`Profile`].
///
/// Cloning is cheap and every clone drives the same store. Ticks from
/// different clones are serialized, so at most one tick runs per store.
///
/// # Example
///
/// ```rust
/// use facilitywatch_sim::{presets, FixedStep, Simulation};
/// use facilitywatch_types::QueueStatus;
///
/// let sim = Simulation::new("cafeteria", &presets::cafeteria_counters(), presets::cafeteria_profile())
///     .unwrap();
///
/// sim.advance(&mut FixedStep(1), 3);
/// let snapshot = sim.snapshot();
/// assert_eq!(snapshot.tick(), 3);
/// assert_eq!(snapshot.get("Two Good").unwrap().status(), QueueStatus::Busy);
/// ```
#[derive(Debug, Clone)]
pub struct Simulation<L> {
    name: Arc<str>,
    store: Arc<EntityStore<L>>,
    profile: Arc<Profile<L>>,
    tick_lock: Arc<Mutex<()>>,
}

impl<L: StatusLabel> Simulation<L> {
    /// Build a simulation from static configuration.
    pub fn new(
        name: impl Into<Arc<str>>,
        configs: &[EntityConfig],
        profile: Profile<L>,
    ) -> Result<Self, ConfigError> {
        let store = EntityStore::initialize(configs, &profile)?;
        Ok(Self {
            name: name.into(),
            store: Arc::new(store),
            profile: Arc::new(profile),
            tick_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Run one tick: walk every metric, reclassify, publish once.
    ///
    /// Returns the new tick number.
    pub fn tick<S: StepSource + ?Sized>(&self, rng: &mut S) -> u64 {
        let _serialized = self.tick_lock.lock();

        let current = self.store.current_snapshot();
        let walk = self.profile.walk();
        let next: Vec<Entity<L>> = current
            .iter()
            .zip(self.store.bounds())
            .map(|(entity, bounds)| {
                let metric = walk.next(rng, entity.metric(), *bounds);
                self.profile.reclassify(entity, metric)
            })
            .collect();

        let tick = self.store.publish(next);
        debug!("{} tick {} ({} entities)", self.name, tick, current.len());
        tick
    }

    /// Run `n` ticks back to back. Returns the last tick number.
    pub fn advance<S: StepSource + ?Sized>(&self, rng: &mut S, n: u64) -> u64 {
        let mut tick = self.snapshot().tick();
        for _ in 0..n {
            tick = self.tick(rng);
        }
        tick
    }

    pub fn snapshot(&self) -> Arc<Snapshot<L>> {
        self.store.current_snapshot()
    }

    pub fn store(&self) -> &EntityStore<L> {
        &self.store
    }

    pub fn profile(&self) -> &Profile<L> {
        &self.profile
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;
    use crate::random::{FixedStep, RngSource};
    use facilitywatch_types::QueueStatus;

    fn single_counter() -> Simulation<QueueStatus> {
        Simulation::new(
            "cafeteria",
            &[EntityConfig::new("A", 0.0, 0.0, 10.0)],
            presets::cafeteria_profile(),
        )
        .unwrap()
    }

    #[test]
    fn rising_queue_walks_through_every_band() {
        let sim = single_counter();
        let mut rng = FixedStep(1);

        sim.advance(&mut rng, 3);
        let a = sim.snapshot();
        assert_eq!(a.get("A").unwrap().metric(), 3.0);
        assert_eq!(a.get("A").unwrap().status(), QueueStatus::Busy);

        sim.advance(&mut rng, 3);
        let a = sim.snapshot();
        assert_eq!(a.get("A").unwrap().metric(), 6.0);
        assert_eq!(a.get("A").unwrap().status(), QueueStatus::Crowded);

        sim.advance(&mut rng, 5);
        let a = sim.snapshot();
        assert_eq!(a.tick(), 11);
        assert_eq!(a.get("A").unwrap().metric(), 10.0);
        assert_eq!(a.get("A").unwrap().status(), QueueStatus::Crowded);
        assert_eq!(a.get("A").unwrap().derived_metric(), Some(20.0));
    }

    #[test]
    fn metrics_stay_in_bounds_over_many_ticks() {
        let sim = Simulation::new(
            "cafeteria",
            &presets::cafeteria_counters(),
            presets::cafeteria_profile(),
        )
        .unwrap();
        let mut rng = RngSource::seeded(99);

        for _ in 0..2_000 {
            sim.tick(&mut rng);
            let snapshot = sim.snapshot();
            for (entity, bounds) in snapshot.iter().zip(sim.store().bounds()) {
                assert!(bounds.contains(entity.metric()), "{} escaped: {}", entity.id(), entity.metric());
                let (status, derived) = sim.profile().evaluate(entity.metric());
                assert_eq!(entity.status(), status);
                assert_eq!(entity.derived_metric(), derived);
            }
        }
    }

    #[test]
    fn same_seed_gives_same_run() {
        let a = single_counter();
        let b = single_counter();
        a.advance(&mut RngSource::seeded(17), 50);
        b.advance(&mut RngSource::seeded(17), 50);
        assert_eq!(*a.snapshot(), *b.snapshot());
    }

    #[test]
    fn clones_share_the_store() {
        let sim = single_counter();
        let clone = sim.clone();
        clone.tick(&mut FixedStep(1));
        assert_eq!(sim.snapshot().tick(), 1);
        assert_eq!(sim.snapshot().get("A").unwrap().metric(), 1.0);
    }

    #[test]
    fn ticks_from_many_threads_are_serialized() {
        use std::thread;

        let sim = single_counter();
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let sim = sim.clone();
                thread::spawn(move || {
                    let mut rng = FixedStep(1);
                    for _ in 0..25 {
                        sim.tick(&mut rng);
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(sim.snapshot().tick(), 100);
        assert_eq!(sim.snapshot().get("A").unwrap().metric(), 10.0);
    }
}
