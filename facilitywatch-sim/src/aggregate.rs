//! Totals, counts and alert lists computed over snapshots.

use std::collections::BTreeMap;

use facilitywatch_types::{Severity, StatusLabel};

use crate::entity::{Entity, Snapshot};

/// Statistics over a group of entities.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Summary<L> {
    pub count: usize,
    pub total: f64,
    /// `None` for an empty group.
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Entity count for every label, in band order. Labels nobody holds are
    /// listed with zero.
    pub by_label: Vec<(L, usize)>,
    pub by_severity: BTreeMap<Severity, usize>,
}

impl<L: StatusLabel> Summary<L> {
    pub fn of<'a>(entities: impl IntoIterator<Item = &'a Entity<L>>) -> Self {
        let mut summary = Summary {
            count: 0,
            total: 0.0,
            mean: None,
            min: None,
            max: None,
            by_label: L::ALL.iter().map(|label| (*label, 0)).collect(),
            by_severity: Severity::ALL.iter().map(|severity| (*severity, 0)).collect(),
        };

        for entity in entities {
            let metric = entity.metric();
            summary.count += 1;
            summary.total += metric;
            summary.min = Some(summary.min.map_or(metric, |min| min.min(metric)));
            summary.max = Some(summary.max.map_or(metric, |max| max.max(metric)));
            if let Some((_, count)) = summary.by_label.iter_mut().find(|(label, _)| *label == entity.status()) {
                *count += 1;
            }
            *summary.by_severity.entry(entity.severity()).or_default() += 1;
        }

        if summary.count > 0 {
            summary.mean = Some(summary.total / summary.count as f64);
        }
        summary
    }

    pub fn label_count(&self, label: L) -> usize {
        self.by_label
            .iter()
            .find(|(candidate, _)| *candidate == label)
            .map_or(0, |(_, count)| *count)
    }

    pub fn severity_count(&self, severity: Severity) -> usize {
        self.by_severity.get(&severity).copied().unwrap_or(0)
    }

    /// Fraction of entities in good standing, `None` for an empty group.
    pub fn share_nominal(&self) -> Option<f64> {
        (self.count > 0).then(|| self.severity_count(Severity::Nominal) as f64 / self.count as f64)
    }
}

/// Entities that need attention: worst severity first, then by id.
pub fn alerts<L: StatusLabel>(snapshot: &Snapshot<L>) -> Vec<&Entity<L>> {
    let mut alerts: Vec<_> = snapshot
        .iter()
        .filter(|entity| entity.severity() > Severity::Nominal)
        .collect();
    alerts.sort_by(|a, b| b.severity().cmp(&a.severity()).then_with(|| a.id().cmp(b.id())));
    alerts
}

/// A summary per floor. Entities without a floor are left out.
pub fn by_floor<L: StatusLabel>(snapshot: &Snapshot<L>) -> BTreeMap<u8, Summary<L>> {
    let mut floors: BTreeMap<u8, Vec<&Entity<L>>> = BTreeMap::new();
    for entity in snapshot.iter() {
        if let Some(floor) = entity.floor() {
            floors.entry(floor).or_default().push(entity);
        }
    }
    floors
        .into_iter()
        .map(|(floor, entities)| (floor, Summary::of(entities)))
        .collect()
}

/// Fraction of the snapshot at [`Severity::Nominal`].
pub fn share_nominal<L: StatusLabel>(snapshot: &Snapshot<L>) -> Option<f64> {
    Summary::of(snapshot.iter()).share_nominal()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;
    use crate::random::FixedStep;
    use crate::simulation::Simulation;
    use facilitywatch_types::{AirQuality, EntityConfig, QueueStatus};

    #[test]
    fn cafeteria_summary_counts_every_label() {
        let sim = Simulation::new("cafeteria", &presets::cafeteria_counters(), presets::cafeteria_profile())
            .unwrap();
        let summary = Summary::of(sim.snapshot().iter());

        assert_eq!(summary.count, 3);
        assert_eq!(summary.total, 4.0);
        assert_eq!(summary.min, Some(0.0));
        assert_eq!(summary.max, Some(4.0));
        assert_eq!(
            summary.by_label,
            vec![(QueueStatus::Ready, 2), (QueueStatus::Busy, 1), (QueueStatus::Crowded, 0)]
        );
        assert_eq!(summary.severity_count(Severity::Elevated), 1);
        assert_eq!(summary.severity_count(Severity::Critical), 0);
    }

    #[test]
    fn empty_group_has_no_mean_or_share() {
        let summary = Summary::<QueueStatus>::of(std::iter::empty());
        assert_eq!(summary.count, 0);
        assert_eq!(summary.mean, None);
        assert_eq!(summary.share_nominal(), None);
        assert_eq!(summary.label_count(QueueStatus::Ready), 0);
    }

    #[test]
    fn alerts_put_worst_first_then_sort_by_id() {
        let sim = Simulation::new("iaq", &presets::air_quality_zones(), presets::air_quality_profile()).unwrap();
        let snapshot = sim.snapshot();
        let ids: Vec<_> = alerts(&snapshot).iter().map(|entity| entity.id()).collect();

        // Poor: F2-A 1205, F4-A 1432. Moderate: F1-B 845, F4-B 923.
        assert_eq!(ids, vec!["F2-A", "F4-A", "F1-B", "F4-B"]);
        assert_eq!(alerts(&snapshot)[0].status(), AirQuality::Poor);
    }

    #[test]
    fn floors_are_summarised_separately() {
        let sim = Simulation::new("iaq", &presets::air_quality_zones(), presets::air_quality_profile()).unwrap();
        let floors = by_floor(&sim.snapshot());

        assert_eq!(floors.len(), 5);
        assert_eq!(floors[&4].mean, Some((1432.0 + 923.0) / 2.0));
        assert_eq!(floors[&4].label_count(AirQuality::Poor), 1);
    }

    #[test]
    fn entities_without_floor_are_not_grouped() {
        let sim = Simulation::new("cafeteria", &presets::cafeteria_counters(), presets::cafeteria_profile())
            .unwrap();
        assert!(by_floor(&sim.snapshot()).is_empty());
    }

    #[test]
    fn share_nominal_follows_the_walk() {
        let sim = Simulation::new(
            "cafeteria",
            &[
                EntityConfig::new("A", 0.0, 0.0, 10.0),
                EntityConfig::new("B", 5.0, 0.0, 10.0),
            ],
            presets::cafeteria_profile(),
        )
        .unwrap();
        assert_eq!(share_nominal(&sim.snapshot()), Some(0.5));

        sim.advance(&mut FixedStep(1), 3);
        assert_eq!(share_nominal(&sim.snapshot()), Some(0.0));
    }
}
