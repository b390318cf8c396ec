//! Compiled-in profiles and sample entities for the four facility domains.
//!
//! | domain      | metric       | bounds      | step      | bands                                  |
//! |-------------|--------------|-------------|-----------|----------------------------------------|
//! | cafeteria   | queue length | 0..=10      | ±1        | busy ≥ 3, crowded ≥ 6                  |
//! | air quality | CO₂ ppm      | 400..=2000  | ±15       | moderate > 800, poor > 1200            |
//! | restrooms   | odor level   | 0..=10      | ±0.1      | good ≥ 1.5, attention ≥ 3, cleaning ≥ 4 |
//! | energy      | power factor | 0..=1       | ±0.01     | fair ≥ 0.8, good ≥ 0.9                 |
//!
//! Air quality parameters other than CO₂ and restroom sensor batteries are
//! classified through the same tables without being walked:
//!
//! | reading       | bands                        |
//! |---------------|------------------------------|
//! | PM2.5 µg/m³   | moderate > 100, poor > 150   |
//! | PM10 µg/m³    | moderate > 100, poor > 150   |
//! | TVOC ppb      | moderate > 250, poor > 400   |
//! | battery %     | medium > 30, high > 60       |

use std::time::Duration;

use facilitywatch_types::{AirQuality, BatteryLevel, EntityConfig, PowerFactorBand, QueueStatus, RestroomCondition};

use crate::classify::{Band, ThresholdTable};
use crate::perturb::Walk;
use crate::profile::Profile;

/// Default time between ticks.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(5000);

/// Estimated minutes of waiting per person in a cafeteria queue.
pub const MINUTES_PER_PERSON: f64 = 2.0;

pub fn cafeteria_profile() -> Profile<QueueStatus> {
    let table = ThresholdTable::from_sorted(
        QueueStatus::Ready,
        vec![
            Band::at_least(3.0, QueueStatus::Busy),
            Band::at_least(6.0, QueueStatus::Crowded),
        ],
    );
    Profile::new(table, Walk::unit(1)).with_derived_factor(MINUTES_PER_PERSON)
}

pub fn cafeteria_counters() -> Vec<EntityConfig> {
    vec![
        EntityConfig::new("Two Good", 0.0, 0.0, 10.0),
        EntityConfig::new("Uttar Dakshin", 4.0, 0.0, 10.0),
        EntityConfig::new("Tandoor Corner", 0.0, 0.0, 10.0),
    ]
}

pub fn air_quality_profile() -> Profile<AirQuality> {
    Profile::new(co2_thresholds(), Walk::scaled_unchecked(1, 15.0))
}

/// A reading is good up to `good`, moderate up to `moderate`, poor beyond.
fn air_quality_table(good: f64, moderate: f64) -> ThresholdTable<AirQuality> {
    ThresholdTable::from_sorted(
        AirQuality::Good,
        vec![
            Band::above(good, AirQuality::Moderate),
            Band::above(moderate, AirQuality::Poor),
        ],
    )
}

/// CO₂ in ppm.
pub fn co2_thresholds() -> ThresholdTable<AirQuality> {
    air_quality_table(800.0, 1200.0)
}

/// PM2.5 in µg/m³.
pub fn pm25_thresholds() -> ThresholdTable<AirQuality> {
    air_quality_table(100.0, 150.0)
}

/// PM10 in µg/m³.
pub fn pm10_thresholds() -> ThresholdTable<AirQuality> {
    air_quality_table(100.0, 150.0)
}

/// Total volatile organic compounds in ppb.
pub fn tvoc_thresholds() -> ThresholdTable<AirQuality> {
    air_quality_table(250.0, 400.0)
}

/// Two zones on each of five floors.
pub fn air_quality_zones() -> Vec<EntityConfig> {
    let readings = [
        (1, 711.0, 845.0),
        (2, 1205.0, 698.0),
        (3, 789.0, 654.0),
        (4, 1432.0, 923.0),
        (5, 723.0, 612.0),
    ];
    readings
        .into_iter()
        .flat_map(|(floor, zone_a, zone_b)| {
            [("A", zone_a), ("B", zone_b)].map(|(zone, co2)| {
                EntityConfig::new(format!("F{floor}-{zone}"), co2, 400.0, 2000.0)
                    .on_floor(floor)
                    .at(format!("Zone {zone}"))
            })
        })
        .collect()
}

pub fn restroom_profile() -> Profile<RestroomCondition> {
    let table = ThresholdTable::from_sorted(
        RestroomCondition::Excellent,
        vec![
            Band::at_least(1.5, RestroomCondition::Good),
            Band::at_least(3.0, RestroomCondition::NeedsAttention),
            Band::at_least(4.0, RestroomCondition::CleaningRequired),
        ],
    );
    Profile::new(table, Walk::scaled_unchecked(1, 0.1))
}

pub fn restrooms() -> Vec<EntityConfig> {
    [
        ("SL27", 2, "South Wing", 2.1),
        ("NL15", 1, "North Wing", 3.5),
        ("CL32", 3, "Central Area", 5.8),
        ("EL18", 1, "East Wing", 1.2),
        ("WL24", 2, "West Wing", 2.8),
        ("SL44", 4, "South Wing", 4.2),
    ]
    .into_iter()
    .map(|(id, floor, wing, odor)| EntityConfig::new(id, odor, 0.0, 10.0).on_floor(floor).at(wing))
    .collect()
}

/// Sensor battery charge in percent.
pub fn battery_thresholds() -> ThresholdTable<BatteryLevel> {
    ThresholdTable::from_sorted(
        BatteryLevel::Low,
        vec![
            Band::above(30.0, BatteryLevel::Medium),
            Band::above(60.0, BatteryLevel::High),
        ],
    )
}

/// Battery charge of each sample restroom's sensor, by restroom id.
pub fn restroom_batteries() -> Vec<(&'static str, f64)> {
    vec![
        ("SL27", 66.0),
        ("NL15", 78.0),
        ("CL32", 45.0),
        ("EL18", 82.0),
        ("WL24", 71.0),
        ("SL44", 58.0),
    ]
}

pub fn energy_profile() -> Profile<PowerFactorBand> {
    let table = ThresholdTable::from_sorted(
        PowerFactorBand::Poor,
        vec![
            Band::at_least(0.8, PowerFactorBand::Fair),
            Band::at_least(0.9, PowerFactorBand::Good),
        ],
    );
    Profile::new(table, Walk::scaled_unchecked(1, 0.01))
}

/// One main-panel meter per floor.
pub fn energy_meters() -> Vec<EntityConfig> {
    [0.92, 0.89, 0.91, 0.85, 0.93]
        .into_iter()
        .zip(1u8..)
        .map(|(power_factor, floor)| {
            EntityConfig::new(format!("EM-F{floor}-001"), power_factor, 0.0, 1.0)
                .on_floor(floor)
                .at("Main Panel")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::Simulation;
    use facilitywatch_types::StatusLabel;

    /// Presets skip validation at construction; make sure they would pass it.
    fn assert_table_valid<L: StatusLabel>(table: &ThresholdTable<L>) {
        let checked = ThresholdTable::new(table.default_label(), table.bands().to_vec());
        assert_eq!(checked.as_ref(), Ok(table));
    }

    fn assert_valid<L: StatusLabel>(profile: &Profile<L>) {
        let table = profile.thresholds();
        assert_table_valid(table);
        assert!(Walk::scaled(profile.walk().delta(), profile.walk().step_size()).is_ok());

        let mut labels: Vec<L> = table.labels().collect();
        labels.sort();
        assert_eq!(labels, L::ALL, "every label must be reachable");
    }

    #[test]
    fn reading_tables_are_valid() {
        for table in [co2_thresholds(), pm25_thresholds(), pm10_thresholds(), tvoc_thresholds()] {
            assert_table_valid(&table);
        }
        assert_table_valid(&battery_thresholds());
    }

    #[test]
    fn particulate_and_voc_bands_are_exclusive_at_the_threshold() {
        for table in [pm25_thresholds(), pm10_thresholds()] {
            assert_eq!(table.classify(100.0), AirQuality::Good);
            assert_eq!(table.classify(101.0), AirQuality::Moderate);
            assert_eq!(table.classify(150.0), AirQuality::Moderate);
            assert_eq!(table.classify(151.0), AirQuality::Poor);
        }

        let tvoc = tvoc_thresholds();
        assert_eq!(tvoc.classify(245.0), AirQuality::Good);
        assert_eq!(tvoc.classify(250.0), AirQuality::Good);
        assert_eq!(tvoc.classify(312.0), AirQuality::Moderate);
        assert_eq!(tvoc.classify(400.0), AirQuality::Moderate);
        assert_eq!(tvoc.classify(412.0), AirQuality::Poor);
    }

    #[test]
    fn battery_bands() {
        let table = battery_thresholds();
        assert_eq!(table.classify(30.0), BatteryLevel::Low);
        assert_eq!(table.classify(31.0), BatteryLevel::Medium);
        assert_eq!(table.classify(60.0), BatteryLevel::Medium);
        assert_eq!(table.classify(61.0), BatteryLevel::High);

        let levels: Vec<BatteryLevel> = restroom_batteries()
            .into_iter()
            .map(|(_, charge)| table.classify(charge))
            .collect();
        assert_eq!(
            levels,
            [
                BatteryLevel::High,
                BatteryLevel::High,
                BatteryLevel::Medium,
                BatteryLevel::High,
                BatteryLevel::High,
                BatteryLevel::Medium,
            ]
        );
        let ids: Vec<&str> = restroom_batteries().into_iter().map(|(id, _)| id).collect();
        let restroom_ids: Vec<String> = restrooms().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, restroom_ids);
    }

    #[test]
    fn preset_tables_are_valid() {
        assert_valid(&cafeteria_profile());
        assert_valid(&air_quality_profile());
        assert_valid(&restroom_profile());
        assert_valid(&energy_profile());
    }

    #[test]
    fn cafeteria_boundaries() {
        let table = cafeteria_profile();
        let status = |queue| table.thresholds().classify(queue);
        assert_eq!(status(2.0), QueueStatus::Ready);
        assert_eq!(status(3.0), QueueStatus::Busy);
        assert_eq!(status(5.0), QueueStatus::Busy);
        assert_eq!(status(6.0), QueueStatus::Crowded);
        assert_eq!(status(10.0), QueueStatus::Crowded);
    }

    #[test]
    fn air_quality_bands_are_exclusive_at_the_threshold() {
        let table = air_quality_profile();
        assert_eq!(table.thresholds().classify(800.0), AirQuality::Good);
        assert_eq!(table.thresholds().classify(801.0), AirQuality::Moderate);
        assert_eq!(table.thresholds().classify(1200.0), AirQuality::Moderate);
        assert_eq!(table.thresholds().classify(1205.0), AirQuality::Poor);
    }

    #[test]
    fn sample_restrooms_keep_their_labels() {
        let sim = Simulation::new("restrooms", &restrooms(), restroom_profile()).unwrap();
        let status = |id| sim.snapshot().get(id).unwrap().status();
        assert_eq!(status("SL27"), RestroomCondition::Good);
        assert_eq!(status("NL15"), RestroomCondition::NeedsAttention);
        assert_eq!(status("CL32"), RestroomCondition::CleaningRequired);
        assert_eq!(status("EL18"), RestroomCondition::Excellent);
        assert_eq!(status("WL24"), RestroomCondition::Good);
        assert_eq!(status("SL44"), RestroomCondition::CleaningRequired);

        let sim = Simulation::new("energy", &energy_meters(), energy_profile()).unwrap();
        assert_eq!(sim.snapshot().get("EM-F4-001").unwrap().status(), PowerFactorBand::Fair);
        assert_eq!(sim.snapshot().get("EM-F5-001").unwrap().status(), PowerFactorBand::Good);
    }

    #[test]
    fn every_sample_set_initializes() {
        assert_eq!(Simulation::new("cafeteria", &cafeteria_counters(), cafeteria_profile()).unwrap().snapshot().len(), 3);
        assert_eq!(Simulation::new("iaq", &air_quality_zones(), air_quality_profile()).unwrap().snapshot().len(), 10);
        assert_eq!(Simulation::new("restrooms", &restrooms(), restroom_profile()).unwrap().snapshot().len(), 6);
        assert_eq!(Simulation::new("energy", &energy_meters(), energy_profile()).unwrap().snapshot().len(), 5);
    }

    #[test]
    fn air_quality_zones_are_grouped_by_floor() {
        let zones = air_quality_zones();
        assert_eq!(zones[2].id, "F2-A");
        assert_eq!(zones[2].floor, Some(2));
        assert_eq!(zones[2].location.as_deref(), Some("Zone A"));
        assert_eq!(zones[2].initial_metric, 1205.0);
        assert_eq!(zones[9].id, "F5-B");
    }
}
