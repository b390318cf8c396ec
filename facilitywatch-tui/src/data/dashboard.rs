//! The four simulated domains and their schedulers, behind one handle.

use std::collections::BTreeMap;
use std::fmt;

use anyhow::{Context, Result};
use facilitywatch_sim::{
    alerts, presets, Bounds, EntityConfig, Profile, RngSource, Scheduler, SchedulerState, Severity, Simulation,
    Snapshot, StatusLabel, Summary,
};
use serde::Serialize;
use tracing::info;

use crate::config::{DomainConfig, FacilityConfig};

/// A monitored facility domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Cafeteria,
    AirQuality,
    Restrooms,
    Energy,
}

impl Domain {
    pub const ALL: [Domain; 4] = [Domain::Cafeteria, Domain::AirQuality, Domain::Restrooms, Domain::Energy];

    /// Position in [`Domain::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Section name in configuration files.
    pub fn key(self) -> &'static str {
        match self {
            Domain::Cafeteria => "cafeteria",
            Domain::AirQuality => "air_quality",
            Domain::Restrooms => "restrooms",
            Domain::Energy => "energy",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Domain::Cafeteria => "Cafeteria",
            Domain::AirQuality => "Air Quality",
            Domain::Restrooms => "Restrooms",
            Domain::Energy => "Energy",
        }
    }

    /// What the entities of this domain are called.
    pub fn entity_noun(self) -> &'static str {
        match self {
            Domain::Cafeteria => "Counter",
            Domain::AirQuality => "Zone",
            Domain::Restrooms => "Restroom",
            Domain::Energy => "Meter",
        }
    }

    pub fn metric_name(self) -> &'static str {
        match self {
            Domain::Cafeteria => "Queue",
            Domain::AirQuality => "CO₂",
            Domain::Restrooms => "Odor",
            Domain::Energy => "PF",
        }
    }

    pub fn format_metric(self, value: f64) -> String {
        match self {
            Domain::Cafeteria => format!("{:.0}", value),
            Domain::AirQuality => format!("{:.0} ppm", value),
            Domain::Restrooms => format!("{:.1}", value),
            Domain::Energy => format!("{:.2}", value),
        }
    }

    /// Column title and formatter for the derived metric, if the domain has one.
    pub fn derived_name(self) -> Option<&'static str> {
        match self {
            Domain::Cafeteria => Some("Wait"),
            _ => None,
        }
    }

    pub fn format_derived(self, value: f64) -> String {
        match self {
            Domain::Cafeteria => format!("{:.0} min", value),
            _ => format!("{:.2}", value),
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One entity, with its label erased to a name and severity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub metric: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derived: Option<f64>,
    pub status: &'static str,
    pub severity: Severity,
    #[serde(skip)]
    pub bounds: Option<Bounds>,
}

/// How many entities hold a label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelCount {
    pub label: &'static str,
    pub severity: Severity,
    pub count: usize,
}

/// A render-ready projection of one domain's current snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainView {
    pub domain: Domain,
    pub tick: u64,
    pub running: bool,
    pub rows: Vec<Row>,
    pub labels: Vec<LabelCount>,
    pub by_severity: BTreeMap<Severity, usize>,
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub share_nominal: Option<f64>,
    /// Ids of entities above nominal, worst first.
    pub alerts: Vec<String>,
}

impl DomainView {
    fn project<L: StatusLabel>(
        domain: Domain,
        running: bool,
        snapshot: &Snapshot<L>,
        bounds: &[Bounds],
    ) -> Self {
        let summary = Summary::of(snapshot.iter());
        let rows = snapshot
            .iter()
            .zip(bounds.iter().copied().map(Some).chain(std::iter::repeat(None)))
            .map(|(entity, bounds)| Row {
                id: entity.id().to_string(),
                floor: entity.floor(),
                location: entity.location().map(str::to_string),
                metric: entity.metric(),
                derived: entity.derived_metric(),
                status: entity.status().name(),
                severity: entity.severity(),
                bounds,
            })
            .collect();

        Self {
            domain,
            tick: snapshot.tick(),
            running,
            rows,
            labels: summary
                .by_label
                .iter()
                .map(|(label, count)| LabelCount {
                    label: label.name(),
                    severity: label.severity(),
                    count: *count,
                })
                .collect(),
            share_nominal: summary.share_nominal(),
            by_severity: summary.by_severity,
            mean: summary.mean,
            min: summary.min,
            max: summary.max,
            alerts: alerts(snapshot).iter().map(|entity| entity.id().to_string()).collect(),
        }
    }

    pub fn severity_count(&self, severity: Severity) -> usize {
        self.by_severity.get(&severity).copied().unwrap_or(0)
    }

    /// The most severe status present.
    pub fn worst(&self) -> Severity {
        self.rows.iter().map(|row| row.severity).max().unwrap_or_default()
    }

    /// Distinct floors, ascending.
    pub fn floors(&self) -> Vec<u8> {
        let mut floors: Vec<u8> = self.rows.iter().filter_map(|row| row.floor).collect();
        floors.sort_unstable();
        floors.dedup();
        floors
    }

    pub fn row(&self, id: &str) -> Option<&Row> {
        self.rows.iter().find(|row| row.id == id)
    }
}

/// Object-safe face of a domain's simulation and scheduler.
trait Lane: Send {
    fn domain(&self) -> Domain;
    fn tick(&self) -> u64;
    fn view(&self) -> DomainView;
    fn live(&self) -> bool;
    fn state(&self) -> SchedulerState;
    fn start(&mut self) -> Result<()>;
    fn stop(&mut self);
    fn advance(&mut self, n: u64) -> u64;
    fn export(&self) -> Result<serde_json::Value>;
}

struct SimLane<L: StatusLabel> {
    domain: Domain,
    live: bool,
    scheduler: Scheduler<L>,
}

impl<L: StatusLabel + Serialize> Lane for SimLane<L> {
    fn domain(&self) -> Domain {
        self.domain
    }

    fn tick(&self) -> u64 {
        self.scheduler.simulation().snapshot().tick()
    }

    fn view(&self) -> DomainView {
        let simulation = self.scheduler.simulation();
        DomainView::project(
            self.domain,
            self.state() == SchedulerState::Running,
            &simulation.snapshot(),
            simulation.store().bounds(),
        )
    }

    fn live(&self) -> bool {
        self.live
    }

    fn state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    fn start(&mut self) -> Result<()> {
        self.scheduler
            .start()
            .with_context(|| format!("Failed to start {} scheduler", self.domain))?;
        Ok(())
    }

    fn stop(&mut self) {
        self.scheduler.stop();
    }

    fn advance(&mut self, n: u64) -> u64 {
        let mut tick = self.tick();
        for _ in 0..n {
            tick = self.scheduler.tick_now();
        }
        tick
    }

    fn export(&self) -> Result<serde_json::Value> {
        let snapshot = self.scheduler.simulation().snapshot();
        let summary = Summary::of(snapshot.iter());
        let alerts: Vec<&str> = alerts(&snapshot).iter().map(|entity| entity.id()).collect();
        Ok(serde_json::json!({
            "domain": self.domain,
            "tick": snapshot.tick(),
            "summary": serde_json::to_value(&summary)?,
            "entities": serde_json::to_value(snapshot.entities())?,
            "alerts": alerts,
        }))
    }
}

/// Every domain of the facility.
pub struct Dashboard {
    lanes: Vec<Box<dyn Lane>>,
}

impl Dashboard {
    /// Build all four domains. Nothing ticks until [`start_live`](Self::start_live).
    pub fn from_config(config: &FacilityConfig) -> Result<Self> {
        let lanes = vec![
            lane(Domain::Cafeteria, config, presets::cafeteria_profile(), presets::cafeteria_counters)?,
            lane(Domain::AirQuality, config, presets::air_quality_profile(), presets::air_quality_zones)?,
            lane(Domain::Restrooms, config, presets::restroom_profile(), presets::restrooms)?,
            lane(Domain::Energy, config, presets::energy_profile(), presets::energy_meters)?,
        ];
        Ok(Self { lanes })
    }

    /// Start every domain configured as live. Returns how many are running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start_live(&mut self) -> Result<usize> {
        let mut started = 0;
        for lane in self.lanes.iter_mut().filter(|lane| lane.live()) {
            if lane.state() == SchedulerState::Idle {
                lane.start()?;
            }
            started += 1;
        }
        info!("{} live domain(s) running", started);
        Ok(started)
    }

    pub fn stop_all(&mut self) {
        for lane in &mut self.lanes {
            lane.stop();
        }
    }

    /// Whether any domain is ticking.
    pub fn is_running(&self) -> bool {
        self.lanes.iter().any(|lane| lane.state() == SchedulerState::Running)
    }

    /// Number of domains configured to tick on their own.
    pub fn live_count(&self) -> usize {
        self.lanes.iter().filter(|lane| lane.live()).count()
    }

    /// Tick every domain `n` times right now. Returns the new ticks.
    pub fn advance(&mut self, n: u64) -> Vec<(Domain, u64)> {
        self.lanes
            .iter_mut()
            .map(|lane| (lane.domain(), lane.advance(n)))
            .collect()
    }

    pub fn tick(&self, domain: Domain) -> u64 {
        self.lane(domain).tick()
    }

    pub fn state(&self, domain: Domain) -> SchedulerState {
        self.lane(domain).state()
    }

    pub fn view(&self, domain: Domain) -> DomainView {
        self.lane(domain).view()
    }

    /// Views of every domain, in [`Domain::ALL`] order.
    pub fn views(&self) -> Vec<DomainView> {
        self.lanes.iter().map(|lane| lane.view()).collect()
    }

    /// Snapshot of one domain as JSON: summary, entities and alerts.
    pub fn export(&self, domain: Domain) -> Result<serde_json::Value> {
        self.lane(domain).export()
    }

    fn lane(&self, domain: Domain) -> &dyn Lane {
        self.lanes[domain.index()].as_ref()
    }
}

fn lane<L: StatusLabel + Serialize>(
    domain: Domain,
    config: &FacilityConfig,
    profile: Profile<L>,
    samples: fn() -> Vec<EntityConfig>,
) -> Result<Box<dyn Lane>> {
    let settings: &DomainConfig = config.domain(domain);
    let profile = match settings.delta {
        Some(delta) => profile.with_delta(delta),
        None => profile,
    };
    let entities = settings.entities.clone().unwrap_or_else(samples);
    let interval = settings
        .interval()
        .with_context(|| format!("Invalid [{}] interval", domain.key()))?;

    let simulation = Simulation::new(domain.key(), &entities, profile)
        .with_context(|| format!("Invalid [{}] entities", domain.key()))?;

    // Each domain draws from its own stream so runs are reproducible
    let rng = match config.seed {
        Some(seed) => RngSource::seeded(seed.wrapping_add(domain.index() as u64)),
        None => RngSource::system(),
    };

    Ok(Box::new(SimLane {
        domain,
        live: settings.live,
        scheduler: Scheduler::new(simulation, interval, rng),
    }))
}
