//! Recent metric readings per entity, for sparklines and trend arrows.

use std::collections::{HashMap, VecDeque};

use super::dashboard::{Domain, DomainView, Row};

/// Maximum number of readings kept per entity.
const MAX_HISTORY_SIZE: usize = 60;

/// Direction of the latest change in a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Rising,
    Falling,
    Steady,
}

impl Trend {
    pub fn symbol(self) -> &'static str {
        match self {
            Trend::Rising => "↑",
            Trend::Falling => "↓",
            Trend::Steady => "→",
        }
    }
}

/// Readings recorded once per observed tick.
#[derive(Debug, Clone, Default)]
pub struct History {
    readings: HashMap<(Domain, String), VecDeque<f64>>,
    /// Last tick recorded for each domain.
    ticks: HashMap<Domain, u64>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a view if its tick has not been seen yet.
    ///
    /// Returns `true` when something was recorded.
    pub fn record(&mut self, view: &DomainView) -> bool {
        if self.ticks.get(&view.domain) == Some(&view.tick) {
            return false;
        }
        self.ticks.insert(view.domain, view.tick);

        for row in &view.rows {
            let readings = self.readings.entry((view.domain, row.id.clone())).or_default();
            readings.push_back(row.metric);
            if readings.len() > MAX_HISTORY_SIZE {
                readings.pop_front();
            }
        }
        true
    }

    /// Last tick recorded for a domain.
    pub fn last_tick(&self, domain: Domain) -> Option<u64> {
        self.ticks.get(&domain).copied()
    }

    pub fn readings(&self, domain: Domain, id: &str) -> Option<&VecDeque<f64>> {
        self.readings.get(&(domain, id.to_string()))
    }

    /// Sparkline levels (0-7) for an entity, scaled to its bounds when known
    /// and to the recorded range otherwise.
    pub fn sparkline(&self, domain: Domain, row: &Row) -> Vec<u8> {
        let Some(values) = self.readings(domain, &row.id) else {
            return Vec::new();
        };
        if values.len() < 2 {
            return Vec::new();
        }

        let (low, high) = match row.bounds {
            Some(bounds) => (bounds.min, bounds.max),
            None => values
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v))),
        };
        let range = high - low;

        values
            .iter()
            .map(|v| {
                if range <= 0.0 {
                    return 0;
                }
                (((v - low) / range * 7.0).round() as u8).min(7)
            })
            .collect()
    }

    /// Direction of the most recent change.
    pub fn trend(&self, domain: Domain, id: &str) -> Option<Trend> {
        let values = self.readings(domain, id)?;
        let len = values.len();
        if len < 2 {
            return None;
        }
        let change = values[len - 1] - values[len - 2];
        Some(if change > 0.0 {
            Trend::Rising
        } else if change < 0.0 {
            Trend::Falling
        } else {
            Trend::Steady
        })
    }
}
