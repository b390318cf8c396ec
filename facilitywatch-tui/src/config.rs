//! Layered dashboard configuration.
//!
//! Values are resolved in order: built-in defaults, then an optional TOML
//! file, then environment variables such as
//! `FACILITYWATCH__CAFETERIA__INTERVAL=2s`.
//!
//! ```toml
//! seed = 42
//!
//! [cafeteria]
//! live = true
//! interval = "5s"
//!
//! [air_quality]
//! live = true
//! interval = "10s"
//! delta = 2
//!
//! [[restrooms.entities]]
//! id = "NL15"
//! metric = 3.5
//! min = 0.0
//! max = 10.0
//! floor = 1
//! location = "North Wing"
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use facilitywatch_types::EntityConfig;
use serde::Deserialize;

use crate::data::duration::parse_duration;
use crate::data::Domain;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "FACILITYWATCH";

/// Settings for the whole dashboard.
#[derive(Debug, Clone, Deserialize)]
pub struct FacilityConfig {
    /// Seed for reproducible runs. Each domain derives its own stream from it.
    #[serde(default)]
    pub seed: Option<u64>,
    pub cafeteria: DomainConfig,
    pub air_quality: DomainConfig,
    pub restrooms: DomainConfig,
    pub energy: DomainConfig,
}

/// Settings for one domain.
#[derive(Debug, Clone, Deserialize)]
pub struct DomainConfig {
    /// Whether the domain ticks on its own once the dashboard starts.
    pub live: bool,
    /// Time between ticks, e.g. `"5s"`.
    pub interval: String,
    /// Maximum number of steps a metric may move per tick.
    #[serde(default)]
    pub delta: Option<u32>,
    /// Replaces the compiled-in sample entities.
    #[serde(default)]
    pub entities: Option<Vec<EntityConfig>>,
}

impl FacilityConfig {
    /// Load from defaults, an optional file and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        for domain in Domain::ALL {
            builder = builder
                .set_default(format!("{}.live", domain.key()), domain == Domain::Cafeteria)?
                .set_default(format!("{}.interval", domain.key()), "5s")?;
        }
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?;

        let loaded: Self = config
            .try_deserialize()
            .context("Invalid configuration")?;

        // Surface bad intervals now rather than when a scheduler starts
        for domain in Domain::ALL {
            loaded.domain(domain).interval().with_context(|| format!("Invalid [{}] interval", domain.key()))?;
        }
        Ok(loaded)
    }

    pub fn domain(&self, domain: Domain) -> &DomainConfig {
        match domain {
            Domain::Cafeteria => &self.cafeteria,
            Domain::AirQuality => &self.air_quality,
            Domain::Restrooms => &self.restrooms,
            Domain::Energy => &self.energy,
        }
    }

    pub fn domain_mut(&mut self, domain: Domain) -> &mut DomainConfig {
        match domain {
            Domain::Cafeteria => &mut self.cafeteria,
            Domain::AirQuality => &mut self.air_quality,
            Domain::Restrooms => &mut self.restrooms,
            Domain::Energy => &mut self.energy,
        }
    }
}

impl Default for FacilityConfig {
    fn default() -> Self {
        Self {
            seed: None,
            cafeteria: DomainConfig::ticking(),
            air_quality: DomainConfig::default(),
            restrooms: DomainConfig::default(),
            energy: DomainConfig::default(),
        }
    }
}

impl DomainConfig {
    fn ticking() -> Self {
        Self {
            live: true,
            ..Self::default()
        }
    }

    pub fn interval(&self) -> Result<Duration> {
        parse_duration(&self.interval)
    }
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            live: false,
            interval: "5s".to_string(),
            delta: None,
            entities: None,
        }
    }
}
