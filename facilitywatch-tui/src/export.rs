//! JSON export of the whole facility.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use facilitywatch_sim::Severity;
use serde_json::{json, Map, Value};
use tracing::info;

use crate::config::FacilityConfig;
use crate::data::{Dashboard, Domain};

/// Build the export document: a facility-wide summary plus, per domain,
/// the summary, entities and alerts.
pub fn build_report(dashboard: &Dashboard) -> Result<Value> {
    let views = dashboard.views();

    let mut summary = Map::new();
    summary.insert(
        "total_entities".to_string(),
        json!(views.iter().map(|view| view.rows.len()).sum::<usize>()),
    );
    for severity in Severity::ALL {
        let count: usize = views.iter().map(|view| view.severity_count(*severity)).sum();
        summary.insert(severity_key(*severity).to_string(), json!(count));
    }
    summary.insert(
        "alerts".to_string(),
        json!(views.iter().map(|view| view.alerts.len()).sum::<usize>()),
    );

    let mut domains = Map::new();
    for domain in Domain::ALL {
        let exported = dashboard
            .export(domain)
            .with_context(|| format!("Failed to export {}", domain))?;
        domains.insert(domain.key().to_string(), exported);
    }

    Ok(json!({
        "summary": Value::Object(summary),
        "domains": Value::Object(domains),
    }))
}

/// Write the export document to `path` as pretty JSON.
pub fn write_report(dashboard: &Dashboard, path: &Path) -> Result<()> {
    let report = build_report(dashboard)?;
    let json = serde_json::to_string_pretty(&report)?;
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(json.as_bytes())?;
    info!("Exported facility state to {}", path.display());
    Ok(())
}

/// Non-interactive export: build every domain, advance it `ticks` times and
/// write the result.
pub fn export_to_file(config: &FacilityConfig, ticks: u64, path: &Path) -> Result<()> {
    let mut dashboard = Dashboard::from_config(config)?;
    dashboard.advance(ticks);
    write_report(&dashboard, path)
}

fn severity_key(severity: Severity) -> &'static str {
    match severity {
        Severity::Nominal => "nominal",
        Severity::Elevated => "elevated",
        Severity::Critical => "critical",
    }
}
