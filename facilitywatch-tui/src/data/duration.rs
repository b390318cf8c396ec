//! Human-friendly tick intervals such as `"5s"`, `"500ms"` or `"1.5m"`.

use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Suffix to milliseconds multiplier (longer suffixes first so `ms` wins over `s`)
const UNITS: &[(&str, f64)] = &[("ms", 1.0), ("s", 1_000.0), ("m", 60_000.0)];

/// Parse an interval string. A bare number is taken as milliseconds.
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();
    if s.is_empty() {
        bail!("Empty duration");
    }

    let (number, multiplier) = UNITS
        .iter()
        .find_map(|(suffix, multiplier)| s.strip_suffix(suffix).map(|rest| (rest, *multiplier)))
        .unwrap_or((s, 1.0));

    let value: f64 = number
        .trim()
        .parse()
        .with_context(|| format!("Invalid duration: {}", s))?;
    if !value.is_finite() || value < 0.0 {
        bail!("Duration must be a non-negative number: {}", s);
    }

    Ok(Duration::from_micros((value * multiplier * 1_000.0).round() as u64))
}

/// Format an interval the way it would be written in a config file.
pub fn format_duration(d: Duration) -> String {
    let millis = d.as_millis();
    if millis == 0 {
        "0ms".to_string()
    } else if millis < 1_000 {
        format!("{}ms", millis)
    } else if millis % 60_000 == 0 {
        format!("{}m", millis / 60_000)
    } else if millis % 1_000 == 0 {
        format!("{}s", millis / 1_000)
    } else {
        format!("{:.1}s", d.as_secs_f64())
    }
}

/// Format an elapsed time for the status bar (`"3.2s ago"`, `"2m ago"`).
pub fn format_age(d: Duration) -> String {
    if d.as_secs() >= 60 {
        format!("{}m ago", d.as_secs() / 60)
    } else {
        format!("{:.1}s ago", d.as_secs_f64())
    }
}
