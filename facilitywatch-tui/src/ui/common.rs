//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, help overlay
//! and the sparkline renderer.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use facilitywatch_sim::Severity;

use crate::app::{App, View};
use crate::data::duration::format_age;

/// Sparkline characters (8 levels of height).
const SPARKLINE_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render the header bar with facility-wide severity counts.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let [nominal, elevated, critical] = app.severity_totals();
    let total = nominal + elevated + critical;
    let worst = app.worst();

    let count = |n: usize, severity: Severity| {
        if n > 0 {
            Span::styled(n.to_string(), app.theme.severity_style(severity))
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        }
    };

    let mode = if app.is_paused() {
        Span::styled("PAUSED", Style::default().fg(app.theme.elevated))
    } else {
        Span::styled("LIVE", Style::default().fg(app.theme.nominal))
    };

    let line = Line::from(vec![
        Span::styled(" ● ", app.theme.severity_style(worst)),
        Span::styled("FACILITY ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        count(nominal, Severity::Nominal),
        Span::raw(" ok "),
        count(elevated, Severity::Elevated),
        Span::raw(" warn "),
        count(critical, Severity::Critical),
        Span::raw(" crit │ "),
        Span::styled(total.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" entities │ "),
        mode,
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the tab bar showing available views.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| {
            let badge = match view.domain() {
                Some(domain) if app.domain_view(domain).worst() > Severity::Nominal => "!",
                _ => "",
            };
            Line::from(format!(" {}:{}{} ", i + 1, view.label(), badge))
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.current_view.index())
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows time since the last tick and the available controls, or a
/// temporary status message.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let updated = app
        .last_change
        .map(|at| format!("Updated {}", format_age(at.elapsed())))
        .unwrap_or_else(|| "Waiting for first tick".to_string());

    let controls = match app.current_view {
        View::Overview => "Tab:switch p:pause t:step e:export ?:help q:quit",
        _ => "↑↓:select f:floor p:pause t:step e:export ?:help q:quit",
    };

    let status = format!(" {} | {} | {}", app.current_view.label(), updated, controls);
    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(title, Style::default().add_modifier(Modifier::BOLD))])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Navigation"),
        Line::from("  ←/→ h/l     Switch screens"),
        Line::from("  1-5         Jump to screen"),
        Line::from("  ↑/↓ j/k     Navigate list"),
        Line::from("  PgUp/PgDn   Jump 10 rows"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  f           Cycle floor filter"),
        Line::from(""),
        section(" Simulation"),
        Line::from("  p           Pause / resume live domains"),
        Line::from("  t           Step every domain once"),
        Line::from(""),
        section(" General"),
        Line::from("  e           Export to JSON"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    let help_width = 46u16.min(area.width.saturating_sub(4));
    let help_height = 22u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

/// Render the last `width` sparkline levels as text, padded to `width`.
pub fn sparkline(levels: &[u8], width: usize) -> String {
    let start = levels.len().saturating_sub(width);
    let mut line: String = levels[start..]
        .iter()
        .map(|&v| SPARKLINE_CHARS[v.min(7) as usize])
        .collect();
    let shown = levels.len() - start;
    line.extend(std::iter::repeat(' ').take(width - shown));
    line
}

/// Format an optional statistic, `-` when absent.
pub fn format_stat(value: Option<f64>, format: impl Fn(f64) -> String) -> String {
    value.map(format).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparkline_keeps_the_latest_levels() {
        assert_eq!(sparkline(&[0, 7, 3], 8), "▁█▄     ");
        assert_eq!(sparkline(&[0, 1, 2, 3, 4, 5, 6, 7, 7, 7], 8), "▃▄▅▆▇███");
        assert_eq!(sparkline(&[], 4), "    ");
    }

    #[test]
    fn sparkline_clamps_levels() {
        assert_eq!(sparkline(&[12], 1), "█");
    }

    #[test]
    fn missing_stats_render_as_dash() {
        assert_eq!(format_stat(None, |v| format!("{v:.1}")), "-");
        assert_eq!(format_stat(Some(2.26), |v| format!("{v:.1}")), "2.3");
    }
}
