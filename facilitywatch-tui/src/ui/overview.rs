//! Overview rendering.
//!
//! Shows one line per domain with its severity counts and mean reading,
//! and below it every alert in the facility, worst first.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use facilitywatch_sim::Severity;

use crate::app::App;
use crate::ui::common::format_stat;

/// Render the facility overview.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(app.views.len() as u16 + 3),
        Constraint::Min(4),
    ])
    .split(area);

    render_domains(frame, app, chunks[0]);
    render_alerts(frame, app, chunks[1]);
}

fn render_domains(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec!["Domain", "Entities", "OK", "Warn", "Crit", "Mean", "Nominal", "Tick", "State"])
        .height(1)
        .style(app.theme.header);

    let rows: Vec<Row> = app
        .views
        .iter()
        .map(|view| {
            let count = |severity: Severity| {
                let n = view.severity_count(severity);
                let style = if n > 0 && severity > Severity::Nominal {
                    app.theme.severity_style(severity)
                } else if n == 0 {
                    Style::default().add_modifier(Modifier::DIM)
                } else {
                    Style::default()
                };
                Cell::from(n.to_string()).style(style)
            };
            let state = if view.running {
                Cell::from("live").style(Style::default().fg(app.theme.nominal))
            } else {
                Cell::from("static").style(Style::default().add_modifier(Modifier::DIM))
            };

            Row::new(vec![
                Cell::from(view.domain.label()).style(app.theme.severity_style(view.worst())),
                Cell::from(view.rows.len().to_string()),
                count(Severity::Nominal),
                count(Severity::Elevated),
                count(Severity::Critical),
                Cell::from(format_stat(view.mean, |v| view.domain.format_metric(v))),
                Cell::from(format_stat(view.share_nominal, |v| format!("{:.0}%", v * 100.0))),
                Cell::from(view.tick.to_string()),
                state,
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(3),
        Constraint::Fill(1),
        Constraint::Length(4),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Fill(2),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Length(7),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(" Domains ")
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border)),
    );

    frame.render_widget(table, area);
}

fn render_alerts(frame: &mut Frame, app: &App, area: Rect) {
    let alerts = app.alerts();

    let header = Row::new(vec!["Domain", "Entity", "Location", "Reading", "Status"])
        .height(1)
        .style(app.theme.header);

    let rows: Vec<Row> = alerts
        .iter()
        .map(|(domain, row)| {
            let location = match (row.floor, &row.location) {
                (Some(floor), Some(location)) => format!("F{} {}", floor, location),
                (Some(floor), None) => format!("Floor {}", floor),
                (None, Some(location)) => location.clone(),
                (None, None) => "-".to_string(),
            };
            Row::new(vec![
                Cell::from(domain.label()),
                Cell::from(row.id.clone()),
                Cell::from(location),
                Cell::from(domain.format_metric(row.metric)),
                Cell::from(row.status).style(app.theme.severity_style(row.severity)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(2),
        Constraint::Fill(3),
        Constraint::Fill(3),
        Constraint::Fill(2),
        Constraint::Fill(2),
    ];

    let title = if alerts.is_empty() {
        " Alerts (none) ".to_string()
    } else {
        format!(" Alerts ({}) [{}/{}] ", alerts.len(), app.selected_index + 1, alerts.len())
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    if !alerts.is_empty() {
        state.select(Some(app.selected_index));
    }

    frame.render_stateful_widget(table, area, &mut state);
}
