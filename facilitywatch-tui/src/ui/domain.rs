//! Domain screen rendering.
//!
//! Displays the entities of one domain with their reading, status and a
//! sparkline of recent readings, next to a summary of the domain.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::data::DomainView;
use crate::ui::common::{format_stat, sparkline};

/// Width of the trend column in characters.
const TREND_WIDTH: usize = 10;

/// Render the screen of the current domain.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(view) = app.current_domain_view() else {
        return;
    };

    let chunks = Layout::horizontal([Constraint::Min(40), Constraint::Length(30)]).split(area);
    render_table(frame, app, view, chunks[0]);
    render_summary(frame, app, view, chunks[1]);
}

fn render_table(frame: &mut Frame, app: &App, view: &DomainView, area: Rect) {
    let domain = view.domain;
    let rows = app.visible_rows();
    let derived = domain.derived_name();

    let mut titles = vec![domain.entity_noun(), "Floor", "Location", domain.metric_name()];
    titles.extend(derived);
    titles.extend(["Trend", "Status"]);
    let header = Row::new(titles).height(1).style(app.theme.header);

    let table_rows: Vec<Row> = rows
        .iter()
        .map(|row| {
            let trend = app
                .history
                .trend(domain, &row.id)
                .map(|trend| trend.symbol())
                .unwrap_or(" ");
            let line = sparkline(&app.history.sparkline(domain, row), TREND_WIDTH);

            let mut cells = vec![
                Cell::from(row.id.clone()),
                Cell::from(row.floor.map(|f| f.to_string()).unwrap_or_else(|| "-".to_string())),
                Cell::from(row.location.clone().unwrap_or_else(|| "-".to_string())),
                Cell::from(domain.format_metric(row.metric)),
            ];
            if derived.is_some() {
                cells.push(Cell::from(format_stat(row.derived, |v| domain.format_derived(v))));
            }
            cells.push(Cell::from(Line::from(vec![
                Span::styled(line, Style::default().fg(app.theme.severity_color(row.severity))),
                Span::raw(" "),
                Span::raw(trend),
            ])));
            cells.push(Cell::from(row.status).style(app.theme.severity_style(row.severity)));
            Row::new(cells)
        })
        .collect();

    let mut widths = vec![
        Constraint::Fill(3),
        Constraint::Length(5),
        Constraint::Fill(2),
        Constraint::Fill(2),
    ];
    if derived.is_some() {
        widths.push(Constraint::Fill(1));
    }
    widths.push(Constraint::Length(TREND_WIDTH as u16 + 2));
    widths.push(Constraint::Min(9));

    let filter = app
        .floor_filter
        .map(|floor| format!(" [floor {}]", floor))
        .unwrap_or_default();
    let position = if rows.is_empty() {
        String::new()
    } else {
        format!(" [{}/{}]", app.selected_index + 1, rows.len())
    };
    let title = format!(" {}s ({}/{}){}{} ", domain.entity_noun(), rows.len(), view.rows.len(), filter, position);

    let table = Table::new(table_rows, widths)
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
    if !rows.is_empty() {
        state.select(Some(app.selected_index));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_summary(frame: &mut Frame, app: &App, view: &DomainView, area: Rect) {
    let domain = view.domain;
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim = Style::default().add_modifier(Modifier::DIM);

    let stat = |name: &'static str, value: Option<f64>| {
        Line::from(vec![
            Span::raw(format!(" {:<9}", name)),
            Span::styled(format_stat(value, |v| domain.format_metric(v)), bold),
        ])
    };

    let mut lines = vec![
        Line::from(vec![Span::styled(format!(" {} ", domain.label()), bold)]),
        Line::from(vec![
            Span::raw(" Tick     "),
            Span::styled(view.tick.to_string(), bold),
            Span::styled(if view.running { "  live" } else { "  static" }, dim),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(" Status", app.theme.header)]),
    ];

    for label in &view.labels {
        let style = if label.count == 0 {
            dim
        } else {
            app.theme.severity_style(label.severity)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<11}", label.label), style),
            Span::styled(label.count.to_string(), style),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![Span::styled(format!(" {}", domain.metric_name()), app.theme.header)]));
    lines.push(stat("Mean", view.mean));
    lines.push(stat("Min", view.min));
    lines.push(stat("Max", view.max));
    lines.push(Line::from(vec![
        Span::raw(" Nominal  "),
        Span::styled(format_stat(view.share_nominal, |v| format!("{:.0}%", v * 100.0)), bold),
    ]));

    if let Some(row) = app.selected_row() {
        if let Some(values) = app.history.readings(domain, &row.id) {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![Span::styled(format!(" {}", row.id), app.theme.header)]));
            lines.push(Line::from(vec![
                Span::raw(" Samples  "),
                Span::styled(values.len().to_string(), bold),
            ]));
            if let Some(bounds) = row.bounds {
                lines.push(Line::from(vec![
                    Span::raw(" Range    "),
                    Span::styled(
                        format!("{}..{}", domain.format_metric(bounds.min), domain.format_metric(bounds.max)),
                        dim,
                    ),
                ]));
            }
        }
    }

    let floors = view.floors();
    if !floors.is_empty() {
        let filter = match app.floor_filter {
            Some(floor) => format!("{} of {}", floor, floors.len()),
            None => "all".to_string(),
        };
        lines.push(Line::from(""));
        lines.push(Line::from(vec![Span::raw(" Floor    "), Span::styled(filter, bold), Span::styled("  f", dim)]));
    }

    let block = Block::default()
        .title(" Summary ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
