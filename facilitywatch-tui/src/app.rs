//! Application state and navigation logic.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use facilitywatch_sim::Severity;

use crate::data::{Dashboard, Domain, DomainView, History, Row};
use crate::ui::Theme;

/// The current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Severity counts and alerts across every domain.
    Overview,
    Cafeteria,
    AirQuality,
    Restrooms,
    Energy,
}

impl View {
    pub const ALL: [View; 5] = [View::Overview, View::Cafeteria, View::AirQuality, View::Restrooms, View::Energy];

    /// Cycle to the next view.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the display label for this view.
    pub fn label(self) -> &'static str {
        match self.domain() {
            Some(domain) => domain.label(),
            None => "Overview",
        }
    }

    /// The domain shown by this view, if it shows a single one.
    pub fn domain(self) -> Option<Domain> {
        match self {
            View::Overview => None,
            View::Cafeteria => Some(Domain::Cafeteria),
            View::AirQuality => Some(Domain::AirQuality),
            View::Restrooms => Some(Domain::Restrooms),
            View::Energy => Some(Domain::Energy),
        }
    }
}

impl From<Domain> for View {
    fn from(domain: Domain) -> Self {
        match domain {
            Domain::Cafeteria => View::Cafeteria,
            Domain::AirQuality => View::AirQuality,
            Domain::Restrooms => View::Restrooms,
            Domain::Energy => View::Energy,
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    dashboard: Dashboard,
    /// Latest projection of every domain, in [`Domain::ALL`] order.
    pub views: Vec<DomainView>,
    pub history: History,
    pub last_change: Option<Instant>,

    // Navigation state
    pub selected_index: usize,
    pub floor_filter: Option<u8>,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create an app over a dashboard, detecting the terminal theme.
    pub fn new(dashboard: Dashboard) -> Self {
        Self::with_theme(dashboard, Theme::auto_detect())
    }

    pub fn with_theme(dashboard: Dashboard, theme: Theme) -> Self {
        let mut app = Self {
            running: true,
            current_view: View::Overview,
            show_help: false,
            views: Vec::new(),
            dashboard,
            history: History::new(),
            last_change: None,
            selected_index: 0,
            floor_filter: None,
            theme,
            status_message: None,
        };
        app.refresh();
        app
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    /// Re-read every domain and record history for new ticks.
    ///
    /// Returns `true` if any domain published since the last refresh.
    pub fn refresh(&mut self) -> bool {
        self.views = self.dashboard.views();
        let mut changed = false;
        for view in &self.views {
            changed |= self.history.record(view);
        }
        if changed {
            self.last_change = Some(Instant::now());
        }
        self.clamp_selection();
        changed
    }

    pub fn domain_view(&self, domain: Domain) -> &DomainView {
        &self.views[domain.index()]
    }

    /// The domain view on screen, if any.
    pub fn current_domain_view(&self) -> Option<&DomainView> {
        self.current_view.domain().map(|domain| self.domain_view(domain))
    }

    /// Rows of the current screen after the floor filter.
    pub fn visible_rows(&self) -> Vec<&Row> {
        let Some(view) = self.current_domain_view() else {
            return Vec::new();
        };
        view.rows
            .iter()
            .filter(|row| self.floor_filter.is_none() || row.floor == self.floor_filter)
            .collect()
    }

    pub fn selected_row(&self) -> Option<&Row> {
        self.visible_rows().get(self.selected_index).copied()
    }

    /// Alerts from every domain, worst first.
    pub fn alerts(&self) -> Vec<(Domain, &Row)> {
        let mut alerts: Vec<(Domain, &Row)> = self
            .views
            .iter()
            .flat_map(|view| {
                view.alerts
                    .iter()
                    .filter_map(move |id| view.row(id).map(|row| (view.domain, row)))
            })
            .collect();
        alerts.sort_by(|a, b| b.1.severity.cmp(&a.1.severity));
        alerts
    }

    /// Most severe status across the facility.
    pub fn worst(&self) -> Severity {
        self.views.iter().map(DomainView::worst).max().unwrap_or_default()
    }

    /// Entity counts per severity across the facility.
    pub fn severity_totals(&self) -> [usize; 3] {
        let mut totals = [0; 3];
        for view in &self.views {
            for (slot, severity) in totals.iter_mut().zip(Severity::ALL) {
                *slot += view.severity_count(*severity);
            }
        }
        totals
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        match &self.status_message {
            Some((msg, time)) if time.elapsed() < Duration::from_secs(3) => Some(msg),
            _ => None,
        }
    }

    pub fn next_view(&mut self) {
        self.set_view(self.current_view.next());
    }

    pub fn prev_view(&mut self) {
        self.set_view(self.current_view.prev());
    }

    /// Switch to a specific view, resetting selection and floor filter.
    pub fn set_view(&mut self, view: View) {
        if view != self.current_view {
            self.current_view = view;
            self.selected_index = 0;
            self.floor_filter = None;
        }
    }

    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    pub fn select_next_n(&mut self, n: usize) {
        let max = self.selectable_count().saturating_sub(1);
        self.selected_index = (self.selected_index + n).min(max);
    }

    pub fn select_prev_n(&mut self, n: usize) {
        self.selected_index = self.selected_index.saturating_sub(n);
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.selectable_count().saturating_sub(1);
    }

    /// Rows on a domain screen, alerts on the overview.
    fn selectable_count(&self) -> usize {
        match self.current_view.domain() {
            Some(_) => self.visible_rows().len(),
            None => self.alerts().len(),
        }
    }

    fn clamp_selection(&mut self) {
        let max = self.selectable_count().saturating_sub(1);
        self.selected_index = self.selected_index.min(max);
    }

    /// Step the floor filter: all floors, then each floor in turn.
    pub fn cycle_floor(&mut self) {
        let floors = match self.current_domain_view() {
            Some(view) => view.floors(),
            None => Vec::new(),
        };
        if floors.is_empty() {
            self.set_status_message("No floors on this screen".to_string());
            return;
        }

        self.floor_filter = match self.floor_filter {
            None => floors.first().copied(),
            Some(current) => floors.iter().copied().find(|floor| *floor > current),
        };
        self.selected_index = 0;
    }

    /// Stop every ticking domain, or restart the live ones.
    pub fn toggle_pause(&mut self) {
        if self.dashboard.is_running() {
            self.dashboard.stop_all();
            self.set_status_message("Paused".to_string());
            return;
        }
        match self.dashboard.start_live() {
            Ok(0) => self.set_status_message("No live domains configured (t: step)".to_string()),
            Ok(count) => self.set_status_message(format!("Resumed {} live domain(s)", count)),
            Err(e) => self.set_status_message(format!("Resume failed: {:#}", e)),
        }
    }

    /// Apply one tick to every domain right away.
    pub fn step(&mut self) {
        self.dashboard.advance(1);
        self.refresh();
        self.set_status_message("Stepped every domain".to_string());
    }

    pub fn is_paused(&self) -> bool {
        !self.dashboard.is_running()
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the current state of every domain to a file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        crate::export::write_report(&self.dashboard, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FacilityConfig;

    fn app() -> App {
        let config = FacilityConfig {
            seed: Some(11),
            ..FacilityConfig::default()
        };
        App::with_theme(Dashboard::from_config(&config).unwrap(), Theme::dark())
    }

    #[test]
    fn views_cycle_both_ways() {
        assert_eq!(View::Overview.next(), View::Cafeteria);
        assert_eq!(View::Energy.next(), View::Overview);
        assert_eq!(View::Overview.prev(), View::Energy);
        for view in View::ALL {
            assert_eq!(view.next().prev(), view);
        }
        assert_eq!(View::AirQuality.label(), "Air Quality");
        assert_eq!(View::from(Domain::Restrooms), View::Restrooms);
    }

    #[test]
    fn new_app_records_initial_history() {
        let app = app();
        assert_eq!(app.views.len(), 4);
        assert!(app.last_change.is_some());
        assert_eq!(app.history.last_tick(Domain::Cafeteria), Some(0));
    }

    #[test]
    fn refresh_reports_only_new_ticks() {
        let mut app = app();
        assert!(!app.refresh());
        app.step();
        assert_eq!(app.domain_view(Domain::Energy).tick, 1);
        assert!(!app.refresh());
    }

    #[test]
    fn selection_stays_within_visible_rows() {
        let mut app = app();
        app.set_view(View::Cafeteria);
        app.select_next_n(10);
        assert_eq!(app.selected_index, 2);
        app.select_prev_n(10);
        assert_eq!(app.selected_index, 0);
        app.select_last();
        assert_eq!(app.selected_row().unwrap().id, "Tandoor Corner");
    }

    #[test]
    fn floor_filter_cycles_through_floors_and_back() {
        let mut app = app();
        app.set_view(View::Restrooms);

        app.cycle_floor();
        assert_eq!(app.floor_filter, Some(1));
        assert_eq!(app.visible_rows().len(), 2);

        for expected in [Some(2), Some(3), Some(4), None] {
            app.cycle_floor();
            assert_eq!(app.floor_filter, expected);
        }
        assert_eq!(app.visible_rows().len(), 6);
    }

    #[test]
    fn floor_filter_is_refused_without_floors() {
        let mut app = app();
        app.set_view(View::Cafeteria);
        app.cycle_floor();
        assert_eq!(app.floor_filter, None);
        assert_eq!(app.get_status_message(), Some("No floors on this screen"));
    }

    #[test]
    fn switching_views_resets_filter() {
        let mut app = app();
        app.set_view(View::AirQuality);
        app.cycle_floor();
        app.select_next();
        app.next_view();
        assert_eq!(app.current_view, View::Restrooms);
        assert_eq!(app.floor_filter, None);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn overview_selects_across_alerts() {
        let mut app = app();
        let alerts: usize = app.views.iter().map(|view| view.alerts.len()).sum();
        assert_eq!(app.alerts().len(), alerts);
        app.select_last();
        assert_eq!(app.selected_index, alerts.saturating_sub(1));
    }

    #[test]
    fn facility_alerts_put_critical_first() {
        let app = app();
        let alerts = app.alerts();
        assert!(!alerts.is_empty());
        assert!(alerts.windows(2).all(|pair| pair[0].1.severity >= pair[1].1.severity));
        assert_eq!(alerts[0].1.severity, Severity::Critical);
    }

    #[test]
    fn severity_totals_cover_every_entity() {
        let app = app();
        let totals = app.severity_totals();
        assert_eq!(totals.iter().sum::<usize>(), 3 + 10 + 6 + 5);
        assert_eq!(app.worst(), Severity::Critical);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_toggles_live_domains() {
        let mut app = app();
        assert!(app.is_paused());

        app.toggle_pause();
        assert!(!app.is_paused());
        assert_eq!(app.get_status_message(), Some("Resumed 1 live domain(s)"));

        app.toggle_pause();
        assert!(app.is_paused());
    }

    #[test]
    fn export_writes_json() {
        let app = app();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        app.export_state(&path).unwrap();

        let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(json["domains"]["cafeteria"].is_object());
    }
}
