use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use facilitywatch_tui::data::duration::parse_duration;
use facilitywatch_tui::{events, export, ui, App, Dashboard, FacilityConfig, View};

#[derive(Parser, Debug)]
#[command(name = "facilitywatch")]
#[command(about = "Terminal dashboard for simulated building telemetry")]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Cafeteria tick interval (e.g., "5s", "500ms")
    #[arg(short, long)]
    interval: Option<String>,

    /// Start with every domain paused
    #[arg(long = "static")]
    static_mode: bool,

    /// Advance every domain and write JSON to this file, then exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Ticks to apply before exporting
    #[arg(short, long, default_value = "0", requires = "export")]
    ticks: u64,

    /// Write logs to this file (filtered by RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.log_file.as_deref(), args.export.is_some())?;

    let mut config = FacilityConfig::load(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(interval) = args.interval {
        parse_duration(&interval).context("Invalid --interval")?;
        config.cafeteria.interval = interval;
    }

    // Handle export mode (non-interactive)
    if let Some(export_path) = args.export {
        export::export_to_file(&config, args.ticks, &export_path)?;
        println!("Exported facility state to: {}", export_path.display());
        return Ok(());
    }

    // Schedulers spawn onto the runtime entered here
    let rt = tokio::runtime::Runtime::new()?;
    let _guard = rt.enter();

    let mut dashboard = Dashboard::from_config(&config)?;
    if !args.static_mode {
        dashboard.start_live()?;
    }

    run_tui(dashboard)
}

/// Install the log subscriber.
///
/// The terminal belongs to the UI, so logs go to `--log-file` or, in export
/// mode, to stderr. Otherwise nothing is installed.
fn init_logging(log_file: Option<&Path>, export: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(path) = log_file {
        let file = File::create(path).with_context(|| format!("Failed to create log file {}", path.display()))?;
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false).with_target(true))
            .with(filter)
            .init();
    } else if export {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr))
            .with(filter)
            .init();
    }
    Ok(())
}

/// Run the TUI over a dashboard
fn run_tui(dashboard: Dashboard) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Restore the terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let mut app = App::new(dashboard);
    info!("Dashboard started");

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    info!("Dashboard closed");
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 12;

    while app.running {
        // Pick up ticks published since the last frame
        app.refresh();

        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered = ratatui::layout::Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5);
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(8),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::common::render_tabs(frame, app, chunks[1]);

            match app.current_view {
                View::Overview => ui::overview::render(frame, app, chunks[2]),
                _ => ui::domain::render(frame, app, chunks[2]),
            }

            ui::common::render_status_bar(frame, app, chunks[3]);

            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                // Content starts after header (1) + tabs (1)
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse, 2),
                _ => {}
            }
        }
    }

    Ok(())
}
