use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use facilitywatch_sim::Severity;

use crate::app::{App, View};

/// File written by the export key.
pub const EXPORT_PATH: &str = "facility_export.json";

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Any key closes help
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // View switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),
        KeyCode::Char(c @ '1'..='5') => {
            if let Some(view) = View::ALL.get(c as usize - '1' as usize) {
                app.set_view(*view);
            }
        }

        // List navigation
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        KeyCode::Char('f') => app.cycle_floor(),
        KeyCode::Char('p') => app.toggle_pause(),
        KeyCode::Char('t') => app.step(),
        KeyCode::Char('?') => app.toggle_help(),

        KeyCode::Char('e') => {
            let export_path = PathBuf::from(EXPORT_PATH);
            match app.export_state(&export_path) {
                Ok(()) => app.set_status_message(format!("Exported to {}", export_path.display())),
                Err(e) => app.set_status_message(format!("Export failed: {:#}", e)),
            }
        }

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, content_start_row: u16) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),

        MouseEventKind::Down(MouseButton::Left) => {
            // Tabs sit on the row above the content
            if mouse.row + 1 == content_start_row {
                if let Some(view) = tab_at_column(app, mouse.column) {
                    app.set_view(view);
                }
                return;
            }

            // Skip the table border and header row
            let first_item_row = match app.current_view {
                View::Overview => content_start_row + app.views.len() as u16 + 3 + 2,
                _ => content_start_row + 2,
            };
            if mouse.row >= first_item_row {
                let item = (mouse.row - first_item_row) as usize;
                let count = match app.current_view {
                    View::Overview => app.alerts().len(),
                    _ => app.visible_rows().len(),
                };
                if item < count {
                    app.selected_index = item;
                }
            }
        }

        _ => {}
    }
}

/// The tab under a column of the tab bar.
///
/// Each tab is its title padded by one space either side, tabs are joined
/// by a one-column divider.
fn tab_at_column(app: &App, column: u16) -> Option<View> {
    let mut start = 0u16;
    for view in View::ALL.iter() {
        let badge = match view.domain() {
            Some(domain) if app.domain_view(domain).worst() > Severity::Nominal => 1,
            _ => 0,
        };
        // " {n}:{label}{badge} " plus padding
        let width = (view.label().chars().count() + badge + 4 + 2) as u16;
        if column < start + width {
            return Some(*view);
        }
        start += width + 1;
    }
    None
}
