//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use facilitywatch_sim::Severity;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

/// Color and style theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    pub nominal: Color,
    pub elevated: Color,
    pub critical: Color,
    pub border: Color,
    /// Style for header rows in tables.
    pub header: Style,
    pub selected: Style,
    pub tab_active: Style,
    pub tab_inactive: Style,
    pub border_type: BorderType,
}

impl Theme {
    /// Theme for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            nominal: Color::Green,
            elevated: Color::Yellow,
            critical: Color::Red,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Theme for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            nominal: Color::Green,
            elevated: Color::Rgb(180, 120, 0),
            critical: Color::Red,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Pick a theme from the terminal's background luminance.
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn severity_color(&self, severity: Severity) -> Color {
        match severity {
            Severity::Nominal => self.nominal,
            Severity::Elevated => self.elevated,
            Severity::Critical => self.critical,
        }
    }

    /// Text style for a status of the given severity.
    pub fn severity_style(&self, severity: Severity) -> Style {
        let style = Style::default().fg(self.severity_color(severity));
        match severity {
            Severity::Critical => style.add_modifier(Modifier::BOLD),
            _ => style,
        }
    }
}
