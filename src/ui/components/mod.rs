pub mod date_input;
pub mod toast;

use tui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Span,
};

use crate::models::{ProjectStatus, StepStatus};

pub fn status_icon(status: StepStatus) -> Span<'static> {
    let (symbol, color) = match status {
        StepStatus::Pending => ("○", Color::Gray),
        StepStatus::InProgress => ("◷", Color::Yellow),
        StepStatus::Completed => ("✔", Color::Green),
    };
    Span::styled(symbol, Style::default().fg(color))
}

pub fn status_badge(status: StepStatus) -> Span<'static> {
    let color = match status {
        StepStatus::Pending => Color::Gray,
        StepStatus::InProgress => Color::Yellow,
        StepStatus::Completed => Color::Green,
    };
    Span::styled(format!("[{}]", status.label()), Style::default().fg(color))
}

pub fn project_badge(status: ProjectStatus) -> Span<'static> {
    let color = match status {
        ProjectStatus::Pending => Color::Gray,
        ProjectStatus::InProgress => Color::Yellow,
        ProjectStatus::Completed => Color::Green,
    };
    Span::styled(format!("[{}]", status.label()), Style::default().fg(color))
}

// Helper function to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
