//! Layout components (pane split, status bar)

use crate::app::App;
use crate::platform::PASTE_HINT;
use crate::state::Focus;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Fixed width of the input pane; the preview takes the rest
const FORM_PANE_WIDTH: u16 = 48;

/// Assumed pixel width of one terminal cell, used to feed the responsive
/// font pass the container width it expects
pub const PX_PER_CELL: f32 = 8.0;

/// Create the main layout: input pane left, preview right, status line at
/// the bottom
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(FORM_PANE_WIDTH), // Form
            Constraint::Min(0),                  // Preview
        ])
        .split(vertical[0]);

    (panes[0], panes[1])
}

/// Preview container width in pixels for a given terminal width, matching
/// the split in [`create_layout`]
pub fn preview_px_width(terminal_width: u16) -> f32 {
    f32::from(terminal_width.saturating_sub(FORM_PANE_WIDTH)) * PX_PER_CELL
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![Span::styled(
        format!(" ({}/6 selected) ", app.form.selected_count()),
        Style::default().fg(Color::Cyan),
    )];
    spans.push(Span::styled(
        get_focus_hints(app.editor.focus),
        Style::default().fg(Color::DarkGray),
    ));

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    // Quit hint on the right
    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: quit_hint.len() as u16,
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for the focused control
fn get_focus_hints(focus: Focus) -> String {
    match focus {
        Focus::CategoryInput => "Tab:next  Enter:add  Backspace(empty):remove last".to_string(),
        Focus::ImagePath => format!("Tab:next  Enter:attach  {PASTE_HINT}"),
        Focus::ImageList => "←/→:select  Backspace:remove  ^R:remove all".to_string(),
        Focus::QuestionLabel(_) | Focus::QuestionContent(_) => {
            "Tab:next  ^T:toggle question  ^L:clear all".to_string()
        }
        _ => format!("Tab:next  Shift+Tab:prev  {PASTE_HINT}  ^L:clear all"),
    }
}
