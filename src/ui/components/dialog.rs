//! Centered dialog overlays: notices and the clear-all confirmation

use crate::state::ConfirmClear;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const MAX_DIALOG_WIDTH: u16 = 60;

/// Render a notice overlay for a rejected mutation
pub fn render_notice(frame: &mut Frame, message: &str) {
    let hint = vec![
        Span::raw("Press "),
        Span::styled(
            "Enter",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" or "),
        Span::styled(
            "Esc",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" to dismiss"),
    ];

    let mut content = vec![
        Line::from(Span::styled(
            "Notice",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for line in wrap_text(message, (MAX_DIALOG_WIDTH - 4) as usize) {
        content.push(Line::from(line));
    }
    content.push(Line::from(""));
    content.push(Line::from(hint));

    render_box(frame, content, Color::Yellow);
}

/// Render the clear-all confirmation dialog
pub fn render_confirm_clear(frame: &mut Frame, confirm: &ConfirmClear) {
    let mut content = vec![
        Line::from(Span::styled(
            "Clear All Data",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Erase every field, category and image?"),
        Line::from("This cannot be undone."),
        Line::from(""),
    ];

    for (proceed, label, color) in [(false, "Cancel", Color::White), (true, "Clear", Color::Red)] {
        let selected = confirm.proceed == proceed;
        let prefix = if selected { "▸ " } else { "  " };
        let style = if selected {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        content.push(Line::from(Span::styled(format!("{prefix}{label}"), style)));
    }

    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::styled("↑↓", Style::default().fg(Color::Cyan)),
        Span::styled(" select  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Enter", Style::default().fg(Color::Cyan)),
        Span::styled(" confirm  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::styled(" cancel", Style::default().fg(Color::DarkGray)),
    ]));

    render_box(frame, content, Color::Red);
}

fn render_box(frame: &mut Frame, content: Vec<Line>, border: Color) {
    let area = frame.area();
    let width = content
        .iter()
        .map(Line::width)
        .max()
        .unwrap_or(0)
        .min(usize::from(MAX_DIALOG_WIDTH)) as u16
        + 4;
    let height = content.len() as u16 + 2;

    let dialog_area = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width: width.min(area.width),
        height: height.min(area.height),
    };

    frame.render_widget(Clear, dialog_area);
    let dialog = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));
    frame.render_widget(dialog, dialog_area);
}

/// Wrap text to fit within a maximum width, counting characters rather
/// than bytes so CJK messages wrap sanely
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let chars: Vec<char> = paragraph.chars().collect();
        if chars.is_empty() {
            lines.push(String::new());
            continue;
        }
        for chunk in chars.chunks(max_width) {
            lines.push(chunk.iter().collect());
        }
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
