//! Input pane: basic fields, categories, images, question slots

use crate::app::App;
use crate::state::{char_len, CountStatus, FieldId, Focus, QUESTION_SLOTS};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().title(" Input ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints = vec![
        Constraint::Length(1), // Title
        Constraint::Length(1), // Author
        Constraint::Length(1), // Year
        Constraint::Length(1), // Category input
        Constraint::Length(1), // Category chips
        Constraint::Length(1), // Image path input
        Constraint::Length(1), // Image list
        Constraint::Length(1), // Questions header
    ];
    constraints.extend([Constraint::Length(1); QUESTION_SLOTS * 2]);
    constraints.push(Constraint::Min(0));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    draw_text_field(frame, rows[0], app, "Title   ", FieldId::Title, Focus::Title);
    draw_text_field(frame, rows[1], app, "Author  ", FieldId::Author, Focus::Author);
    draw_text_field(frame, rows[2], app, "Year    ", FieldId::Year, Focus::Year);
    draw_category_input(frame, rows[3], app);
    draw_category_chips(frame, rows[4], app);
    draw_image_input(frame, rows[5], app);
    draw_image_list(frame, rows[6], app);
    draw_questions_header(frame, rows[7], app);

    for slot in 1..=QUESTION_SLOTS as u8 {
        let base = 8 + (usize::from(slot) - 1) * 2;
        draw_question_label(frame, rows[base], app, slot);
        draw_question_content(frame, rows[base + 1], app, slot);
    }
}

fn count_style(status: CountStatus) -> Style {
    match status {
        CountStatus::Ok => Style::default().fg(Color::DarkGray),
        CountStatus::Warning => Style::default().fg(Color::Yellow),
        CountStatus::Danger => Style::default().fg(Color::Red),
    }
}

fn value_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    }
}

fn cursor_span(focused: bool) -> Span<'static> {
    if focused {
        Span::styled("▌", Style::default().fg(Color::Cyan))
    } else {
        Span::raw("")
    }
}

fn draw_text_field(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    label: &str,
    field: FieldId,
    focus: Focus,
) {
    let focused = app.editor.focus == focus;
    let value = app.form.field_text(field);
    let max = app.form.field_max(field);

    let mut spans = vec![
        Span::styled(label.to_string(), Style::default().fg(Color::Gray)),
        Span::styled(value.to_string(), value_style(focused)),
        cursor_span(focused),
    ];
    // The year field carries no counter
    if max != usize::MAX {
        spans.push(Span::styled(
            format!("  {}/{}", char_len(value), max),
            count_style(app.form.count_status(field)),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_category_input(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.editor.focus == Focus::CategoryInput;
    // A full set can take no more tags; the counter flips red like a
    // disabled add button
    let counter_style = if app.form.categories.is_full() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let spans = vec![
        Span::styled("Category", Style::default().fg(Color::Gray)),
        Span::raw(" "),
        Span::styled(app.editor.category_input.clone(), value_style(focused)),
        cursor_span(focused),
        Span::styled(format!("  ({}/5)", app.form.categories.len()), counter_style),
    ];
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_category_chips(frame: &mut Frame, area: Rect, app: &App) {
    if app.form.categories.is_empty() {
        return;
    }
    let mut spans = vec![Span::raw("  ")];
    for tag in app.form.categories.iter() {
        spans.push(Span::styled(
            format!("[{tag} ×]"),
            Style::default().fg(Color::Magenta),
        ));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_image_input(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.editor.focus == Focus::ImagePath;
    let spans = vec![
        Span::styled("Image   ", Style::default().fg(Color::Gray)),
        Span::styled(app.editor.image_path_input.clone(), value_style(focused)),
        cursor_span(focused),
        Span::styled(
            format!("  ({}/3)", app.form.images.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_image_list(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.editor.focus == Focus::ImageList;
    let mut spans = vec![Span::raw("  ")];
    for (idx, img) in app.form.images.iter().enumerate() {
        let selected = focused && idx == app.editor.image_cursor;
        let style = if selected {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!("🖼 {}", img.name), style));
        spans.push(Span::raw("  "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_questions_header(frame: &mut Frame, area: Rect, app: &App) {
    let line = Line::from(vec![
        Span::styled(
            "Questions",
            Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  ({}/6 selected)", app.form.selected_count()),
            Style::default().fg(Color::Cyan),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_question_label(frame: &mut Frame, area: Rect, app: &App, slot: u8) {
    let enabled = app.form.is_selected(slot);
    let focused = app.editor.focus == Focus::QuestionLabel(slot);
    let field = FieldId::QuestionLabel(slot);
    let value = app.form.field_text(field);

    let checkbox = if enabled { "[✓]" } else { "[ ]" };
    let base = if enabled {
        value_style(focused)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut spans = vec![
        Span::styled(
            format!("{checkbox} {slot} "),
            if enabled {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            },
        ),
        Span::styled(value.to_string(), base),
        cursor_span(focused && enabled),
    ];
    if enabled {
        spans.push(Span::styled(
            format!("  {}/{}", char_len(value), app.form.field_max(field)),
            count_style(app.form.count_status(field)),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_question_content(frame: &mut Frame, area: Rect, app: &App, slot: u8) {
    let enabled = app.form.is_selected(slot);
    let focused = app.editor.focus == Focus::QuestionContent(slot);
    let field = FieldId::QuestionContent(slot);
    let value = app.form.field_text(field);

    let base = if enabled {
        value_style(focused)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut spans = vec![
        Span::raw("      "),
        Span::styled(value.to_string(), base),
        cursor_span(focused && enabled),
    ];
    if enabled {
        spans.push(Span::styled(
            format!("  {}/{}", char_len(value), app.form.field_max(field)),
            count_style(app.form.count_status(field)),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
