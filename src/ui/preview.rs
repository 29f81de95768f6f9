//! Preview pane: draws the composed card layout

use crate::app::App;
use crate::preview::{FontTier, PreviewLayout};
use crate::ui::layout::PX_PER_CELL;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().title(" Preview ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = &app.preview;
    let has_images = !layout.images.is_empty();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                              // Paper title
            Constraint::Length(1),                              // Meta line
            Constraint::Length(1),                              // Category tags
            Constraint::Length(if has_images { 1 } else { 0 }), // Image row
            Constraint::Length(1),                              // Spacer
            Constraint::Min(0),                                 // Question grid
        ])
        .split(inner);

    draw_header(frame, &rows[..4], layout, app);
    draw_grid(frame, rows[5], layout, app);
}

fn draw_header(frame: &mut Frame, rows: &[Rect], layout: &PreviewLayout, app: &App) {
    // The responsive pass drives emphasis here: a wide container earns the
    // title bold rendering, a narrow one drops to plain text.
    let title_style = if app.fonts.paper_title_px >= 22.0 {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(layout.title.clone(), title_style))),
        rows[0],
    );

    let meta = format!("{} {}", layout.author, layout.year);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            meta,
            Style::default().fg(Color::Gray),
        ))),
        rows[1],
    );

    let tag_pad = " ".repeat((app.fonts.category_pad_px / PX_PER_CELL).ceil() as usize);
    let mut tag_spans = Vec::new();
    for tag in &layout.categories {
        tag_spans.push(Span::styled(
            format!("{tag_pad}{tag}{tag_pad}"),
            Style::default().fg(Color::Black).bg(Color::Magenta),
        ));
        tag_spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(tag_spans)), rows[2]);

    if !layout.images.is_empty() {
        let mut image_spans = Vec::new();
        for slot in &layout.images {
            image_spans.push(Span::styled(
                format!("🖼 {}", slot.name),
                Style::default().fg(Color::Blue),
            ));
            image_spans.push(Span::raw("   "));
        }
        frame.render_widget(Paragraph::new(Line::from(image_spans)), rows[3]);
    }
}

fn draw_grid(frame: &mut Frame, area: Rect, layout: &PreviewLayout, app: &App) {
    if layout.cards.is_empty() {
        return;
    }

    let columns = layout.grid.columns();
    let row_count = layout.cards.len().div_ceil(columns);

    let grid_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Ratio(1, row_count as u32);
            row_count
        ])
        .split(area);

    for (row_idx, chunk) in layout.cards.chunks(columns).enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(grid_rows[row_idx]);
        for (col_idx, card) in chunk.iter().enumerate() {
            draw_card(frame, cells[col_idx], card, layout.font_tier, app);
        }
    }
}

fn draw_card(
    frame: &mut Frame,
    area: Rect,
    card: &crate::preview::QuestionCard,
    tier: FontTier,
    app: &App,
) {
    // The tier's type scale maps onto cell-space emphasis: a large label
    // renders bold, the smallest answer size renders dim, and the roomiest
    // line height earns a blank row under the label.
    let label_style = if tier.label_rem() >= 0.70 {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let answer_style = if tier.answer_rem() <= 0.55 {
        Style::default().fg(Color::White).add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(Color::White)
    };
    let pad_h = (app.fonts.answer_pad_px / PX_PER_CELL).round() as u16;
    let pad_v = u16::from(tier.line_height() >= 1.30);

    let block = Block::default()
        .title(Span::styled(format!(" {} ", card.label), label_style))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .padding(Padding::new(pad_h, pad_h, pad_v, 0));

    let answer = Paragraph::new(card.answer.clone())
        .style(answer_style)
        .wrap(Wrap { trim: false })
        .block(block);

    frame.render_widget(answer, area);
}
