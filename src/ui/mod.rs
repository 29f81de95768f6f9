//! UI module for rendering the editor

mod components;
mod form;
pub mod layout;
mod preview;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let (form_area, preview_area) = layout::create_layout(area);

    form::draw(frame, form_area, app);
    preview::draw(frame, preview_area, app);
    layout::draw_status_bar(frame, app);

    // Overlays go last so they sit on top of both panes
    if let Some(confirm) = &app.editor.confirm_clear {
        components::render_confirm_clear(frame, confirm);
    } else if let Some(notice) = &app.editor.notice {
        components::render_notice(frame, notice);
    }
}
