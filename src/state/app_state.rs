//! Editor-side UI state: focus, staging inputs, dialogs

use super::form_state::QUESTION_SLOTS;

/// Which control currently receives text input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Title,
    Author,
    Year,
    CategoryInput,
    ImagePath,
    /// Cursor over the attached-image list (only reachable when non-empty)
    ImageList,
    QuestionLabel(u8),
    QuestionContent(u8),
}

impl Focus {
    /// Tab order through the form. Disabled question slots stay focusable
    /// so they can be re-enabled, they just refuse edits.
    fn order(has_images: bool) -> Vec<Focus> {
        let mut order = vec![
            Focus::Title,
            Focus::Author,
            Focus::Year,
            Focus::CategoryInput,
            Focus::ImagePath,
        ];
        if has_images {
            order.push(Focus::ImageList);
        }
        for slot in 1..=QUESTION_SLOTS as u8 {
            order.push(Focus::QuestionLabel(slot));
            order.push(Focus::QuestionContent(slot));
        }
        order
    }

    /// The question slot this focus sits on, if any
    pub fn question_slot(self) -> Option<u8> {
        match self {
            Focus::QuestionLabel(slot) | Focus::QuestionContent(slot) => Some(slot),
            _ => None,
        }
    }
}

/// Pending clear-all confirmation; `proceed` is the highlighted option
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfirmClear {
    pub proceed: bool,
}

/// Transient UI state around the form: focus position, staging buffers for
/// the category/path inputs, and the notice/confirm overlays.
#[derive(Debug, Default)]
pub struct EditorState {
    pub focus: Focus,
    pub category_input: String,
    pub image_path_input: String,
    pub image_cursor: usize,
    pub notice: Option<String>,
    pub confirm_clear: Option<ConfirmClear>,
}

impl EditorState {
    pub fn focus_next(&mut self, has_images: bool) {
        let order = Focus::order(has_images);
        let idx = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(idx + 1) % order.len()];
    }

    pub fn focus_prev(&mut self, has_images: bool) {
        let order = Focus::order(has_images);
        let idx = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(idx + order.len() - 1) % order.len()];
    }

    /// Show a user-visible notice for a rejected mutation
    pub fn notify(&mut self, message: impl ToString) {
        self.notice = Some(message.to_string());
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Reset staging inputs alongside a full data clear
    pub fn reset_inputs(&mut self) {
        self.category_input.clear();
        self.image_path_input.clear();
        self.image_cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_cycle_without_images_skips_list() {
        let mut editor = EditorState::default();
        let mut seen = Vec::new();
        for _ in 0..Focus::order(false).len() {
            seen.push(editor.focus);
            editor.focus_next(false);
        }
        assert_eq!(editor.focus, Focus::Title); // wrapped
        assert!(!seen.contains(&Focus::ImageList));
        assert!(seen.contains(&Focus::QuestionContent(6)));
    }

    #[test]
    fn test_focus_cycle_with_images_reaches_list() {
        let mut editor = EditorState::default();
        editor.focus = Focus::ImagePath;
        editor.focus_next(true);
        assert_eq!(editor.focus, Focus::ImageList);
    }

    #[test]
    fn test_focus_prev_wraps() {
        let mut editor = EditorState::default();
        editor.focus_prev(false);
        assert_eq!(editor.focus, Focus::QuestionContent(6));
    }

    #[test]
    fn test_stale_image_list_focus_recovers() {
        let mut editor = EditorState {
            focus: Focus::ImageList,
            ..Default::default()
        };
        // Images vanished; the stale focus falls back into the cycle
        editor.focus_next(false);
        assert_eq!(editor.focus, Focus::Author);
    }
}
