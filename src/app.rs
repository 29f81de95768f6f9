//! Application core: key/paste dispatch into form mutations
//!
//! Every accepted mutation runs the same pipeline: persist the snapshot,
//! recompose the preview, then schedule the deferred font pass. Rejected
//! mutations leave the form untouched and raise a notice instead.

use crate::platform::PASTE_MODIFIER;
use crate::preview::fonts::{FontMetrics, FONT_SETTLE_DELAY};
use crate::preview::PreviewLayout;
use crate::state::{
    decode, encode_clipboard_png, ConfirmClear, DecodeResult, EditorState, FieldId, Focus,
    FormState, ImageSource,
};
use crate::store::SnapshotStore;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;
use std::time::Instant;
use tokio::sync::mpsc;

/// Main application struct
pub struct App {
    /// The card being edited; single source of truth
    pub form: FormState,
    /// Focus, staging inputs and overlays
    pub editor: EditorState,
    /// Current composed preview, re-derived after every mutation
    pub preview: PreviewLayout,
    /// Responsive sizes for the preview container
    pub fonts: FontMetrics,
    store: SnapshotStore,
    decode_tx: mpsc::UnboundedSender<DecodeResult>,
    decode_rx: mpsc::UnboundedReceiver<DecodeResult>,
    /// Deadline of the deferred font pass after a content change
    font_refresh_due: Option<Instant>,
    container_px: f32,
    quit: bool,
}

impl App {
    pub fn new(store: SnapshotStore) -> Self {
        let form = store.load();
        let preview = PreviewLayout::compose(&form);
        let (decode_tx, decode_rx) = mpsc::unbounded_channel();
        Self {
            form,
            editor: EditorState::default(),
            preview,
            fonts: FontMetrics::default(),
            store,
            decode_tx,
            decode_rx,
            font_refresh_due: None,
            container_px: 0.0,
            quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// A viewport resize recomputes the responsive sizes immediately
    pub fn on_container_resize(&mut self, width_px: f32) {
        if (width_px - self.container_px).abs() > f32::EPSILON {
            self.container_px = width_px;
            self.fonts = FontMetrics::for_container_width(width_px);
        }
    }

    /// Run the deferred font pass once its settle deadline has passed.
    /// The recomputation is idempotent, so observing state from a later
    /// edit is harmless.
    pub fn tick(&mut self, now: Instant) {
        if self.font_refresh_due.is_some_and(|due| now >= due) {
            self.font_refresh_due = None;
            self.fonts = FontMetrics::for_container_width(self.container_px);
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return Ok(());
        }

        if self.editor.notice.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.editor.dismiss_notice();
            }
            return Ok(());
        }

        if let Some(mut confirm) = self.editor.confirm_clear {
            match key.code {
                KeyCode::Up | KeyCode::Down => {
                    confirm.proceed = !confirm.proceed;
                    self.editor.confirm_clear = Some(confirm);
                }
                KeyCode::Enter => {
                    self.editor.confirm_clear = None;
                    if confirm.proceed {
                        self.execute_clear();
                    }
                }
                KeyCode::Esc => self.editor.confirm_clear = None,
                _ => {}
            }
            return Ok(());
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('v') if key.modifiers.contains(PASTE_MODIFIER) => {
                self.paste_clipboard_image();
            }
            KeyCode::Char('t') if ctrl => self.toggle_focused_question(),
            KeyCode::Char('l') if ctrl => {
                self.editor.confirm_clear = Some(ConfirmClear::default());
            }
            KeyCode::Char('r') if ctrl => self.remove_all_images(),
            KeyCode::Tab => {
                let has_images = !self.form.images.is_empty();
                self.editor.focus_next(has_images);
            }
            KeyCode::BackTab => {
                let has_images = !self.form.images.is_empty();
                self.editor.focus_prev(has_images);
            }
            KeyCode::Enter => match self.editor.focus {
                Focus::CategoryInput => self.commit_category(),
                Focus::ImagePath => self.commit_image_path(),
                _ => {
                    let has_images = !self.form.images.is_empty();
                    self.editor.focus_next(has_images);
                }
            },
            KeyCode::Backspace => self.handle_backspace(),
            KeyCode::Delete if self.editor.focus == Focus::ImageList => {
                self.remove_image_at_cursor();
            }
            KeyCode::Left if self.editor.focus == Focus::ImageList => {
                self.editor.image_cursor = self.editor.image_cursor.saturating_sub(1);
            }
            KeyCode::Right if self.editor.focus == Focus::ImageList => {
                let last = self.form.images.len().saturating_sub(1);
                self.editor.image_cursor = (self.editor.image_cursor + 1).min(last);
            }
            KeyCode::Char(c) if !ctrl => self.insert_char(c),
            _ => {}
        }
        Ok(())
    }

    /// Handle a bracketed paste. Terminals deliver a dropped file as a
    /// paste of its path, so an existing file routes into the image
    /// intake; anything else is typed into the focused control.
    pub fn handle_paste(&mut self, text: &str) {
        let candidate = PathBuf::from(text.trim());
        if candidate.is_file() {
            self.queue_image_path(candidate);
            return;
        }
        for c in text.chars().filter(|c| !c.is_control()) {
            self.insert_char(c);
        }
    }

    /// Apply finished image decodes queued by the decode tasks
    pub fn drain_decodes(&mut self) {
        let mut results = Vec::new();
        while let Ok(result) = self.decode_rx.try_recv() {
            results.push(result);
        }
        for result in results {
            self.on_decode_complete(result);
        }
    }

    fn on_decode_complete(&mut self, result: DecodeResult) {
        match result {
            Ok(attachment) => {
                self.form.images.push(attachment);
                self.after_mutation();
            }
            Err(err) => {
                tracing::warn!("image decode failed: {err}");
                self.editor.notify(err);
            }
        }
    }

    /// Persist, recompose, and schedule the settle pass. Runs after every
    /// accepted mutation, in this order, synchronously.
    fn after_mutation(&mut self) {
        if let Err(err) = self.store.save(&self.form) {
            tracing::warn!("saving snapshot failed: {err}");
        }
        self.preview = PreviewLayout::compose(&self.form);
        self.font_refresh_due = Some(Instant::now() + FONT_SETTLE_DELAY);
    }

    fn insert_char(&mut self, c: char) {
        match self.editor.focus {
            Focus::CategoryInput => self.editor.category_input.push(c),
            Focus::ImagePath => self.editor.image_path_input.push(c),
            Focus::ImageList => {}
            focus => {
                if let Some(field) = field_for(focus) {
                    if self.form.input_char(field, c) {
                        self.after_mutation();
                    }
                }
            }
        }
    }

    fn handle_backspace(&mut self) {
        match self.editor.focus {
            Focus::CategoryInput => {
                // Backspace on an empty input removes the newest tag
                if self.editor.category_input.pop().is_none() {
                    if let Some(last) = self.form.categories.last().map(str::to_string) {
                        if self.form.categories.remove(&last) {
                            self.after_mutation();
                        }
                    }
                }
            }
            Focus::ImagePath => {
                self.editor.image_path_input.pop();
            }
            Focus::ImageList => self.remove_image_at_cursor(),
            focus => {
                if let Some(field) = field_for(focus) {
                    if self.form.backspace(field) {
                        self.after_mutation();
                    }
                }
            }
        }
    }

    fn commit_category(&mut self) {
        let value = self.editor.category_input.clone();
        match self.form.categories.add(&value) {
            Ok(true) => {
                self.editor.category_input.clear();
                self.after_mutation();
            }
            Ok(false) => {}
            Err(err) => self.editor.notify(err),
        }
    }

    fn toggle_focused_question(&mut self) {
        let Some(slot) = self.editor.focus.question_slot() else {
            return;
        };
        let checked = !self.form.is_selected(slot);
        match self.form.toggle_question(slot, checked) {
            Ok(true) => self.after_mutation(),
            Ok(false) => {}
            // Selection unchanged; the checkbox stays checked on redraw
            Err(err) => self.editor.notify(err),
        }
    }

    fn commit_image_path(&mut self) {
        let path = PathBuf::from(self.editor.image_path_input.trim());
        if path.as_os_str().is_empty() {
            return;
        }
        self.queue_image_path(path);
    }

    /// Gate a file intake and queue its decode. The size and count checks
    /// run synchronously before any decoding starts.
    fn queue_image_path(&mut self, path: PathBuf) {
        let size = match std::fs::metadata(&path) {
            Ok(meta) => meta.len(),
            Err(err) => {
                self.editor
                    .notify(format!("could not read {}: {err}", path.display()));
                return;
            }
        };
        if let Err(err) = self.form.images.check_intake(size) {
            self.editor.notify(err);
            return;
        }
        self.editor.image_path_input.clear();
        self.spawn_decode(ImageSource::Path(path));
    }

    /// Clipboard intake: only image-typed clipboard content is taken,
    /// anything else is ignored
    fn paste_clipboard_image(&mut self) {
        let image = match arboard::Clipboard::new().and_then(|mut c| c.get_image()) {
            Ok(image) => image,
            Err(err) => {
                tracing::debug!("clipboard has no image: {err}");
                return;
            }
        };
        let bytes = match encode_clipboard_png(image.width, image.height, &image.bytes) {
            Ok(bytes) => bytes,
            Err(err) => {
                self.editor.notify(err);
                return;
            }
        };
        if let Err(err) = self.form.images.check_intake(bytes.len() as u64) {
            self.editor.notify(err);
            return;
        }
        self.spawn_decode(ImageSource::Png {
            bytes,
            name: "clipboard.png".to_string(),
        });
    }

    fn spawn_decode(&self, source: ImageSource) {
        let tx = self.decode_tx.clone();
        tokio::spawn(async move {
            // The receiver only drops on shutdown; a lost send is fine then
            let _ = tx.send(decode(source).await);
        });
    }

    fn remove_image_at_cursor(&mut self) {
        let Some(id) = self
            .form
            .images
            .get(self.editor.image_cursor)
            .map(|img| img.id.clone())
        else {
            return;
        };
        if self.form.images.remove(&id) {
            let last = self.form.images.len().saturating_sub(1);
            self.editor.image_cursor = self.editor.image_cursor.min(last);
            if self.form.images.is_empty() {
                self.editor.focus = Focus::ImagePath;
            }
            self.after_mutation();
        }
    }

    fn remove_all_images(&mut self) {
        self.form.images.clear();
        self.editor.image_path_input.clear();
        self.editor.image_cursor = 0;
        if self.editor.focus == Focus::ImageList {
            self.editor.focus = Focus::ImagePath;
        }
        self.after_mutation();
    }

    fn execute_clear(&mut self) {
        self.form.clear_all();
        self.store.clear();
        self.editor.reset_inputs();
        self.preview = PreviewLayout::compose(&self.form);
        self.font_refresh_due = Some(Instant::now() + FONT_SETTLE_DELAY);
    }
}

fn field_for(focus: Focus) -> Option<FieldId> {
    match focus {
        Focus::Title => Some(FieldId::Title),
        Focus::Author => Some(FieldId::Author),
        Focus::Year => Some(FieldId::Year),
        Focus::QuestionLabel(slot) => Some(FieldId::QuestionLabel(slot)),
        Focus::QuestionContent(slot) => Some(FieldId::QuestionContent(slot)),
        _ => None,
    }
}
