//! Snapshot persistence for the card being edited
//!
//! One JSON document in the platform data directory. The reader is
//! deliberately forgiving: a missing file, a missing field, or the legacy
//! single-image shape all load into a usable form state. A snapshot that
//! fails to parse is logged and treated as no saved data.

use crate::state::{fresh_id, CategorySet, FormState, ImageAttachment, ImageSet, QuestionSlot};
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Snapshot file name, carried over from the original card format's
/// storage key
const SNAPSHOT_FILE: &str = "paper-summary-data.json";

/// Placeholder name given to an image migrated from the legacy shape
const LEGACY_IMAGE_NAME: &str = "画像1";

/// Wire shape written on every save
#[derive(Serialize)]
struct Snapshot<'a> {
    title: &'a str,
    author: &'a str,
    year: &'a str,
    categories: &'a CategorySet,
    images: &'a ImageSet,
    #[serde(rename = "selectedQuestions")]
    selected_questions: &'a [u8],
    questions: &'a [QuestionSlot],
}

/// Wire shape accepted on load; every field is optional
#[derive(Deserialize, Default)]
#[serde(default)]
struct RawSnapshot {
    title: String,
    author: String,
    year: String,
    categories: Vec<String>,
    images: Option<Vec<ImageAttachment>>,
    /// Legacy single-image schema, kept only for migration
    image: Option<String>,
    #[serde(rename = "selectedQuestions")]
    selected_questions: Option<Vec<u8>>,
    questions: Vec<QuestionSlot>,
}

impl RawSnapshot {
    fn into_form_state(self) -> FormState {
        let images = match (self.images, self.image) {
            (Some(images), _) => ImageSet::from_vec(images),
            (None, Some(data_uri)) => ImageSet::from_vec(vec![ImageAttachment {
                id: fresh_id(),
                data_uri,
                name: LEGACY_IMAGE_NAME.to_string(),
            }]),
            (None, None) => ImageSet::default(),
        };

        // Missing slots keep their defaults; provided slots replace them
        // verbatim, empty strings included.
        let mut questions = FormState::default().questions;
        for (slot, restored) in questions.iter_mut().zip(self.questions) {
            *slot = restored;
        }

        FormState::from_parts(
            self.title,
            self.author,
            self.year,
            CategorySet::from_vec(self.categories),
            images,
            self.selected_questions.unwrap_or_default(),
            questions,
        )
    }
}

/// Handle on the snapshot location
pub struct SnapshotStore {
    path: Option<PathBuf>,
}

impl SnapshotStore {
    /// Store under the platform data directory
    pub fn new() -> Self {
        Self {
            path: ProjectDirs::from("io", "papercard", "papercard-tui")
                .map(|dirs| dirs.data_dir().join(SNAPSHOT_FILE)),
        }
    }

    /// Store at an explicit path
    pub fn at(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    /// Load the saved form state, falling back to defaults when the file is
    /// absent or unreadable. Never fails startup.
    pub fn load(&self) -> FormState {
        let Some(path) = &self.path else {
            return FormState::default();
        };
        if !path.exists() {
            return FormState::default();
        }
        let raw = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::error!("could not read snapshot {}: {err}", path.display());
                return FormState::default();
            }
        };
        match serde_json::from_str::<RawSnapshot>(&raw) {
            Ok(snapshot) => snapshot.into_form_state(),
            Err(err) => {
                tracing::error!("snapshot failed to parse, starting fresh: {err}");
                FormState::default()
            }
        }
    }

    /// Persist the current form state
    pub fn save(&self, form: &FormState) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let snapshot = Snapshot {
            title: &form.title,
            author: &form.author,
            year: &form.year,
            categories: &form.categories,
            images: &form.images,
            selected_questions: form.selected(),
            questions: &form.questions,
        };
        fs::write(path, serde_json::to_string_pretty(&snapshot)?)?;
        Ok(())
    }

    /// Delete the snapshot (clear-all)
    pub fn clear(&self) {
        if let Some(path) = &self.path {
            if let Err(err) = fs::remove_file(path) {
                if err.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("could not remove snapshot: {err}");
                }
            }
        }
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}
