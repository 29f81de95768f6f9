//! Core editor state: the form aggregate, bounded collections, and limits

mod app_state;
mod category;
mod field;
mod form_state;
mod image;
mod limits;

pub use app_state::{ConfirmClear, EditorState, Focus};
pub use category::{CategorySet, MAX_CATEGORIES};
pub use field::{char_len, CountStatus};
pub use form_state::{FieldId, FormState, QuestionSlot, DEFAULT_QUESTION_LABELS, QUESTION_SLOTS};
pub use image::{
    decode, encode_clipboard_png, fresh_id, DecodeError, DecodeResult, ImageAttachment, ImageSet,
    ImageSource, MAX_IMAGES, MAX_IMAGE_BYTES,
};
pub use limits::{CharLimits, AUTHOR_MAX};

use thiserror::Error;

/// A rejected mutation, surfaced to the user as a notice. State is always
/// left unchanged when one of these is returned.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    #[error("categories are limited to 5")]
    CategorySetFull,
    #[error("that category is already added")]
    DuplicateCategory,
    #[error("images must be 5MB or smaller")]
    ImageTooLarge,
    #[error("images are limited to 3")]
    ImageSetFull,
    #[error("at least one question must stay selected")]
    LastQuestion,
}
