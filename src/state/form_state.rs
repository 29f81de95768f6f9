//! Form state: the single source of truth for the card being edited

use super::category::CategorySet;
use super::field::{self, CountStatus};
use super::image::ImageSet;
use super::limits::{CharLimits, AUTHOR_MAX};
use super::FormError;
use serde::{Deserialize, Serialize};

/// Number of fixed question slots
pub const QUESTION_SLOTS: usize = 6;

/// Question labels a freshly created card starts with
pub const DEFAULT_QUESTION_LABELS: [&str; QUESTION_SLOTS] = [
    "どんなもの？",
    "先行研究と比べてどこがすごいの？",
    "技術や手法の\"キモ\"はどこにある？",
    "どうやって有効だと検証した？",
    "議論はあるか？",
    "次に読むべき論文はあるか？",
];

const DEFAULT_SELECTED: [u8; 3] = [1, 2, 3];

/// One fixed question slot: a user-editable label and its answer text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSlot {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub content: String,
}

/// Addresses one editable text field for the event dispatch.
/// Question slots are numbered 1..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Title,
    Author,
    Year,
    QuestionLabel(u8),
    QuestionContent(u8),
}

/// Aggregated card state. Owned by the app and passed explicitly to every
/// mutation and to the preview renderer; mutated in place on every edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub title: String,
    pub author: String,
    pub year: String,
    pub categories: CategorySet,
    pub images: ImageSet,
    /// Active slots in toggle order; invariant: non-empty subset of 1..=6
    selected: Vec<u8>,
    pub questions: [QuestionSlot; QUESTION_SLOTS],
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            year: String::new(),
            categories: CategorySet::default(),
            images: ImageSet::default(),
            selected: DEFAULT_SELECTED.to_vec(),
            questions: DEFAULT_QUESTION_LABELS.map(|label| QuestionSlot {
                label: label.to_string(),
                content: String::new(),
            }),
        }
    }
}

impl FormState {
    /// Rebuild from restored parts. The selection is re-clamped to a
    /// non-empty subset of 1..=6 so a hand-edited snapshot cannot break
    /// the invariant.
    pub fn from_parts(
        title: String,
        author: String,
        year: String,
        categories: CategorySet,
        images: ImageSet,
        selected: Vec<u8>,
        questions: [QuestionSlot; QUESTION_SLOTS],
    ) -> Self {
        let mut seen = Vec::new();
        for slot in selected {
            if (1..=QUESTION_SLOTS as u8).contains(&slot) && !seen.contains(&slot) {
                seen.push(slot);
            }
        }
        if seen.is_empty() {
            seen = DEFAULT_SELECTED.to_vec();
        }
        Self {
            title,
            author,
            year,
            categories,
            images,
            selected: seen,
            questions,
        }
    }

    /// Active slots in toggle order
    pub fn selected(&self) -> &[u8] {
        &self.selected
    }

    /// Active slots sorted ascending, the order cards render in
    pub fn sorted_selected(&self) -> Vec<u8> {
        let mut slots = self.selected.clone();
        slots.sort_unstable();
        slots
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_selected(&self, slot: u8) -> bool {
        self.selected.contains(&slot)
    }

    /// Current limit tier for the active selection
    pub fn limits(&self) -> CharLimits {
        CharLimits::for_active_count(self.selected.len())
    }

    /// Toggle a question slot.
    ///
    /// Checking is idempotent. Unchecking the last remaining slot is
    /// rejected with the selection untouched, so the caller can snap the
    /// control back to checked and show the notice. Returns whether the
    /// selection actually changed.
    pub fn toggle_question(&mut self, slot: u8, checked: bool) -> Result<bool, FormError> {
        if !(1..=QUESTION_SLOTS as u8).contains(&slot) {
            return Ok(false);
        }
        let present = self.selected.contains(&slot);
        match (checked, present) {
            (true, true) | (false, false) => Ok(false),
            (true, false) => {
                self.selected.push(slot);
                Ok(true)
            }
            (false, true) => {
                if self.selected.len() == 1 {
                    return Err(FormError::LastQuestion);
                }
                self.selected.retain(|&s| s != slot);
                Ok(true)
            }
        }
    }

    /// Append a character to a field, bounded by the field's current
    /// ceiling. Disabled (unselected) question slots cannot be edited.
    /// Returns whether the field changed.
    pub fn input_char(&mut self, id: FieldId, c: char) -> bool {
        if !self.is_editable(id) {
            return false;
        }
        let max = self.field_max(id);
        field::push_char_bounded(self.field_text_mut(id), c, max)
    }

    /// Remove the last character of a field. Returns whether it changed.
    pub fn backspace(&mut self, id: FieldId) -> bool {
        if !self.is_editable(id) {
            return false;
        }
        field::pop_char(self.field_text_mut(id))
    }

    pub fn field_text(&self, id: FieldId) -> &str {
        match id {
            FieldId::Title => &self.title,
            FieldId::Author => &self.author,
            FieldId::Year => &self.year,
            FieldId::QuestionLabel(slot) => &self.questions[usize::from(slot) - 1].label,
            FieldId::QuestionContent(slot) => &self.questions[usize::from(slot) - 1].content,
        }
    }

    /// The field's current input ceiling in characters
    pub fn field_max(&self, id: FieldId) -> usize {
        let limits = self.limits();
        match id {
            FieldId::Title => limits.title,
            FieldId::Author => AUTHOR_MAX,
            FieldId::Year => usize::MAX,
            FieldId::QuestionLabel(_) => limits.question,
            FieldId::QuestionContent(_) => limits.content,
        }
    }

    /// Character-count display status for a field
    pub fn count_status(&self, id: FieldId) -> CountStatus {
        CountStatus::for_count(field::char_len(self.field_text(id)), self.field_max(id))
    }

    /// Reset everything to a fresh card
    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    fn is_editable(&self, id: FieldId) -> bool {
        match id {
            FieldId::QuestionLabel(slot) | FieldId::QuestionContent(slot) => {
                self.is_selected(slot)
            }
            _ => true,
        }
    }

    fn field_text_mut(&mut self, id: FieldId) -> &mut String {
        match id {
            FieldId::Title => &mut self.title,
            FieldId::Author => &mut self.author,
            FieldId::Year => &mut self.year,
            FieldId::QuestionLabel(slot) => &mut self.questions[usize::from(slot) - 1].label,
            FieldId::QuestionContent(slot) => &mut self.questions[usize::from(slot) - 1].content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fresh_card_defaults() {
        let form = FormState::default();
        assert_eq!(form.selected(), &[1, 2, 3]);
        assert_eq!(form.questions[0].label, "どんなもの？");
        assert_eq!(form.questions[5].label, "次に読むべき論文はあるか？");
        assert!(form.questions.iter().all(|q| q.content.is_empty()));
        assert!(form.title.is_empty());
        assert!(form.categories.is_empty());
        assert!(form.images.is_empty());
    }

    #[test]
    fn test_toggle_is_idempotent_when_checking() {
        let mut form = FormState::default();
        assert_eq!(form.toggle_question(1, true), Ok(false));
        assert_eq!(form.toggle_question(5, true), Ok(true));
        assert_eq!(form.selected(), &[1, 2, 3, 5]);
    }

    #[test]
    fn test_unchecking_last_slot_is_rejected() {
        let mut form = FormState::default();
        form.toggle_question(2, false).unwrap();
        form.toggle_question(3, false).unwrap();
        assert_eq!(form.toggle_question(1, false), Err(FormError::LastQuestion));
        assert_eq!(form.selected(), &[1]);
        assert!(form.selected_count() >= 1);
    }

    #[test]
    fn test_out_of_range_slot_is_noop() {
        let mut form = FormState::default();
        assert_eq!(form.toggle_question(0, true), Ok(false));
        assert_eq!(form.toggle_question(7, true), Ok(false));
        assert_eq!(form.selected(), &[1, 2, 3]);
    }

    #[test]
    fn test_limits_follow_selection() {
        let mut form = FormState::default();
        assert_eq!(form.limits().content, 60); // 3 active
        for slot in 4..=6 {
            form.toggle_question(slot, true).unwrap();
        }
        assert_eq!(form.limits().content, 50); // 6 active
        assert_eq!(form.field_max(FieldId::QuestionContent(1)), 50);
    }

    #[test]
    fn test_input_ceiling_drops_excess_characters() {
        let mut form = FormState::default();
        let max = form.field_max(FieldId::Title); // 45 with 3 active
        for _ in 0..max {
            assert!(form.input_char(FieldId::Title, 'x'));
        }
        assert!(!form.input_char(FieldId::Title, 'x'));
        assert_eq!(form.title.chars().count(), max);
    }

    #[test]
    fn test_lowered_limit_keeps_existing_overflow() {
        let mut form = FormState::default();
        form.toggle_question(2, false).unwrap();
        form.toggle_question(3, false).unwrap();
        // 1 active: content ceiling 80
        for _ in 0..70 {
            form.input_char(FieldId::QuestionContent(1), 'a');
        }
        // Re-selecting drops the ceiling to 60; the 70 chars stay put
        form.toggle_question(2, true).unwrap();
        form.toggle_question(3, true).unwrap();
        assert_eq!(form.field_text(FieldId::QuestionContent(1)).chars().count(), 70);
        assert!(!form.input_char(FieldId::QuestionContent(1), 'a'));
        assert_eq!(
            form.count_status(FieldId::QuestionContent(1)),
            crate::state::CountStatus::Danger
        );
    }

    #[test]
    fn test_disabled_slot_cannot_be_edited() {
        let mut form = FormState::default();
        assert!(!form.input_char(FieldId::QuestionLabel(5), 'x'));
        assert!(!form.backspace(FieldId::QuestionLabel(5)));
        assert_eq!(form.questions[4].label, "議論はあるか？");
    }

    #[test]
    fn test_year_has_no_counter_ceiling() {
        let mut form = FormState::default();
        for c in "2026".chars() {
            assert!(form.input_char(FieldId::Year, c));
        }
        assert_eq!(form.year, "2026");
    }

    #[test]
    fn test_clear_all_resets_to_defaults() {
        let mut form = FormState::default();
        form.input_char(FieldId::Title, 'x');
        form.categories.add("nlp").unwrap();
        form.toggle_question(6, true).unwrap();
        form.clear_all();
        assert_eq!(form, FormState::default());
    }

    #[test]
    fn test_from_parts_reclamps_selection() {
        let defaults = FormState::default();
        let form = FormState::from_parts(
            String::new(),
            String::new(),
            String::new(),
            CategorySet::default(),
            ImageSet::default(),
            vec![0, 9, 4, 4, 2],
            defaults.questions.clone(),
        );
        assert_eq!(form.selected(), &[4, 2]);
        assert_eq!(form.sorted_selected(), vec![2, 4]);

        let empty = FormState::from_parts(
            String::new(),
            String::new(),
            String::new(),
            CategorySet::default(),
            ImageSet::default(),
            vec![],
            defaults.questions,
        );
        assert_eq!(empty.selected(), &[1, 2, 3]);
    }
}
