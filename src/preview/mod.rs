//! Preview composition: a pure layout description of the summary card
//!
//! [`PreviewLayout::compose`] is a pure function of the form state. The
//! drawing layer renders whatever it returns; recomposing twice from the
//! same state yields the same layout.

pub mod fonts;

use crate::state::FormState;

/// Placeholders shown while a field is still empty, carried over from the
/// original card format
pub const TITLE_PLACEHOLDER: &str = "論文タイトル";
pub const AUTHOR_PLACEHOLDER: &str = "著者名";
pub const YEAR_PLACEHOLDER: &str = "(年度)";
pub const ANSWER_PLACEHOLDER: &str = "回答内容がここに表示されます";

/// Grid shape of the question-card region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridShape {
    SingleColumn,
    TwoColumn,
    ThreeColumn,
}

impl GridShape {
    pub fn for_count(count: usize) -> Self {
        if count <= 2 {
            Self::SingleColumn
        } else if count <= 4 {
            Self::TwoColumn
        } else {
            Self::ThreeColumn
        }
    }

    pub fn columns(self) -> usize {
        match self {
            Self::SingleColumn => 1,
            Self::TwoColumn => 2,
            Self::ThreeColumn => 3,
        }
    }
}

/// Per-card type scale. More active cards drop the tier so the grid still
/// fits the fixed card footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontTier {
    Large,
    Medium,
    Compact,
}

impl FontTier {
    pub fn for_count(count: usize) -> Self {
        if count > 4 {
            Self::Compact
        } else if count > 2 {
            Self::Medium
        } else {
            Self::Large
        }
    }

    /// Card label size in rem
    pub fn label_rem(self) -> f32 {
        match self {
            Self::Large => 0.70,
            Self::Medium => 0.65,
            Self::Compact => 0.60,
        }
    }

    /// Answer text size in rem
    pub fn answer_rem(self) -> f32 {
        match self {
            Self::Large => 0.65,
            Self::Medium => 0.60,
            Self::Compact => 0.55,
        }
    }

    pub fn line_height(self) -> f32 {
        match self {
            Self::Large => 1.30,
            Self::Medium => 1.25,
            Self::Compact => 1.20,
        }
    }
}

/// One rendered question card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionCard {
    pub slot: u8,
    pub label: String,
    pub answer: String,
}

/// One rendered image slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSlot {
    pub name: String,
}

/// Everything the presentation layer needs to draw the card
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewLayout {
    pub title: String,
    pub author: String,
    pub year: String,
    pub categories: Vec<String>,
    /// Empty means the image region is hidden entirely
    pub images: Vec<ImageSlot>,
    /// Active cards, ascending slot order
    pub cards: Vec<QuestionCard>,
    pub grid: GridShape,
    pub font_tier: FontTier,
}

impl PreviewLayout {
    pub fn compose(form: &FormState) -> Self {
        let count = form.selected_count();

        let cards = form
            .sorted_selected()
            .into_iter()
            .map(|slot| {
                let question = &form.questions[usize::from(slot) - 1];
                QuestionCard {
                    slot,
                    label: if question.label.is_empty() {
                        format!("質問{slot}")
                    } else {
                        question.label.clone()
                    },
                    answer: if question.content.is_empty() {
                        ANSWER_PLACEHOLDER.to_string()
                    } else {
                        question.content.clone()
                    },
                }
            })
            .collect();

        Self {
            title: placeholder_or(&form.title, TITLE_PLACEHOLDER),
            author: placeholder_or(&form.author, AUTHOR_PLACEHOLDER),
            year: if form.year.is_empty() {
                YEAR_PLACEHOLDER.to_string()
            } else {
                format!("({})", form.year)
            },
            categories: form.categories.iter().map(str::to_string).collect(),
            images: form
                .images
                .iter()
                .map(|img| ImageSlot {
                    name: img.name.clone(),
                })
                .collect(),
            cards,
            grid: GridShape::for_count(count),
            font_tier: FontTier::for_count(count),
        }
    }
}

fn placeholder_or(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FieldId;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_compose_is_idempotent() {
        let mut form = FormState::default();
        for c in "BERT".chars() {
            form.input_char(FieldId::Title, c);
        }
        form.categories.add("nlp").unwrap();
        form.toggle_question(4, true).unwrap();
        assert_eq!(PreviewLayout::compose(&form), PreviewLayout::compose(&form));
    }

    #[test]
    fn test_empty_fields_show_placeholders() {
        let layout = PreviewLayout::compose(&FormState::default());
        assert_eq!(layout.title, "論文タイトル");
        assert_eq!(layout.author, "著者名");
        assert_eq!(layout.year, "(年度)");
        assert!(layout.categories.is_empty());
        assert!(layout.images.is_empty());
    }

    #[test]
    fn test_year_renders_parenthesized() {
        let mut form = FormState::default();
        for c in "2017".chars() {
            form.input_char(FieldId::Year, c);
        }
        assert_eq!(PreviewLayout::compose(&form).year, "(2017)");
    }

    #[test]
    fn test_cards_sort_ascending_regardless_of_toggle_order() {
        let mut form = FormState::default();
        form.toggle_question(6, true).unwrap();
        form.toggle_question(2, false).unwrap();
        // Selected in order [1, 3, 6]
        let layout = PreviewLayout::compose(&form);
        let slots: Vec<u8> = layout.cards.iter().map(|c| c.slot).collect();
        assert_eq!(slots, vec![1, 3, 6]);
    }

    #[test]
    fn test_card_placeholders() {
        let mut form = FormState::default();
        // Empty label on an active slot falls back to 質問N
        form.backspace(FieldId::QuestionLabel(1));
        while !form.field_text(FieldId::QuestionLabel(1)).is_empty() {
            form.backspace(FieldId::QuestionLabel(1));
        }
        let layout = PreviewLayout::compose(&form);
        assert_eq!(layout.cards[0].label, "質問1");
        assert_eq!(layout.cards[0].answer, "回答内容がここに表示されます");
        // Slot 2 keeps its default label
        assert_eq!(layout.cards[1].label, "先行研究と比べてどこがすごいの？");
    }

    #[test]
    fn test_grid_shape_thresholds() {
        assert_eq!(GridShape::for_count(1), GridShape::SingleColumn);
        assert_eq!(GridShape::for_count(2), GridShape::SingleColumn);
        assert_eq!(GridShape::for_count(3), GridShape::TwoColumn);
        assert_eq!(GridShape::for_count(4), GridShape::TwoColumn);
        assert_eq!(GridShape::for_count(5), GridShape::ThreeColumn);
        assert_eq!(GridShape::for_count(6), GridShape::ThreeColumn);
    }

    #[test]
    fn test_font_tier_thresholds() {
        assert_eq!(FontTier::for_count(2), FontTier::Large);
        assert_eq!(FontTier::for_count(3), FontTier::Medium);
        assert_eq!(FontTier::for_count(4), FontTier::Medium);
        assert_eq!(FontTier::for_count(5), FontTier::Compact);
        assert!(FontTier::Compact.answer_rem() < FontTier::Large.answer_rem());
        assert!(FontTier::Compact.line_height() < FontTier::Large.line_height());
    }

    #[test]
    fn test_all_six_selected_uses_three_columns_compact() {
        let mut form = FormState::default();
        for slot in 4..=6 {
            form.toggle_question(slot, true).unwrap();
        }
        let layout = PreviewLayout::compose(&form);
        assert_eq!(layout.grid, GridShape::ThreeColumn);
        assert_eq!(layout.grid.columns(), 3);
        assert_eq!(layout.font_tier, FontTier::Compact);
        assert_eq!(layout.cards.len(), 6);
    }

    #[test]
    fn test_categories_render_in_insertion_order() {
        let mut form = FormState::default();
        for tag in ["z", "a", "m"] {
            form.categories.add(tag).unwrap();
        }
        let layout = PreviewLayout::compose(&form);
        assert_eq!(layout.categories, vec!["z", "a", "m"]);
    }
}
