//! Responsive font sizing for the preview container
//!
//! Each size is a linear function of the container width, clamped to a
//! fixed pixel range. The recomputation is pure and idempotent, so it can
//! be re-triggered freely by resizes and by the post-render settle timer
//! without ordering concerns.

use std::time::Duration;

/// Delay after a content re-render before sizes are recomputed, letting
/// layout settle first
pub const FONT_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Absolute sizes for every scaled element of the preview
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub card_label_px: f32,
    pub card_label_pad_px: f32,
    pub answer_px: f32,
    pub answer_pad_px: f32,
    pub paper_title_px: f32,
    pub meta_px: f32,
    pub category_px: f32,
    pub category_pad_px: f32,
}

impl FontMetrics {
    /// Sizes for a preview container of the given pixel width
    pub fn for_container_width(width_px: f32) -> Self {
        Self {
            card_label_px: scaled(width_px, 0.014, 6.0, 14.0),
            card_label_pad_px: scaled(width_px, 0.010, 3.0, 10.0),
            answer_px: scaled(width_px, 0.015, 7.0, 16.0),
            answer_pad_px: scaled(width_px, 0.008, 2.0, 8.0),
            paper_title_px: scaled(width_px, 0.025, 18.0, 28.0),
            meta_px: scaled(width_px, 0.015, 10.0, 16.0),
            category_px: scaled(width_px, 0.012, 8.0, 14.0),
            category_pad_px: scaled(width_px, 0.006, 2.0, 6.0),
        }
    }
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self::for_container_width(0.0)
    }
}

fn scaled(width_px: f32, factor: f32, min_px: f32, max_px: f32) -> f32 {
    (width_px * factor).clamp(min_px, max_px)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrow_container_clamps_to_minima() {
        let metrics = FontMetrics::for_container_width(100.0);
        assert_eq!(metrics.card_label_px, 6.0);
        assert_eq!(metrics.answer_px, 7.0);
        assert_eq!(metrics.paper_title_px, 18.0);
        assert_eq!(metrics.meta_px, 10.0);
        assert_eq!(metrics.category_px, 8.0);
    }

    #[test]
    fn test_wide_container_clamps_to_maxima() {
        let metrics = FontMetrics::for_container_width(4000.0);
        assert_eq!(metrics.card_label_px, 14.0);
        assert_eq!(metrics.card_label_pad_px, 10.0);
        assert_eq!(metrics.answer_px, 16.0);
        assert_eq!(metrics.answer_pad_px, 8.0);
        assert_eq!(metrics.paper_title_px, 28.0);
        assert_eq!(metrics.meta_px, 16.0);
        assert_eq!(metrics.category_px, 14.0);
        assert_eq!(metrics.category_pad_px, 6.0);
    }

    #[test]
    fn test_interior_widths_scale_linearly() {
        let metrics = FontMetrics::for_container_width(800.0);
        assert!((metrics.card_label_px - 11.2).abs() < 1e-4);
        assert!((metrics.answer_px - 12.0).abs() < 1e-4);
        assert!((metrics.paper_title_px - 20.0).abs() < 1e-4);
        assert!((metrics.category_px - 9.6).abs() < 1e-4);
    }

    #[test]
    fn test_sizes_monotonic_in_width() {
        let mut prev = FontMetrics::for_container_width(0.0);
        for width in (100..2000).step_by(100) {
            let cur = FontMetrics::for_container_width(width as f32);
            assert!(cur.card_label_px >= prev.card_label_px);
            assert!(cur.answer_px >= prev.answer_px);
            assert!(cur.paper_title_px >= prev.paper_title_px);
            prev = cur;
        }
    }

    #[test]
    fn test_recomputation_is_idempotent() {
        assert_eq!(
            FontMetrics::for_container_width(640.0),
            FontMetrics::for_container_width(640.0)
        );
    }
}
