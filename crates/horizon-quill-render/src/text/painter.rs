//! The paragraph layout service used by editable text.
//!
//! A [`TextPainter`] owns one paragraph of styled text, lays it out against
//! width constraints, and answers geometric queries about the result. Render
//! objects treat it as a black box; they only ever talk to it through this
//! trait.

use crate::renderer::Renderer;
use crate::types::{Point, Rect, Size};

use super::types::{
    LineRange, TextAlign, TextBaseline, TextBox, TextDirection, TextPosition, TextRange,
    TextSelection,
};

/// A laid-out paragraph.
///
/// Geometric queries are only meaningful after [`layout`](Self::layout) has
/// been called since the last mutation.
pub trait TextPainter: Send {
    /// The text being laid out.
    fn text(&self) -> &str;

    /// Replace the text. Invalidates layout.
    fn set_text(&mut self, text: &str);

    fn text_align(&self) -> TextAlign;

    fn set_text_align(&mut self, align: TextAlign);

    fn text_direction(&self) -> TextDirection;

    /// Invalidates layout.
    fn set_text_direction(&mut self, direction: TextDirection);

    fn text_scale_factor(&self) -> f32;

    /// Invalidates layout.
    fn set_text_scale_factor(&mut self, factor: f32);

    /// Lay out so that the paragraph is at least `min_width` and at most
    /// `max_width` wide. `max_width` may be infinite, disabling wrapping.
    fn layout(&mut self, min_width: f32, max_width: f32);

    /// Size of the laid-out paragraph.
    fn size(&self) -> Size;

    fn width(&self) -> f32 {
        self.size().width
    }

    fn height(&self) -> f32 {
        self.size().height
    }

    /// Height of one line of text in the current style.
    fn preferred_line_height(&self) -> f32;

    /// Width of the widest unbreakable run.
    fn min_intrinsic_width(&self) -> f32;

    /// Width of the paragraph without any soft wrapping.
    fn max_intrinsic_width(&self) -> f32;

    /// Distance from the top of the paragraph to the given baseline.
    fn compute_distance_to_actual_baseline(&self, baseline: TextBaseline) -> f32;

    /// Top-left offset at which a caret shaped like `caret_prototype` sits
    /// for `position`.
    fn offset_for_caret(&self, position: TextPosition, caret_prototype: Rect) -> Point;

    /// The position closest to `offset` (paragraph coordinates).
    fn position_for_offset(&self, offset: Point) -> TextPosition;

    /// The word segment containing `position`.
    fn word_boundary(&self, position: TextPosition) -> TextRange;

    /// Number of laid-out lines (at least one).
    fn line_count(&self) -> usize;

    /// Metrics for line `index`, clamped to the last line.
    fn line_range(&self, index: usize) -> LineRange;

    /// Index of the line `position` is displayed on.
    fn line_index(&self, position: TextPosition) -> usize;

    /// One box per line fragment covered by `selection`.
    fn boxes_for_selection(&self, selection: &TextSelection) -> Vec<TextBox>;

    /// Draw the paragraph with its top-left corner at `offset`.
    fn paint(&self, renderer: &mut dyn Renderer, offset: Point);

    /// Metrics for the line `position` is displayed on.
    fn line_range_for_position(&self, position: TextPosition) -> LineRange {
        self.line_range(self.line_index(position))
    }

    /// The position `lines` lines above (negative) or below (positive)
    /// `position`, keeping the caret's horizontal offset.
    ///
    /// Returns `position` unchanged when the target line does not exist.
    fn position_vertical_move(&self, position: TextPosition, lines: isize) -> TextPosition {
        let Some(target) = self.line_index(position).checked_add_signed(lines) else {
            return position;
        };
        if target >= self.line_count() {
            return position;
        }
        let caret = self.offset_for_caret(position, Rect::ZERO);
        let line = self.line_range(target);
        self.position_for_offset(Point::new(caret.x, line.top + line.height / 2.0))
    }

    /// The end of the next word at or after `position`, skipping whitespace.
    fn word_right(&self, position: TextPosition) -> TextPosition {
        let len = self.text().chars().count();
        let mut offset = position.offset;
        while offset < len {
            let range = self.word_boundary(TextPosition::new(offset));
            if range.end <= offset {
                break;
            }
            if !segment_is_whitespace(self.text(), range) {
                return TextPosition::new(range.end);
            }
            offset = range.end;
        }
        TextPosition::with_affinity(offset.min(len), position.affinity)
    }

    /// The start of the previous word before `position`, skipping whitespace.
    fn word_left(&self, position: TextPosition) -> TextPosition {
        let mut offset = position.offset.min(self.text().chars().count());
        while offset > 0 {
            let range = self.word_boundary(TextPosition::new(offset - 1));
            if range.start >= offset {
                break;
            }
            if !segment_is_whitespace(self.text(), range) {
                return TextPosition::new(range.start);
            }
            offset = range.start;
        }
        TextPosition::with_affinity(offset, position.affinity)
    }
}

fn segment_is_whitespace(text: &str, range: TextRange) -> bool {
    text.chars()
        .skip(range.start)
        .take(range.len())
        .all(char::is_whitespace)
}
