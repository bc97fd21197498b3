//! Text positions, ranges and selections.
//!
//! All offsets count Unicode scalar values (`char`s), not bytes. Use
//! [`byte_offset`] to slice a `&str` at a text offset.

use crate::types::{Point, Rect};

/// Which side of an offset a position belongs to.
///
/// At a soft line wrap the same offset is both the end of one line
/// (`Upstream`) and the start of the next (`Downstream`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextAffinity {
    /// The position is associated with the character before the offset.
    Upstream,
    /// The position is associated with the character after the offset.
    #[default]
    Downstream,
}

/// Reading direction of a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

/// Horizontal alignment of lines within the laid-out width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Right,
    Center,
    /// Left for left-to-right text, right otherwise.
    Start,
    /// Right for left-to-right text, left otherwise.
    End,
}

impl TextAlign {
    /// Fraction of the free horizontal space placed before a line.
    pub fn leading_factor(self, direction: TextDirection) -> f32 {
        match (self, direction) {
            (TextAlign::Left, _) => 0.0,
            (TextAlign::Right, _) => 1.0,
            (TextAlign::Center, _) => 0.5,
            (TextAlign::Start, TextDirection::Ltr) | (TextAlign::End, TextDirection::Rtl) => 0.0,
            (TextAlign::Start, TextDirection::Rtl) | (TextAlign::End, TextDirection::Ltr) => 1.0,
        }
    }
}

/// Baseline kinds a paragraph can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    Alphabetic,
    Ideographic,
}

/// An offset into a string plus an affinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextPosition {
    pub offset: usize,
    pub affinity: TextAffinity,
}

impl TextPosition {
    /// A downstream position at `offset`.
    pub const fn new(offset: usize) -> Self {
        Self {
            offset,
            affinity: TextAffinity::Downstream,
        }
    }

    /// A position at `offset` with an explicit affinity.
    pub const fn with_affinity(offset: usize, affinity: TextAffinity) -> Self {
        Self { offset, affinity }
    }
}

/// A half-open range of text offsets, `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// An empty range at `offset`.
    pub const fn collapsed(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `offset` lies within `start..end`.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// A selection: an anchor (`base_offset`) and a moving end (`extent_offset`).
///
/// A selection is directionless for the purpose of slicing: [`start`] and
/// [`end`] are the min and max of the two offsets. A collapsed selection is
/// a plain caret whose side is given by `affinity`.
///
/// [`start`]: TextSelection::start
/// [`end`]: TextSelection::end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextSelection {
    pub base_offset: usize,
    pub extent_offset: usize,
    pub affinity: TextAffinity,
    pub is_directional: bool,
}

impl TextSelection {
    /// A selection from `base_offset` to `extent_offset`.
    pub const fn new(base_offset: usize, extent_offset: usize) -> Self {
        Self {
            base_offset,
            extent_offset,
            affinity: TextAffinity::Downstream,
            is_directional: false,
        }
    }

    /// A caret at `offset`.
    pub const fn collapsed(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// A caret at `offset` on the given side.
    pub const fn collapsed_with_affinity(offset: usize, affinity: TextAffinity) -> Self {
        Self {
            base_offset: offset,
            extent_offset: offset,
            affinity,
            is_directional: false,
        }
    }

    /// A caret at `position`.
    pub const fn from_position(position: TextPosition) -> Self {
        Self::collapsed_with_affinity(position.offset, position.affinity)
    }

    pub fn start(&self) -> usize {
        self.base_offset.min(self.extent_offset)
    }

    pub fn end(&self) -> usize {
        self.base_offset.max(self.extent_offset)
    }

    pub fn is_collapsed(&self) -> bool {
        self.base_offset == self.extent_offset
    }

    /// Whether `base_offset <= extent_offset`.
    pub fn is_normalized(&self) -> bool {
        self.base_offset <= self.extent_offset
    }

    pub fn base_position(&self) -> TextPosition {
        TextPosition::with_affinity(self.base_offset, self.affinity)
    }

    pub fn extent_position(&self) -> TextPosition {
        TextPosition::with_affinity(self.extent_offset, self.affinity)
    }

    /// Both offsets lie within `0..=len`.
    pub fn is_within(&self, len: usize) -> bool {
        self.base_offset <= len && self.extent_offset <= len
    }

    pub fn as_range(&self) -> TextRange {
        TextRange::new(self.start(), self.end())
    }

    /// The text before the selection.
    pub fn text_before<'a>(&self, text: &'a str) -> &'a str {
        &text[..byte_offset(text, self.start())]
    }

    /// The selected text.
    pub fn text_inside<'a>(&self, text: &'a str) -> &'a str {
        &text[byte_offset(text, self.start())..byte_offset(text, self.end())]
    }

    /// The text after the selection.
    pub fn text_after<'a>(&self, text: &'a str) -> &'a str {
        &text[byte_offset(text, self.end())..]
    }
}

/// Metrics for a single laid-out line.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineRange {
    /// Offset of the first character on the line.
    pub start: usize,
    /// Offset after the last visible character (excludes a trailing newline).
    pub end: usize,
    /// `end` plus the newline that terminated the line, if any.
    pub end_including_newline: usize,
    /// Whether the line ends a paragraph (explicit newline or end of text).
    pub hard_break: bool,
    /// Left edge of the line after alignment.
    pub left: f32,
    /// Top edge of the line.
    pub top: f32,
    /// Width of the line's glyphs.
    pub width: f32,
    /// Height of the line.
    pub height: f32,
}

impl LineRange {
    pub fn range(&self) -> TextRange {
        TextRange::new(self.start, self.end)
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// A rectangle enclosing glyphs of a selection on one line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBox {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub direction: TextDirection,
}

impl TextBox {
    pub fn to_rect(&self) -> Rect {
        Rect::from_ltrb(self.left, self.top, self.right, self.bottom)
    }

    /// The edge a caret would sit on at the start of this box.
    pub fn start(&self) -> f32 {
        match self.direction {
            TextDirection::Ltr => self.left,
            TextDirection::Rtl => self.right,
        }
    }

    /// The edge a caret would sit on at the end of this box.
    pub fn end(&self) -> f32 {
        match self.direction {
            TextDirection::Ltr => self.right,
            TextDirection::Rtl => self.left,
        }
    }
}

/// A selection handle anchor: a point and the direction of the text there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextSelectionPoint {
    pub point: Point,
    pub direction: Option<TextDirection>,
}

/// Convert a char offset into a byte offset within `text`.
///
/// Offsets past the end clamp to `text.len()`.
pub fn byte_offset(text: &str, offset: usize) -> usize {
    text.char_indices()
        .nth(offset)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

/// Number of chars in `text`.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapsed_start_end_agree() {
        let text = "héllo wörld";
        for offset in 0..=char_len(text) {
            let selection = TextSelection::collapsed(offset);
            assert!(selection.is_collapsed());
            assert_eq!(selection.start(), offset);
            assert_eq!(selection.end(), offset);
        }
    }

    #[test]
    fn test_selection_is_directionless() {
        let selection = TextSelection::new(7, 2);
        assert_eq!(selection.start(), 2);
        assert_eq!(selection.end(), 7);
        assert!(!selection.is_normalized());
        assert_eq!(selection.as_range(), TextRange::new(2, 7));
    }

    #[test]
    fn test_selection_slices_by_chars() {
        let text = "naïve café";
        let selection = TextSelection::new(2, 5);
        assert_eq!(selection.text_before(text), "na");
        assert_eq!(selection.text_inside(text), "ïve");
        assert_eq!(selection.text_after(text), " café");
    }

    #[test]
    fn test_byte_offset_clamps() {
        assert_eq!(byte_offset("ab", 5), 2);
        assert_eq!(byte_offset("•x", 1), '•'.len_utf8());
    }

    #[test]
    fn test_align_leading_factor() {
        assert_eq!(TextAlign::Start.leading_factor(TextDirection::Rtl), 1.0);
        assert_eq!(TextAlign::End.leading_factor(TextDirection::Rtl), 0.0);
        assert_eq!(TextAlign::Center.leading_factor(TextDirection::Ltr), 0.5);
    }

    #[test]
    fn test_text_box_edges() {
        let b = TextBox {
            left: 1.0,
            top: 0.0,
            right: 4.0,
            bottom: 2.0,
            direction: TextDirection::Rtl,
        };
        assert_eq!(b.start(), 4.0);
        assert_eq!(b.end(), 1.0);
        assert_eq!(b.to_rect(), Rect::new(1.0, 0.0, 3.0, 2.0));
    }
}
