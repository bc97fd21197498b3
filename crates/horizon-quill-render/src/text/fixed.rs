//! A deterministic paragraph painter with a fixed advance per character.
//!
//! [`FixedAdvanceTextPainter`] gives every `char` the same advance and every
//! line the same height. Word segmentation follows UAX #29 through
//! `unicode-segmentation`, so word-wise navigation behaves like a shaped
//! paragraph would. Headless hosts and tests use it wherever real font
//! shaping is not available.

use unicode_segmentation::UnicodeSegmentation;

use crate::error::{RenderError, RenderResult};
use crate::renderer::Renderer;
use crate::types::{Color, Point, Rect, Size};

use super::painter::TextPainter;
use super::types::{
    LineRange, TextAffinity, TextAlign, TextBaseline, TextBox, TextDirection, TextPosition,
    TextRange, TextSelection,
};

/// Per-glyph metrics at a text scale factor of 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvanceMetrics {
    /// Horizontal advance of every character.
    pub glyph_advance: f32,
    /// Height of every line.
    pub line_height: f32,
    /// Distance from the top of a line to its alphabetic baseline.
    pub ascent: f32,
}

impl Default for FixedAdvanceMetrics {
    fn default() -> Self {
        Self {
            glyph_advance: 8.0,
            line_height: 16.0,
            ascent: 12.0,
        }
    }
}

impl FixedAdvanceMetrics {
    /// Check that every metric is positive and finite.
    pub fn validate(&self) -> RenderResult<()> {
        for (field, value) in [
            ("glyph_advance", self.glyph_advance),
            ("line_height", self.line_height),
            ("ascent", self.ascent),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(RenderError::InvalidMetric { field, value });
            }
        }
        Ok(())
    }
}

/// A fixed-advance [`TextPainter`].
#[derive(Debug, Clone)]
pub struct FixedAdvanceTextPainter {
    metrics: FixedAdvanceMetrics,
    text: String,
    chars: Vec<char>,
    color: Color,
    align: TextAlign,
    direction: TextDirection,
    scale: f32,
    lines: Vec<LineRange>,
    size: Size,
    layout_count: usize,
}

impl FixedAdvanceTextPainter {
    /// Create a painter with validated metrics.
    pub fn new(metrics: FixedAdvanceMetrics) -> RenderResult<Self> {
        metrics.validate()?;
        let mut painter = Self {
            metrics,
            text: String::new(),
            chars: Vec::new(),
            color: Color::BLACK,
            align: TextAlign::default(),
            direction: TextDirection::default(),
            scale: 1.0,
            lines: Vec::new(),
            size: Size::ZERO,
            layout_count: 0,
        };
        painter.lines.push(painter.empty_line(0));
        Ok(painter)
    }

    /// Set the glyph color used when painting.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set the text up front.
    pub fn with_text(mut self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    /// Set a validated text scale factor.
    pub fn try_set_text_scale_factor(&mut self, factor: f32) -> RenderResult<()> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(RenderError::InvalidScaleFactor(factor));
        }
        self.set_text_scale_factor(factor);
        Ok(())
    }

    /// How many times [`TextPainter::layout`] has run.
    pub fn layout_count(&self) -> usize {
        self.layout_count
    }

    fn advance(&self) -> f32 {
        self.metrics.glyph_advance * self.scale
    }

    fn line_height(&self) -> f32 {
        self.metrics.line_height * self.scale
    }

    fn empty_line(&self, offset: usize) -> LineRange {
        LineRange {
            start: offset,
            end: offset,
            end_including_newline: offset,
            hard_break: true,
            left: 0.0,
            top: 0.0,
            width: 0.0,
            height: self.line_height(),
        }
    }

    /// Split `start..end` (no newlines inside) into soft-wrapped segments.
    fn wrap_paragraph(&self, start: usize, end: usize, columns: Option<usize>) -> Vec<(usize, usize)> {
        let Some(columns) = columns else {
            return vec![(start, end)];
        };

        let mut segments = Vec::new();
        let mut line_start = start;
        while end - line_start > columns {
            let limit = line_start + columns;
            let mut brk = limit;
            if self.chars[limit].is_whitespace() {
                // Trailing whitespace hangs past the edge.
                while brk < end && self.chars[brk].is_whitespace() {
                    brk += 1;
                }
            } else {
                let mut p = limit;
                while p > line_start && !self.chars[p - 1].is_whitespace() {
                    p -= 1;
                }
                if p > line_start {
                    brk = p;
                }
            }
            segments.push((line_start, brk));
            line_start = brk;
        }
        if line_start < end || segments.is_empty() {
            segments.push((line_start, end));
        }
        segments
    }

    fn visible_width(&self, start: usize, end: usize, hard_break: bool) -> f32 {
        let mut visible = end;
        if !hard_break {
            while visible > start && self.chars[visible - 1].is_whitespace() {
                visible -= 1;
            }
        }
        (visible - start) as f32 * self.advance()
    }

    fn caret_x(&self, line: &LineRange, column: usize) -> f32 {
        let dx = column as f32 * self.advance();
        match self.direction {
            TextDirection::Ltr => line.left + dx,
            TextDirection::Rtl => line.left + line.width - dx,
        }
    }

    fn column_for_x(&self, line: &LineRange, x: f32) -> usize {
        let rel = match self.direction {
            TextDirection::Ltr => x - line.left,
            TextDirection::Rtl => line.left + line.width - x,
        };
        let max_column = line.end - line.start;
        let column = (rel / self.advance()).round();
        if column <= 0.0 {
            0
        } else {
            (column as usize).min(max_column)
        }
    }

    fn char_count_where<'a>(
        &'a self,
        keep: impl Fn(&str) -> bool + 'a,
    ) -> impl Iterator<Item = usize> + 'a {
        self.text
            .split_word_bounds()
            .filter(move |segment| keep(*segment))
            .map(|segment| segment.chars().count())
    }
}

impl TextPainter for FixedAdvanceTextPainter {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: &str) {
        if self.text != text {
            self.text = text.to_owned();
            self.chars = text.chars().collect();
        }
    }

    fn text_align(&self) -> TextAlign {
        self.align
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.align = align;
    }

    fn text_direction(&self) -> TextDirection {
        self.direction
    }

    fn set_text_direction(&mut self, direction: TextDirection) {
        self.direction = direction;
    }

    fn text_scale_factor(&self) -> f32 {
        self.scale
    }

    fn set_text_scale_factor(&mut self, factor: f32) {
        self.scale = factor;
    }

    fn layout(&mut self, min_width: f32, max_width: f32) {
        self.layout_count += 1;
        let advance = self.advance();
        let line_height = self.line_height();
        let columns = max_width
            .is_finite()
            .then(|| ((max_width / advance).floor() as usize).max(1));

        let len = self.chars.len();
        let mut lines = Vec::new();
        let mut paragraph_start = 0;
        for i in 0..=len {
            let at_newline = i < len && self.chars[i] == '\n';
            if i < len && !at_newline {
                continue;
            }
            let segments = self.wrap_paragraph(paragraph_start, i, columns);
            let last = segments.len() - 1;
            for (k, (start, end)) in segments.into_iter().enumerate() {
                let hard_break = k == last;
                lines.push(LineRange {
                    start,
                    end,
                    end_including_newline: if hard_break && at_newline { end + 1 } else { end },
                    hard_break,
                    left: 0.0,
                    top: lines.len() as f32 * line_height,
                    width: self.visible_width(start, end, hard_break),
                    height: line_height,
                });
            }
            paragraph_start = i + 1;
        }

        let widest = lines.iter().map(|line| line.width).fold(0.0_f32, f32::max);
        let width = widest.max(min_width).min(max_width);
        let factor = self.align.leading_factor(self.direction);
        for line in &mut lines {
            line.left = ((width - line.width) * factor).max(0.0);
        }

        self.size = Size::new(width, lines.len() as f32 * line_height);
        self.lines = lines;
        tracing::trace!(
            target: "horizon_quill_render::text",
            lines = self.lines.len(),
            width = self.size.width,
            "laid out paragraph"
        );
    }

    fn size(&self) -> Size {
        self.size
    }

    fn preferred_line_height(&self) -> f32 {
        self.line_height()
    }

    fn min_intrinsic_width(&self) -> f32 {
        let longest_word = self
            .char_count_where(|segment| !segment.chars().all(char::is_whitespace))
            .max()
            .unwrap_or(0);
        longest_word as f32 * self.advance()
    }

    fn max_intrinsic_width(&self) -> f32 {
        let longest_paragraph = self
            .text
            .split('\n')
            .map(|paragraph| paragraph.chars().count())
            .max()
            .unwrap_or(0);
        longest_paragraph as f32 * self.advance()
    }

    fn compute_distance_to_actual_baseline(&self, baseline: TextBaseline) -> f32 {
        match baseline {
            TextBaseline::Alphabetic => self.metrics.ascent * self.scale,
            TextBaseline::Ideographic => self.line_height(),
        }
    }

    fn offset_for_caret(&self, position: TextPosition, _caret_prototype: Rect) -> Point {
        let line = self.line_range_for_position(position);
        let column = position.offset.clamp(line.start, line.end) - line.start;
        Point::new(self.caret_x(&line, column), line.top)
    }

    fn position_for_offset(&self, offset: Point) -> TextPosition {
        let index = self
            .lines
            .iter()
            .position(|line| offset.y < line.bottom())
            .unwrap_or(self.lines.len() - 1);
        let line = self.lines[index];
        let position = line.start + self.column_for_x(&line, offset.x);
        if position == line.end && !line.hard_break {
            TextPosition::with_affinity(position, TextAffinity::Upstream)
        } else {
            TextPosition::new(position)
        }
    }

    fn word_boundary(&self, position: TextPosition) -> TextRange {
        let len = self.chars.len();
        let target = position.offset.min(len);
        let mut start = 0;
        let mut last = TextRange::collapsed(0);
        for segment in self.text.split_word_bounds() {
            let range = TextRange::new(start, start + segment.chars().count());
            if range.contains(target) {
                return range;
            }
            last = range;
            start = range.end;
        }
        last
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_range(&self, index: usize) -> LineRange {
        self.lines[index.min(self.lines.len() - 1)]
    }

    fn line_index(&self, position: TextPosition) -> usize {
        let last = self.lines.len() - 1;
        for (i, line) in self.lines.iter().enumerate() {
            if position.offset < line.end {
                return i;
            }
            if position.offset == line.end
                && (line.end_including_newline > line.end
                    || i == last
                    || position.affinity == TextAffinity::Upstream)
            {
                return i;
            }
        }
        last
    }

    fn boxes_for_selection(&self, selection: &TextSelection) -> Vec<TextBox> {
        self.lines
            .iter()
            .filter_map(|line| {
                let start = selection.start().max(line.start);
                let end = selection.end().min(line.end);
                (start < end).then(|| {
                    let a = self.caret_x(line, start - line.start);
                    let b = self.caret_x(line, end - line.start);
                    TextBox {
                        left: a.min(b),
                        top: line.top,
                        right: a.max(b),
                        bottom: line.bottom(),
                        direction: self.direction,
                    }
                })
            })
            .collect()
    }

    fn paint(&self, renderer: &mut dyn Renderer, offset: Point) {
        for line in &self.lines {
            if line.start == line.end {
                continue;
            }
            let run: String = self.chars[line.start..line.end].iter().collect();
            let x = match self.direction {
                TextDirection::Ltr => line.left,
                TextDirection::Rtl => line.left + line.width - (line.end - line.start) as f32 * self.advance(),
            };
            renderer.draw_text_run(&run, offset.translate(x, line.top), self.color);
        }
    }
}
