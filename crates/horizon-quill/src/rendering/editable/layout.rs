//! Text measurement, box layout and geometric queries.

use horizon_quill_core::PerfSpan;
use horizon_quill_core::logging::{span_names, targets};
use horizon_quill_render::text::{
    TextAffinity, TextBaseline, TextPosition, TextSelection, TextSelectionPoint,
};
use horizon_quill_render::{Point, Rect, Size};

use super::super::box_constraints::BoxConstraints;
use super::super::viewport::Axis;
use super::{CARET_GAP, CARET_HEIGHT_OFFSET, CARET_WIDTH, RenderEditable};

impl RenderEditable {
    pub(super) fn is_multiline(&self) -> bool {
        self.max_lines != Some(1)
    }

    /// Vertical when multi-line, horizontal otherwise.
    pub fn viewport_axis(&self) -> Axis {
        if self.is_multiline() {
            Axis::Vertical
        } else {
            Axis::Horizontal
        }
    }

    /// Translation applied to the text for the current scroll position.
    pub fn paint_offset(&self) -> Point {
        let pixels = self.services.offset.pixels();
        match self.viewport_axis() {
            Axis::Horizontal => Point::new(-pixels, 0.0),
            Axis::Vertical => Point::new(0.0, -pixels),
        }
    }

    pub fn preferred_line_height(&self) -> f32 {
        self.painter.preferred_line_height()
    }

    pub fn constraints(&self) -> Option<BoxConstraints> {
        self.constraints
    }

    /// Size from the last layout pass.
    pub fn size(&self) -> Option<Size> {
        self.size
    }

    pub fn has_visual_overflow(&self) -> bool {
        self.has_visual_overflow
    }

    /// Lay out the text for a box `constraint_width` wide.
    ///
    /// Cached by width: a call with the last measured width does nothing.
    pub(super) fn layout_text(&mut self, constraint_width: f32) {
        if self.text_layout_last_width == Some(constraint_width) {
            return;
        }
        let _span = PerfSpan::new(span_names::TEXT_LAYOUT);
        let available_width = (constraint_width - CARET_GAP - CARET_WIDTH).max(0.0);
        let max_width = if self.is_multiline() {
            available_width
        } else {
            f32::INFINITY
        };
        self.painter.layout(available_width, max_width);
        self.text_layout_last_width = Some(constraint_width);
        self.measure_count += 1;
        tracing::trace!(
            target: targets::EDITABLE,
            id = self.id.0,
            constraint_width,
            measure_count = self.measure_count,
            "text measured"
        );
    }

    /// Lay out at the last constraint width, or unbounded before the first
    /// layout pass.
    pub(super) fn layout_for_queries(&mut self) {
        let width = self.constraints.map_or(f32::INFINITY, |c| c.max_width);
        self.layout_text(width);
    }

    /// Lay out at the last constraint width. Returns false before the
    /// first layout pass.
    pub(super) fn layout_at_constraints(&mut self) -> bool {
        match self.constraints {
            Some(constraints) => {
                self.layout_text(constraints.max_width);
                true
            }
            None => false,
        }
    }

    fn preferred_height(&mut self, width: f32) -> f32 {
        let line_height = self.preferred_line_height();
        if let Some(max_lines) = self.max_lines {
            return line_height * max_lines as f32;
        }
        if !width.is_finite() {
            let lines = 1 + self.painter.text().chars().filter(|&c| c == '\n').count();
            return line_height * lines as f32;
        }
        self.layout_text(width);
        line_height.max(self.painter.height())
    }

    fn viewport_extent(&self, size: Size) -> f32 {
        match self.viewport_axis() {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    fn max_scroll_extent(&self, size: Size, content: Size) -> f32 {
        match self.viewport_axis() {
            Axis::Horizontal => (content.width - size.width).max(0.0),
            Axis::Vertical => (content.height - size.height).max(0.0),
        }
    }

    /// Size the editable within `constraints` and report its extents to the
    /// scroll offset.
    pub fn perform_layout(&mut self, constraints: BoxConstraints) {
        self.constraints = Some(constraints);
        self.dirty.clear_layout();
        self.layout_text(constraints.max_width);

        let line_height = self.preferred_line_height();
        self.caret_prototype = Rect::new(
            0.0,
            CARET_HEIGHT_OFFSET,
            self.cursor_width,
            line_height - 2.0 * CARET_HEIGHT_OFFSET,
        );
        self.selection_rects = None;

        let painter_size = self.painter.size();
        let size = Size::new(
            constraints.max_width,
            constraints.constrain_height(self.preferred_height(constraints.max_width)),
        );
        self.size = Some(size);

        let content = Size::new(
            painter_size.width + CARET_GAP + CARET_WIDTH,
            painter_size.height,
        );
        let max_scroll_extent = self.max_scroll_extent(size, content);
        self.has_visual_overflow = max_scroll_extent > 0.0;

        self.services
            .offset
            .apply_viewport_dimension(self.viewport_extent(size));
        self.services
            .offset
            .apply_content_dimensions(0.0, max_scroll_extent);
        self.dirty.mark_needs_paint();

        tracing::trace!(
            target: targets::EDITABLE,
            id = self.id.0,
            width = size.width,
            height = size.height,
            max_scroll_extent,
            "layout"
        );
    }

    pub fn compute_min_intrinsic_width(&mut self, _height: f32) -> f32 {
        self.layout_text(f32::INFINITY);
        self.painter.min_intrinsic_width()
    }

    pub fn compute_max_intrinsic_width(&mut self, _height: f32) -> f32 {
        self.layout_text(f32::INFINITY);
        self.painter.max_intrinsic_width()
    }

    pub fn compute_min_intrinsic_height(&mut self, width: f32) -> f32 {
        self.preferred_height(width)
    }

    pub fn compute_max_intrinsic_height(&mut self, width: f32) -> f32 {
        self.preferred_height(width)
    }

    /// Distance from the top of the box to `baseline`, or `None` before
    /// the first layout pass.
    pub fn compute_distance_to_actual_baseline(&mut self, baseline: TextBaseline) -> Option<f32> {
        if !self.layout_at_constraints() {
            return None;
        }
        Some(self.painter.compute_distance_to_actual_baseline(baseline))
    }

    // -------------------------------------------------------------------------
    // Position queries
    // -------------------------------------------------------------------------

    /// The text position under a global point.
    pub fn get_position_for_point(&mut self, global_position: Point) -> TextPosition {
        self.layout_for_queries();
        let local = global_position - self.paint_offset() - self.global_origin;
        self.painter.position_for_offset(local)
    }

    /// A caret-width rectangle one line tall at `caret_position`, in local
    /// coordinates.
    pub fn get_local_rect_for_caret(&mut self, caret_position: TextPosition) -> Rect {
        self.layout_for_queries();
        let caret = self
            .painter
            .offset_for_caret(caret_position, self.caret_prototype);
        Rect::new(0.0, 0.0, CARET_WIDTH, self.preferred_line_height())
            .shift(caret + self.paint_offset())
    }

    /// Anchor points for selection handles.
    ///
    /// One point for a caret, two for a range. Points sit on the bottom of
    /// the line and include the scroll offset.
    pub fn get_endpoints_for_selection(
        &mut self,
        selection: &TextSelection,
    ) -> Vec<TextSelectionPoint> {
        self.layout_for_queries();
        let paint_offset = self.paint_offset();
        if !selection.is_collapsed() {
            let boxes = self.painter.boxes_for_selection(selection);
            if let (Some(first), Some(last)) = (boxes.first(), boxes.last()) {
                return vec![
                    TextSelectionPoint {
                        point: Point::new(first.start(), first.bottom) + paint_offset,
                        direction: Some(first.direction),
                    },
                    TextSelectionPoint {
                        point: Point::new(last.end(), last.bottom) + paint_offset,
                        direction: Some(last.direction),
                    },
                ];
            }
        }
        let caret = self
            .painter
            .offset_for_caret(selection.extent_position(), self.caret_prototype);
        vec![TextSelectionPoint {
            point: Point::new(0.0, self.preferred_line_height()) + caret + paint_offset,
            direction: None,
        }]
    }

    pub fn get_position_down(&mut self, position: TextPosition) -> TextPosition {
        self.layout_for_queries();
        self.painter.position_vertical_move(position, 1)
    }

    pub fn get_position_up(&mut self, position: TextPosition) -> TextPosition {
        self.layout_for_queries();
        self.painter.position_vertical_move(position, -1)
    }

    /// Start of the line `position` is on. The affinity defaults to the
    /// position's own.
    pub fn get_line_start_position(
        &mut self,
        position: TextPosition,
        affinity: Option<TextAffinity>,
    ) -> TextPosition {
        self.layout_for_queries();
        let line = self.painter.line_range_for_position(position);
        TextPosition::with_affinity(line.start, affinity.unwrap_or(position.affinity))
    }

    /// End of the line `position` is on, past any newline.
    pub fn get_line_end_position(
        &mut self,
        position: TextPosition,
        affinity: Option<TextAffinity>,
    ) -> TextPosition {
        self.layout_for_queries();
        let line = self.painter.line_range_for_position(position);
        TextPosition::with_affinity(
            line.end_including_newline,
            affinity.unwrap_or(position.affinity),
        )
    }

    /// Whether `offset` starts a line or ends one (newline included).
    pub fn is_line_end_or_start(&mut self, offset: usize) -> bool {
        self.layout_for_queries();
        (0..self.painter.line_count()).any(|index| {
            let line = self.painter.line_range(index);
            line.start == offset || line.end_including_newline == offset
        })
    }

    pub fn get_word_right(&mut self, position: TextPosition) -> TextPosition {
        self.layout_for_queries();
        self.painter.word_right(position)
    }

    pub fn get_word_left(&mut self, position: TextPosition) -> TextPosition {
        self.layout_for_queries();
        self.painter.word_left(position)
    }

    /// Start of the paragraph containing `position`: walk back over soft
    /// wrapped lines.
    pub fn get_paragraph_start(
        &mut self,
        position: TextPosition,
        affinity: Option<TextAffinity>,
    ) -> TextPosition {
        self.layout_for_queries();
        let mut index = self.painter.line_index(position);
        while index > 0 && !self.painter.line_range(index - 1).hard_break {
            index -= 1;
        }
        let line = self.painter.line_range(index);
        TextPosition::with_affinity(line.start, affinity.unwrap_or(position.affinity))
    }

    /// End of the paragraph containing `position`, past its newline.
    pub fn get_paragraph_end(
        &mut self,
        position: TextPosition,
        affinity: Option<TextAffinity>,
    ) -> TextPosition {
        self.layout_for_queries();
        let line_count = self.painter.line_count();
        let mut index = self.painter.line_index(position);
        while index < line_count && !self.painter.line_range(index).hard_break {
            index += 1;
        }
        let line = self.painter.line_range(index);
        TextPosition::with_affinity(
            line.end_including_newline,
            affinity.unwrap_or(position.affinity),
        )
    }

    /// End of the first paragraph ending after `position`.
    pub fn get_paragraph_forward(
        &mut self,
        position: TextPosition,
        affinity: Option<TextAffinity>,
    ) -> TextPosition {
        self.layout_for_queries();
        let affinity = affinity.unwrap_or(position.affinity);
        let mut found = None;
        for index in 0..self.painter.line_count() {
            let line = self.painter.line_range(index);
            found = Some(line);
            if line.hard_break && line.end > position.offset {
                break;
            }
        }
        match found {
            Some(line) => TextPosition::with_affinity(line.end, affinity),
            None => TextPosition::with_affinity(position.offset, affinity),
        }
    }

    /// Start of the last paragraph starting before `position`.
    pub fn get_paragraph_backward(
        &mut self,
        position: TextPosition,
        affinity: Option<TextAffinity>,
    ) -> TextPosition {
        self.layout_for_queries();
        let affinity = affinity.unwrap_or(position.affinity);
        let mut found = None;
        for index in (0..self.painter.line_count()).rev() {
            let line = self.painter.line_range(index);
            found = Some(line);
            let starts_paragraph = index == 0 || self.painter.line_range(index - 1).hard_break;
            if starts_paragraph && line.start < position.offset {
                break;
            }
        }
        match found {
            Some(line) => TextPosition::with_affinity(line.start, affinity),
            None => TextPosition::with_affinity(position.offset, affinity),
        }
    }
}
