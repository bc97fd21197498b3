//! Caret, selection highlight and glyph painting.

use horizon_quill_core::PerfSpan;
use horizon_quill_core::logging::span_names;
use horizon_quill_render::text::TextSelection;
use horizon_quill_render::{Color, Point, Rect, Renderer, RoundedRect};

use super::RenderEditable;

impl RenderEditable {
    /// Paint the editable with its top-left corner at `offset`.
    ///
    /// Content scrolled out of the box is clipped away.
    pub fn paint(&mut self, renderer: &mut dyn Renderer, offset: Point) {
        self.layout_for_queries();
        let _span = PerfSpan::new(span_names::PAINT);
        match self.size.filter(|_| self.has_visual_overflow) {
            Some(size) => {
                renderer.save();
                renderer.clip_rect(Rect::from_origin_size(offset, size));
                self.paint_contents(renderer, offset);
                renderer.restore();
            }
            None => self.paint_contents(renderer, offset),
        }
        self.dirty.clear_paint();
    }

    /// The clip applied while painting, in local coordinates.
    pub fn describe_approximate_paint_clip(&self) -> Option<Rect> {
        self.size
            .filter(|_| self.has_visual_overflow)
            .map(|size| Rect::from_origin_size(Point::ZERO, size))
    }

    fn paint_contents(&mut self, renderer: &mut dyn Renderer, offset: Point) {
        let effective_offset = offset + self.paint_offset();

        if let Some(selection) = self.selection {
            match (self.cursor_color, self.selection_color) {
                (Some(color), _)
                    if selection.is_collapsed() && self.services.show_cursor.get() =>
                {
                    self.paint_caret(renderer, selection, color, effective_offset);
                }
                (_, Some(color)) if !selection.is_collapsed() => {
                    self.paint_selection(renderer, selection, color, effective_offset);
                }
                _ => {}
            }
        }

        self.painter.paint(renderer, effective_offset);
    }

    fn paint_caret(
        &mut self,
        renderer: &mut dyn Renderer,
        selection: TextSelection,
        color: Color,
        effective_offset: Point,
    ) {
        let caret = self
            .painter
            .offset_for_caret(selection.extent_position(), self.caret_prototype);
        let caret_rect = self.caret_prototype.shift(caret + effective_offset);

        match self.cursor_radius {
            Some(radius) => renderer.fill_rounded_rect(RoundedRect::new(caret_rect, radius), color),
            None => renderer.fill_rect(caret_rect, color),
        }

        if self.last_caret_rect != Some(caret_rect) {
            self.last_caret_rect = Some(caret_rect);
            if let Some(handler) = self.on_caret_changed.as_mut() {
                handler(caret_rect);
            }
        }
    }

    fn paint_selection(
        &mut self,
        renderer: &mut dyn Renderer,
        selection: TextSelection,
        color: Color,
        effective_offset: Point,
    ) {
        let painter = &self.painter;
        let boxes = self
            .selection_rects
            .get_or_insert_with(|| painter.boxes_for_selection(&selection));
        for text_box in boxes.iter() {
            renderer.fill_rect(text_box.to_rect().shift(effective_offset), color);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use horizon_quill_render::{DrawCommand, RecordingRenderer};
    use parking_lot::Mutex;

    use super::super::tests::editable_with;
    use super::*;
    use crate::rendering::{BoxConstraints, EditableConfig};

    fn config() -> EditableConfig {
        EditableConfig::new()
            .with_cursor_color(Color::BLUE)
            .with_selection_color(Color::from_rgb(0.7, 0.8, 1.0))
    }

    #[test]
    fn test_caret_then_text() {
        let (mut editable, harness) = editable_with("hello", config());
        harness.show_cursor.set(true);
        editable.set_selection(Some(TextSelection::collapsed(2)));
        editable.perform_layout(BoxConstraints::tight_for_width(100.0, f32::INFINITY));

        let mut renderer = RecordingRenderer::new();
        editable.paint(&mut renderer, Point::new(5.0, 5.0));

        let commands = renderer.commands();
        assert_eq!(commands.len(), 2);
        assert_eq!(
            commands[0],
            DrawCommand::FillRect {
                rect: Rect::new(25.0, 7.0, 1.0, 16.0),
                color: Color::BLUE,
            }
        );
        assert!(matches!(&commands[1], DrawCommand::Text { text, .. } if text == "hello"));
        assert!(!editable.needs_paint());
    }

    #[test]
    fn test_hidden_cursor_paints_only_text() {
        let (mut editable, _) = editable_with("hello", config());
        editable.set_selection(Some(TextSelection::collapsed(2)));
        editable.perform_layout(BoxConstraints::tight_for_width(100.0, f32::INFINITY));

        let mut renderer = RecordingRenderer::new();
        editable.paint(&mut renderer, Point::ZERO);
        assert_eq!(renderer.commands().len(), 1);
    }

    #[test]
    fn test_rounded_caret() {
        let (mut editable, harness) = editable_with("hi", config().with_cursor_radius(1.5));
        harness.show_cursor.set(true);
        editable.set_selection(Some(TextSelection::collapsed(0)));
        editable.perform_layout(BoxConstraints::tight_for_width(100.0, f32::INFINITY));

        let mut renderer = RecordingRenderer::new();
        editable.paint(&mut renderer, Point::ZERO);
        assert!(matches!(
            renderer.commands()[0],
            DrawCommand::FillRoundedRect { .. }
        ));
    }

    #[test]
    fn test_selection_boxes_are_cached() {
        let (mut editable, _) = editable_with("hello world", config());
        editable.set_selection(Some(TextSelection::new(2, 8)));
        editable.perform_layout(BoxConstraints::tight_for_width(200.0, f32::INFINITY));

        let mut renderer = RecordingRenderer::new();
        editable.paint(&mut renderer, Point::ZERO);
        assert!(matches!(
            renderer.commands()[0],
            DrawCommand::FillRect { rect, .. } if rect == Rect::new(20.0, 0.0, 60.0, 20.0)
        ));
        assert!(editable.selection_rects.is_some());

        editable.set_selection(Some(TextSelection::new(0, 1)));
        assert!(editable.selection_rects.is_none());
    }

    #[test]
    fn test_caret_changed_fires_on_move_only() {
        let (mut editable, harness) = editable_with("hello", config());
        harness.show_cursor.set(true);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        editable.set_on_caret_changed(Some(Box::new(move |rect| sink.lock().push(rect))));
        editable.set_selection(Some(TextSelection::collapsed(1)));
        editable.perform_layout(BoxConstraints::tight_for_width(100.0, f32::INFINITY));

        let mut renderer = RecordingRenderer::new();
        editable.paint(&mut renderer, Point::ZERO);
        editable.paint(&mut renderer, Point::ZERO);
        assert_eq!(seen.lock().len(), 1);

        editable.set_selection(Some(TextSelection::collapsed(3)));
        editable.paint(&mut renderer, Point::ZERO);
        let seen = seen.lock();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1], Rect::new(30.0, 2.0, 1.0, 16.0));
    }

    #[test]
    fn test_overflow_clips_and_scrolls() {
        let (mut editable, harness) = editable_with(&"x".repeat(30), config());
        editable.perform_layout(BoxConstraints::tight_for_width(100.0, f32::INFINITY));
        harness.offset.jump_to(40.0);

        assert_eq!(
            editable.describe_approximate_paint_clip(),
            Some(Rect::new(0.0, 0.0, 100.0, 20.0))
        );

        let mut renderer = RecordingRenderer::new();
        editable.paint(&mut renderer, Point::new(10.0, 0.0));
        let commands = renderer.commands();
        assert_eq!(commands[0], DrawCommand::Clip(Rect::new(10.0, 0.0, 100.0, 20.0)));
        assert!(matches!(
            &commands[1],
            DrawCommand::Text { origin, .. } if *origin == Point::new(-30.0, 0.0)
        ));
        assert_eq!(renderer.depth(), 0);
    }

    #[test]
    fn test_no_clip_without_overflow() {
        let (mut editable, _) = editable_with("short", config());
        editable.perform_layout(BoxConstraints::tight_for_width(100.0, f32::INFINITY));
        assert_eq!(editable.describe_approximate_paint_clip(), None);
    }

    #[test]
    fn test_obscured_text_paints_bullets() {
        let (mut editable, _) = editable_with("pw", config().with_obscure_text(true));
        editable.perform_layout(BoxConstraints::tight_for_width(100.0, f32::INFINITY));

        let mut renderer = RecordingRenderer::new();
        editable.paint(&mut renderer, Point::ZERO);
        assert!(matches!(
            &renderer.commands()[0],
            DrawCommand::Text { text, .. } if text == "••"
        ));
        assert_eq!(editable.text(), "pw");
    }
}
