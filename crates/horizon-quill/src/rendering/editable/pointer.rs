//! Pointer hit testing and gesture-driven selection.

use std::time::Instant;

use horizon_quill_core::logging::targets;
use horizon_quill_render::Point;
use horizon_quill_render::text::{TextAffinity, TextPosition, TextSelection};

use crate::gesture::RecognizedGesture;
use crate::input::PointerEvent;

use super::{RenderEditable, SelectionChangedCause};

impl RenderEditable {
    /// Editables claim every hit inside their bounds.
    pub fn hit_test_self(&self, _position: Point) -> bool {
        true
    }

    /// Route a pointer event through the gesture recognizers.
    ///
    /// Pointers going down are only handed to the recognizers while a
    /// selection-changed callback is registered.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) {
        if self.ignore_pointer {
            return;
        }
        if event.is_down() && self.on_selection_changed.is_some() {
            self.tap.add_pointer(event);
            self.double_tap.add_pointer(event);
            self.long_press.add_pointer(event);
        }

        let mut gestures = self.tap.handle_event(event);
        gestures.extend(self.long_press.handle_event(event));
        gestures.extend(self.double_tap.handle_event(event));
        for gesture in gestures {
            self.dispatch_gesture(gesture);
        }
    }

    /// Fire long presses whose deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        if self.ignore_pointer {
            return;
        }
        for gesture in self.long_press.check(now) {
            self.dispatch_gesture(gesture);
        }
    }

    fn dispatch_gesture(&mut self, gesture: RecognizedGesture) {
        tracing::trace!(target: targets::GESTURE, ?gesture, id = self.id.0, "editable gesture");
        match gesture {
            RecognizedGesture::TapDown { global_position } => self.handle_tap_down(global_position),
            RecognizedGesture::Tap => self.handle_tap(),
            RecognizedGesture::DoubleTap { .. } | RecognizedGesture::LongPress { .. }
                if !self.enable_interactive_selection => {}
            RecognizedGesture::DoubleTap {
                first_global_position,
            } => self.handle_double_tap(first_global_position),
            RecognizedGesture::LongPress { .. } => self.handle_long_press(),
        }
    }

    /// Remember where the pointer went down. Desktop platforms move the
    /// caret there immediately.
    pub fn handle_tap_down(&mut self, global_position: Point) {
        self.last_tap_down_position = Some(global_position - self.paint_offset());
        if !self.platform.is_mobile() {
            self.select_position(SelectionChangedCause::Tap);
        }
    }

    pub fn handle_tap(&mut self) {
        self.select_position(SelectionChangedCause::Tap);
    }

    /// Select the word under the first tap of a double tap.
    pub fn handle_double_tap(&mut self, first_global_position: Point) {
        self.last_tap_down_position = Some(first_global_position - self.paint_offset());
        self.select_word(SelectionChangedCause::DoubleTap);
    }

    pub fn handle_long_press(&mut self) {
        self.select_word(SelectionChangedCause::LongPress);
    }

    /// Resolve the last tap-down to a text position, laying out first.
    ///
    /// `None` without a callback, before the first layout pass or before
    /// any tap.
    fn last_tap_position(&mut self) -> Option<TextPosition> {
        if self.on_selection_changed.is_none() || !self.layout_at_constraints() {
            return None;
        }
        let tap = self.last_tap_down_position?;
        Some(self.painter.position_for_offset(tap - self.global_origin))
    }

    /// Place a caret at the last tap-down.
    pub fn select_position(&mut self, cause: SelectionChangedCause) {
        if let Some(position) = self.last_tap_position() {
            self.notify_selection_changed(TextSelection::from_position(position), cause);
        }
    }

    /// Select the word at the last tap-down.
    pub fn select_word(&mut self, cause: SelectionChangedCause) {
        if let Some(position) = self.last_tap_position() {
            let selection = self.select_word_at_offset(position);
            self.notify_selection_changed(selection, cause);
        }
    }

    /// Place a caret on the nearer edge of the word at the last tap-down.
    ///
    /// Only a tap resolving exactly onto the word's start lands there; any
    /// other position in the word lands on its end.
    pub fn select_word_edge(&mut self, cause: SelectionChangedCause) {
        let Some(position) = self.last_tap_position() else {
            return;
        };
        let word = self.painter.word_boundary(position);
        let selection = if position.offset.saturating_sub(word.start) < 1 {
            TextSelection::collapsed_with_affinity(word.start, TextAffinity::Downstream)
        } else {
            TextSelection::collapsed_with_affinity(word.end, TextAffinity::Upstream)
        };
        self.notify_selection_changed(selection, cause);
    }
}
