//! Keyboard-driven caret movement, selection extension and clipboard
//! shortcuts.

use horizon_quill_core::logging::targets;
use horizon_quill_render::text::{TextPosition, TextSelection, char_len};

use crate::input::{Key, RawKeyEvent};
use crate::platform::ClipboardReply;
use crate::services::TextEditingValue;

use super::{PasteToken, RenderEditable, SelectionChangedCause};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arrow {
    Left,
    Right,
    Up,
    Down,
}

impl Arrow {
    fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::ArrowLeft => Some(Arrow::Left),
            Key::ArrowRight => Some(Arrow::Right),
            Key::ArrowUp => Some(Arrow::Up),
            Key::ArrowDown => Some(Arrow::Down),
            _ => None,
        }
    }
}

impl RenderEditable {
    /// React to a raw key event. Key-up events and events arriving while
    /// there is no selection are ignored.
    pub fn handle_key_event(&mut self, event: &RawKeyEvent) {
        if !event.is_down() {
            return;
        }
        let Some(selection) = self.selection else {
            return;
        };
        if selection.is_collapsed() {
            self.extent_offset = selection.extent_offset;
            self.base_offset = selection.base_offset;
        }

        let modifiers = event.modifiers;
        if let Some(arrow) = Arrow::from_key(event.key) {
            let shift = modifiers.shift;
            let mut new_offset = self.extent_offset;
            if self.platform.is_word_jump(modifiers) {
                new_offset = self.handle_word_jump(arrow, new_offset);
            }
            new_offset = self.handle_horizontal_arrow(arrow, shift, new_offset);
            if matches!(arrow, Arrow::Up | Arrow::Down) {
                new_offset = self.handle_vertical_arrow(arrow, shift, new_offset);
            }
            new_offset = self.handle_shift(arrow, shift, selection, new_offset);
            self.extent_offset = new_offset;
        } else if self.platform.is_accelerator(modifiers)
            && matches!(event.key, Key::C | Key::X | Key::V | Key::A)
        {
            self.handle_shortcut(event.key, selection);
        }

        if matches!(event.key, Key::Delete | Key::Backspace) {
            self.handle_delete(event.key == Key::Backspace, selection);
        }
    }

    /// Re-anchor on the word two characters back or one character ahead.
    fn handle_word_jump(&mut self, arrow: Arrow, new_offset: usize) -> usize {
        let len = self.text_len();
        match arrow {
            Arrow::Left if self.extent_offset > 2 => {
                let word = self.select_word_at_offset(TextPosition::new(self.extent_offset - 2));
                word.base_offset + 1
            }
            Arrow::Right if self.extent_offset + 2 < len => {
                let word = self.select_word_at_offset(TextPosition::new(self.extent_offset + 1));
                word.extent_offset.saturating_sub(1)
            }
            _ => new_offset,
        }
    }

    fn handle_horizontal_arrow(&mut self, arrow: Arrow, shift: bool, new_offset: usize) -> usize {
        match arrow {
            Arrow::Right if self.extent_offset < self.text_len() => {
                if shift {
                    self.previous_cursor_location = self.previous_cursor_location.saturating_add(1);
                }
                new_offset + 1
            }
            Arrow::Left if self.extent_offset > 0 => {
                if shift {
                    self.previous_cursor_location = self.previous_cursor_location.saturating_sub(1);
                }
                new_offset.saturating_sub(1)
            }
            _ => new_offset,
        }
    }

    /// Move one line up or down from the working extent.
    ///
    /// On the first or last line the caret snaps to the start or end of the
    /// text; a shifted snap arms `reset_cursor` so the next shifted move
    /// returns to the remembered column.
    fn handle_vertical_arrow(&mut self, arrow: Arrow, shift: bool, new_offset: usize) -> usize {
        self.layout_for_queries();
        let line_height = self.preferred_line_height();
        let dy = if arrow == Arrow::Up {
            -0.5 * line_height
        } else {
            1.5 * line_height
        };
        let caret = self
            .painter
            .offset_for_caret(TextPosition::new(self.extent_offset), self.caret_prototype);
        let position = self.painter.position_for_offset(caret.translate(0.0, dy));

        if position.offset == self.extent_offset {
            self.reset_cursor = shift;
            match arrow {
                Arrow::Down => self.text_len(),
                Arrow::Up => 0,
                _ => new_offset,
            }
        } else if self.reset_cursor && shift {
            self.reset_cursor = false;
            self.previous_cursor_location.min(self.text_len())
        } else {
            self.previous_cursor_location = position.offset;
            position.offset
        }
    }

    /// Emit the selection for a finished arrow move.
    fn handle_shift(
        &mut self,
        arrow: Arrow,
        shift: bool,
        selection: TextSelection,
        mut new_offset: usize,
    ) -> usize {
        if self.on_selection_changed.is_none() {
            return new_offset;
        }
        let next = if shift {
            if self.base_offset < new_offset {
                TextSelection::new(self.base_offset, new_offset)
            } else {
                TextSelection::new(new_offset, self.base_offset)
            }
        } else {
            if !selection.is_collapsed() {
                match arrow {
                    Arrow::Left => new_offset = self.base_offset.min(self.extent_offset),
                    Arrow::Right => new_offset = self.base_offset.max(self.extent_offset),
                    Arrow::Up | Arrow::Down => {}
                }
            }
            TextSelection::collapsed(new_offset)
        };
        self.notify_selection_changed(next, SelectionChangedCause::Keyboard);
        new_offset
    }

    fn handle_shortcut(&mut self, key: Key, selection: TextSelection) {
        match key {
            Key::C | Key::X if self.obscure_text => {
                tracing::debug!(target: targets::CLIPBOARD, "obscured text not copied");
            }
            Key::C => {
                if !selection.is_collapsed() {
                    self.copy_to_clipboard(selection);
                }
            }
            Key::X => {
                if !selection.is_collapsed() && self.copy_to_clipboard(selection) {
                    let value = TextEditingValue::new(
                        format!(
                            "{}{}",
                            selection.text_before(&self.text),
                            selection.text_after(&self.text)
                        ),
                        TextSelection::collapsed(selection.start()),
                    );
                    self.services.text_selection_delegate.set_text_editing_value(value);
                }
            }
            Key::V => self.request_paste(),
            Key::A => {
                let len = self.services.text_selection_delegate.text_editing_value().len();
                self.base_offset = 0;
                self.extent_offset = len;
                self.notify_selection_changed(
                    TextSelection::new(0, len),
                    SelectionChangedCause::Keyboard,
                );
            }
            _ => {}
        }
    }

    /// Put the selected text on the clipboard. Returns false if the
    /// clipboard refused it.
    fn copy_to_clipboard(&self, selection: TextSelection) -> bool {
        match self
            .services
            .clipboard
            .set_text(selection.text_inside(&self.text))
        {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(target: targets::CLIPBOARD, %err, "copy failed");
                false
            }
        }
    }

    /// Ask the clipboard for text. A newer request supersedes any pending
    /// one.
    fn request_paste(&mut self) {
        self.paste_generation += 1;
        let token = PasteToken::new(self.paste_generation);
        if let Some(stale) = self.pending_paste.replace(token) {
            tracing::debug!(target: targets::CLIPBOARD, ?stale, "paste superseded");
        }
        self.services
            .clipboard
            .request_text(ClipboardReply::new(token, self.input.sender()));
    }

    /// Whether a paste request is waiting on the clipboard.
    pub fn has_pending_paste(&self) -> bool {
        self.pending_paste.is_some()
    }

    /// Splice clipboard text into the delegate's current value.
    pub(super) fn handle_paste_completed(&mut self, token: PasteToken, text: Option<String>) {
        if self.pending_paste != Some(token) {
            tracing::debug!(target: targets::CLIPBOARD, ?token, "stale paste dropped");
            return;
        }
        self.pending_paste = None;
        let Some(pasted) = text else {
            return;
        };
        let delegate = &self.services.text_selection_delegate;
        let value = delegate.text_editing_value();
        let selection = value.selection;
        let spliced = TextEditingValue::new(
            format!(
                "{}{}{}",
                selection.text_before(&value.text),
                pasted,
                selection.text_after(&value.text)
            ),
            TextSelection::collapsed(selection.start() + char_len(&pasted)),
        );
        delegate.set_text_editing_value(spliced);
    }

    /// Remove the selection, or the character next to the caret.
    ///
    /// A non-collapsed selection also takes the character after it.
    fn handle_delete(&mut self, backspace: bool, selection: TextSelection) {
        let mut selection = selection;
        if backspace && selection.is_collapsed() {
            if selection.start() == 0 {
                return;
            }
            selection =
                TextSelection::collapsed_with_affinity(selection.start() - 1, selection.affinity);
        }
        let before = selection.text_before(&self.text);
        let after = selection.text_after(&self.text);
        let mut rest = after.chars();
        let text = if rest.next().is_some() {
            format!("{before}{}", rest.as_str())
        } else {
            before.to_owned()
        };
        self.services
            .text_selection_delegate
            .set_text_editing_value(TextEditingValue::new(
                text,
                TextSelection::collapsed(selection.start()),
            ));
    }

    /// The word around `position`, or a caret there if it sits at or past
    /// the word's end.
    pub(super) fn select_word_at_offset(&self, position: TextPosition) -> TextSelection {
        let word = self.painter.word_boundary(position);
        if position.offset >= word.end {
            TextSelection::from_position(position)
        } else {
            TextSelection::new(word.start, word.end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{Harness, editable, editable_with};
    use super::super::EditableConfig;
    use super::*;
    use crate::input::KeyboardModifiers;
    use crate::platform::ClipboardService;
    use crate::rendering::BoxConstraints;

    fn press(editable: &mut RenderEditable, harness: &Harness, key: Key, mods: KeyboardModifiers) {
        editable.handle_key_event(&RawKeyEvent::down(key, mods));
        harness.sync(editable);
    }

    fn ready(text: &str, selection: TextSelection) -> (RenderEditable, Harness) {
        let (mut editable, harness) = editable(text);
        harness.track(&mut editable);
        harness.set_value(&mut editable, text, selection);
        editable.perform_layout(BoxConstraints::tight_for_width(400.0, f32::INFINITY));
        (editable, harness)
    }

    #[test]
    fn test_key_up_and_missing_selection_are_ignored() {
        let (mut editable, harness) = editable("abc");
        harness.track(&mut editable);
        editable.handle_key_event(&RawKeyEvent::down(Key::ArrowRight, KeyboardModifiers::NONE));
        editable.set_selection(Some(TextSelection::collapsed(1)));
        editable.handle_key_event(&RawKeyEvent::up(Key::ArrowRight, KeyboardModifiers::NONE));
        assert!(harness.selections().is_empty());
    }

    #[test]
    fn test_arrows_move_caret() {
        let (mut editable, harness) = ready("hello", TextSelection::collapsed(2));
        press(&mut editable, &harness, Key::ArrowRight, KeyboardModifiers::NONE);
        assert_eq!(harness.last_selection(), Some(TextSelection::collapsed(3)));
        press(&mut editable, &harness, Key::ArrowLeft, KeyboardModifiers::NONE);
        press(&mut editable, &harness, Key::ArrowLeft, KeyboardModifiers::NONE);
        assert_eq!(harness.last_selection(), Some(TextSelection::collapsed(1)));
        assert!(
            harness
                .causes()
                .iter()
                .all(|c| *c == SelectionChangedCause::Keyboard)
        );
    }

    #[test]
    fn test_arrows_stop_at_text_bounds() {
        let (mut editable, harness) = ready("ab", TextSelection::collapsed(0));
        press(&mut editable, &harness, Key::ArrowLeft, KeyboardModifiers::NONE);
        assert_eq!(harness.last_selection(), Some(TextSelection::collapsed(0)));

        harness.set_value(&mut editable, "ab", TextSelection::collapsed(2));
        press(&mut editable, &harness, Key::ArrowRight, KeyboardModifiers::NONE);
        assert_eq!(harness.last_selection(), Some(TextSelection::collapsed(2)));
    }

    #[test]
    fn test_shift_extends_and_arrow_collapses_toward_motion() {
        let (mut editable, harness) = ready("hello", TextSelection::collapsed(1));
        press(&mut editable, &harness, Key::ArrowRight, KeyboardModifiers::SHIFT);
        press(&mut editable, &harness, Key::ArrowRight, KeyboardModifiers::SHIFT);
        assert_eq!(harness.last_selection(), Some(TextSelection::new(1, 3)));

        press(&mut editable, &harness, Key::ArrowLeft, KeyboardModifiers::NONE);
        assert_eq!(harness.last_selection(), Some(TextSelection::collapsed(1)));
    }

    #[test]
    fn test_shift_left_past_base_swaps_roles() {
        let (mut editable, harness) = ready("hello", TextSelection::collapsed(2));
        press(&mut editable, &harness, Key::ArrowLeft, KeyboardModifiers::SHIFT);
        assert_eq!(harness.last_selection(), Some(TextSelection::new(1, 2)));
    }

    #[test]
    fn test_word_jump() {
        let (mut editable, harness) = ready("hello brave world", TextSelection::collapsed(0));
        press(&mut editable, &harness, Key::ArrowRight, KeyboardModifiers::CTRL);
        // word(1) = "hello" ends at 5; minus one, plus the step.
        assert_eq!(harness.last_selection(), Some(TextSelection::collapsed(5)));

        harness.set_value(&mut editable, "hello brave world", TextSelection::collapsed(11));
        press(&mut editable, &harness, Key::ArrowLeft, KeyboardModifiers::CTRL);
        // word(9) = "brave" starts at 6; plus one, minus the step.
        assert_eq!(harness.last_selection(), Some(TextSelection::collapsed(6)));
    }

    #[test]
    fn test_vertical_arrows_snap_at_edges() {
        let (mut editable, harness) = ready("abc", TextSelection::collapsed(1));
        press(&mut editable, &harness, Key::ArrowDown, KeyboardModifiers::NONE);
        assert_eq!(harness.last_selection(), Some(TextSelection::collapsed(3)));
        press(&mut editable, &harness, Key::ArrowUp, KeyboardModifiers::NONE);
        assert_eq!(harness.last_selection(), Some(TextSelection::collapsed(0)));
        assert!(!editable.reset_cursor_armed());
    }

    #[test]
    fn test_shift_vertical_restores_column_after_snap() {
        let text = "abcdef\nghijkl";
        let (mut editable, harness) = ready(text, TextSelection::collapsed(3));
        editable.set_max_lines(None);
        editable.perform_layout(BoxConstraints::tight_for_width(400.0, f32::INFINITY));

        press(&mut editable, &harness, Key::ArrowDown, KeyboardModifiers::NONE);
        assert_eq!(harness.last_selection(), Some(TextSelection::collapsed(10)));
        press(&mut editable, &harness, Key::ArrowUp, KeyboardModifiers::NONE);
        assert_eq!(harness.last_selection(), Some(TextSelection::collapsed(3)));

        press(&mut editable, &harness, Key::ArrowUp, KeyboardModifiers::SHIFT);
        assert_eq!(harness.last_selection(), Some(TextSelection::new(0, 3)));
        assert!(editable.reset_cursor_armed());

        press(&mut editable, &harness, Key::ArrowDown, KeyboardModifiers::SHIFT);
        assert_eq!(harness.last_selection(), Some(TextSelection::collapsed(3)));
        assert!(!editable.reset_cursor_armed());
    }

    #[test]
    fn test_boundary_reset_stays_armed_on_single_line() {
        let (mut editable, harness) = ready("abc", TextSelection::collapsed(1));
        press(&mut editable, &harness, Key::ArrowDown, KeyboardModifiers::SHIFT);
        assert_eq!(harness.last_selection(), Some(TextSelection::new(1, 3)));
        assert!(editable.reset_cursor_armed());

        press(&mut editable, &harness, Key::ArrowUp, KeyboardModifiers::SHIFT);
        assert_eq!(harness.last_selection(), Some(TextSelection::new(0, 1)));
        assert!(editable.reset_cursor_armed());
    }

    #[test]
    fn test_working_extent_advances_without_callback() {
        let (mut editable, harness) = ready("hello", TextSelection::collapsed(1));
        editable.set_on_selection_changed(None);
        editable.handle_key_event(&RawKeyEvent::down(Key::ArrowRight, KeyboardModifiers::SHIFT));
        assert!(harness.selections().is_empty());

        // A range keeps the working offsets instead of reseeding them.
        editable.set_selection(Some(TextSelection::new(1, 2)));
        harness.track(&mut editable);
        editable.handle_key_event(&RawKeyEvent::down(Key::ArrowRight, KeyboardModifiers::SHIFT));
        assert_eq!(harness.last_selection(), Some(TextSelection::new(1, 3)));
    }

    #[test]
    fn test_select_all() {
        let (mut editable, harness) = ready("hello world", TextSelection::collapsed(4));
        press(&mut editable, &harness, Key::A, KeyboardModifiers::CTRL);
        assert_eq!(harness.last_selection(), Some(TextSelection::new(0, 11)));
    }

    #[test]
    fn test_accelerator_follows_platform() {
        let (mut editable, harness) = ready("hello", TextSelection::collapsed(0));
        press(&mut editable, &harness, Key::A, KeyboardModifiers::META);
        assert!(harness.selections().is_empty());

        editable.set_platform(crate::input::TargetPlatform::MacOs);
        press(&mut editable, &harness, Key::A, KeyboardModifiers::META);
        assert_eq!(harness.last_selection(), Some(TextSelection::new(0, 5)));
    }

    #[test]
    fn test_copy_leaves_text_alone() {
        let (mut editable, harness) = ready("hello world", TextSelection::new(0, 5));
        press(&mut editable, &harness, Key::C, KeyboardModifiers::CTRL);
        assert_eq!(harness.clipboard.text().as_deref(), Some("hello"));
        assert_eq!(harness.controller.text(), "hello world");
    }

    #[test]
    fn test_copy_of_caret_is_ignored() {
        let (mut editable, harness) = ready("hello", TextSelection::collapsed(2));
        press(&mut editable, &harness, Key::C, KeyboardModifiers::CTRL);
        assert_eq!(harness.clipboard.text(), None);
    }

    #[test]
    fn test_cut() {
        let (mut editable, harness) = ready("hello world", TextSelection::new(6, 11));
        press(&mut editable, &harness, Key::X, KeyboardModifiers::CTRL);
        assert_eq!(harness.clipboard.text().as_deref(), Some("world"));
        assert_eq!(harness.controller.text(), "hello ");
        assert_eq!(harness.controller.selection(), TextSelection::collapsed(6));
        assert_eq!(editable.text(), "hello ");
    }

    #[test]
    fn test_obscured_text_is_not_copied_or_cut() {
        let (mut editable, harness) = editable_with(
            "hunter2",
            EditableConfig::new().with_obscure_text(true),
        );
        harness.track(&mut editable);
        harness.set_value(&mut editable, "hunter2", TextSelection::new(0, 7));
        editable.perform_layout(BoxConstraints::tight_for_width(400.0, f32::INFINITY));

        press(&mut editable, &harness, Key::C, KeyboardModifiers::CTRL);
        assert_eq!(harness.clipboard.text(), None);

        press(&mut editable, &harness, Key::X, KeyboardModifiers::CTRL);
        assert_eq!(harness.clipboard.text(), None);
        assert_eq!(harness.controller.text(), "hunter2");
        assert_eq!(harness.controller.selection(), TextSelection::new(0, 7));
    }

    #[test]
    fn test_paste_replaces_selection() {
        let (mut editable, harness) = ready("hello world", TextSelection::new(6, 11));
        harness.clipboard.set_text("there").unwrap();
        press(&mut editable, &harness, Key::V, KeyboardModifiers::CTRL);
        assert!(editable.has_pending_paste());

        assert_eq!(editable.process_input(), 1);
        harness.sync(&mut editable);
        assert_eq!(harness.controller.text(), "hello there");
        assert_eq!(harness.controller.selection(), TextSelection::collapsed(11));
        assert!(!editable.has_pending_paste());
    }

    #[test]
    fn test_empty_clipboard_paste_is_noop() {
        let (mut editable, harness) = ready("abc", TextSelection::collapsed(1));
        press(&mut editable, &harness, Key::V, KeyboardModifiers::CTRL);
        editable.process_input();
        assert_eq!(harness.controller.text(), "abc");
        assert!(!editable.has_pending_paste());
    }

    #[test]
    fn test_backspace() {
        let (mut editable, harness) = ready("abc", TextSelection::collapsed(2));
        press(&mut editable, &harness, Key::Backspace, KeyboardModifiers::NONE);
        assert_eq!(harness.controller.text(), "ac");
        assert_eq!(harness.controller.selection(), TextSelection::collapsed(1));
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let (mut editable, harness) = ready("abc", TextSelection::collapsed(0));
        press(&mut editable, &harness, Key::Backspace, KeyboardModifiers::NONE);
        assert_eq!(harness.controller.text(), "abc");
        assert_eq!(harness.controller.selection(), TextSelection::collapsed(0));
    }

    #[test]
    fn test_delete_after_caret_and_at_end() {
        let (mut editable, harness) = ready("abc", TextSelection::collapsed(1));
        press(&mut editable, &harness, Key::Delete, KeyboardModifiers::NONE);
        assert_eq!(harness.controller.text(), "ac");

        harness.set_value(&mut editable, "ac", TextSelection::collapsed(2));
        press(&mut editable, &harness, Key::Delete, KeyboardModifiers::NONE);
        assert_eq!(harness.controller.text(), "ac");
        assert_eq!(harness.controller.selection(), TextSelection::collapsed(2));
    }

    #[test]
    fn test_delete_range_takes_following_char() {
        let (mut editable, harness) = ready("abcdef", TextSelection::new(1, 3));
        press(&mut editable, &harness, Key::Delete, KeyboardModifiers::NONE);
        assert_eq!(harness.controller.text(), "aef");
        assert_eq!(harness.controller.selection(), TextSelection::collapsed(1));

        harness.set_value(&mut editable, "abcdef", TextSelection::new(4, 6));
        press(&mut editable, &harness, Key::Backspace, KeyboardModifiers::NONE);
        assert_eq!(harness.controller.text(), "abcd");
    }

    #[test]
    fn test_edits_count_chars_not_bytes() {
        let (mut editable, harness) = ready("naïve", TextSelection::collapsed(3));
        press(&mut editable, &harness, Key::Backspace, KeyboardModifiers::NONE);
        assert_eq!(harness.controller.text(), "nave");
    }
}
