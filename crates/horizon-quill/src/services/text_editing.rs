//! The text-editing value and the delegate that owns it.
//!
//! An editable never owns its text buffer. It reads the current
//! [`TextEditingValue`] from a [`TextSelectionDelegate`] and replaces it
//! wholesale when an edit (cut, paste, delete) happens. The owner then pushes
//! the new text and selection back into the editable.

use std::fmt;

use horizon_quill_core::Signal;
use horizon_quill_render::text::{TextSelection, char_len};
use parking_lot::RwLock;

/// A text buffer and its selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextEditingValue {
    pub text: String,
    pub selection: TextSelection,
}

impl TextEditingValue {
    pub fn new(text: impl Into<String>, selection: TextSelection) -> Self {
        Self {
            text: text.into(),
            selection,
        }
    }

    /// `text` with a caret after its last character.
    pub fn with_caret_at_end(text: impl Into<String>) -> Self {
        let text = text.into();
        let end = char_len(&text);
        Self {
            text,
            selection: TextSelection::collapsed(end),
        }
    }

    /// Length of the text in chars.
    pub fn len(&self) -> usize {
        char_len(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Owner of the text an editable displays.
///
/// Reads and replacements are atomic; implementations use interior
/// mutability.
pub trait TextSelectionDelegate: Send + Sync {
    fn text_editing_value(&self) -> TextEditingValue;

    fn set_text_editing_value(&self, value: TextEditingValue);
}

/// A [`TextSelectionDelegate`] holding its value behind a lock and
/// announcing every change.
pub struct TextEditingController {
    value: RwLock<TextEditingValue>,
    value_changed: Signal<TextEditingValue>,
}

impl TextEditingController {
    pub fn new(value: TextEditingValue) -> Self {
        Self {
            value: RwLock::new(value),
            value_changed: Signal::new(),
        }
    }

    /// A controller holding `text` with the caret at its end.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new(TextEditingValue::with_caret_at_end(text))
    }

    pub fn text(&self) -> String {
        self.value.read().text.clone()
    }

    pub fn selection(&self) -> TextSelection {
        self.value.read().selection
    }

    /// Replace the selection, keeping the text.
    pub fn set_selection(&self, selection: TextSelection) {
        let text = self.value.read().text.clone();
        self.set_text_editing_value(TextEditingValue::new(text, selection));
    }

    /// Emitted after every change with the new value.
    pub fn value_changed(&self) -> &Signal<TextEditingValue> {
        &self.value_changed
    }

    /// Empty the text and reset the caret.
    pub fn clear(&self) {
        self.set_text_editing_value(TextEditingValue::default());
    }
}

impl Default for TextEditingController {
    fn default() -> Self {
        Self::new(TextEditingValue::default())
    }
}

impl TextSelectionDelegate for TextEditingController {
    fn text_editing_value(&self) -> TextEditingValue {
        self.value.read().clone()
    }

    fn set_text_editing_value(&self, value: TextEditingValue) {
        {
            let mut current = self.value.write();
            if *current == value {
                return;
            }
            *current = value.clone();
        }
        self.value_changed.emit(value);
    }
}

impl fmt::Debug for TextEditingController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextEditingController")
            .field("value", &*self.value.read())
            .field("listeners", &self.value_changed.connection_count())
            .finish()
    }
}

static_assertions::assert_impl_all!(TextEditingController: Send, Sync);
