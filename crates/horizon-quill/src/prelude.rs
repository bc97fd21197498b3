//! Prelude module for Horizon Quill.
//!
//! ```ignore
//! use horizon_quill::prelude::*;
//! ```
//!
//! This provides access to:
//! - Notification primitives (`Signal`, `ValueNotifier`, `EventQueue`)
//! - The editable render object and its collaborators
//! - Text positions and selections
//! - Geometry and drawing types (`Point`, `Rect`, `Color`, `Renderer`)

// ============================================================================
// Signal/Slot and Property System
// ============================================================================

pub use crate::property::{Property, ValueNotifier};
pub use crate::signal::{ConnectionId, Signal};
pub use crate::{EventQueue, EventSender};

// ============================================================================
// Editable Text
// ============================================================================

pub use crate::rendering::{
    BoxConstraints, EditableConfig, EditableId, EditableInput, EditableServices, RenderEditable,
    SelectionChangedCause,
};
pub use crate::rendering::{ScrollPosition, ViewportOffset};
pub use crate::services::{TextEditingController, TextEditingValue, TextSelectionDelegate};

// ============================================================================
// Input and Platform
// ============================================================================

pub use crate::input::{Key, KeyboardModifiers, PointerEvent, RawKeyEvent, RawKeyboard};
pub use crate::platform::{ClipboardService, MemoryClipboard, SystemClipboard};

// ============================================================================
// Widgets
// ============================================================================

pub use crate::widget::{ButtonTheme, RaisedButton, ScrollNotification};

// ============================================================================
// Text and Geometry
// ============================================================================

pub use crate::render::text::{
    FixedAdvanceTextPainter, TextAffinity, TextPainter, TextPosition, TextRange, TextSelection,
};
pub use crate::render::{Color, Point, Rect, Renderer, Size};
