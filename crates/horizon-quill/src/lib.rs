//! Horizon Quill - caret, selection and scrolling for editable text.
//!
//! This is the main umbrella crate. It re-exports the core and render
//! crates and provides [`rendering::RenderEditable`], the render object that
//! lays out a single run of editable text, paints its caret and selection,
//! and turns keys and pointer gestures into selection changes.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use horizon_quill::input::RawKeyboard;
//! use horizon_quill::platform::MemoryClipboard;
//! use horizon_quill::render::text::{
//!     FixedAdvanceMetrics, FixedAdvanceTextPainter, TextPosition,
//! };
//! use horizon_quill::rendering::{
//!     BoxConstraints, EditableConfig, EditableServices, RenderEditable, ScrollPosition,
//! };
//! use horizon_quill::services::TextEditingController;
//! use horizon_quill::ValueNotifier;
//!
//! let painter = FixedAdvanceTextPainter::new(FixedAdvanceMetrics::default())?;
//! let services = EditableServices {
//!     offset: Arc::new(ScrollPosition::new(0.0)),
//!     show_cursor: Arc::new(ValueNotifier::new(false)),
//!     text_selection_delegate: Arc::new(TextEditingController::with_text("hello world")),
//!     clipboard: Arc::new(MemoryClipboard::new()),
//!     keyboard: Arc::new(RawKeyboard::new()),
//! };
//!
//! let mut editable = RenderEditable::new(
//!     "hello world",
//!     Box::new(painter),
//!     services,
//!     EditableConfig::new(),
//! );
//! editable.perform_layout(BoxConstraints::tight_for_width(200.0, f32::INFINITY));
//! assert_eq!(editable.get_word_right(TextPosition::new(0)).offset, 5);
//! # Ok::<(), horizon_quill::render::RenderError>(())
//! ```

pub use horizon_quill_core::*;

/// Geometry, drawing and text layout.
pub mod render {
    pub use horizon_quill_render::*;
}

pub mod gesture;
pub mod input;
pub mod platform;
pub mod prelude;
pub mod rendering;
pub mod services;
pub mod widget;
