//! Construction-time configuration for [`RenderEditable`](super::RenderEditable).

use horizon_quill_render::Color;
use horizon_quill_render::text::{TextAlign, TextDirection};

use crate::gesture::GestureConfig;
use crate::input::TargetPlatform;

/// Appearance and behavior of an editable.
///
/// Every field can be changed later through the matching setter on the
/// editable.
#[derive(Debug, Clone, PartialEq)]
pub struct EditableConfig {
    /// `Some(1)` for a single scrolling line, `None` for unbounded lines.
    pub max_lines: Option<usize>,
    pub text_align: TextAlign,
    pub text_direction: TextDirection,
    pub text_scale_factor: f32,
    pub cursor_color: Option<Color>,
    pub cursor_width: f32,
    /// Corner radius of the caret; square when `None`.
    pub cursor_radius: Option<f32>,
    pub selection_color: Option<Color>,
    /// Display every character as `•`.
    pub obscure_text: bool,
    pub ignore_pointer: bool,
    pub enable_interactive_selection: bool,
    pub platform: TargetPlatform,
    pub gestures: GestureConfig,
}

impl Default for EditableConfig {
    fn default() -> Self {
        Self {
            max_lines: Some(1),
            text_align: TextAlign::Left,
            text_direction: TextDirection::Ltr,
            text_scale_factor: 1.0,
            cursor_color: None,
            cursor_width: 1.0,
            cursor_radius: None,
            selection_color: None,
            obscure_text: false,
            ignore_pointer: false,
            enable_interactive_selection: true,
            platform: TargetPlatform::current(),
            gestures: GestureConfig::default(),
        }
    }
}

impl EditableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_lines(mut self, max_lines: Option<usize>) -> Self {
        debug_assert!(max_lines != Some(0), "max_lines must be None or positive");
        self.max_lines = max_lines;
        self
    }

    /// Unbounded lines, scrolling vertically.
    pub fn multiline(self) -> Self {
        self.with_max_lines(None)
    }

    pub fn with_text_align(mut self, align: TextAlign) -> Self {
        self.text_align = align;
        self
    }

    pub fn with_text_direction(mut self, direction: TextDirection) -> Self {
        self.text_direction = direction;
        self
    }

    pub fn with_text_scale_factor(mut self, factor: f32) -> Self {
        self.text_scale_factor = factor;
        self
    }

    pub fn with_cursor_color(mut self, color: Color) -> Self {
        self.cursor_color = Some(color);
        self
    }

    pub fn with_cursor_width(mut self, width: f32) -> Self {
        self.cursor_width = width;
        self
    }

    pub fn with_cursor_radius(mut self, radius: f32) -> Self {
        self.cursor_radius = Some(radius);
        self
    }

    pub fn with_selection_color(mut self, color: Color) -> Self {
        self.selection_color = Some(color);
        self
    }

    pub fn with_obscure_text(mut self, obscure: bool) -> Self {
        self.obscure_text = obscure;
        self
    }

    pub fn with_ignore_pointer(mut self, ignore: bool) -> Self {
        self.ignore_pointer = ignore;
        self
    }

    pub fn with_interactive_selection(mut self, enabled: bool) -> Self {
        self.enable_interactive_selection = enabled;
        self
    }

    pub fn with_platform(mut self, platform: TargetPlatform) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_gestures(mut self, gestures: GestureConfig) -> Self {
        self.gestures = gestures;
        self
    }

    pub fn is_multiline(&self) -> bool {
        self.max_lines != Some(1)
    }
}
