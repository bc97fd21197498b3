//! Raised button configuration.
//!
//! [`RaisedButton`] describes a filled, elevated button: its callbacks,
//! colors, elevations and child. Anything left unset falls back to a
//! [`ButtonTheme`] when the button is resolved for a given
//! [`ButtonState`].
//!
//! # Example
//!
//! ```ignore
//! use horizon_quill::widget::{ButtonState, ButtonTheme, RaisedButton};
//!
//! let button = RaisedButton::icon("save", "Save")
//!     .with_on_pressed(|| println!("saved"));
//!
//! let resolved = button.resolve(&ButtonTheme::default(), ButtonState::Normal);
//! assert_eq!(resolved.elevation, 2.0);
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use horizon_quill_render::Color;

/// Space between the icon and label of [`RaisedButton::icon`].
pub const ICON_LABEL_GAP: f32 = 8.0;

/// Whether a color reads as light or dark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Brightness {
    Light,
    Dark,
}

impl Brightness {
    /// Estimate the brightness of an opaque color from its luminance.
    pub fn estimate(color: Color) -> Self {
        let luminance = 0.2126 * color.r + 0.7152 * color.g + 0.0722 * color.b;
        if luminance > 0.5 {
            Brightness::Light
        } else {
            Brightness::Dark
        }
    }
}

/// Which theme color a button's label takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonTextTheme {
    /// Black or white, whichever contrasts with the fill.
    #[default]
    Normal,
    /// The theme's accent color.
    Accent,
    /// The theme's primary color.
    Primary,
}

/// How a button clips its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClipBehavior {
    #[default]
    None,
    HardEdge,
    AntiAlias,
}

/// Minimum size of a button's tap target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TapTargetSize {
    /// At least 48x48 logical pixels.
    #[default]
    Padded,
    /// Only as large as the button itself.
    ShrinkWrap,
}

impl TapTargetSize {
    pub fn min_extent(self) -> f32 {
        match self {
            TapTargetSize::Padded => 48.0,
            TapTargetSize::ShrinkWrap => 0.0,
        }
    }
}

/// Padding on each side of a box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeInsets {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl EdgeInsets {
    pub const fn all(value: f32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }

    pub const fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self {
            left: horizontal,
            top: vertical,
            right: horizontal,
            bottom: vertical,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// The interaction state a button is resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonState {
    #[default]
    Normal,
    /// Pressed and held.
    Highlighted,
}

/// Button defaults shared by every button in a subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonTheme {
    pub text_theme: ButtonTextTheme,
    pub min_width: f32,
    pub height: f32,
    pub padding: EdgeInsets,
    pub shape_radius: f32,
    pub button_color: Color,
    pub disabled_color: Color,
    pub highlight_color: Color,
    pub splash_color: Color,
    pub primary_color: Color,
    pub accent_color: Color,
    pub elevation: f32,
    pub highlight_elevation: f32,
    pub disabled_elevation: f32,
    pub tap_target_size: TapTargetSize,
    pub animation_duration: Duration,
}

impl Default for ButtonTheme {
    fn default() -> Self {
        Self {
            text_theme: ButtonTextTheme::Normal,
            min_width: 88.0,
            height: 36.0,
            padding: EdgeInsets::symmetric(16.0, 0.0),
            shape_radius: 2.0,
            button_color: Color::from_rgb8(0xE0, 0xE0, 0xE0),
            disabled_color: Color::from_rgba8(0, 0, 0, 0x1F),
            highlight_color: Color::from_rgba8(0, 0, 0, 0x29),
            splash_color: Color::from_rgba8(0, 0, 0, 0x29),
            primary_color: Color::from_rgb8(0x21, 0x96, 0xF3),
            accent_color: Color::from_rgb8(0x21, 0x96, 0xF3),
            elevation: 2.0,
            highlight_elevation: 8.0,
            disabled_elevation: 0.0,
            tap_target_size: TapTargetSize::Padded,
            animation_duration: Duration::from_millis(200),
        }
    }
}

/// What a button shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ButtonChild {
    Label(String),
    /// An icon, a gap, then a label, in a row.
    IconLabel {
        icon: String,
        label: String,
        gap: f32,
    },
}

impl ButtonChild {
    pub fn label(&self) -> &str {
        match self {
            ButtonChild::Label(label) | ButtonChild::IconLabel { label, .. } => label,
        }
    }

    pub fn icon(&self) -> Option<&str> {
        match self {
            ButtonChild::Label(_) => None,
            ButtonChild::IconLabel { icon, .. } => Some(icon),
        }
    }
}

impl From<&str> for ButtonChild {
    fn from(label: &str) -> Self {
        ButtonChild::Label(label.to_owned())
    }
}

impl From<String> for ButtonChild {
    fn from(label: String) -> Self {
        ButtonChild::Label(label)
    }
}

/// Invoked when a button is pressed.
pub type PressedHandler = Arc<dyn Fn() + Send + Sync>;

/// Invoked when a button enters or leaves the highlighted state.
pub type HighlightChangedHandler = Arc<dyn Fn(bool) + Send + Sync>;

/// A filled button that lifts when pressed.
///
/// A button without an `on_pressed` handler is disabled.
#[derive(Clone)]
pub struct RaisedButton {
    on_pressed: Option<PressedHandler>,
    on_highlight_changed: Option<HighlightChangedHandler>,
    pub text_theme: Option<ButtonTextTheme>,
    pub text_color: Option<Color>,
    pub disabled_text_color: Option<Color>,
    pub color: Option<Color>,
    pub disabled_color: Option<Color>,
    pub highlight_color: Option<Color>,
    pub splash_color: Option<Color>,
    pub color_brightness: Option<Brightness>,
    elevation: Option<f32>,
    highlight_elevation: Option<f32>,
    disabled_elevation: Option<f32>,
    pub padding: Option<EdgeInsets>,
    pub shape_radius: Option<f32>,
    pub clip_behavior: ClipBehavior,
    pub tap_target_size: Option<TapTargetSize>,
    pub animation_duration: Option<Duration>,
    child: ButtonChild,
}

impl RaisedButton {
    pub fn new(child: impl Into<ButtonChild>) -> Self {
        Self {
            on_pressed: None,
            on_highlight_changed: None,
            text_theme: None,
            text_color: None,
            disabled_text_color: None,
            color: None,
            disabled_color: None,
            highlight_color: None,
            splash_color: None,
            color_brightness: None,
            elevation: None,
            highlight_elevation: None,
            disabled_elevation: None,
            padding: None,
            shape_radius: None,
            clip_behavior: ClipBehavior::None,
            tap_target_size: None,
            animation_duration: None,
            child: child.into(),
        }
    }

    /// A button showing `icon` then `label`, on a dark fill with a padded
    /// tap target.
    pub fn icon(icon: impl Into<String>, label: impl Into<String>) -> Self {
        let mut button = Self::new(ButtonChild::IconLabel {
            icon: icon.into(),
            label: label.into(),
            gap: ICON_LABEL_GAP,
        });
        button.color_brightness = Some(Brightness::Dark);
        button.tap_target_size = Some(TapTargetSize::Padded);
        button
    }

    pub fn child(&self) -> &ButtonChild {
        &self.child
    }

    pub fn with_on_pressed<F>(mut self, handler: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_pressed = Some(Arc::new(handler));
        self
    }

    pub fn with_on_highlight_changed<F>(mut self, handler: F) -> Self
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.on_highlight_changed = Some(Arc::new(handler));
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = Some(color);
        self
    }

    pub fn with_text_theme(mut self, text_theme: ButtonTextTheme) -> Self {
        self.text_theme = Some(text_theme);
        self
    }

    pub fn with_color_brightness(mut self, brightness: Brightness) -> Self {
        self.color_brightness = Some(brightness);
        self
    }

    pub fn with_elevation(mut self, elevation: f32) -> Self {
        debug_assert!(elevation >= 0.0, "elevation must be non-negative");
        self.elevation = Some(elevation);
        self
    }

    pub fn with_highlight_elevation(mut self, elevation: f32) -> Self {
        debug_assert!(elevation >= 0.0, "highlight elevation must be non-negative");
        self.highlight_elevation = Some(elevation);
        self
    }

    pub fn with_disabled_elevation(mut self, elevation: f32) -> Self {
        debug_assert!(elevation >= 0.0, "disabled elevation must be non-negative");
        self.disabled_elevation = Some(elevation);
        self
    }

    pub fn with_padding(mut self, padding: EdgeInsets) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn with_clip_behavior(mut self, clip: ClipBehavior) -> Self {
        self.clip_behavior = clip;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.on_pressed.is_some()
    }

    /// Run the pressed handler. Returns false for a disabled button.
    pub fn press(&self) -> bool {
        match &self.on_pressed {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }

    /// Report a highlight change to the registered handler.
    pub fn set_highlighted(&self, highlighted: bool) {
        if let Some(handler) = &self.on_highlight_changed {
            handler(highlighted);
        }
    }

    fn fill_color(&self, theme: &ButtonTheme) -> Color {
        if !self.is_enabled() {
            return self.disabled_color.unwrap_or(theme.disabled_color);
        }
        self.color.unwrap_or(match self.text_theme.unwrap_or(theme.text_theme) {
            ButtonTextTheme::Normal | ButtonTextTheme::Accent => theme.button_color,
            ButtonTextTheme::Primary => theme.primary_color,
        })
    }

    fn text_color_for(&self, theme: &ButtonTheme, fill: Color) -> Color {
        let brightness = self
            .color_brightness
            .unwrap_or_else(|| Brightness::estimate(fill));
        if !self.is_enabled() {
            return self.disabled_text_color.unwrap_or(match brightness {
                Brightness::Dark => Color::WHITE.with_alpha(0.38),
                Brightness::Light => Color::BLACK.with_alpha(0.38),
            });
        }
        if let Some(color) = self.text_color {
            return color;
        }
        match self.text_theme.unwrap_or(theme.text_theme) {
            ButtonTextTheme::Accent => theme.accent_color,
            ButtonTextTheme::Normal | ButtonTextTheme::Primary => match brightness {
                Brightness::Dark => Color::WHITE,
                Brightness::Light => Color::BLACK.with_alpha(0.87),
            },
        }
    }

    fn elevation_for(&self, theme: &ButtonTheme, state: ButtonState) -> f32 {
        if !self.is_enabled() {
            return self.disabled_elevation.unwrap_or(theme.disabled_elevation);
        }
        match state {
            ButtonState::Normal => self.elevation.unwrap_or(theme.elevation),
            ButtonState::Highlighted => self
                .highlight_elevation
                .unwrap_or(theme.highlight_elevation),
        }
    }

    /// Fill in every unset property from `theme`.
    pub fn resolve(&self, theme: &ButtonTheme, state: ButtonState) -> ResolvedButton {
        let fill_color = self.fill_color(theme);
        ResolvedButton {
            enabled: self.is_enabled(),
            fill_color,
            text_color: self.text_color_for(theme, fill_color),
            highlight_color: self.highlight_color.unwrap_or(theme.highlight_color),
            splash_color: self.splash_color.unwrap_or(theme.splash_color),
            elevation: self.elevation_for(theme, state),
            padding: self.padding.unwrap_or(theme.padding),
            min_width: theme.min_width,
            height: theme.height,
            shape_radius: self.shape_radius.unwrap_or(theme.shape_radius),
            clip_behavior: self.clip_behavior,
            tap_target_size: self.tap_target_size.unwrap_or(theme.tap_target_size),
            animation_duration: self.animation_duration.unwrap_or(theme.animation_duration),
        }
    }
}

impl fmt::Debug for RaisedButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RaisedButton")
            .field(
                "on_pressed",
                &if self.is_enabled() { "set" } else { "disabled" },
            )
            .field("text_theme", &self.text_theme)
            .field("text_color", &self.text_color)
            .field("color", &self.color)
            .field("color_brightness", &self.color_brightness)
            .field("elevation", &self.elevation)
            .field("highlight_elevation", &self.highlight_elevation)
            .field("disabled_elevation", &self.disabled_elevation)
            .field("padding", &self.padding)
            .field("tap_target_size", &self.tap_target_size)
            .field("child", &self.child)
            .finish_non_exhaustive()
    }
}

/// A [`RaisedButton`] with every property decided.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedButton {
    pub enabled: bool,
    pub fill_color: Color,
    pub text_color: Color,
    pub highlight_color: Color,
    pub splash_color: Color,
    pub elevation: f32,
    pub padding: EdgeInsets,
    pub min_width: f32,
    pub height: f32,
    pub shape_radius: f32,
    pub clip_behavior: ClipBehavior,
    pub tap_target_size: TapTargetSize,
    pub animation_duration: Duration,
}

static_assertions::assert_impl_all!(RaisedButton: Send, Sync);
