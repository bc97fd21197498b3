//! Geometry, drawing and text layout for Horizon Quill.
//!
//! This crate holds everything a render object needs below the input layer:
//!
//! - Geometry and color: [`Point`], [`Size`], [`Rect`], [`RoundedRect`], [`Color`]
//! - Drawing: the object-safe [`Renderer`] trait and a headless
//!   [`RecordingRenderer`]
//! - Text: selection/position model and the [`text::TextPainter`] layout service
//!
//! # Using the Renderer
//!
//! ```
//! use horizon_quill_render::{Color, DrawCommand, RecordingRenderer, Rect, Renderer};
//!
//! let mut renderer = RecordingRenderer::new();
//! renderer.save();
//! renderer.translate(200.0, 100.0);
//! renderer.fill_rect(Rect::new(0.0, 0.0, 80.0, 80.0), Color::BLUE);
//! renderer.restore();
//!
//! assert!(matches!(
//!     renderer.commands()[0],
//!     DrawCommand::FillRect { rect, .. } if rect == Rect::new(200.0, 100.0, 80.0, 80.0)
//! ));
//! ```

mod error;
mod renderer;
pub mod text;
mod types;

pub use error::{RenderError, RenderResult};
pub use renderer::{DrawCommand, RecordingRenderer, Renderer};
pub use types::{Color, Point, Rect, RoundedRect, Size};
