//! Text model and paragraph layout for Horizon Quill.
//!
//! - [`types`]: positions, ranges, selections and per-line metrics, all in
//!   `char` offsets
//! - [`TextPainter`]: the paragraph layout service render objects query
//! - [`FixedAdvanceTextPainter`]: a deterministic painter for headless use
//!
//! ```
//! use horizon_quill_render::text::{
//!     FixedAdvanceMetrics, FixedAdvanceTextPainter, TextPainter, TextPosition,
//! };
//!
//! let mut painter = FixedAdvanceTextPainter::new(FixedAdvanceMetrics::default())
//!     .unwrap()
//!     .with_text("hello world");
//! painter.layout(0.0, f32::INFINITY);
//!
//! let word = painter.word_boundary(TextPosition::new(7));
//! assert_eq!((word.start, word.end), (6, 11));
//! ```

mod fixed;
mod painter;
pub mod types;

pub use fixed::{FixedAdvanceMetrics, FixedAdvanceTextPainter};
pub use painter::TextPainter;
pub use types::{
    LineRange, TextAffinity, TextAlign, TextBaseline, TextBox, TextDirection, TextPosition,
    TextRange, TextSelection, TextSelectionPoint, byte_offset, char_len,
};
