//! Logging and tracing facilities for Horizon Quill.
//!
//! Horizon Quill uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!     // ...
//! }
//! ```
//!
//! Filter by the constants in [`targets`], e.g.
//! `RUST_LOG=horizon_quill::editable=trace`.

/// Span names used throughout Horizon Quill for tracing.
pub mod span_names {
    /// Text layout pass.
    pub const TEXT_LAYOUT: &str = "horizon_quill::text_layout";
    /// Paint pass.
    pub const PAINT: &str = "horizon_quill::paint";
    /// Input queue drain.
    pub const INPUT: &str = "horizon_quill::input";
}

/// Target names for log filtering.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "horizon_quill_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_quill_core::signal";
    /// Property system target.
    pub const PROPERTY: &str = "horizon_quill_core::property";
    /// Event queue target.
    pub const QUEUE: &str = "horizon_quill_core::event_queue";
    /// Editable text render object target.
    pub const EDITABLE: &str = "horizon_quill::editable";
    /// Gesture recognition target.
    pub const GESTURE: &str = "horizon_quill::gesture";
    /// Clipboard service target.
    pub const CLIPBOARD: &str = "horizon_quill::clipboard";
    /// Scrolling target.
    pub const SCROLL: &str = "horizon_quill::scroll";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Used to time layout and paint passes.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "horizon_quill::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
