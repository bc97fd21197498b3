//! Scroll offsets for viewports.
//!
//! A [`ViewportOffset`] is shared between a render object that lays out
//! content larger than its box and whoever drives the scroll position. The
//! render object reports its viewport and content extents on every layout
//! pass; the offset clamps its position and notifies listeners.

use std::fmt;

use horizon_quill_core::logging::targets;
use horizon_quill_core::{ConnectionId, Property, Signal};

use crate::widget::{ScrollMetrics, ScrollNotification};

/// A layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// The direction in which content offsets increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AxisDirection {
    Up,
    #[default]
    Right,
    Down,
    Left,
}

impl AxisDirection {
    pub fn axis(self) -> Axis {
        match self {
            AxisDirection::Up | AxisDirection::Down => Axis::Vertical,
            AxisDirection::Left | AxisDirection::Right => Axis::Horizontal,
        }
    }
}

/// A listener on a viewport offset.
pub type OffsetListener = Box<dyn Fn(&()) + Send + Sync>;

/// A scroll position consumed by a viewport.
pub trait ViewportOffset: Send + Sync + fmt::Debug {
    /// The current scroll position.
    fn pixels(&self) -> f32;

    /// Report the size of the visible region along the scroll axis.
    ///
    /// Returns whether the offset accepted the dimension as final.
    fn apply_viewport_dimension(&self, viewport_dimension: f32) -> bool;

    /// Report the scrollable range. The offset clamps its position into it.
    fn apply_content_dimensions(&self, min_scroll_extent: f32, max_scroll_extent: f32) -> bool;

    /// Register a listener fired whenever the position changes.
    fn add_listener(&self, listener: OffsetListener) -> ConnectionId;

    fn remove_listener(&self, id: ConnectionId) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Extents {
    min: Option<f32>,
    max: Option<f32>,
    viewport: Option<f32>,
}

/// The default [`ViewportOffset`]: a plain position with listeners and
/// scroll notifications.
pub struct ScrollPosition {
    pixels: Property<f32>,
    extents: Property<Extents>,
    axis_direction: AxisDirection,
    listeners: Signal<()>,
    notifications: Signal<ScrollNotification>,
}

impl ScrollPosition {
    pub fn new(initial_pixels: f32) -> Self {
        Self {
            pixels: Property::new(initial_pixels),
            extents: Property::new(Extents::default()),
            axis_direction: AxisDirection::default(),
            listeners: Signal::new(),
            notifications: Signal::new(),
        }
    }

    /// Set the direction reported in [`ScrollMetrics`].
    pub fn with_axis_direction(mut self, axis_direction: AxisDirection) -> Self {
        self.axis_direction = axis_direction;
        self
    }

    pub fn axis_direction(&self) -> AxisDirection {
        self.axis_direction
    }

    pub fn min_scroll_extent(&self) -> Option<f32> {
        self.extents.get().min
    }

    pub fn max_scroll_extent(&self) -> Option<f32> {
        self.extents.get().max
    }

    pub fn viewport_dimension(&self) -> Option<f32> {
        self.extents.get().viewport
    }

    /// Whether both content dimensions and the viewport have been reported.
    pub fn has_dimensions(&self) -> bool {
        let extents = self.extents.get();
        extents.min.is_some() && extents.max.is_some() && extents.viewport.is_some()
    }

    /// The current metrics, with unknown extents reported as zero.
    pub fn metrics(&self) -> ScrollMetrics {
        let extents = self.extents.get();
        ScrollMetrics {
            min_scroll_extent: extents.min.unwrap_or(0.0),
            max_scroll_extent: extents.max.unwrap_or(0.0),
            pixels: self.pixels.get(),
            viewport_dimension: extents.viewport.unwrap_or(0.0),
            axis_direction: self.axis_direction,
        }
    }

    /// Scroll notifications emitted by [`jump_to`](Self::jump_to).
    pub fn notifications(&self) -> &Signal<ScrollNotification> {
        &self.notifications
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.connection_count()
    }

    /// Move to `pixels`, clamped into the known scroll range.
    ///
    /// Emits start, update, overscroll (for any clamped remainder) and end
    /// notifications as applicable.
    pub fn jump_to(&self, pixels: f32) {
        let extents = self.extents.get();
        let min = extents.min.unwrap_or(f32::NEG_INFINITY);
        let max = extents.max.unwrap_or(f32::INFINITY).max(min);
        let target = pixels.clamp(min, max);
        let overscroll = pixels - target;
        let old = self.pixels.get();
        let moved = self.pixels.set(target);

        if !moved && overscroll == 0.0 {
            return;
        }

        tracing::debug!(
            target: targets::SCROLL,
            from = old,
            to = target,
            overscroll,
            "scroll position jump"
        );

        // Start is reported against the position before the move.
        let mut before = self.metrics();
        before.pixels = old;
        self.notifications.emit(ScrollNotification::start(before));
        if moved {
            self.notifications
                .emit(ScrollNotification::update(self.metrics(), target - old));
        }
        if overscroll != 0.0 {
            self.notifications
                .emit(ScrollNotification::overscroll(self.metrics(), overscroll));
        }
        self.notifications.emit(ScrollNotification::end(self.metrics()));

        if moved {
            self.listeners.emit(());
        }
    }
}

impl Default for ScrollPosition {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl ViewportOffset for ScrollPosition {
    fn pixels(&self) -> f32 {
        self.pixels.get()
    }

    fn apply_viewport_dimension(&self, viewport_dimension: f32) -> bool {
        let mut extents = self.extents.get();
        extents.viewport = Some(viewport_dimension);
        self.extents.set(extents);
        true
    }

    fn apply_content_dimensions(&self, min_scroll_extent: f32, max_scroll_extent: f32) -> bool {
        let mut extents = self.extents.get();
        extents.min = Some(min_scroll_extent);
        extents.max = Some(max_scroll_extent);
        self.extents.set(extents);

        let pixels = self.pixels.get();
        let clamped = pixels.clamp(min_scroll_extent, max_scroll_extent.max(min_scroll_extent));
        if self.pixels.set(clamped) {
            tracing::trace!(
                target: targets::SCROLL,
                from = pixels,
                to = clamped,
                "scroll position clamped to content"
            );
            self.listeners.emit(());
        }
        true
    }

    fn add_listener(&self, listener: OffsetListener) -> ConnectionId {
        self.listeners.connect_boxed(listener)
    }

    fn remove_listener(&self, id: ConnectionId) -> bool {
        self.listeners.disconnect(id)
    }
}

impl fmt::Debug for ScrollPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let extents = self.extents.get();
        f.debug_struct("ScrollPosition")
            .field("pixels", &self.pixels.get())
            .field("min_scroll_extent", &extents.min)
            .field("max_scroll_extent", &extents.max)
            .field("viewport_dimension", &extents.viewport)
            .field("listeners", &self.listeners.connection_count())
            .finish()
    }
}

static_assertions::assert_impl_all!(ScrollPosition: Send, Sync);
