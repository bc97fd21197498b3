//! Scroll notification records.
//!
//! A scrollable emits one [`ScrollNotification`] per phase of a scroll:
//! start, one or more updates (or overscrolls), and end. Notifications are
//! immutable snapshots; listeners further up the tree see them with a
//! larger [`depth`](ScrollNotification::depth).

use std::fmt;

use horizon_quill_render::Point;

use crate::rendering::{Axis, AxisDirection};

/// Which way the user is scrolling relative to the axis direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollDirection {
    #[default]
    Idle,
    Forward,
    Reverse,
}

impl fmt::Display for ScrollDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScrollDirection::Idle => "idle",
            ScrollDirection::Forward => "forward",
            ScrollDirection::Reverse => "reverse",
        };
        f.write_str(name)
    }
}

/// A snapshot of a scroll position's extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub min_scroll_extent: f32,
    pub max_scroll_extent: f32,
    pub pixels: f32,
    pub viewport_dimension: f32,
    pub axis_direction: AxisDirection,
}

impl ScrollMetrics {
    pub fn axis(&self) -> Axis {
        self.axis_direction.axis()
    }

    pub fn out_of_range(&self) -> bool {
        self.pixels < self.min_scroll_extent || self.pixels > self.max_scroll_extent
    }

    pub fn at_edge(&self) -> bool {
        self.pixels == self.min_scroll_extent || self.pixels == self.max_scroll_extent
    }

    /// Content scrolled off before the viewport.
    pub fn extent_before(&self) -> f32 {
        (self.pixels - self.min_scroll_extent).max(0.0)
    }

    /// Content visible inside the viewport.
    pub fn extent_inside(&self) -> f32 {
        let viewport = self.viewport_dimension;
        let underscroll = (self.min_scroll_extent - self.pixels).clamp(0.0, viewport);
        let overscroll = (self.pixels - self.max_scroll_extent).clamp(0.0, viewport);
        viewport - underscroll - overscroll
    }

    /// Content remaining after the viewport.
    pub fn extent_after(&self) -> f32 {
        (self.max_scroll_extent - self.pixels).max(0.0)
    }
}

impl fmt::Display for ScrollMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ScrollMetrics({:.1}..[{:.1}]..{:.1})",
            self.extent_before(),
            self.extent_inside(),
            self.extent_after()
        )
    }
}

/// Drag that started a scroll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragStartDetails {
    pub global_position: Point,
}

/// Drag movement behind a scroll update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragUpdateDetails {
    pub global_position: Point,
    pub primary_delta: f32,
}

/// Drag release that ended a scroll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragEndDetails {
    pub primary_velocity: f32,
}

/// The phase-specific payload of a [`ScrollNotification`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollNotificationKind {
    Start {
        drag_details: Option<DragStartDetails>,
    },
    Update {
        scroll_delta: f32,
        drag_details: Option<DragUpdateDetails>,
    },
    /// The position could not move by the requested amount.
    Overscroll {
        overscroll: f32,
        velocity: f32,
        drag_details: Option<DragUpdateDetails>,
    },
    End {
        drag_details: Option<DragEndDetails>,
    },
    UserScroll {
        direction: ScrollDirection,
    },
}

/// An immutable scroll event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollNotification {
    pub metrics: ScrollMetrics,
    /// Number of scrollables between the emitter and the listener.
    pub depth: usize,
    pub kind: ScrollNotificationKind,
}

impl ScrollNotification {
    pub fn new(metrics: ScrollMetrics, kind: ScrollNotificationKind) -> Self {
        Self {
            metrics,
            depth: 0,
            kind,
        }
    }

    pub fn start(metrics: ScrollMetrics) -> Self {
        Self::new(metrics, ScrollNotificationKind::Start { drag_details: None })
    }

    pub fn update(metrics: ScrollMetrics, scroll_delta: f32) -> Self {
        Self::new(
            metrics,
            ScrollNotificationKind::Update {
                scroll_delta,
                drag_details: None,
            },
        )
    }

    pub fn overscroll(metrics: ScrollMetrics, overscroll: f32) -> Self {
        Self::new(
            metrics,
            ScrollNotificationKind::Overscroll {
                overscroll,
                velocity: 0.0,
                drag_details: None,
            },
        )
    }

    pub fn end(metrics: ScrollMetrics) -> Self {
        Self::new(metrics, ScrollNotificationKind::End { drag_details: None })
    }

    pub fn user_scroll(metrics: ScrollMetrics, direction: ScrollDirection) -> Self {
        Self::new(metrics, ScrollNotificationKind::UserScroll { direction })
    }

    /// The same notification as seen one scrollable further out.
    pub fn bubbled(&self) -> Self {
        Self {
            depth: self.depth + 1,
            ..*self
        }
    }

    fn type_name(&self) -> &'static str {
        match self.kind {
            ScrollNotificationKind::Start { .. } => "ScrollStartNotification",
            ScrollNotificationKind::Update { .. } => "ScrollUpdateNotification",
            ScrollNotificationKind::Overscroll { .. } => "OverscrollNotification",
            ScrollNotificationKind::End { .. } => "ScrollEndNotification",
            ScrollNotificationKind::UserScroll { .. } => "UserScrollNotification",
        }
    }
}

/// Accepts only notifications from the nearest scrollable.
pub fn default_scroll_notification_predicate(notification: &ScrollNotification) -> bool {
    notification.depth == 0
}

impl fmt::Display for ScrollNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(depth: {}", self.type_name(), self.depth)?;
        if self.depth == 0 {
            f.write_str(" (local)")?;
        }
        write!(f, ", {}", self.metrics)?;
        match self.kind {
            ScrollNotificationKind::Start { drag_details } => {
                if let Some(details) = drag_details {
                    write!(f, ", {details:?}")?;
                }
            }
            ScrollNotificationKind::Update {
                scroll_delta,
                drag_details,
            } => {
                write!(f, ", scrollDelta: {scroll_delta}")?;
                if let Some(details) = drag_details {
                    write!(f, ", {details:?}")?;
                }
            }
            ScrollNotificationKind::Overscroll {
                overscroll,
                velocity,
                drag_details,
            } => {
                write!(f, ", overscroll: {overscroll:.1}, velocity: {velocity:.1}")?;
                if let Some(details) = drag_details {
                    write!(f, ", {details:?}")?;
                }
            }
            ScrollNotificationKind::End { drag_details } => {
                if let Some(details) = drag_details {
                    write!(f, ", {details:?}")?;
                }
            }
            ScrollNotificationKind::UserScroll { direction } => {
                write!(f, ", direction: {direction}")?;
            }
        }
        f.write_str(")")
    }
}
