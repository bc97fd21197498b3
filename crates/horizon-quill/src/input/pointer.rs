//! Pointer events in global (window) coordinates.

use std::time::Instant;

use horizon_quill_render::Point;

/// Identifies one pointer (a mouse, or one finger) for the duration of a
/// contact.
pub type PointerId = u64;

/// The phase of a pointer contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// A single pointer sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pointer: PointerId,
    pub kind: PointerEventKind,
    pub global_position: Point,
    pub time: Instant,
}

impl PointerEvent {
    pub fn new(
        pointer: PointerId,
        kind: PointerEventKind,
        global_position: Point,
        time: Instant,
    ) -> Self {
        Self {
            pointer,
            kind,
            global_position,
            time,
        }
    }

    pub fn down(pointer: PointerId, global_position: Point, time: Instant) -> Self {
        Self::new(pointer, PointerEventKind::Down, global_position, time)
    }

    pub fn moved(pointer: PointerId, global_position: Point, time: Instant) -> Self {
        Self::new(pointer, PointerEventKind::Move, global_position, time)
    }

    pub fn up(pointer: PointerId, global_position: Point, time: Instant) -> Self {
        Self::new(pointer, PointerEventKind::Up, global_position, time)
    }

    pub fn cancel(pointer: PointerId, global_position: Point, time: Instant) -> Self {
        Self::new(pointer, PointerEventKind::Cancel, global_position, time)
    }

    pub fn is_down(&self) -> bool {
        self.kind == PointerEventKind::Down
    }

    /// Whether this sample ends the contact.
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, PointerEventKind::Up | PointerEventKind::Cancel)
    }
}
