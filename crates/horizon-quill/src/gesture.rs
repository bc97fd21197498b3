//! Tap, double-tap and long-press recognition from pointer events.
//!
//! Recognizers only look at pointers handed to them through `add_pointer`,
//! which the owner calls for every pointer-down it wants considered. Each
//! subsequent event for the pointer goes through `handle_event`, which
//! returns whatever gestures that event completed.
//!
//! ```ignore
//! use horizon_quill::gesture::{TapGestureRecognizer, RecognizedGesture};
//!
//! let mut tap = TapGestureRecognizer::new(GestureConfig::default());
//! tap.add_pointer(&down);
//! for gesture in tap.handle_event(&down).into_iter().chain(tap.handle_event(&up)) {
//!     match gesture {
//!         RecognizedGesture::TapDown { global_position } => {}
//!         RecognizedGesture::Tap => {}
//!         _ => {}
//!     }
//! }
//! ```

use std::collections::HashMap;
use std::time::{Duration, Instant};

use horizon_quill_core::logging::targets;
use horizon_quill_render::Point;

use crate::input::{PointerEvent, PointerEventKind, PointerId};

/// Default tap timeout in milliseconds.
///
/// A tap must complete within this duration to be recognized.
pub const DEFAULT_TAP_TIMEOUT_MS: u64 = 300;

/// Default double-tap timeout in milliseconds.
///
/// The second tap must go down within this duration of the first one
/// coming up.
pub const DEFAULT_DOUBLE_TAP_TIMEOUT_MS: u64 = 300;

/// Default long-press timeout in milliseconds.
pub const DEFAULT_LONG_PRESS_TIMEOUT_MS: u64 = 500;

/// Default maximum movement for a tap in pixels.
///
/// Movement beyond this threshold cancels recognition.
pub const DEFAULT_TAP_SLOP: f32 = 10.0;

/// Timing and distance thresholds shared by the recognizers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    pub tap_timeout: Duration,
    pub double_tap_timeout: Duration,
    pub long_press_timeout: Duration,
    pub tap_slop: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_timeout: Duration::from_millis(DEFAULT_TAP_TIMEOUT_MS),
            double_tap_timeout: Duration::from_millis(DEFAULT_DOUBLE_TAP_TIMEOUT_MS),
            long_press_timeout: Duration::from_millis(DEFAULT_LONG_PRESS_TIMEOUT_MS),
            tap_slop: DEFAULT_TAP_SLOP,
        }
    }
}

impl GestureConfig {
    pub fn with_tap_timeout(mut self, timeout: Duration) -> Self {
        self.tap_timeout = timeout;
        self
    }

    pub fn with_double_tap_timeout(mut self, timeout: Duration) -> Self {
        self.double_tap_timeout = timeout;
        self
    }

    pub fn with_long_press_timeout(mut self, timeout: Duration) -> Self {
        self.long_press_timeout = timeout;
        self
    }

    pub fn with_tap_slop(mut self, slop: f32) -> Self {
        self.tap_slop = slop;
        self
    }
}

/// A gesture completed by a pointer event or a deadline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecognizedGesture {
    /// A tracked pointer went down.
    TapDown { global_position: Point },
    /// A tracked pointer came up close to where it went down.
    Tap,
    /// Two taps in quick succession at about the same place.
    DoubleTap { first_global_position: Point },
    /// A pointer was held still past the long-press timeout.
    LongPress { global_position: Point },
}

#[derive(Debug, Clone, Copy)]
struct PointerTrack {
    origin: Point,
    down_time: Instant,
}

/// Recognizes single taps.
#[derive(Debug, Default)]
pub struct TapGestureRecognizer {
    config: GestureConfig,
    tracked: HashMap<PointerId, Option<PointerTrack>>,
}

impl TapGestureRecognizer {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            tracked: HashMap::new(),
        }
    }

    /// Start tracking the pointer of a down event.
    pub fn add_pointer(&mut self, event: &PointerEvent) {
        self.tracked.insert(event.pointer, None);
    }

    pub fn is_tracking(&self, pointer: PointerId) -> bool {
        self.tracked.contains_key(&pointer)
    }

    pub fn handle_event(&mut self, event: &PointerEvent) -> Vec<RecognizedGesture> {
        let Some(slot) = self.tracked.get_mut(&event.pointer) else {
            return Vec::new();
        };

        match event.kind {
            PointerEventKind::Down => {
                *slot = Some(PointerTrack {
                    origin: event.global_position,
                    down_time: event.time,
                });
                vec![RecognizedGesture::TapDown {
                    global_position: event.global_position,
                }]
            }
            PointerEventKind::Move => {
                if let Some(track) = slot
                    && track.origin.distance(event.global_position) > self.config.tap_slop
                {
                    tracing::trace!(target: targets::GESTURE, pointer = event.pointer, "tap rejected: slop");
                    self.tracked.remove(&event.pointer);
                }
                Vec::new()
            }
            PointerEventKind::Up => {
                let track = self.tracked.remove(&event.pointer).flatten();
                match track {
                    Some(track)
                        if track.origin.distance(event.global_position) <= self.config.tap_slop
                            && event.time.saturating_duration_since(track.down_time)
                                <= self.config.tap_timeout =>
                    {
                        tracing::trace!(target: targets::GESTURE, pointer = event.pointer, "tap");
                        vec![RecognizedGesture::Tap]
                    }
                    _ => Vec::new(),
                }
            }
            PointerEventKind::Cancel => {
                self.tracked.remove(&event.pointer);
                Vec::new()
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum DoubleTapState {
    Ready,
    FirstDown(PointerTrack),
    FirstUp { origin: Point, up_time: Instant },
    SecondDown { first: Point, second: PointerTrack },
}

/// Recognizes two taps in quick succession.
#[derive(Debug)]
pub struct DoubleTapGestureRecognizer {
    config: GestureConfig,
    tracked: Option<PointerId>,
    state: DoubleTapState,
}

impl Default for DoubleTapGestureRecognizer {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl DoubleTapGestureRecognizer {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            tracked: None,
            state: DoubleTapState::Ready,
        }
    }

    /// Start tracking the pointer of a down event.
    pub fn add_pointer(&mut self, event: &PointerEvent) {
        self.tracked = Some(event.pointer);
    }

    pub fn handle_event(&mut self, event: &PointerEvent) -> Vec<RecognizedGesture> {
        if self.tracked != Some(event.pointer) {
            return Vec::new();
        }
        let slop = self.config.tap_slop;

        match (self.state, event.kind) {
            (DoubleTapState::FirstUp { origin, up_time }, PointerEventKind::Down)
                if event.time.saturating_duration_since(up_time) <= self.config.double_tap_timeout
                    && origin.distance(event.global_position) <= slop =>
            {
                self.state = DoubleTapState::SecondDown {
                    first: origin,
                    second: PointerTrack {
                        origin: event.global_position,
                        down_time: event.time,
                    },
                };
            }
            (_, PointerEventKind::Down) => {
                self.state = DoubleTapState::FirstDown(PointerTrack {
                    origin: event.global_position,
                    down_time: event.time,
                });
            }
            (DoubleTapState::FirstDown(track), PointerEventKind::Move)
            | (DoubleTapState::SecondDown { second: track, .. }, PointerEventKind::Move) => {
                if track.origin.distance(event.global_position) > slop {
                    self.reset();
                }
            }
            (DoubleTapState::FirstDown(track), PointerEventKind::Up) => {
                if self.completes_tap(track, event) {
                    self.state = DoubleTapState::FirstUp {
                        origin: track.origin,
                        up_time: event.time,
                    };
                } else {
                    self.reset();
                }
            }
            (DoubleTapState::SecondDown { first, second }, PointerEventKind::Up) => {
                let completed = self.completes_tap(second, event);
                self.reset();
                if completed {
                    tracing::trace!(target: targets::GESTURE, pointer = event.pointer, "double tap");
                    return vec![RecognizedGesture::DoubleTap {
                        first_global_position: first,
                    }];
                }
            }
            (_, PointerEventKind::Cancel) => self.reset(),
            _ => {}
        }
        Vec::new()
    }

    fn completes_tap(&self, track: PointerTrack, event: &PointerEvent) -> bool {
        track.origin.distance(event.global_position) <= self.config.tap_slop
            && event.time.saturating_duration_since(track.down_time) <= self.config.tap_timeout
    }

    fn reset(&mut self) {
        self.state = DoubleTapState::Ready;
    }
}

#[derive(Debug, Clone, Copy)]
struct LongPressTrack {
    origin: Point,
    deadline: Option<Instant>,
}

/// Recognizes a pointer held still past the long-press timeout.
///
/// The deadline is checked on every event for the pointer and by
/// [`check`](Self::check), which the owner calls from its frame tick.
#[derive(Debug, Default)]
pub struct LongPressGestureRecognizer {
    config: GestureConfig,
    tracked: HashMap<PointerId, Option<LongPressTrack>>,
}

impl LongPressGestureRecognizer {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            tracked: HashMap::new(),
        }
    }

    /// Start tracking the pointer of a down event.
    pub fn add_pointer(&mut self, event: &PointerEvent) {
        self.tracked.insert(event.pointer, None);
    }

    /// Whether any tracked pointer is waiting on its deadline.
    pub fn has_pending_deadline(&self) -> bool {
        self.tracked
            .values()
            .any(|track| track.is_some_and(|t| t.deadline.is_some()))
    }

    pub fn handle_event(&mut self, event: &PointerEvent) -> Vec<RecognizedGesture> {
        if !self.tracked.contains_key(&event.pointer) {
            return Vec::new();
        }
        if event.kind == PointerEventKind::Down {
            self.tracked.insert(
                event.pointer,
                Some(LongPressTrack {
                    origin: event.global_position,
                    deadline: Some(event.time + self.config.long_press_timeout),
                }),
            );
            return Vec::new();
        }

        // A deadline that passed between ticks still counts.
        let gestures = self.fire(event.pointer, event.time);

        match event.kind {
            PointerEventKind::Move => {
                let moved_away = self.tracked.get(&event.pointer).is_some_and(|track| {
                    track.is_some_and(|t| {
                        t.origin.distance(event.global_position) > self.config.tap_slop
                    })
                });
                if moved_away {
                    tracing::trace!(target: targets::GESTURE, pointer = event.pointer, "long press rejected: slop");
                    self.tracked.remove(&event.pointer);
                }
            }
            PointerEventKind::Up | PointerEventKind::Cancel => {
                self.tracked.remove(&event.pointer);
            }
            PointerEventKind::Down => {}
        }
        gestures
    }

    /// Fire every long press whose deadline is at or before `now`.
    pub fn check(&mut self, now: Instant) -> Vec<RecognizedGesture> {
        let pointers: Vec<PointerId> = self.tracked.keys().copied().collect();
        pointers
            .into_iter()
            .flat_map(|pointer| self.fire(pointer, now))
            .collect()
    }

    fn fire(&mut self, pointer: PointerId, now: Instant) -> Vec<RecognizedGesture> {
        let Some(Some(track)) = self.tracked.get_mut(&pointer) else {
            return Vec::new();
        };
        match track.deadline {
            Some(deadline) if deadline <= now => {
                track.deadline = None;
                tracing::trace!(target: targets::GESTURE, pointer, "long press");
                vec![RecognizedGesture::LongPress {
                    global_position: track.origin,
                }]
            }
            _ => Vec::new(),
        }
    }
}
