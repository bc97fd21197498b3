//! Signals: synchronous multi-listener notification.
//!
//! A [`Signal<Args>`] is how an editable hears about state it does not
//! own: raw key events, scroll position changes, caret blink state and
//! editing value replacement. Every `connect` hands back a
//! [`ConnectionId`], and the holder is expected to `disconnect` it again;
//! nothing is cleaned up implicitly.
//!
//! Slots run on the emitting thread, in connection order. `emit` works on a
//! snapshot of the connection table, so a slot may connect or disconnect
//! (itself included) while the signal is being emitted.
//!
//! ```
//! use horizon_quill_core::Signal;
//!
//! let scrolled = Signal::<f32>::new();
//! let id = scrolled.connect(|pixels| println!("now at {pixels}"));
//!
//! scrolled.emit(12.5);
//! assert!(scrolled.disconnect(id));
//! assert_eq!(scrolled.connection_count(), 0);
//! ```

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// Pairing token for one connected slot.
    ///
    /// Stale ids are harmless: disconnecting one twice, or on the wrong
    /// signal, is a no-op that returns `false`.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A list of slots invoked with a shared reference to each emitted value.
///
/// `Signal<Args>` is `Send + Sync`; slots must be too.
pub struct Signal<Args> {
    slots: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(SlotMap::with_key()),
        }
    }

    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connect_boxed(Box::new(slot))
    }

    /// Connect a slot that is already boxed, for callers holding a
    /// `dyn` listener.
    pub fn connect_boxed(&self, slot: Box<dyn Fn(&Args) + Send + Sync>) -> ConnectionId {
        let id = self.slots.lock().insert(Arc::from(slot));
        tracing::trace!(target: targets::SIGNAL, ?id, "slot connected");
        id
    }

    /// Remove the slot behind `id`. Returns whether it was still connected.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        let removed = self.slots.lock().remove(id).is_some();
        tracing::trace!(target: targets::SIGNAL, ?id, removed, "slot disconnected");
        removed
    }

    pub fn connection_count(&self) -> usize {
        self.slots.lock().len()
    }

    /// Call every slot with `args`.
    #[tracing::instrument(skip_all, target = "horizon_quill_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        let snapshot: Vec<Slot<Args>> = self.slots.lock().values().cloned().collect();
        if snapshot.is_empty() {
            return;
        }
        tracing::trace!(target: targets::SIGNAL, slots = snapshot.len(), "emit");
        for slot in &snapshot {
            slot(&args);
        }
    }
}

impl<Args> fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("slots", &self.slots.lock().len())
            .finish()
    }
}

static_assertions::assert_impl_all!(Signal<i32>: Send, Sync);
