//! Observable values.
//!
//! - [`Property<T>`]: a lock-guarded cell whose `set` reports whether the
//!   value changed
//! - [`ValueNotifier<T>`]: a property that tells its listeners about every
//!   change
//!
//! Render objects never own the notifiers they observe. They hold an
//! `Arc<ValueNotifier<T>>`, register a listener on attach and remove it on
//! detach; the returned [`ConnectionId`] is the pairing token.
//!
//! ```
//! use horizon_quill_core::ValueNotifier;
//!
//! let show_cursor = ValueNotifier::new(false);
//! let id = show_cursor.add_listener(|visible| println!("cursor visible: {visible}"));
//!
//! assert!(show_cursor.set(true));
//! assert!(!show_cursor.set(true));
//! show_cursor.remove_listener(id);
//! ```

use std::fmt;

use parking_lot::RwLock;

use crate::logging::targets;
use crate::signal::{ConnectionId, Signal};

/// A shared value with change detection.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone + PartialEq> Property<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Store `value` unless it equals the current one. Returns whether the
    /// stored value changed.
    pub fn set(&self, value: T) -> bool {
        let mut slot = self.value.write();
        if *slot == value {
            return false;
        }
        *slot = value;
        true
    }
}

impl<T: Clone + PartialEq + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Property").field(&*self.value.read()).finish()
    }
}

/// A [`Property`] paired with a change signal.
///
/// Listeners receive the new value after it has been stored.
pub struct ValueNotifier<T> {
    value: Property<T>,
    changed: Signal<T>,
}

impl<T: Clone + PartialEq + Send + Sync + 'static> ValueNotifier<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Property::new(value),
            changed: Signal::new(),
        }
    }

    pub fn get(&self) -> T {
        self.value.get()
    }

    /// Store `value` and notify listeners if it differs from the current
    /// one. Returns whether listeners ran.
    pub fn set(&self, value: T) -> bool {
        if !self.value.set(value.clone()) {
            return false;
        }
        tracing::trace!(
            target: targets::PROPERTY,
            listeners = self.changed.connection_count(),
            "value notifier changed"
        );
        self.changed.emit(value);
        true
    }

    pub fn add_listener<F>(&self, listener: F) -> ConnectionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.changed.connect(listener)
    }

    /// Remove a listener returned by [`add_listener`](Self::add_listener).
    pub fn remove_listener(&self, id: ConnectionId) -> bool {
        self.changed.disconnect(id)
    }

    pub fn listener_count(&self) -> usize {
        self.changed.connection_count()
    }
}

impl<T: Clone + PartialEq + Send + Sync + Default + 'static> Default for ValueNotifier<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for ValueNotifier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueNotifier")
            .field("value", &*self.value.value.read())
            .field("listeners", &self.changed.connection_count())
            .finish()
    }
}
