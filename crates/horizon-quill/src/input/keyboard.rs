//! Key identifiers, modifier state and the raw keyboard event source.
//!
//! [`RawKeyboard`] replaces a process-wide listener list: the host owns one
//! instance, feeds it platform key events, and hands it to every editable
//! that may take focus. Editables subscribe while focused and unsubscribe
//! when they lose focus or detach.

use horizon_quill_core::logging::targets;
use horizon_quill_core::{ConnectionId, Signal};

/// Keys the editable engine and the winit conversion layer know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    // Letters
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Digits
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,

    // Navigation
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,

    // Editing
    Backspace,
    Delete,
    Insert,
    Enter,
    Tab,
    Space,
    Escape,

    // Modifiers
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,
    MetaLeft,
    MetaRight,

    /// A key without a dedicated variant, carrying a platform code if known.
    Unknown(u16),
}

impl Key {
    /// Whether this is one of the four arrow keys.
    pub fn is_arrow(self) -> bool {
        matches!(
            self,
            Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight
        )
    }

    /// Whether this key is itself a modifier.
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Key::ShiftLeft
                | Key::ShiftRight
                | Key::ControlLeft
                | Key::ControlRight
                | Key::AltLeft
                | Key::AltRight
                | Key::MetaLeft
                | Key::MetaRight
        )
    }
}

/// Keyboard modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held.
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held (Windows key, Cmd on macOS).
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Alt modifier only.
    pub const ALT: Self = Self {
        shift: false,
        control: false,
        alt: true,
        meta: false,
    };

    /// Meta modifier only.
    pub const META: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: true,
    };

    /// Combine two modifier sets.
    pub const fn union(self, other: Self) -> Self {
        Self {
            shift: self.shift || other.shift,
            control: self.control || other.control,
            alt: self.alt || other.alt,
            meta: self.meta || other.meta,
        }
    }

    /// Returns true if no modifiers are pressed.
    pub fn is_empty(&self) -> bool {
        !self.shift && !self.control && !self.alt && !self.meta
    }
}

/// Whether a key went down or came up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawKeyEventKind {
    KeyDown,
    KeyUp,
}

/// A key transition together with the modifiers held at the time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawKeyEvent {
    pub kind: RawKeyEventKind,
    pub key: Key,
    pub modifiers: KeyboardModifiers,
}

impl RawKeyEvent {
    /// A key-down event.
    pub const fn down(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self {
            kind: RawKeyEventKind::KeyDown,
            key,
            modifiers,
        }
    }

    /// A key-up event.
    pub const fn up(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self {
            kind: RawKeyEventKind::KeyUp,
            key,
            modifiers,
        }
    }

    pub fn is_down(&self) -> bool {
        self.kind == RawKeyEventKind::KeyDown
    }
}

/// A source of raw key events with explicit subscription.
#[derive(Debug, Default)]
pub struct RawKeyboard {
    events: Signal<RawKeyEvent>,
}

impl RawKeyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for every subsequent key event.
    pub fn subscribe<F>(&self, listener: F) -> ConnectionId
    where
        F: Fn(&RawKeyEvent) + Send + Sync + 'static,
    {
        let id = self.events.connect(listener);
        tracing::trace!(target: targets::EDITABLE, ?id, "raw keyboard subscribe");
        id
    }

    /// Remove a listener. Returns false if it was not subscribed.
    pub fn unsubscribe(&self, id: ConnectionId) -> bool {
        tracing::trace!(target: targets::EDITABLE, ?id, "raw keyboard unsubscribe");
        self.events.disconnect(id)
    }

    /// Deliver `event` to every subscriber.
    pub fn dispatch(&self, event: RawKeyEvent) {
        self.events.emit(event);
    }

    pub fn listener_count(&self) -> usize {
        self.events.connection_count()
    }
}

/// The platform family, used for shortcut and gesture conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetPlatform {
    Android,
    Ios,
    Fuchsia,
    MacOs,
    Windows,
    Linux,
}

impl TargetPlatform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "android") {
            TargetPlatform::Android
        } else if cfg!(target_os = "ios") {
            TargetPlatform::Ios
        } else if cfg!(target_os = "fuchsia") {
            TargetPlatform::Fuchsia
        } else if cfg!(target_os = "macos") {
            TargetPlatform::MacOs
        } else if cfg!(target_os = "windows") {
            TargetPlatform::Windows
        } else {
            TargetPlatform::Linux
        }
    }

    /// Touch-first platforms, where a tap-down does not move the caret.
    pub fn is_mobile(self) -> bool {
        matches!(
            self,
            TargetPlatform::Android | TargetPlatform::Ios | TargetPlatform::Fuchsia
        )
    }

    /// Apple platforms: Alt jumps words and Meta is the shortcut key.
    pub fn is_mac(self) -> bool {
        matches!(self, TargetPlatform::MacOs | TargetPlatform::Ios)
    }

    /// Whether `modifiers` hold the platform's shortcut accelerator.
    pub fn is_accelerator(self, modifiers: KeyboardModifiers) -> bool {
        modifiers.control || (self.is_mac() && modifiers.meta)
    }

    /// Whether `modifiers` request a word-wise cursor jump.
    pub fn is_word_jump(self, modifiers: KeyboardModifiers) -> bool {
        (self.is_mac() && modifiers.alt) || modifiers.control
    }
}

impl Default for TargetPlatform {
    fn default() -> Self {
        Self::current()
    }
}

static_assertions::assert_impl_all!(RawKeyboard: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_modifier_union() {
        let both = KeyboardModifiers::SHIFT.union(KeyboardModifiers::CTRL);
        assert!(both.shift && both.control);
        assert!(!both.alt);
        assert!(KeyboardModifiers::NONE.is_empty());
    }

    #[test]
    fn test_raw_keyboard_subscription() {
        let keyboard = RawKeyboard::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let id = keyboard.subscribe(move |event| {
            if event.is_down() {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        keyboard.dispatch(RawKeyEvent::down(Key::A, KeyboardModifiers::NONE));
        keyboard.dispatch(RawKeyEvent::up(Key::A, KeyboardModifiers::NONE));
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        assert!(keyboard.unsubscribe(id));
        assert!(!keyboard.unsubscribe(id));
        keyboard.dispatch(RawKeyEvent::down(Key::A, KeyboardModifiers::NONE));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(keyboard.listener_count(), 0);
    }

    #[test]
    fn test_platform_conventions() {
        let mac = TargetPlatform::MacOs;
        let linux = TargetPlatform::Linux;

        assert!(mac.is_accelerator(KeyboardModifiers::META));
        assert!(!linux.is_accelerator(KeyboardModifiers::META));
        assert!(linux.is_accelerator(KeyboardModifiers::CTRL));

        assert!(mac.is_word_jump(KeyboardModifiers::ALT));
        assert!(!linux.is_word_jump(KeyboardModifiers::ALT));
        assert!(linux.is_word_jump(KeyboardModifiers::CTRL));

        assert!(TargetPlatform::Android.is_mobile());
        assert!(!TargetPlatform::Windows.is_mobile());
    }

    #[test]
    fn test_key_classes() {
        assert!(Key::ArrowLeft.is_arrow());
        assert!(!Key::A.is_arrow());
        assert!(Key::MetaRight.is_modifier());
    }
}
