//! Conversion from winit keyboard events into [`RawKeyEvent`]s.
//!
//! [`KeyboardInputHandler`] remembers the modifier state winit reports
//! separately from key presses and stamps it onto every event it builds.
//!
//! ```ignore
//! use horizon_quill::input::{KeyboardInputHandler, RawKeyboard};
//!
//! let mut handler = KeyboardInputHandler::new();
//! let keyboard = RawKeyboard::new();
//!
//! // WindowEvent::ModifiersChanged(modifiers)
//! handler.update_modifiers(&modifiers);
//! // WindowEvent::KeyboardInput { event, .. }
//! keyboard.dispatch(handler.process_keyboard_event(&event.logical_key, &event.physical_key, event.state));
//! ```

use winit::event::{ElementState, Modifiers};
use winit::keyboard::{Key as WinitKey, KeyCode, NamedKey, PhysicalKey};

use super::keyboard::{Key, KeyboardModifiers, RawKeyEvent};

const UNKNOWN: Key = Key::Unknown(0);

#[rustfmt::skip]
const LETTERS: [Key; 26] = [
    Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I,
    Key::J, Key::K, Key::L, Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R,
    Key::S, Key::T, Key::U, Key::V, Key::W, Key::X, Key::Y, Key::Z,
];

#[rustfmt::skip]
const DIGITS: [Key; 10] = [
    Key::Digit0, Key::Digit1, Key::Digit2, Key::Digit3, Key::Digit4,
    Key::Digit5, Key::Digit6, Key::Digit7, Key::Digit8, Key::Digit9,
];

/// Physical letter codes, in the same order as [`LETTERS`].
#[rustfmt::skip]
const LETTER_CODES: [KeyCode; 26] = [
    KeyCode::KeyA, KeyCode::KeyB, KeyCode::KeyC, KeyCode::KeyD, KeyCode::KeyE,
    KeyCode::KeyF, KeyCode::KeyG, KeyCode::KeyH, KeyCode::KeyI, KeyCode::KeyJ,
    KeyCode::KeyK, KeyCode::KeyL, KeyCode::KeyM, KeyCode::KeyN, KeyCode::KeyO,
    KeyCode::KeyP, KeyCode::KeyQ, KeyCode::KeyR, KeyCode::KeyS, KeyCode::KeyT,
    KeyCode::KeyU, KeyCode::KeyV, KeyCode::KeyW, KeyCode::KeyX, KeyCode::KeyY,
    KeyCode::KeyZ,
];

#[rustfmt::skip]
const DIGIT_CODES: [KeyCode; 10] = [
    KeyCode::Digit0, KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3, KeyCode::Digit4,
    KeyCode::Digit5, KeyCode::Digit6, KeyCode::Digit7, KeyCode::Digit8, KeyCode::Digit9,
];

/// Editing and navigation keys, by physical code and by logical name.
const EDITING_KEYS: [(KeyCode, NamedKey, Key); 15] = [
    (KeyCode::ArrowUp, NamedKey::ArrowUp, Key::ArrowUp),
    (KeyCode::ArrowDown, NamedKey::ArrowDown, Key::ArrowDown),
    (KeyCode::ArrowLeft, NamedKey::ArrowLeft, Key::ArrowLeft),
    (KeyCode::ArrowRight, NamedKey::ArrowRight, Key::ArrowRight),
    (KeyCode::Home, NamedKey::Home, Key::Home),
    (KeyCode::End, NamedKey::End, Key::End),
    (KeyCode::PageUp, NamedKey::PageUp, Key::PageUp),
    (KeyCode::PageDown, NamedKey::PageDown, Key::PageDown),
    (KeyCode::Backspace, NamedKey::Backspace, Key::Backspace),
    (KeyCode::Delete, NamedKey::Delete, Key::Delete),
    (KeyCode::Insert, NamedKey::Insert, Key::Insert),
    (KeyCode::Enter, NamedKey::Enter, Key::Enter),
    (KeyCode::Tab, NamedKey::Tab, Key::Tab),
    (KeyCode::Space, NamedKey::Space, Key::Space),
    (KeyCode::Escape, NamedKey::Escape, Key::Escape),
];

/// Converts a winit logical key to a [`Key`].
pub fn from_winit_key(key: &WinitKey) -> Key {
    match key {
        WinitKey::Named(named) => from_named(*named),
        WinitKey::Character(text) => from_character(text),
        WinitKey::Unidentified(_) | WinitKey::Dead(_) => UNKNOWN,
    }
}

fn from_named(named: NamedKey) -> Key {
    if let Some(&(_, _, key)) = EDITING_KEYS.iter().find(|(_, n, _)| *n == named) {
        return key;
    }
    // Logical modifiers carry no side.
    match named {
        NamedKey::Shift => Key::ShiftLeft,
        NamedKey::Control => Key::ControlLeft,
        NamedKey::Alt => Key::AltLeft,
        NamedKey::Super => Key::MetaLeft,
        _ => UNKNOWN,
    }
}

/// A single produced character, case folded. Anything else is unknown.
fn from_character(text: &str) -> Key {
    let mut chars = text.chars();
    let (Some(ch), None) = (chars.next(), chars.next()) else {
        return UNKNOWN;
    };
    let ch = ch.to_ascii_lowercase();
    match ch {
        'a'..='z' => LETTERS[usize::from(ch as u8 - b'a')],
        '0'..='9' => DIGITS[usize::from(ch as u8 - b'0')],
        ' ' => Key::Space,
        other => Key::Unknown(u16::try_from(u32::from(other)).unwrap_or(0)),
    }
}

/// Converts a winit physical key to a [`Key`].
///
/// Physical keys ignore the keyboard layout, so shortcuts stay on the same
/// keys under AZERTY or Dvorak.
pub fn from_winit_physical_key(physical: &PhysicalKey) -> Key {
    let PhysicalKey::Code(code) = physical else {
        return UNKNOWN;
    };
    let code = *code;
    if let Some(index) = LETTER_CODES.iter().position(|c| *c == code) {
        return LETTERS[index];
    }
    if let Some(index) = DIGIT_CODES.iter().position(|c| *c == code) {
        return DIGITS[index];
    }
    if let Some(&(_, _, key)) = EDITING_KEYS.iter().find(|(c, _, _)| *c == code) {
        return key;
    }
    match code {
        KeyCode::NumpadEnter => Key::Enter,
        KeyCode::ShiftLeft => Key::ShiftLeft,
        KeyCode::ShiftRight => Key::ShiftRight,
        KeyCode::ControlLeft => Key::ControlLeft,
        KeyCode::ControlRight => Key::ControlRight,
        KeyCode::AltLeft => Key::AltLeft,
        KeyCode::AltRight => Key::AltRight,
        KeyCode::SuperLeft => Key::MetaLeft,
        KeyCode::SuperRight => Key::MetaRight,
        _ => UNKNOWN,
    }
}

/// Converts winit modifiers to [`KeyboardModifiers`].
pub fn from_winit_modifiers(modifiers: &Modifiers) -> KeyboardModifiers {
    let state = modifiers.state();
    KeyboardModifiers {
        shift: state.shift_key(),
        control: state.control_key(),
        alt: state.alt_key(),
        meta: state.super_key(),
    }
}

/// Builds raw key events from winit input, carrying the last reported
/// modifier state.
#[derive(Debug, Default)]
pub struct KeyboardInputHandler {
    modifiers: KeyboardModifiers,
}

impl KeyboardInputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modifiers(&self) -> KeyboardModifiers {
        self.modifiers
    }

    /// Record the state from a winit `ModifiersChanged` event.
    pub fn update_modifiers(&mut self, modifiers: &Modifiers) {
        self.modifiers = from_winit_modifiers(modifiers);
    }

    /// Build a [`RawKeyEvent`]. The physical key wins; the logical key
    /// covers keys winit could not place.
    pub fn process_keyboard_event(
        &self,
        logical_key: &WinitKey,
        physical_key: &PhysicalKey,
        state: ElementState,
    ) -> RawKeyEvent {
        let key = match from_winit_physical_key(physical_key) {
            Key::Unknown(_) => from_winit_key(logical_key),
            key => key,
        };
        if state.is_pressed() {
            RawKeyEvent::down(key, self.modifiers)
        } else {
            RawKeyEvent::up(key, self.modifiers)
        }
    }
}
