//! Keyboard and pointer input.
//!
//! - [`RawKeyboard`]: the key-event source editables subscribe to while
//!   focused
//! - [`KeyboardInputHandler`]: winit to [`RawKeyEvent`] conversion
//! - [`PointerEvent`]: pointer samples fed to gesture recognizers

mod conversion;
mod keyboard;
mod pointer;

pub use conversion::{
    KeyboardInputHandler, from_winit_key, from_winit_modifiers, from_winit_physical_key,
};
pub use keyboard::{
    Key, KeyboardModifiers, RawKeyEvent, RawKeyEventKind, RawKeyboard, TargetPlatform,
};
pub use pointer::{PointerEvent, PointerEventKind, PointerId};
