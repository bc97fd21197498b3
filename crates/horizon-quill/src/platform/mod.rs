//! Platform services.

mod clipboard;

pub use clipboard::{
    ClipboardError, ClipboardReply, ClipboardService, MemoryClipboard, SystemClipboard,
};
