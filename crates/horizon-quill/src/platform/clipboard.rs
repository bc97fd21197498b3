//! Clipboard access for copy, cut and paste.
//!
//! Writes are synchronous. Reads are requests: the service answers through
//! a [`ClipboardReply`], which delivers the text into the requesting
//! editable's input queue so the paste is ordered with keyboard and pointer
//! input.
//!
//! Two services ship:
//!
//! - [`SystemClipboard`] wraps the `arboard` crate (Windows, macOS, X11 and
//!   Wayland)
//! - [`MemoryClipboard`] keeps text in process; it can hold replies back
//!   until [`MemoryClipboard::flush_pending`] to model a slow platform

use std::fmt;

use horizon_quill_core::EventSender;
use horizon_quill_core::logging::targets;
use parking_lot::Mutex;
use thiserror::Error;

use crate::rendering::{EditableInput, PasteToken};

/// Error type for clipboard operations.
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// The platform clipboard failed.
    #[error("clipboard error: {0}")]
    Platform(#[from] arboard::Error),
}

/// The pending answer to a clipboard read.
#[derive(Debug)]
pub struct ClipboardReply {
    token: PasteToken,
    sender: EventSender<EditableInput>,
}

impl ClipboardReply {
    pub fn new(token: PasteToken, sender: EventSender<EditableInput>) -> Self {
        Self { token, sender }
    }

    pub fn token(&self) -> PasteToken {
        self.token
    }

    /// Deliver the clipboard contents, or `None` if it held no text.
    pub fn complete(self, text: Option<String>) {
        let event = EditableInput::PasteCompleted {
            token: self.token,
            text,
        };
        if self.sender.send(event).is_err() {
            tracing::debug!(
                target: targets::CLIPBOARD,
                token = ?self.token,
                "paste reply dropped: editable is gone"
            );
        }
    }
}

/// A clipboard an editable can copy to and paste from.
pub trait ClipboardService: Send + Sync {
    /// Replace the clipboard contents with `text`.
    fn set_text(&self, text: &str) -> Result<(), ClipboardError>;

    /// Read the clipboard text and answer through `reply`.
    fn request_text(&self, reply: ClipboardReply);
}

/// The system clipboard.
pub struct SystemClipboard {
    inner: Mutex<arboard::Clipboard>,
}

impl SystemClipboard {
    /// Open the system clipboard.
    ///
    /// # Errors
    ///
    /// Returns an error if the clipboard cannot be accessed, which can happen
    /// if the system clipboard is unavailable or locked by another process.
    pub fn new() -> Result<Self, ClipboardError> {
        Ok(Self {
            inner: Mutex::new(arboard::Clipboard::new()?),
        })
    }

    /// Read the current text, if any.
    pub fn get_text(&self) -> Result<Option<String>, ClipboardError> {
        match self.inner.lock().get_text() {
            Ok(text) => Ok(Some(text)),
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

impl ClipboardService for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.inner.lock().set_text(text)?;
        Ok(())
    }

    fn request_text(&self, reply: ClipboardReply) {
        let text = self.get_text().unwrap_or_else(|err| {
            tracing::warn!(target: targets::CLIPBOARD, %err, "clipboard read failed");
            None
        });
        reply.complete(text);
    }
}

impl fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemClipboard").finish_non_exhaustive()
    }
}

/// An in-process clipboard.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
    deferred: bool,
    pending: Mutex<Vec<ClipboardReply>>,
}

impl MemoryClipboard {
    /// A clipboard that answers reads immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that holds reads until [`flush_pending`](Self::flush_pending).
    pub fn deferred() -> Self {
        Self {
            deferred: true,
            ..Self::default()
        }
    }

    /// Start with `text` on the clipboard.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        *self.contents.lock() = Some(text.into());
        self
    }

    /// The current contents.
    pub fn text(&self) -> Option<String> {
        self.contents.lock().clone()
    }

    /// Empty the clipboard.
    pub fn clear(&self) {
        *self.contents.lock() = None;
    }

    /// Number of reads waiting on [`flush_pending`](Self::flush_pending).
    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }

    /// Answer every held read with the current contents.
    ///
    /// Returns how many replies were sent.
    pub fn flush_pending(&self) -> usize {
        let pending = std::mem::take(&mut *self.pending.lock());
        let count = pending.len();
        let text = self.text();
        for reply in pending {
            reply.complete(text.clone());
        }
        count
    }
}

impl ClipboardService for MemoryClipboard {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        *self.contents.lock() = Some(text.to_owned());
        Ok(())
    }

    fn request_text(&self, reply: ClipboardReply) {
        if self.deferred {
            tracing::trace!(target: targets::CLIPBOARD, token = ?reply.token(), "clipboard read deferred");
            self.pending.lock().push(reply);
        } else {
            reply.complete(self.text());
        }
    }
}

static_assertions::assert_impl_all!(MemoryClipboard: Send, Sync);
