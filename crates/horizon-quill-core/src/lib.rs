//! Core systems for Horizon Quill.
//!
//! This crate provides the observer and queueing primitives the editable
//! text engine is built on:
//!
//! - **Signal/Slot System**: Type-safe notification with explicit disconnect
//! - **Property System**: Change-detecting cells and listener-carrying
//!   [`ValueNotifier`]s
//! - **Event Queue**: A multi-producer queue giving input a single total order
//! - **Logging**: `tracing` targets, span names and the [`PerfSpan`] guard
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_quill_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Event Queue Example
//!
//! ```
//! use horizon_quill_core::EventQueue;
//!
//! let queue = EventQueue::new();
//! let producer = queue.sender();
//! producer.send("key").unwrap();
//! queue.push("pointer");
//!
//! assert_eq!(queue.pop(), Some("key"));
//! assert_eq!(queue.pop(), Some("pointer"));
//! ```

mod error;
pub mod event_queue;
pub mod logging;
pub mod property;
pub mod signal;

pub use error::{QueueError, QuillError, Result};
pub use event_queue::{EventQueue, EventSender};
pub use logging::PerfSpan;
pub use property::{Property, ValueNotifier};
pub use signal::{ConnectionId, Signal};
