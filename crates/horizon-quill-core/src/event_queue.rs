//! Ordered, multi-producer event queue.
//!
//! Every input that can change an editable's state (key events forwarded
//! from a keyboard source, pointer events, clipboard completions) travels
//! through one [`EventQueue`]. Producers hold cheap [`EventSender`] clones;
//! the owner drains the queue on its own thread, so all handlers observe a
//! single total order.

use crossbeam_channel::{Receiver, Sender, TryRecvError, unbounded};

use crate::error::{QueueError, Result};
use crate::logging::targets;

/// The receiving end of an event queue.
#[derive(Debug)]
pub struct EventQueue<E> {
    sender: Sender<E>,
    receiver: Receiver<E>,
}

/// A producer handle for an [`EventQueue`].
#[derive(Debug)]
pub struct EventSender<E> {
    sender: Sender<E>,
}

impl<E> Clone for EventSender<E> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<E> EventSender<E> {
    /// Enqueue an event.
    ///
    /// Fails only when the queue itself has been dropped.
    pub fn send(&self, event: E) -> Result<()> {
        self.sender.send(event).map_err(|_| {
            tracing::debug!(target: targets::QUEUE, "dropping event for closed queue");
            QueueError::Closed.into()
        })
    }
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventQueue<E> {
    /// Create an empty, unbounded queue.
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    /// A new producer handle.
    pub fn sender(&self) -> EventSender<E> {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    /// Enqueue an event from the owning side.
    pub fn push(&self, event: E) {
        // The queue owns a receiver, so the channel cannot be disconnected here.
        let _ = self.sender.send(event);
    }

    /// Pop the next event, if any.
    pub fn pop(&self) -> Option<E> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Number of events waiting.
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Whether no events are waiting.
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuillError;

    #[test]
    fn test_queue_preserves_order_across_senders() {
        let queue = EventQueue::new();
        let a = queue.sender();
        let b = a.clone();

        a.send(1).unwrap();
        queue.push(2);
        b.send(3).unwrap();

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.pop(), Some(2));
        assert_eq!(queue.pop(), Some(3));
        assert_eq!(queue.pop(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_send_after_queue_dropped() {
        let queue = EventQueue::<u32>::new();
        let sender = queue.sender();
        drop(queue);

        assert!(matches!(
            sender.send(7),
            Err(QuillError::Queue(QueueError::Closed))
        ));
    }
}
