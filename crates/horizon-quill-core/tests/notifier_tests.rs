//! Integration tests for notifiers and the event queue working together.

use std::sync::Arc;

use horizon_quill_core::{EventQueue, Signal, ValueNotifier};

fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

#[derive(Debug, PartialEq)]
enum Input {
    Cursor(bool),
    Scroll(i32),
}

#[test]
fn test_listeners_forward_into_one_queue_in_order() {
    setup();
    let queue = EventQueue::new();
    let cursor = ValueNotifier::new(false);
    let scroll = Signal::<i32>::new();

    let sender = queue.sender();
    let cursor_id = cursor.add_listener(move |&visible| {
        let _ = sender.send(Input::Cursor(visible));
    });
    let sender = queue.sender();
    let scroll_id = scroll.connect(move |&pixels| {
        let _ = sender.send(Input::Scroll(pixels));
    });

    cursor.set(true);
    scroll.emit(12);
    cursor.set(false);

    assert_eq!(queue.pop(), Some(Input::Cursor(true)));
    assert_eq!(queue.pop(), Some(Input::Scroll(12)));
    assert_eq!(queue.pop(), Some(Input::Cursor(false)));
    assert!(queue.is_empty());

    assert!(cursor.remove_listener(cursor_id));
    assert!(scroll.disconnect(scroll_id));
    cursor.set(true);
    scroll.emit(1);
    assert!(queue.is_empty());
}

#[test]
fn test_notifier_shared_across_threads() {
    setup();
    let notifier = Arc::new(ValueNotifier::new(0_u32));
    let queue = EventQueue::new();
    let sender = queue.sender();
    notifier.add_listener(move |&v| {
        let _ = sender.send(v);
    });

    let worker = {
        let notifier = notifier.clone();
        std::thread::spawn(move || {
            notifier.set(5);
        })
    };
    worker.join().unwrap();

    assert_eq!(queue.pop(), Some(5));
    assert_eq!(notifier.get(), 5);
}
