//! End-to-end editing flows: keys and pointers arrive through the raw
//! keyboard and the input queue, selections go out through the callback and
//! come back through the text editing controller.

use std::sync::Arc;
use std::time::{Duration, Instant};

use horizon_quill::ValueNotifier;
use horizon_quill::input::{
    Key, KeyboardModifiers, PointerEvent, RawKeyEvent, RawKeyboard, TargetPlatform,
};
use horizon_quill::platform::MemoryClipboard;
use horizon_quill::render::text::{
    FixedAdvanceMetrics, FixedAdvanceTextPainter, TextPosition, TextSelection,
};
use horizon_quill::render::{Color, DrawCommand, Point, RecordingRenderer, Rect};
use horizon_quill::rendering::{
    BoxConstraints, EditableConfig, EditableInput, EditableServices, RenderEditable,
    ScrollPosition, SelectionChangedCause, ViewportOffset,
};
use horizon_quill::services::{TextEditingController, TextEditingValue, TextSelectionDelegate};
use parking_lot::Mutex;

fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

struct Field {
    editable: RenderEditable,
    controller: Arc<TextEditingController>,
    keyboard: Arc<RawKeyboard>,
    offset: Arc<ScrollPosition>,
    show_cursor: Arc<ValueNotifier<bool>>,
    causes: Arc<Mutex<Vec<SelectionChangedCause>>>,
}

impl Field {
    fn new(text: &str, selection: TextSelection, clipboard: MemoryClipboard) -> Self {
        Self::with_config(text, selection, clipboard, EditableConfig::new())
    }

    fn with_config(
        text: &str,
        selection: TextSelection,
        clipboard: MemoryClipboard,
        config: EditableConfig,
    ) -> Self {
        setup();
        let controller = Arc::new(TextEditingController::new(TextEditingValue::new(
            text, selection,
        )));
        let keyboard = Arc::new(RawKeyboard::new());
        let offset = Arc::new(ScrollPosition::new(0.0));
        let show_cursor = Arc::new(ValueNotifier::new(false));
        let services = EditableServices {
            offset: offset.clone(),
            show_cursor: show_cursor.clone(),
            text_selection_delegate: controller.clone(),
            clipboard: Arc::new(clipboard),
            keyboard: keyboard.clone(),
        };
        let metrics = FixedAdvanceMetrics {
            glyph_advance: 10.0,
            line_height: 20.0,
            ascent: 15.0,
        };
        let painter = FixedAdvanceTextPainter::new(metrics).expect("valid metrics");
        let config = config
            .with_platform(TargetPlatform::Linux)
            .with_cursor_color(Color::BLUE)
            .with_selection_color(Color::from_rgb(0.7, 0.8, 1.0));
        let mut editable = RenderEditable::new(text, Box::new(painter), services, config);
        editable.set_selection(Some(selection));

        let causes: Arc<Mutex<Vec<SelectionChangedCause>>> = Arc::default();
        let sink = causes.clone();
        let delegate = controller.clone();
        editable.set_on_selection_changed(Some(Box::new(move |selection, _, cause| {
            sink.lock().push(cause);
            delegate.set_selection(selection);
        })));
        editable.attach();
        editable.set_has_focus(true);

        Self {
            editable,
            controller,
            keyboard,
            offset,
            show_cursor,
            causes,
        }
    }

    fn layout(&mut self, width: f32) {
        self.editable
            .perform_layout(BoxConstraints::tight_for_width(width, f32::INFINITY));
    }

    /// Deliver a key press through the keyboard, drain the queue and feed
    /// the controller's value back in.
    fn press(&mut self, key: Key, modifiers: KeyboardModifiers) -> usize {
        self.keyboard.dispatch(RawKeyEvent::down(key, modifiers));
        self.keyboard.dispatch(RawKeyEvent::up(key, modifiers));
        let handled = self.editable.process_input();
        self.sync();
        handled
    }

    fn sync(&mut self) {
        let value = self.controller.text_editing_value();
        self.editable.set_text(value.text);
        self.editable.set_selection(Some(value.selection));
    }

    fn value(&self) -> (String, TextSelection) {
        let value = self.controller.text_editing_value();
        (value.text, value.selection)
    }
}

#[test]
fn test_hello_world_editing_session() {
    let mut field = Field::new("hello world", TextSelection::collapsed(5), MemoryClipboard::new());
    field.layout(400.0);

    field.press(Key::ArrowRight, KeyboardModifiers::SHIFT);
    assert_eq!(field.controller.selection(), TextSelection::new(5, 6));

    field.press(Key::ArrowLeft, KeyboardModifiers::NONE);
    assert_eq!(field.controller.selection(), TextSelection::collapsed(5));

    field.press(Key::A, KeyboardModifiers::CTRL);
    assert_eq!(field.controller.selection(), TextSelection::new(0, 11));

    field.press(Key::Delete, KeyboardModifiers::NONE);
    assert_eq!(field.value(), (String::new(), TextSelection::collapsed(0)));
    assert_eq!(field.editable.text(), "");

    assert!(
        field
            .causes
            .lock()
            .iter()
            .all(|cause| *cause == SelectionChangedCause::Keyboard)
    );
}

#[test]
fn test_key_ups_are_queued_but_ignored() {
    let mut field = Field::new("abc", TextSelection::collapsed(0), MemoryClipboard::new());
    field.layout(400.0);

    assert_eq!(field.press(Key::ArrowRight, KeyboardModifiers::NONE), 2);
    assert_eq!(field.controller.selection(), TextSelection::collapsed(1));
    assert_eq!(field.causes.lock().len(), 1);
}

#[test]
fn test_focus_loss_stops_keyboard_delivery() {
    let mut field = Field::new("abc", TextSelection::collapsed(0), MemoryClipboard::new());
    field.layout(400.0);
    field.editable.set_has_focus(false);

    assert_eq!(field.press(Key::ArrowRight, KeyboardModifiers::NONE), 0);
    assert_eq!(field.controller.selection(), TextSelection::collapsed(0));
    assert_eq!(field.keyboard.listener_count(), 0);
}

#[test]
fn test_copy_then_paste_round_trip_through_queue() {
    let mut field = Field::new("hello world", TextSelection::new(0, 5), MemoryClipboard::new());
    field.layout(400.0);

    field.press(Key::C, KeyboardModifiers::CTRL);
    field.controller.set_selection(TextSelection::collapsed(11));
    field.sync();

    // Key down, key up and the clipboard reply.
    assert_eq!(field.press(Key::V, KeyboardModifiers::CTRL), 3);
    assert_eq!(
        field.value(),
        ("hello worldhello".to_owned(), TextSelection::collapsed(16))
    );
    assert!(!field.editable.has_pending_paste());
}

#[test]
fn test_cut_removes_selection_and_fills_clipboard() {
    let clipboard = MemoryClipboard::new();
    let mut field = Field::new("hello world", TextSelection::new(5, 11), clipboard);
    field.layout(400.0);

    field.press(Key::X, KeyboardModifiers::CTRL);
    assert_eq!(field.value(), ("hello".to_owned(), TextSelection::collapsed(5)));

    field.press(Key::V, KeyboardModifiers::CTRL);
    assert_eq!(
        field.value(),
        ("hello world".to_owned(), TextSelection::collapsed(11))
    );
}

#[test]
fn test_vertical_moves_keep_column_and_snap_at_edges() {
    let mut field = Field::with_config(
        "abcdef\nghijkl",
        TextSelection::collapsed(3),
        MemoryClipboard::new(),
        EditableConfig::new().multiline(),
    );
    field.layout(400.0);

    field.press(Key::ArrowDown, KeyboardModifiers::NONE);
    assert_eq!(field.controller.selection(), TextSelection::collapsed(10));

    field.press(Key::ArrowUp, KeyboardModifiers::NONE);
    assert_eq!(field.controller.selection(), TextSelection::collapsed(3));

    field.press(Key::ArrowUp, KeyboardModifiers::NONE);
    assert_eq!(field.controller.selection(), TextSelection::collapsed(0));
    assert!(!field.editable.reset_cursor_armed());
}

#[test]
fn test_pointer_input_through_queue() {
    let mut field = Field::new("hello world", TextSelection::collapsed(0), MemoryClipboard::new());
    field.editable.set_has_focus(false);
    field.layout(400.0);

    let now = Instant::now();
    let sender = field.editable.input_sender();
    for (at, time) in [
        (Point::new(72.0, 5.0), now),
        (Point::new(74.0, 5.0), now + Duration::from_millis(120)),
    ] {
        sender
            .send(EditableInput::Pointer(PointerEvent::down(1, at, time)))
            .expect("queue open");
        sender
            .send(EditableInput::Pointer(PointerEvent::up(
                1,
                at,
                time + Duration::from_millis(40),
            )))
            .expect("queue open");
    }
    assert_eq!(field.editable.process_input(), 4);

    assert_eq!(field.controller.selection(), TextSelection::new(6, 11));
    assert_eq!(
        field.causes.lock().last(),
        Some(&SelectionChangedCause::DoubleTap)
    );
}

#[test]
fn test_paint_follows_selection_and_cursor_visibility() {
    let mut field = Field::new("hello", TextSelection::collapsed(2), MemoryClipboard::new());
    field.layout(100.0);
    let mut renderer = RecordingRenderer::new();

    field.editable.paint(&mut renderer, Point::new(5.0, 5.0));
    assert_eq!(renderer.take_commands().len(), 1);

    field.show_cursor.set(true);
    assert!(field.editable.needs_paint());
    field.editable.paint(&mut renderer, Point::new(5.0, 5.0));
    assert_eq!(
        renderer.take_commands()[0],
        DrawCommand::FillRect {
            rect: Rect::new(25.0, 7.0, 1.0, 16.0),
            color: Color::BLUE,
        }
    );

    field.press(Key::ArrowRight, KeyboardModifiers::SHIFT);
    field.editable.paint(&mut renderer, Point::ZERO);
    assert!(matches!(
        renderer.take_commands()[0],
        DrawCommand::FillRect { rect, .. } if rect == Rect::new(20.0, 0.0, 10.0, 20.0)
    ));
}

#[test]
fn test_layout_is_measured_once_per_width() {
    let mut field = Field::new("hello world", TextSelection::collapsed(0), MemoryClipboard::new());
    field.layout(400.0);
    field.layout(400.0);
    let _ = field.editable.get_word_right(TextPosition::new(0));
    let _ = field.editable.get_line_end_position(TextPosition::new(0), None);
    assert_eq!(field.editable.measure_count(), 1);

    field.controller.set_text_editing_value(TextEditingValue::new(
        "hello there world",
        TextSelection::collapsed(0),
    ));
    field.sync();
    assert!(field.editable.needs_layout());
    field.layout(400.0);
    assert_eq!(field.editable.measure_count(), 2);
}

#[test]
fn test_scrolling_relayouts_and_shifts_taps() {
    let mut field = Field::new(
        &"x".repeat(40),
        TextSelection::collapsed(0),
        MemoryClipboard::new(),
    );
    field.layout(100.0);
    assert!(field.offset.max_scroll_extent().is_some_and(|max| max > 0.0));
    assert!(!field.editable.needs_layout());

    field.offset.jump_to(100.0);
    assert!(field.editable.needs_layout());
    assert_eq!(field.offset.pixels(), 100.0);

    field.editable.handle_tap_down(Point::new(20.0, 5.0));
    assert_eq!(field.controller.selection(), TextSelection::collapsed(12));
}

#[test]
fn test_detached_editable_leaves_services_clean() {
    let field = Field::new("abc", TextSelection::collapsed(0), MemoryClipboard::new());
    let Field {
        editable,
        keyboard,
        offset,
        show_cursor,
        ..
    } = field;
    assert_eq!(keyboard.listener_count(), 1);
    assert_eq!(show_cursor.listener_count(), 1);
    assert_eq!(offset.listener_count(), 1);

    drop(editable);
    assert_eq!(keyboard.listener_count(), 0);
    assert_eq!(show_cursor.listener_count(), 0);
    assert_eq!(offset.listener_count(), 0);
}
