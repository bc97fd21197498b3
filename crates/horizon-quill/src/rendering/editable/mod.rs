//! The editable-text render object.
//!
//! [`RenderEditable`] lays out one paragraph of text, draws the caret and
//! selection highlight, scrolls when the text is larger than its box, and
//! turns keyboard and pointer input into selection changes and clipboard
//! edits.
//!
//! It never edits its own text. Selection changes go to the
//! selection-changed callback and text edits go to the
//! [`TextSelectionDelegate`]; the owner then pushes the resulting text and
//! selection back with [`set_text`](RenderEditable::set_text) and
//! [`set_selection`](RenderEditable::set_selection).
//!
//! # Input
//!
//! Keyboard, pointer and clipboard-completion events are funnelled through
//! one ordered queue. Hosts push into it (or let the focused editable's
//! [`RawKeyboard`] subscription do so) and call
//! [`process_input`](RenderEditable::process_input) once per frame.
//!
//! ```ignore
//! let mut editable = RenderEditable::new("hello", painter, services, EditableConfig::default());
//! editable.attach();
//! editable.set_has_focus(true);
//! editable.perform_layout(BoxConstraints::tight_for_width(200.0, f32::INFINITY));
//!
//! keyboard.dispatch(RawKeyEvent::down(Key::ArrowLeft, KeyboardModifiers::NONE));
//! editable.process_input();
//! editable.paint(&mut renderer, Point::ZERO);
//! ```

mod config;
mod keyboard;
mod layout;
mod paint;
mod pointer;

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use horizon_quill_core::logging::{span_names, targets};
use horizon_quill_core::{ConnectionId, EventQueue, EventSender, PerfSpan, ValueNotifier};
use horizon_quill_render::text::{TextAlign, TextBox, TextDirection, TextPainter, TextSelection, char_len};
use horizon_quill_render::{Color, Point, Rect, Size};

use crate::gesture::{DoubleTapGestureRecognizer, LongPressGestureRecognizer, TapGestureRecognizer};
use crate::input::{PointerEvent, RawKeyEvent, RawKeyboard, TargetPlatform};
use crate::platform::ClipboardService;
use crate::services::TextSelectionDelegate;

use super::box_constraints::BoxConstraints;
use super::viewport::ViewportOffset;

pub use config::EditableConfig;

/// Character shown in place of every character of obscured text.
pub const OBSCURING_CHARACTER: char = '•';

/// Horizontal gap kept free after the last glyph for the caret.
pub(crate) const CARET_GAP: f32 = 1.0;

/// Vertical inset of the caret from the top and bottom of its line.
pub(crate) const CARET_HEIGHT_OFFSET: f32 = 2.0;

/// Width reserved for the caret when computing the layout width.
pub(crate) const CARET_WIDTH: f32 = 1.0;

/// Identifies an editable in selection-changed callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EditableId(u64);

impl EditableId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// What led to a selection change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionChangedCause {
    Tap,
    DoubleTap,
    LongPress,
    Keyboard,
}

/// Generation tag of a paste request. Only the newest request is honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PasteToken(u64);

impl PasteToken {
    pub const fn new(generation: u64) -> Self {
        Self(generation)
    }

    pub fn generation(self) -> u64 {
        self.0
    }
}

/// An event waiting in an editable's input queue.
#[derive(Debug, Clone, PartialEq)]
pub enum EditableInput {
    Key(RawKeyEvent),
    Pointer(PointerEvent),
    /// The clipboard answered a paste request.
    PasteCompleted {
        token: PasteToken,
        text: Option<String>,
    },
}

/// Receives every selection the editable wants applied.
pub type SelectionChangedHandler =
    Box<dyn FnMut(TextSelection, EditableId, SelectionChangedCause) + Send>;

/// Receives the caret rectangle whenever it moves.
pub type CaretChangedHandler = Box<dyn FnMut(Rect) + Send>;

/// Shared services an editable talks to.
#[derive(Clone)]
pub struct EditableServices {
    /// Scroll position of the editable's viewport.
    pub offset: Arc<dyn ViewportOffset>,
    /// Whether the caret is currently visible (blinks are driven outside).
    pub show_cursor: Arc<ValueNotifier<bool>>,
    pub text_selection_delegate: Arc<dyn TextSelectionDelegate>,
    pub clipboard: Arc<dyn ClipboardService>,
    pub keyboard: Arc<RawKeyboard>,
}

impl fmt::Debug for EditableServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditableServices")
            .field("offset", &self.offset)
            .field("show_cursor", &self.show_cursor)
            .field("keyboard", &self.keyboard)
            .finish_non_exhaustive()
    }
}

/// Layout and paint flags shared with listeners.
#[derive(Debug, Clone, Default)]
pub struct DirtyState {
    needs_layout: Arc<AtomicBool>,
    needs_paint: Arc<AtomicBool>,
}

impl DirtyState {
    /// Layout implies paint.
    pub fn mark_needs_layout(&self) {
        self.needs_layout.store(true, Ordering::Release);
        self.needs_paint.store(true, Ordering::Release);
    }

    pub fn mark_needs_paint(&self) {
        self.needs_paint.store(true, Ordering::Release);
    }

    pub fn needs_layout(&self) -> bool {
        self.needs_layout.load(Ordering::Acquire)
    }

    pub fn needs_paint(&self) -> bool {
        self.needs_paint.load(Ordering::Acquire)
    }

    fn clear_layout(&self) {
        self.needs_layout.store(false, Ordering::Release);
    }

    fn clear_paint(&self) {
        self.needs_paint.store(false, Ordering::Release);
    }
}

#[derive(Debug, Clone, Copy)]
struct AttachedListeners {
    offset: ConnectionId,
    show_cursor: ConnectionId,
}

/// A render object for a single block of editable text.
pub struct RenderEditable {
    id: EditableId,
    painter: Box<dyn TextPainter>,
    text: String,
    services: EditableServices,

    cursor_color: Option<Color>,
    cursor_width: f32,
    cursor_radius: Option<f32>,
    has_focus: bool,
    max_lines: Option<usize>,
    selection_color: Option<Color>,
    selection: Option<TextSelection>,
    obscure_text: bool,
    ignore_pointer: bool,
    enable_interactive_selection: bool,
    platform: TargetPlatform,
    global_origin: Point,
    on_selection_changed: Option<SelectionChangedHandler>,
    on_caret_changed: Option<CaretChangedHandler>,

    // Layout cache.
    text_layout_last_width: Option<f32>,
    caret_prototype: Rect,
    selection_rects: Option<Vec<TextBox>>,
    measure_count: usize,
    constraints: Option<BoxConstraints>,
    size: Option<Size>,
    has_visual_overflow: bool,
    last_caret_rect: Option<Rect>,

    // Keyboard-driven selection state.
    base_offset: usize,
    extent_offset: usize,
    previous_cursor_location: usize,
    reset_cursor: bool,

    // Pointer-driven selection state.
    last_tap_down_position: Option<Point>,
    tap: TapGestureRecognizer,
    double_tap: DoubleTapGestureRecognizer,
    long_press: LongPressGestureRecognizer,

    pending_paste: Option<PasteToken>,
    paste_generation: u64,

    input: EventQueue<EditableInput>,
    keyboard_subscription: Option<ConnectionId>,
    attached: Option<AttachedListeners>,
    dirty: DirtyState,
}

impl RenderEditable {
    /// Create an editable showing `text`.
    ///
    /// The editable starts detached, unfocused and without a selection.
    pub fn new(
        text: impl Into<String>,
        painter: Box<dyn TextPainter>,
        services: EditableServices,
        config: EditableConfig,
    ) -> Self {
        debug_assert!(
            config.max_lines != Some(0),
            "max_lines must be None or positive"
        );
        debug_assert!(
            !services.show_cursor.get() || config.cursor_color.is_some(),
            "a visible cursor needs a cursor color"
        );

        let mut editable = Self {
            id: EditableId::next(),
            painter,
            text: text.into(),
            services,
            cursor_color: config.cursor_color,
            cursor_width: config.cursor_width,
            cursor_radius: config.cursor_radius,
            has_focus: false,
            max_lines: config.max_lines,
            selection_color: config.selection_color,
            selection: None,
            obscure_text: config.obscure_text,
            ignore_pointer: config.ignore_pointer,
            enable_interactive_selection: config.enable_interactive_selection,
            platform: config.platform,
            global_origin: Point::ZERO,
            on_selection_changed: None,
            on_caret_changed: None,
            text_layout_last_width: None,
            caret_prototype: Rect::ZERO,
            selection_rects: None,
            measure_count: 0,
            constraints: None,
            size: None,
            has_visual_overflow: false,
            last_caret_rect: None,
            base_offset: 0,
            extent_offset: 0,
            previous_cursor_location: 0,
            reset_cursor: false,
            last_tap_down_position: None,
            tap: TapGestureRecognizer::new(config.gestures),
            double_tap: DoubleTapGestureRecognizer::new(config.gestures),
            long_press: LongPressGestureRecognizer::new(config.gestures),
            pending_paste: None,
            paste_generation: 0,
            input: EventQueue::new(),
            keyboard_subscription: None,
            attached: None,
            dirty: DirtyState::default(),
        };
        editable.painter.set_text_align(config.text_align);
        editable.painter.set_text_direction(config.text_direction);
        editable.painter.set_text_scale_factor(config.text_scale_factor);
        editable.sync_painter_text();
        editable.dirty.mark_needs_layout();
        editable
    }

    pub fn id(&self) -> EditableId {
        self.id
    }

    fn sync_painter_text(&mut self) {
        if self.obscure_text {
            let obscured: String =
                std::iter::repeat_n(OBSCURING_CHARACTER, char_len(&self.text)).collect();
            self.painter.set_text(&obscured);
        } else {
            self.painter.set_text(&self.text);
        }
    }

    /// Drop the cached layout width so the next pass re-measures.
    fn mark_needs_text_layout(&mut self) {
        self.text_layout_last_width = None;
        self.dirty.mark_needs_layout();
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    /// The logical text (never obscured).
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.text == text {
            return;
        }
        self.text = text;
        self.sync_painter_text();
        self.mark_needs_text_layout();
    }

    pub fn text_align(&self) -> TextAlign {
        self.painter.text_align()
    }

    pub fn set_text_align(&mut self, align: TextAlign) {
        if self.painter.text_align() == align {
            return;
        }
        self.painter.set_text_align(align);
        self.mark_needs_text_layout();
    }

    pub fn text_direction(&self) -> TextDirection {
        self.painter.text_direction()
    }

    pub fn set_text_direction(&mut self, direction: TextDirection) {
        if self.painter.text_direction() == direction {
            return;
        }
        self.painter.set_text_direction(direction);
        self.mark_needs_text_layout();
    }

    pub fn text_scale_factor(&self) -> f32 {
        self.painter.text_scale_factor()
    }

    pub fn set_text_scale_factor(&mut self, factor: f32) {
        if self.painter.text_scale_factor() == factor {
            return;
        }
        self.painter.set_text_scale_factor(factor);
        self.mark_needs_text_layout();
    }

    pub fn max_lines(&self) -> Option<usize> {
        self.max_lines
    }

    pub fn set_max_lines(&mut self, max_lines: Option<usize>) {
        debug_assert!(max_lines != Some(0), "max_lines must be None or positive");
        if self.max_lines == max_lines {
            return;
        }
        self.max_lines = max_lines;
        self.mark_needs_text_layout();
    }

    pub fn cursor_color(&self) -> Option<Color> {
        self.cursor_color
    }

    pub fn set_cursor_color(&mut self, color: Option<Color>) {
        if self.cursor_color == color {
            return;
        }
        self.cursor_color = color;
        self.dirty.mark_needs_paint();
    }

    pub fn show_cursor(&self) -> &Arc<ValueNotifier<bool>> {
        &self.services.show_cursor
    }

    /// Swap the caret visibility notifier, moving the paint listener along
    /// when attached.
    pub fn set_show_cursor(&mut self, show_cursor: Arc<ValueNotifier<bool>>) {
        if Arc::ptr_eq(&self.services.show_cursor, &show_cursor) {
            return;
        }
        if let Some(listeners) = self.attached.as_mut() {
            self.services.show_cursor.remove_listener(listeners.show_cursor);
            let dirty = self.dirty.clone();
            listeners.show_cursor = show_cursor.add_listener(move |_| dirty.mark_needs_paint());
        }
        self.services.show_cursor = show_cursor;
        self.dirty.mark_needs_paint();
    }

    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    /// Focus subscribes the editable to its raw keyboard; losing focus
    /// unsubscribes.
    pub fn set_has_focus(&mut self, has_focus: bool) {
        if self.has_focus == has_focus {
            return;
        }
        self.has_focus = has_focus;
        if has_focus {
            debug_assert!(
                self.keyboard_subscription.is_none(),
                "keyboard listener already attached"
            );
            if self.keyboard_subscription.is_none() {
                let sender = self.input.sender();
                let id = self.services.keyboard.subscribe(move |event| {
                    // A closed queue means the editable is gone.
                    let _ = sender.send(EditableInput::Key(*event));
                });
                self.keyboard_subscription = Some(id);
            }
        } else if let Some(id) = self.keyboard_subscription.take() {
            self.services.keyboard.unsubscribe(id);
        }
        tracing::debug!(target: targets::EDITABLE, id = self.id.0, has_focus, "focus changed");
    }

    /// Whether the editable currently listens to its raw keyboard.
    pub fn is_listening_to_keyboard(&self) -> bool {
        self.keyboard_subscription.is_some()
    }

    pub fn selection(&self) -> Option<TextSelection> {
        self.selection
    }

    pub fn set_selection(&mut self, selection: Option<TextSelection>) {
        if self.selection == selection {
            return;
        }
        debug_assert!(
            selection.is_none_or(|s| s.is_within(char_len(&self.text))),
            "selection {selection:?} out of range for text of {} chars",
            char_len(&self.text)
        );
        self.selection = selection;
        self.selection_rects = None;
        self.dirty.mark_needs_paint();
    }

    pub fn selection_color(&self) -> Option<Color> {
        self.selection_color
    }

    pub fn set_selection_color(&mut self, color: Option<Color>) {
        if self.selection_color == color {
            return;
        }
        self.selection_color = color;
        self.dirty.mark_needs_paint();
    }

    pub fn offset(&self) -> &Arc<dyn ViewportOffset> {
        &self.services.offset
    }

    /// Swap the scroll offset, moving the layout listener along when
    /// attached.
    pub fn set_offset(&mut self, offset: Arc<dyn ViewportOffset>) {
        if Arc::ptr_eq(&self.services.offset, &offset) {
            return;
        }
        if let Some(listeners) = self.attached.as_mut() {
            self.services.offset.remove_listener(listeners.offset);
            let dirty = self.dirty.clone();
            listeners.offset = offset.add_listener(Box::new(move |_| dirty.mark_needs_layout()));
        }
        self.services.offset = offset;
        self.dirty.mark_needs_layout();
    }

    pub fn cursor_width(&self) -> f32 {
        self.cursor_width
    }

    pub fn set_cursor_width(&mut self, width: f32) {
        if self.cursor_width == width {
            return;
        }
        self.cursor_width = width;
        self.dirty.mark_needs_layout();
    }

    pub fn cursor_radius(&self) -> Option<f32> {
        self.cursor_radius
    }

    pub fn set_cursor_radius(&mut self, radius: Option<f32>) {
        if self.cursor_radius == radius {
            return;
        }
        self.cursor_radius = radius;
        self.dirty.mark_needs_paint();
    }

    pub fn obscure_text(&self) -> bool {
        self.obscure_text
    }

    pub fn set_obscure_text(&mut self, obscure: bool) {
        if self.obscure_text == obscure {
            return;
        }
        self.obscure_text = obscure;
        self.sync_painter_text();
        self.mark_needs_text_layout();
    }

    pub fn ignore_pointer(&self) -> bool {
        self.ignore_pointer
    }

    pub fn set_ignore_pointer(&mut self, ignore: bool) {
        self.ignore_pointer = ignore;
    }

    pub fn enable_interactive_selection(&self) -> bool {
        self.enable_interactive_selection
    }

    pub fn set_enable_interactive_selection(&mut self, enabled: bool) {
        self.enable_interactive_selection = enabled;
    }

    pub fn platform(&self) -> TargetPlatform {
        self.platform
    }

    pub fn set_platform(&mut self, platform: TargetPlatform) {
        self.platform = platform;
    }

    /// Top-left of the editable in global (window) coordinates.
    pub fn set_global_origin(&mut self, origin: Point) {
        self.global_origin = origin;
    }

    pub fn set_on_selection_changed(&mut self, handler: Option<SelectionChangedHandler>) {
        self.on_selection_changed = handler;
    }

    pub fn set_on_caret_changed(&mut self, handler: Option<CaretChangedHandler>) {
        self.on_caret_changed = handler;
    }

    pub fn text_selection_delegate(&self) -> &Arc<dyn TextSelectionDelegate> {
        &self.services.text_selection_delegate
    }

    pub fn needs_layout(&self) -> bool {
        self.dirty.needs_layout()
    }

    pub fn needs_paint(&self) -> bool {
        self.dirty.needs_paint()
    }

    /// How many times the text has been measured.
    pub fn measure_count(&self) -> usize {
        self.measure_count
    }

    /// Whether a vertical move at a document edge left the column restore
    /// armed.
    pub fn reset_cursor_armed(&self) -> bool {
        self.reset_cursor
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    pub fn is_attached(&self) -> bool {
        self.attached.is_some()
    }

    /// Start listening to the scroll offset (relayout) and the caret
    /// visibility notifier (repaint).
    pub fn attach(&mut self) {
        debug_assert!(self.attached.is_none(), "editable attached twice");
        if self.attached.is_some() {
            return;
        }
        let dirty = self.dirty.clone();
        let offset = self
            .services
            .offset
            .add_listener(Box::new(move |_| dirty.mark_needs_layout()));
        let dirty = self.dirty.clone();
        let show_cursor = self
            .services
            .show_cursor
            .add_listener(move |_| dirty.mark_needs_paint());
        self.attached = Some(AttachedListeners {
            offset,
            show_cursor,
        });
        tracing::trace!(target: targets::EDITABLE, id = self.id.0, "attached");
    }

    /// Remove every listener registered by [`attach`](Self::attach) and any
    /// keyboard subscription.
    pub fn detach(&mut self) {
        if let Some(listeners) = self.attached.take() {
            self.services.offset.remove_listener(listeners.offset);
            self.services
                .show_cursor
                .remove_listener(listeners.show_cursor);
            tracing::trace!(target: targets::EDITABLE, id = self.id.0, "detached");
        }
        if let Some(id) = self.keyboard_subscription.take() {
            self.services.keyboard.unsubscribe(id);
        }
    }

    // -------------------------------------------------------------------------
    // Input queue
    // -------------------------------------------------------------------------

    /// A producer handle for this editable's input queue.
    pub fn input_sender(&self) -> EventSender<EditableInput> {
        self.input.sender()
    }

    pub fn push_input(&self, event: EditableInput) {
        self.input.push(event);
    }

    /// Handle every queued event in order. Returns how many were handled.
    pub fn process_input(&mut self) -> usize {
        let _span = PerfSpan::new(span_names::INPUT);
        let mut handled = 0;
        while let Some(event) = self.input.pop() {
            handled += 1;
            match event {
                EditableInput::Key(event) => self.handle_key_event(&event),
                EditableInput::Pointer(event) => self.handle_pointer_event(&event),
                EditableInput::PasteCompleted { token, text } => {
                    self.handle_paste_completed(token, text)
                }
            }
        }
        handled
    }

    /// Report `selection` to the selection-changed callback.
    ///
    /// Returns false when no callback is registered.
    fn notify_selection_changed(
        &mut self,
        selection: TextSelection,
        cause: SelectionChangedCause,
    ) -> bool {
        let id = self.id;
        match self.on_selection_changed.as_mut() {
            Some(handler) => {
                tracing::debug!(
                    target: targets::EDITABLE,
                    id = id.0,
                    base = selection.base_offset,
                    extent = selection.extent_offset,
                    ?cause,
                    "selection changed"
                );
                handler(selection, id, cause);
                true
            }
            None => false,
        }
    }

    fn text_len(&self) -> usize {
        char_len(&self.text)
    }
}

impl Drop for RenderEditable {
    fn drop(&mut self) {
        self.detach();
    }
}

impl fmt::Debug for RenderEditable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderEditable")
            .field("id", &self.id)
            .field("text", &self.text)
            .field("cursor_color", &self.cursor_color)
            .field("show_cursor", &self.services.show_cursor.get())
            .field("max_lines", &self.max_lines)
            .field("selection_color", &self.selection_color)
            .field("text_scale_factor", &self.painter.text_scale_factor())
            .field("selection", &self.selection)
            .field("offset", &self.services.offset.pixels())
            .field("has_focus", &self.has_focus)
            .field("size", &self.size)
            .finish()
    }
}

static_assertions::assert_impl_all!(RenderEditable: Send);
static_assertions::assert_impl_all!(EditableInput: Send);

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use horizon_quill_render::text::{FixedAdvanceMetrics, FixedAdvanceTextPainter};
    use parking_lot::Mutex;

    use super::*;
    use crate::input::{Key, KeyboardModifiers};
    use crate::platform::MemoryClipboard;
    use crate::rendering::{BoxConstraints, ScrollPosition};
    use crate::services::{TextEditingController, TextEditingValue};

    type Recorded = Arc<Mutex<Vec<(TextSelection, SelectionChangedCause)>>>;

    /// The services behind a test editable, plus a record of every
    /// selection it reported.
    pub(super) struct Harness {
        pub offset: Arc<ScrollPosition>,
        pub show_cursor: Arc<ValueNotifier<bool>>,
        pub controller: Arc<TextEditingController>,
        pub clipboard: Arc<MemoryClipboard>,
        pub keyboard: Arc<RawKeyboard>,
        recorded: Recorded,
    }

    impl Harness {
        fn new(clipboard: MemoryClipboard) -> Self {
            Self {
                offset: Arc::new(ScrollPosition::new(0.0)),
                show_cursor: Arc::new(ValueNotifier::new(false)),
                controller: Arc::new(TextEditingController::default()),
                clipboard: Arc::new(clipboard),
                keyboard: Arc::new(RawKeyboard::new()),
                recorded: Arc::default(),
            }
        }

        fn services(&self) -> EditableServices {
            EditableServices {
                offset: self.offset.clone(),
                show_cursor: self.show_cursor.clone(),
                text_selection_delegate: self.controller.clone(),
                clipboard: self.clipboard.clone(),
                keyboard: self.keyboard.clone(),
            }
        }

        /// Record selections and apply them to the controller, the way an
        /// owning text field would.
        pub fn track(&self, editable: &mut RenderEditable) {
            let recorded = self.recorded.clone();
            let controller = self.controller.clone();
            editable.set_on_selection_changed(Some(Box::new(move |selection, _, cause| {
                recorded.lock().push((selection, cause));
                controller.set_selection(selection);
            })));
        }

        /// Push the controller's value into the editable.
        pub fn sync(&self, editable: &mut RenderEditable) {
            let value = self.controller.text_editing_value();
            editable.set_text(value.text);
            editable.set_selection(Some(value.selection));
        }

        pub fn set_value(&self, editable: &mut RenderEditable, text: &str, selection: TextSelection) {
            self.controller
                .set_text_editing_value(TextEditingValue::new(text, selection));
            self.sync(editable);
        }

        pub fn selections(&self) -> Vec<TextSelection> {
            self.recorded.lock().iter().map(|(s, _)| *s).collect()
        }

        pub fn causes(&self) -> Vec<SelectionChangedCause> {
            self.recorded.lock().iter().map(|(_, c)| *c).collect()
        }

        pub fn last_selection(&self) -> Option<TextSelection> {
            self.recorded.lock().last().map(|(s, _)| *s)
        }
    }

    pub(super) fn painter() -> Box<dyn TextPainter> {
        let metrics = FixedAdvanceMetrics {
            glyph_advance: 10.0,
            line_height: 20.0,
            ascent: 15.0,
        };
        Box::new(FixedAdvanceTextPainter::new(metrics).expect("valid metrics"))
    }

    pub(super) fn editable_with(text: &str, config: EditableConfig) -> (RenderEditable, Harness) {
        let harness = Harness::new(MemoryClipboard::new());
        let config = config.with_platform(TargetPlatform::Linux);
        let editable = RenderEditable::new(text, painter(), harness.services(), config);
        (editable, harness)
    }

    pub(super) fn editable(text: &str) -> (RenderEditable, Harness) {
        editable_with(text, EditableConfig::default())
    }

    #[test]
    fn test_ids_are_unique() {
        let (a, _) = editable("a");
        let (b, _) = editable("b");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_new_editable_needs_layout() {
        let (editable, _) = editable("x");
        assert!(editable.needs_layout());
        assert!(editable.needs_paint());
        assert_eq!(editable.selection(), None);
        assert!(!editable.is_attached());
    }

    #[test]
    fn test_setters_mark_dirty() {
        let (mut editable, _) = editable("hello");
        editable.perform_layout(BoxConstraints::tight_for_width(100.0, f32::INFINITY));
        editable.dirty.clear_paint();

        editable.set_cursor_color(Some(Color::BLUE));
        assert!(editable.needs_paint());
        assert!(!editable.needs_layout());

        editable.set_text_scale_factor(2.0);
        assert!(editable.needs_layout());
        editable.perform_layout(BoxConstraints::tight_for_width(100.0, f32::INFINITY));
        assert_eq!(editable.measure_count(), 2);
        assert_eq!(editable.preferred_line_height(), 40.0);

        editable.set_text_direction(TextDirection::Rtl);
        editable.set_text_align(TextAlign::Center);
        editable.perform_layout(BoxConstraints::tight_for_width(100.0, f32::INFINITY));
        assert_eq!(editable.measure_count(), 3);
    }

    #[test]
    fn test_unchanged_values_are_noops() {
        let (mut editable, _) = editable("hello");
        editable.perform_layout(BoxConstraints::tight_for_width(100.0, f32::INFINITY));
        editable.dirty.clear_paint();

        editable.set_text("hello");
        editable.set_max_lines(Some(1));
        editable.set_obscure_text(false);
        editable.set_selection(None);
        editable.set_cursor_width(1.0);
        assert!(!editable.needs_layout());
        assert!(!editable.needs_paint());
    }

    #[test]
    fn test_focus_subscribes_once() {
        let (mut editable, harness) = editable("abc");
        editable.set_has_focus(true);
        editable.set_has_focus(true);
        assert_eq!(harness.keyboard.listener_count(), 1);
        assert!(editable.is_listening_to_keyboard());

        editable.set_has_focus(false);
        assert_eq!(harness.keyboard.listener_count(), 0);
        assert!(!editable.is_listening_to_keyboard());
    }

    #[test]
    fn test_keyboard_events_are_queued_in_order() {
        let (mut editable, harness) = editable("abc");
        harness.track(&mut editable);
        harness.set_value(&mut editable, "abc", TextSelection::collapsed(0));
        editable.set_has_focus(true);

        harness
            .keyboard
            .dispatch(RawKeyEvent::down(Key::ArrowRight, KeyboardModifiers::NONE));
        harness
            .keyboard
            .dispatch(RawKeyEvent::down(Key::A, KeyboardModifiers::CTRL));
        assert!(harness.selections().is_empty());

        assert_eq!(editable.process_input(), 2);
        assert_eq!(
            harness.selections(),
            vec![TextSelection::collapsed(1), TextSelection::new(0, 3)]
        );
        assert_eq!(editable.process_input(), 0);
    }

    #[test]
    fn test_attach_detach_pairs_listeners() {
        let (mut editable, harness) = editable("abc");
        editable.attach();
        editable.set_has_focus(true);
        assert_eq!(harness.offset.listener_count(), 1);
        assert_eq!(harness.show_cursor.listener_count(), 1);

        editable.detach();
        assert_eq!(harness.offset.listener_count(), 0);
        assert_eq!(harness.show_cursor.listener_count(), 0);
        assert_eq!(harness.keyboard.listener_count(), 0);
    }

    #[test]
    fn test_drop_detaches() {
        let (mut editable, harness) = editable("abc");
        editable.attach();
        editable.set_has_focus(true);
        drop(editable);
        assert_eq!(harness.offset.listener_count(), 0);
        assert_eq!(harness.show_cursor.listener_count(), 0);
        assert_eq!(harness.keyboard.listener_count(), 0);
    }

    #[test]
    fn test_show_cursor_change_marks_paint() {
        let (mut editable, harness) = editable_with("abc", EditableConfig::new().with_cursor_color(Color::BLUE));
        editable.perform_layout(BoxConstraints::tight_for_width(100.0, f32::INFINITY));
        editable.attach();
        editable.dirty.clear_paint();

        harness.show_cursor.set(true);
        assert!(editable.needs_paint());
        assert!(!editable.needs_layout());
    }

    #[test]
    fn test_swapping_services_rewires_listeners() {
        let (mut editable, harness) = editable("abc");
        editable.attach();

        let offset = Arc::new(ScrollPosition::new(0.0));
        editable.set_offset(offset.clone());
        assert_eq!(harness.offset.listener_count(), 0);
        assert_eq!(offset.listener_count(), 1);

        let show_cursor = Arc::new(ValueNotifier::new(false));
        editable.set_show_cursor(show_cursor.clone());
        assert_eq!(harness.show_cursor.listener_count(), 0);
        assert_eq!(show_cursor.listener_count(), 1);
    }

    #[test]
    fn test_stale_paste_is_dropped() {
        let harness = Harness::new(MemoryClipboard::deferred());
        let mut editable = RenderEditable::new(
            "ab",
            painter(),
            harness.services(),
            EditableConfig::default().with_platform(TargetPlatform::Linux),
        );
        harness.track(&mut editable);
        harness.set_value(&mut editable, "ab", TextSelection::collapsed(1));

        let paste = RawKeyEvent::down(Key::V, KeyboardModifiers::CTRL);
        editable.handle_key_event(&paste);
        editable.handle_key_event(&paste);
        assert_eq!(harness.clipboard.pending_count(), 2);

        harness.clipboard.set_text("X").unwrap();
        harness.clipboard.flush_pending();
        assert_eq!(editable.process_input(), 2);
        assert_eq!(harness.controller.text(), "aXb");
        assert_eq!(harness.controller.selection(), TextSelection::collapsed(2));
    }

    #[test]
    fn test_paste_splices_current_delegate_value() {
        let harness = Harness::new(MemoryClipboard::deferred().with_text("!"));
        let mut editable = RenderEditable::new(
            "hi",
            painter(),
            harness.services(),
            EditableConfig::default().with_platform(TargetPlatform::Linux),
        );
        harness.set_value(&mut editable, "hi", TextSelection::collapsed(2));
        editable.handle_key_event(&RawKeyEvent::down(Key::V, KeyboardModifiers::CTRL));

        // The buffer moves on before the clipboard answers.
        harness
            .controller
            .set_text_editing_value(TextEditingValue::new("hey", TextSelection::collapsed(0)));
        harness.clipboard.flush_pending();
        editable.process_input();
        assert_eq!(harness.controller.text(), "!hey");
    }

    #[test]
    fn test_debug_lists_properties() {
        let (editable, _) = editable("abc");
        let debug = format!("{editable:?}");
        assert!(debug.contains("RenderEditable"));
        assert!(debug.contains("max_lines: Some(1)"));
        assert!(debug.contains("show_cursor: false"));
    }
}
