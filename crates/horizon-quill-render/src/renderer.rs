//! The 2D drawing interface used by render objects.
//!
//! [`Renderer`] is object-safe so that text painters and render objects can
//! draw through `&mut dyn Renderer` without knowing the backend.
//! [`RecordingRenderer`] is a headless backend that records every command in
//! device coordinates; hosts use it for snapshotting and tests use it to
//! inspect paint output.

use crate::types::{Color, Point, Rect, RoundedRect};

/// The core 2D rendering trait.
///
/// # State Stack
///
/// The renderer maintains a state stack (translation and clip) that can be
/// saved and restored:
///
/// ```ignore
/// renderer.save();
/// renderer.clip_rect(bounds);
/// renderer.fill_rect(caret, Color::BLUE);
/// renderer.restore();
/// ```
pub trait Renderer {
    /// Save the current render state.
    fn save(&mut self);

    /// Restore the previously saved render state.
    fn restore(&mut self);

    /// Translate subsequent drawing.
    fn translate(&mut self, tx: f32, ty: f32);

    /// Intersect the current clip with `rect` (in current coordinates).
    fn clip_rect(&mut self, rect: Rect);

    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Fill a rounded rectangle with a solid color.
    fn fill_rounded_rect(&mut self, rect: RoundedRect, color: Color);

    /// Draw a run of text whose top-left corner sits at `origin`.
    fn draw_text_run(&mut self, text: &str, origin: Point, color: Color);
}

/// A single recorded drawing command, in device coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// A clip was pushed.
    Clip(Rect),
    /// A solid rectangle.
    FillRect { rect: Rect, color: Color },
    /// A solid rounded rectangle.
    FillRoundedRect { rect: RoundedRect, color: Color },
    /// A text run.
    Text {
        text: String,
        origin: Point,
        color: Color,
    },
}

#[derive(Debug, Clone, Copy, Default)]
struct RecordingState {
    translation: Point,
    clip: Option<Rect>,
}

/// A renderer that records commands instead of rasterizing them.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    state: RecordingState,
    stack: Vec<RecordingState>,
    commands: Vec<DrawCommand>,
}

impl RecordingRenderer {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All commands recorded so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded commands.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// The active clip, in device coordinates.
    pub fn clip_bounds(&self) -> Option<Rect> {
        self.state.clip
    }

    /// Depth of the save stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn to_device(&self, rect: Rect) -> Rect {
        rect.shift(self.state.translation)
    }
}

impl Renderer for RecordingRenderer {
    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.state.translation = self.state.translation.translate(tx, ty);
    }

    fn clip_rect(&mut self, rect: Rect) {
        let rect = self.to_device(rect);
        let clip = match self.state.clip {
            Some(current) => {
                let left = current.left().max(rect.left());
                let top = current.top().max(rect.top());
                let right = current.right().min(rect.right()).max(left);
                let bottom = current.bottom().min(rect.bottom()).max(top);
                Rect::from_ltrb(left, top, right, bottom)
            }
            None => rect,
        };
        self.state.clip = Some(clip);
        self.commands.push(DrawCommand::Clip(clip));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let rect = self.to_device(rect);
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn fill_rounded_rect(&mut self, rect: RoundedRect, color: Color) {
        let rect = rect.shift(self.state.translation);
        self.commands.push(DrawCommand::FillRoundedRect { rect, color });
    }

    fn draw_text_run(&mut self, text: &str, origin: Point, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            origin: origin + self.state.translation,
            color,
        });
    }
}
