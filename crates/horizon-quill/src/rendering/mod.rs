//! Render objects: box layout, scroll offsets and the editable-text
//! render object.

mod box_constraints;
mod editable;
mod viewport;

pub use box_constraints::BoxConstraints;
pub use editable::{
    CaretChangedHandler, DirtyState, EditableConfig, EditableId, EditableInput, EditableServices,
    OBSCURING_CHARACTER, PasteToken, RenderEditable, SelectionChangedCause,
    SelectionChangedHandler,
};
pub use viewport::{Axis, AxisDirection, OffsetListener, ScrollPosition, ViewportOffset};
