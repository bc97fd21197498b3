//! Services an editable collaborates with but does not own.

mod text_editing;

pub use text_editing::{TextEditingController, TextEditingValue, TextSelectionDelegate};
