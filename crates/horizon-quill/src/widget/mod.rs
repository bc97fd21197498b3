//! Widget-level configuration and notifications.
//!
//! - [`RaisedButton`] and [`ButtonTheme`]: filled button configuration,
//!   resolved per interaction state
//! - [`ScrollNotification`]: records a scrollable emits as it moves

mod button;
mod scroll_notification;

pub use button::{
    Brightness, ButtonChild, ButtonState, ButtonTextTheme, ButtonTheme, ClipBehavior, EdgeInsets,
    HighlightChangedHandler, ICON_LABEL_GAP, PressedHandler, RaisedButton, ResolvedButton,
    TapTargetSize,
};
pub use scroll_notification::{
    DragEndDetails, DragStartDetails, DragUpdateDetails, ScrollDirection, ScrollMetrics,
    ScrollNotification, ScrollNotificationKind, default_scroll_notification_predicate,
};
