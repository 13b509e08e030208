//! macOS presentation integration
//!
//! Everything the user actually sees lives here: toast notifications and
//! the destructive-action confirmation dialog. Both go through osascript
//! when the native path is unavailable.

pub mod dialog;
pub mod notifications;

pub use dialog::AlertDialog;
pub use notifications::{Toast, show_toast};
