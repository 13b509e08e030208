//! Toast notifications
//!
//! Tries the native notification center first, falls back to osascript if
//! native fails (more reliable outside an app bundle). Notification
//! failures are logged, never propagated; a missed toast must not fail the
//! restart itself.

use std::process::Command;

const TITLE: &str = "Restart System Process";

/// The three user-facing notification kinds.
#[derive(Debug, Clone, Copy)]
pub enum Toast {
    Progress,
    Success,
    Failure,
}

impl Toast {
    fn subtitle(self) -> &'static str {
        match self {
            Toast::Progress => "In progress",
            Toast::Success => "Done",
            Toast::Failure => "Failed",
        }
    }
}

/// Show a macOS notification
pub fn show_toast(kind: Toast, message: &str) {
    if let Err(e) = show_native(kind, message) {
        log::debug!("native notification failed ({}), falling back to osascript", e);

        if let Err(e) = show_osascript(kind, message) {
            log::error!("failed to show notification: {}", e);
        }
    }
}

/// Native notification center delivery
#[cfg(target_os = "macos")]
fn show_native(kind: Toast, message: &str) -> Result<(), String> {
    mac_notification_sys::send_notification(
        TITLE,
        Some(kind.subtitle()),
        message,
        None,
    )
    .map(|_| ())
    .map_err(|e| e.to_string())
}

#[cfg(not(target_os = "macos"))]
fn show_native(_kind: Toast, _message: &str) -> Result<(), String> {
    Err("native notifications unavailable on this platform".to_string())
}

/// osascript fallback (more reliable for unbundled binaries)
fn show_osascript(kind: Toast, message: &str) -> Result<(), String> {
    // Escape quotes in message for AppleScript
    let escaped_message = message.replace('"', "\\\"");

    let script = format!(
        "display notification \"{}\" with title \"{}\" subtitle \"{}\"",
        escaped_message,
        TITLE,
        kind.subtitle()
    );

    let output = Command::new("osascript")
        .arg("-e")
        .arg(&script)
        .output()
        .map_err(|e| format!("failed to execute osascript: {}", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("osascript failed: {}", stderr));
    }

    log::debug!("osascript notification delivered: {}", message);
    Ok(())
}
