//! Destructive-action confirmation via osascript (AppleScript)
//!
//! A modal yes/no alert that blocks until the user responds. Cancel shows
//! up as a non-zero osascript exit with "User canceled" on stderr, which is
//! an answer, not an error.

use crate::executor::WarningPrompt;
use anyhow::{Result, bail};
use std::process::Command;

pub struct AlertDialog;

impl WarningPrompt for AlertDialog {
    fn confirm(&self, warning: &str) -> Result<bool> {
        log::info!("showing warning dialog");

        // Escape quotes for AppleScript
        let escaped = warning.replace('"', "\\\"");
        let script = format!(
            "display alert \"Warning\" message \"{}\" as critical \
             buttons {{\"Cancel\", \"Continue\"}} default button \"Continue\" \
             cancel button \"Cancel\"",
            escaped
        );

        let output = Command::new("osascript").arg("-e").arg(&script).output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("User canceled") {
                log::info!("user cancelled warning dialog");
                return Ok(false);
            }
            bail!("osascript failed: {}", stderr);
        }

        // Output looks like "button returned:Continue"
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.contains("Continue"))
    }
}
