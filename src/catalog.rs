//! Static catalog of restartable system processes
//!
//! Two tables: label → kill target (the argument handed to killall) and
//! label → warning text for the destructive entries. The warning table must
//! stay a subset of the target table; validate() enforces that at startup.

use anyhow::{Result, bail};
use lazy_static::lazy_static;
use std::collections::HashMap;

/// Label → kill target, in menu order.
///
/// The kill target is either a bare process name or a signal + process name
/// pair (split on whitespace before being passed to killall).
pub const TARGETS: &[(&str, &str)] = &[
    ("Finder", "Finder"),
    ("Dock", "Dock"),
    ("SystemUIServer (e.g. Menu Bar)", "SystemUIServer"),
    ("Audio", "coreaudiod"),
    ("Bluetooth", "bluetoothd"),
    ("WindowServer", "-HUP WindowServer"),
];

/// Label → warning text, only for entries that deserve a confirmation step.
pub const WARNINGS: &[(&str, &str)] = &[(
    "WindowServer",
    "This will close all open applications and log you out.",
)];

lazy_static! {
    static ref TARGET_MAP: HashMap<&'static str, &'static str> =
        TARGETS.iter().copied().collect();
    static ref WARNING_MAP: HashMap<&'static str, &'static str> =
        WARNINGS.iter().copied().collect();
}

/// Display labels in menu order
pub fn labels() -> impl Iterator<Item = &'static str> {
    TARGETS.iter().map(|(label, _)| *label)
}

/// Look up the killall argument for a label
pub fn kill_target_for(label: &str) -> Option<&'static str> {
    TARGET_MAP.get(label).copied()
}

/// Look up the warning text for a label, if it has one
pub fn warning_for(label: &str) -> Option<&'static str> {
    WARNING_MAP.get(label).copied()
}

/// Check table consistency: unique labels, and every warning label must
/// exist in the target table. Called once from main before any action.
pub fn validate() -> Result<()> {
    if TARGET_MAP.len() != TARGETS.len() {
        bail!("duplicate labels in target table");
    }
    for (label, _) in WARNINGS {
        if !TARGET_MAP.contains_key(label) {
            bail!("warning for unknown target '{}'", label);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_consistent() {
        validate().unwrap();
    }

    #[test]
    fn lookup_known_label() {
        assert_eq!(kill_target_for("Dock"), Some("Dock"));
        assert_eq!(kill_target_for("Audio"), Some("coreaudiod"));
        assert_eq!(kill_target_for("WindowServer"), Some("-HUP WindowServer"));
    }

    #[test]
    fn lookup_unknown_label() {
        assert_eq!(kill_target_for("NotAProcess"), None);
        assert_eq!(warning_for("NotAProcess"), None);
    }

    #[test]
    fn only_windowserver_warns() {
        assert!(warning_for("WindowServer").is_some());
        for label in labels().filter(|l| *l != "WindowServer") {
            assert_eq!(warning_for(label), None, "unexpected warning for {}", label);
        }
    }

    #[test]
    fn labels_keep_menu_order() {
        let first: Vec<&str> = labels().take(2).collect();
        assert_eq!(first, vec!["Finder", "Dock"]);
    }
}
