//! Advanced-mode service enumeration via launchd
//!
//! `launchctl list` prints one line per loaded job: PID, last exit status,
//! and label. Only labels in Apple's namespace are kept; third-party agents
//! are not offered for restart.

use anyhow::{Context, Result, bail};
use tokio::process::Command;

/// Only system daemons in Apple's namespace are offered in advanced mode.
const VENDOR_PREFIX: &str = "com.apple";

/// Enumerate currently loaded Apple system services.
///
/// Fails wholesale on spawn error or non-zero exit; never returns a partial
/// list.
pub async fn list_system_services() -> Result<Vec<String>> {
    let services = run_list_command("launchctl").await?;
    log::info!("enumerated {} loaded system services", services.len());
    Ok(services)
}

async fn run_list_command(program: &str) -> Result<Vec<String>> {
    let output = Command::new(program)
        .arg("list")
        .output()
        .await
        .with_context(|| format!("failed to run {} list", program))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("{} list failed: {}", program, stderr.trim());
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(parse_service_list(&stdout))
}

/// Extract service labels from `launchctl list` output: keep lines in the
/// vendor namespace and take the third whitespace-separated column.
fn parse_service_list(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter(|line| line.contains(VENDOR_PREFIX))
        .filter_map(|line| line.split_whitespace().nth(2))
        .map(|label| label.trim().to_string())
        .filter(|label| !label.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
PID\tStatus\tLabel
312\t0\tcom.apple.Dock.agent
-\t0\tcom.apple.bluetoothd
455\t-9\tcom.example.thirdparty
-\t0\tcom.apple.WindowServer
";

    #[test]
    fn keeps_vendor_labels_only() {
        let services = parse_service_list(SAMPLE);
        assert_eq!(
            services,
            vec![
                "com.apple.Dock.agent",
                "com.apple.bluetoothd",
                "com.apple.WindowServer",
            ]
        );
    }

    #[test]
    fn takes_third_column() {
        let services = parse_service_list("123 0 com.apple.foo extra junk\n");
        assert_eq!(services, vec!["com.apple.foo"]);
    }

    #[test]
    fn skips_short_lines() {
        // A vendor-prefixed line without a third column yields nothing.
        let services = parse_service_list("com.apple.orphan\n");
        assert!(services.is_empty());
    }

    #[test]
    fn empty_output_is_empty_list() {
        assert!(parse_service_list("").is_empty());
    }

    #[tokio::test]
    async fn enumeration_failure_is_an_error_not_an_empty_list() {
        let result = run_list_command("definitely-not-a-service-manager").await;
        assert!(result.is_err());
    }
}
