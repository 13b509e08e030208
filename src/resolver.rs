//! Executable path resolution
//!
//! Mirrors the shell's lookup: ask `which` first, then probe the standard
//! system binary directories in order. A missing executable is a normal
//! outcome (None), not an error.

use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Conventional locations probed when `which` comes up empty.
const FALLBACK_DIRS: &[&str] = &["/usr/bin", "/bin", "/usr/sbin", "/sbin"];

pub struct Resolver {
    shell_probe: bool,
    fallback_dirs: Vec<PathBuf>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self {
            shell_probe: true,
            fallback_dirs: FALLBACK_DIRS.iter().map(PathBuf::from).collect(),
        }
    }
}

impl Resolver {
    /// Resolver restricted to a fixed directory list, skipping the `which`
    /// probe. Deterministic, used by tests.
    pub fn fixed(dirs: Vec<PathBuf>) -> Self {
        Self {
            shell_probe: false,
            fallback_dirs: dirs,
        }
    }

    /// Find the absolute path of a short executable name.
    pub async fn resolve(&self, name: &str) -> Option<PathBuf> {
        if self.shell_probe {
            if let Some(path) = which_probe(name).await {
                log::debug!("resolved {} via which: {}", name, path.display());
                return Some(path);
            }
        }

        for dir in &self.fallback_dirs {
            let candidate = dir.join(name);
            if is_file(&candidate).await {
                log::debug!("resolved {} via probe: {}", name, candidate.display());
                return Some(candidate);
            }
        }

        log::warn!("executable '{}' not found in PATH or fallback dirs", name);
        None
    }
}

/// Ask `which` for the path. Any failure (spawn error, non-zero exit, empty
/// output) falls through to directory probing.
async fn which_probe(name: &str) -> Option<PathBuf> {
    let output = Command::new("which").arg(name).output().await.ok()?;
    if !output.status.success() {
        return None;
    }
    let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

async fn is_file(path: &Path) -> bool {
    match tokio::fs::metadata(path).await {
        Ok(meta) => meta.is_file(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn finds_executable_in_fixed_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("killall"), b"#!/bin/sh\n").unwrap();

        let resolver = Resolver::fixed(vec![dir.path().to_path_buf()]);
        let path = resolver.resolve("killall").await.unwrap();
        assert_eq!(path, dir.path().join("killall"));
    }

    #[tokio::test]
    async fn probes_dirs_in_order() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        std::fs::write(first.path().join("tool"), b"").unwrap();
        std::fs::write(second.path().join("tool"), b"").unwrap();

        let resolver = Resolver::fixed(vec![
            first.path().to_path_buf(),
            second.path().to_path_buf(),
        ]);
        assert_eq!(
            resolver.resolve("tool").await.unwrap(),
            first.path().join("tool")
        );
    }

    #[tokio::test]
    async fn not_found_is_none_and_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = Resolver::fixed(vec![dir.path().to_path_buf()]);
        assert!(resolver.resolve("no-such-tool").await.is_none());
        assert!(resolver.resolve("no-such-tool").await.is_none());
    }

    #[tokio::test]
    async fn repeated_resolution_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("launchctl"), b"").unwrap();

        let resolver = Resolver::fixed(vec![dir.path().to_path_buf()]);
        let a = resolver.resolve("launchctl").await;
        let b = resolver.resolve("launchctl").await;
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn directories_are_not_executables() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("killall")).unwrap();

        let resolver = Resolver::fixed(vec![dir.path().to_path_buf()]);
        assert!(resolver.resolve("killall").await.is_none());
    }

    #[tokio::test]
    async fn default_resolver_falls_back_for_unknown_name() {
        let resolver = Resolver::default();
        assert!(
            resolver
                .resolve("definitely-not-a-real-executable-9f2c")
                .await
                .is_none()
        );
    }
}
