//! Idempotency checks
//!
//! Read-only predicates deciding whether a step's goal is already met.
//! Every mutating step pairs with one of these; a positive answer means the
//! step logs success and touches nothing, which is what makes re-running
//! the whole tool safe.
//!
//! File-content predicates take the content as a string so tests can feed
//! them fixtures; command-backed predicates go through `System`.

use crate::system::System;

/// The `key=` prefix of a `key=value` line. A line without `=` is its own
/// prefix.
fn key_prefix(line: &str) -> &str {
    match line.find('=') {
        Some(idx) => &line[..=idx],
        None => line,
    }
}

/// Is a line with the same key as `wanted_line` already present?
///
/// Matching is by exact key prefix (`max_parallel_downloads=` matches any
/// value), so a pre-existing `max_parallel_downloads=20` counts as present
/// and is never duplicated or rewritten.
pub fn config_has_key(existing: &str, wanted_line: &str) -> bool {
    let prefix = key_prefix(wanted_line);
    existing
        .lines()
        .any(|line| line.trim_start().starts_with(prefix))
}

/// The subset of `wanted` lines whose key is absent from `existing`.
pub fn missing_config_lines<'a>(existing: &str, wanted: &[&'a str]) -> Vec<&'a str> {
    wanted
        .iter()
        .copied()
        .filter(|line| !config_has_key(existing, line))
        .collect()
}

/// Are all of `packages` registered with the RPM database?
///
/// `rpm -q` with several names exits non-zero if any one is missing, which
/// is exactly the "all registered" predicate.
pub fn packages_installed(system: &dyn System, packages: &[&str]) -> bool {
    let mut args = Vec::with_capacity(packages.len() + 1);
    args.push("-q");
    args.extend_from_slice(packages);
    system
        .run("rpm", &args)
        .map(|out| out.success)
        .unwrap_or(false)
}

/// Does the sysctl file already pin `vm.swappiness` to `target`?
///
/// Comment lines are ignored; whitespace around `=` is tolerated because
/// sysctl itself accepts `key = value`.
pub fn swappiness_configured(sysctl_content: &str, target: u32) -> bool {
    sysctl_content
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .any(|(key, value)| {
            key.trim() == "vm.swappiness" && value.trim() == target.to_string()
        })
}

/// Is `target` the active scheduler in a sysfs scheduler listing?
///
/// The kernel brackets the active entry: `none [mq-deadline] bfq`.
pub fn scheduler_active(scheduler_listing: &str, target: &str) -> bool {
    let bracketed = format!("[{target}]");
    scheduler_listing
        .split_whitespace()
        .any(|token| token == bracketed)
}

/// Is a process with exactly this name running?
pub fn process_running(system: &dyn System, name: &str) -> bool {
    system
        .run("pgrep", &["-x", name])
        .map(|out| out.success)
        .unwrap_or(false)
}

/// GNOME settings key controlling interface animations.
pub const ANIMATIONS_SCHEMA: &str = "org.gnome.desktop.interface";
pub const ANIMATIONS_KEY: &str = "enable-animations";

/// Does the desktop settings daemon already report animations off?
pub fn animations_disabled(system: &dyn System) -> bool {
    system
        .run("gsettings", &["get", ANIMATIONS_SCHEMA, ANIMATIONS_KEY])
        .map(|out| out.success && out.stdout.trim() == "false")
        .unwrap_or(false)
}
