//! Startup prerequisite checks
//!
//! These gates run once, before any step executor, and are the only fatal
//! failures in the tool: running as root directly, a missing or declined
//! sudo, or a host without dnf all terminate the run with a non-zero exit.

use crate::error::{Result, TuneError};
use crate::logger::Logger;
use crate::system::System;

/// Is a binary resolvable in PATH?
fn binary_exists(system: &dyn System, name: &str) -> bool {
    system
        .run("which", &[name])
        .map(|out| out.success)
        .unwrap_or(false)
}

/// Verify the environment, failing fast on the first unmet prerequisite.
///
/// The sudo credential cache is warmed here (`sudo -v`) so the user types
/// their password once up front instead of mid-checklist.
pub fn run_preflight(logger: &Logger, system: &dyn System) -> Result<()> {
    if system.is_root() {
        return Err(TuneError::preflight(
            "do not run fedtune as root; run it as a regular user, it elevates with sudo where needed",
        ));
    }

    if !binary_exists(system, "sudo") {
        return Err(TuneError::preflight("sudo is not installed"));
    }

    let grant = system.run_visible("sudo", &["-v"])?;
    if !grant.success {
        return Err(TuneError::preflight("could not obtain sudo credentials"));
    }

    if !binary_exists(system, "dnf") {
        return Err(TuneError::preflight(
            "dnf not found; fedtune only supports DNF-based Fedora systems",
        ));
    }

    logger.success("Prerequisites satisfied");
    Ok(())
}
