//! End-of-run summary
//!
//! Prints the fixed list of tunings this tool covers, identifies the host,
//! points at the run's log file, and says whether a reboot is in order.
//! The reboot advice combines the run's own flag (NVIDIA kernel modules)
//! with the `needs-restarting -r` advisory; the utility being absent only
//! downgrades the advice, it never fails the run.

use crate::runtime::Runtime;
use std::fs;
use std::path::Path;

/// The checklist as presented to the user. Static text: it describes what
/// the tool covers, not what this particular run confirmed.
const APPLIED_CHECKLIST: [&str; 7] = [
    "System packages updated (dnf upgrade)",
    "DNF tuned: parallel downloads, fastest mirror",
    "RPM Fusion free and nonfree repositories enabled",
    "Multimedia codecs installed",
    "GPU drivers installed for detected hardware",
    "Disk tuned: swappiness (SSD) or I/O scheduler (HDD)",
    "GNOME animations disabled",
];

/// Extract PRETTY_NAME from os-release content.
pub fn pretty_name(os_release: &str) -> Option<String> {
    os_release
        .lines()
        .find_map(|line| line.strip_prefix("PRETTY_NAME="))
        .map(|value| value.trim().trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

fn host_pretty_name() -> Option<String> {
    fs::read_to_string(Path::new("/etc/os-release"))
        .ok()
        .and_then(|content| pretty_name(&content))
}

/// Print the summary through the run's logger.
pub fn report(rt: &mut Runtime) {
    rt.logger.notice("Post-install tuning finished");
    rt.logger.info("Checklist covered by this tool:");
    for item in APPLIED_CHECKLIST {
        rt.logger.info(&format!("  - {item}"));
    }

    let os = host_pretty_name().unwrap_or_else(|| "Unknown".to_string());
    let kernel = rt
        .system
        .run("uname", &["-r"])
        .ok()
        .filter(|out| out.success)
        .map(|out| out.stdout.trim().to_string())
        .unwrap_or_else(|| "Unknown".to_string());
    let desktop = rt
        .system
        .env_var("XDG_CURRENT_DESKTOP")
        .unwrap_or_else(|| "Unknown".to_string());

    rt.logger.info(&format!("OS:      {os}"));
    rt.logger.info(&format!("Kernel:  {kernel}"));
    rt.logger.info(&format!("Desktop: {desktop}"));
    rt.logger
        .info(&format!("Log:     {}", rt.logger.path().display()));

    if rt.reboot_required() {
        rt.logger
            .warn("Reboot required: new kernel modules were installed this run");
        return;
    }

    // needs-restarting -r exits non-zero when a reboot is advisable
    match rt.system.run("needs-restarting", &["-r"]) {
        Ok(out) if out.success => {
            rt.logger.success("No reboot required");
        }
        Ok(_) => {
            rt.logger
                .warn("A reboot is recommended to pick up updated services or kernel");
        }
        Err(_) => {
            rt.logger
                .notice("needs-restarting not available, cannot tell whether a reboot is needed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_name_strips_quotes() {
        let content = "NAME=Fedora\nPRETTY_NAME=\"Fedora Linux 42 (Workstation Edition)\"\nID=fedora\n";
        assert_eq!(
            pretty_name(content).as_deref(),
            Some("Fedora Linux 42 (Workstation Edition)")
        );
    }

    #[test]
    fn test_pretty_name_unquoted_value() {
        assert_eq!(pretty_name("PRETTY_NAME=Fedora\n").as_deref(), Some("Fedora"));
    }

    #[test]
    fn test_pretty_name_missing() {
        assert_eq!(pretty_name("NAME=Fedora\nID=fedora\n"), None);
        assert_eq!(pretty_name("PRETTY_NAME=\"\"\n"), None);
    }
}
