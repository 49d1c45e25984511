//! Tool configuration
//!
//! The paths the checks and steps touch, gathered into one injected struct
//! instead of being scattered as ambient constants. Tests point these at a
//! temp directory; the default targets the live host.

use std::path::PathBuf;

/// Filesystem locations consumed by the checklist.
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// DNF main configuration file.
    pub dnf_conf: PathBuf,
    /// Persistent kernel parameter file.
    pub sysctl_conf: PathBuf,
    /// Root of the kernel's block device tree.
    pub sys_block: PathBuf,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            dnf_conf: PathBuf::from("/etc/dnf/dnf.conf"),
            sysctl_conf: PathBuf::from("/etc/sysctl.conf"),
            sys_block: PathBuf::from("/sys/block"),
        }
    }
}

impl ToolConfig {
    /// Scheduler sysfs file for a named block device.
    pub fn scheduler_path(&self, device: &str) -> PathBuf {
        self.sys_block.join(device).join("queue/scheduler")
    }
}
