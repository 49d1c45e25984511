//! Multimedia codec installation
//!
//! Installs the multimedia group, excluding the PackageKit gstreamer plugin
//! (it would drag a second package frontend in) and allowing dnf to replace
//! conflicting base packages with their full-featured variants.

use crate::checks;
use crate::runtime::Runtime;
use crate::steps::{Step, StepOutcome};

/// Packages whose joint presence marks the codecs as installed.
pub const CODEC_PACKAGES: [&str; 3] = [
    "gstreamer1-plugins-good",
    "gstreamer1-plugins-bad-free",
    "gstreamer1-libav",
];

const GROUP_INSTALL: [&str; 7] = [
    "dnf",
    "group",
    "install",
    "-y",
    "multimedia",
    "--exclude=PackageKit-gstreamer-plugin",
    "--allowerasing",
];

pub struct CodecStep;

impl Step for CodecStep {
    fn name(&self) -> &'static str {
        "Multimedia codecs"
    }

    fn run(&self, rt: &mut Runtime) -> StepOutcome {
        if !rt.confirm("Install multimedia codecs (gstreamer plugins)?") {
            rt.logger.info("Skipping codec installation");
            return StepOutcome::Skipped;
        }

        if checks::packages_installed(&*rt.system, &CODEC_PACKAGES) {
            rt.logger.success("Multimedia codecs already installed");
            return StepOutcome::Succeeded;
        }

        rt.logger.info("Installing the multimedia package group...");
        match rt.system.run_visible("sudo", &GROUP_INSTALL) {
            Ok(out) if out.success => {
                rt.logger.success("Multimedia codecs installed");
                StepOutcome::Succeeded
            }
            Ok(out) => {
                rt.logger.warn(&format!(
                    "Codec installation failed (exit {}); is RPM Fusion enabled?",
                    out.exit_code.unwrap_or(-1)
                ));
                StepOutcome::Failed
            }
            Err(e) => {
                rt.logger.warn(&format!("Codec installation failed: {e}"));
                StepOutcome::Failed
            }
        }
    }
}
