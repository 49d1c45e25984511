//! RPM Fusion repository enablement
//!
//! Installs the free and nonfree release packages from their
//! version-templated URLs. Failure here is a notice, not an error: most of
//! the remaining checklist still works without the extra repositories.

use crate::checks;
use crate::runtime::Runtime;
use crate::steps::{Step, StepOutcome};

/// Release packages whose presence marks the repositories as enabled.
pub const REPO_PACKAGES: [&str; 2] = ["rpmfusion-free-release", "rpmfusion-nonfree-release"];

/// Installation URLs for a given Fedora release.
pub fn fusion_urls(release: &str) -> [String; 2] {
    [
        format!(
            "https://mirrors.rpmfusion.org/free/fedora/rpmfusion-free-release-{release}.noarch.rpm"
        ),
        format!(
            "https://mirrors.rpmfusion.org/nonfree/fedora/rpmfusion-nonfree-release-{release}.noarch.rpm"
        ),
    ]
}

pub struct RepoStep;

impl Step for RepoStep {
    fn name(&self) -> &'static str {
        "RPM Fusion repositories"
    }

    fn run(&self, rt: &mut Runtime) -> StepOutcome {
        if !rt.confirm("Enable the RPM Fusion repositories (free and nonfree)?") {
            rt.logger.info("Skipping RPM Fusion setup");
            return StepOutcome::Skipped;
        }

        if checks::packages_installed(&*rt.system, &REPO_PACKAGES) {
            rt.logger.success("RPM Fusion repositories already enabled");
            return StepOutcome::Succeeded;
        }

        let release = match rt.system.run("rpm", &["-E", "%fedora"]) {
            Ok(out) if out.success => out.stdout.trim().to_string(),
            Ok(out) => {
                rt.logger.notice(&format!(
                    "could not determine Fedora release (rpm exit {}), skipping RPM Fusion",
                    out.exit_code.unwrap_or(-1)
                ));
                return StepOutcome::Failed;
            }
            Err(e) => {
                rt.logger
                    .notice(&format!("could not determine Fedora release: {e}"));
                return StepOutcome::Failed;
            }
        };

        rt.logger
            .info(&format!("Enabling RPM Fusion for Fedora {release}"));
        let urls = fusion_urls(&release);
        let args = ["dnf", "install", "-y", urls[0].as_str(), urls[1].as_str()];
        match rt.system.run_visible("sudo", &args) {
            Ok(out) if out.success => {
                rt.logger.success("RPM Fusion repositories enabled");
                StepOutcome::Succeeded
            }
            Ok(_) | Err(_) => {
                // Not fatal for the rest of the checklist, hence a notice
                rt.logger.notice(
                    "RPM Fusion installation failed; codec and driver steps may have less to offer",
                );
                StepOutcome::Failed
            }
        }
    }
}
