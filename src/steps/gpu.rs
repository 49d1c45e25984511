//! GPU driver installation
//!
//! Detects vendors from the PCI listing and runs every matching branch:
//! hybrid Intel/NVIDIA machines get both driver sets. Each branch is
//! independently checked and independently allowed to fail; one broken
//! vendor repo must not block the others.
//!
//! The NVIDIA branch builds kernel modules (akmods), so it flags the run
//! as reboot-required.

use crate::checks;
use crate::hardware::{self, GpuVendor};
use crate::runtime::Runtime;
use crate::steps::{Step, StepOutcome};

/// Per-vendor driver package set. The first package doubles as the
/// installed-marker for the idempotency check.
pub fn driver_packages(vendor: GpuVendor) -> &'static [&'static str] {
    match vendor {
        GpuVendor::Intel => &["intel-media-driver", "libva-intel-driver"],
        GpuVendor::Nvidia => &["akmod-nvidia", "xorg-x11-drv-nvidia-cuda"],
        // freeworld variants replace the stock mesa drivers
        GpuVendor::Amd => &["mesa-va-drivers-freeworld", "mesa-vdpau-drivers-freeworld"],
    }
}

/// The AMD freeworld drivers conflict with the preinstalled mesa packages,
/// so only that branch needs dnf's permission to swap them out.
fn needs_allowerasing(vendor: GpuVendor) -> bool {
    matches!(vendor, GpuVendor::Amd)
}

pub struct GpuStep;

impl GpuStep {
    fn install_vendor(rt: &mut Runtime, vendor: GpuVendor) -> StepOutcome {
        let packages = driver_packages(vendor);
        let marker = [packages[0]];
        if checks::packages_installed(&*rt.system, &marker) {
            rt.logger
                .success(&format!("{vendor} driver already installed"));
            return StepOutcome::Succeeded;
        }

        rt.logger
            .info(&format!("Installing {vendor} drivers: {}", packages.join(", ")));
        let mut args = vec!["dnf", "install", "-y"];
        args.extend_from_slice(packages);
        if needs_allowerasing(vendor) {
            args.push("--allowerasing");
        }

        match rt.system.run_visible("sudo", &args) {
            Ok(out) if out.success => {
                rt.logger.success(&format!("{vendor} drivers installed"));
                if vendor == GpuVendor::Nvidia {
                    rt.flag_reboot();
                    rt.logger.notice(
                        "NVIDIA kernel modules are being built; a reboot is required before they load",
                    );
                }
                StepOutcome::Succeeded
            }
            Ok(out) => {
                rt.logger.warn(&format!(
                    "{vendor} driver installation failed (exit {})",
                    out.exit_code.unwrap_or(-1)
                ));
                StepOutcome::Failed
            }
            Err(e) => {
                rt.logger
                    .warn(&format!("{vendor} driver installation failed: {e}"));
                StepOutcome::Failed
            }
        }
    }
}

impl Step for GpuStep {
    fn name(&self) -> &'static str {
        "GPU drivers"
    }

    fn run(&self, rt: &mut Runtime) -> StepOutcome {
        if !rt.confirm("Detect GPUs and install the matching drivers?") {
            rt.logger.info("Skipping GPU driver installation");
            return StepOutcome::Skipped;
        }

        let vendors = match hardware::detect_gpus(&*rt.system) {
            Ok(vendors) => vendors,
            Err(e) => {
                rt.logger.warn(&format!("GPU detection failed: {e:#}"));
                return StepOutcome::Skipped;
            }
        };

        if vendors.is_empty() {
            rt.logger
                .warn("No supported GPU detected, nothing to install");
            return StepOutcome::Skipped;
        }

        let mut any_failed = false;
        for vendor in vendors {
            rt.logger.info(&format!("{vendor} GPU detected"));
            if Self::install_vendor(rt, vendor).is_failure() {
                any_failed = true;
            }
        }

        if any_failed {
            StepOutcome::Failed
        } else {
            StepOutcome::Succeeded
        }
    }
}
