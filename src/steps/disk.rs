//! Disk tuning
//!
//! Classifies the first block device the host reports and takes exactly one
//! branch: solid-state devices get a lower swappiness (persisted in the
//! sysctl file, reapplied live), rotational devices get the mq-deadline I/O
//! scheduler. A device whose rotational flag cannot be read is left alone
//! with a warning.
//!
//! The sysctl file is backed up (timestamp-suffixed copy, best effort)
//! before it is touched; this is the tool's only rollback artifact.

use crate::checks;
use crate::hardware;
use crate::runtime::Runtime;
use crate::steps::{Step, StepOutcome};
use chrono::Local;
use std::fs;

pub const TARGET_SWAPPINESS: u32 = 10;
pub const TARGET_SCHEDULER: &str = "mq-deadline";

pub struct DiskStep;

impl DiskStep {
    fn tune_ssd(rt: &mut Runtime) -> StepOutcome {
        rt.logger
            .info("Solid-state disk detected, lowering vm.swappiness");

        let conf_path = rt.config.sysctl_conf.display().to_string();
        // A missing sysctl.conf reads as empty; tee creates it on append.
        let existing = fs::read_to_string(&rt.config.sysctl_conf).unwrap_or_default();
        if checks::swappiness_configured(&existing, TARGET_SWAPPINESS) {
            rt.logger
                .success(&format!("vm.swappiness already set to {TARGET_SWAPPINESS}"));
            return StepOutcome::Succeeded;
        }

        if rt.config.sysctl_conf.exists() {
            let stamp = Local::now().format("%Y%m%d_%H%M%S");
            let backup = format!("{conf_path}.bak_{stamp}");
            match rt
                .system
                .run("sudo", &["cp", conf_path.as_str(), backup.as_str()])
            {
                Ok(out) if out.success => {
                    rt.logger.info(&format!("Backed up {conf_path} to {backup}"));
                }
                Ok(_) | Err(_) => {
                    // best effort only
                    rt.logger
                        .warn(&format!("could not back up {conf_path}, continuing"));
                }
            }
        }

        let line = format!("vm.swappiness={TARGET_SWAPPINESS}\n");
        match rt
            .system
            .run_with_stdin("sudo", &["tee", "-a", conf_path.as_str()], &line)
        {
            Ok(out) if out.success => {}
            Ok(out) => {
                rt.logger.warn(&format!(
                    "could not update {conf_path} (exit {})",
                    out.exit_code.unwrap_or(-1)
                ));
                return StepOutcome::Failed;
            }
            Err(e) => {
                rt.logger.warn(&format!("could not update {conf_path}: {e}"));
                return StepOutcome::Failed;
            }
        }

        // Reapply so the setting takes effect without a reboot
        match rt.system.run("sudo", &["sysctl", "-p"]) {
            Ok(out) if out.success => {
                rt.logger
                    .success(&format!("vm.swappiness set to {TARGET_SWAPPINESS}"));
                StepOutcome::Succeeded
            }
            Ok(out) => {
                rt.logger.warn(&format!(
                    "sysctl reload failed (exit {}); the setting applies after a reboot",
                    out.exit_code.unwrap_or(-1)
                ));
                StepOutcome::Failed
            }
            Err(e) => {
                rt.logger.warn(&format!("sysctl reload failed: {e}"));
                StepOutcome::Failed
            }
        }
    }

    fn tune_hdd(rt: &mut Runtime, device: &str) -> StepOutcome {
        rt.logger.info(&format!(
            "Rotational disk detected, switching {device} to the {TARGET_SCHEDULER} scheduler"
        ));

        let sched_path = rt.config.scheduler_path(device);
        let sched_display = sched_path.display().to_string();
        let listing = match fs::read_to_string(&sched_path) {
            Ok(content) => content,
            Err(e) => {
                rt.logger
                    .warn(&format!("could not read {sched_display}: {e}"));
                return StepOutcome::Failed;
            }
        };

        if checks::scheduler_active(&listing, TARGET_SCHEDULER) {
            rt.logger.success(&format!(
                "{device} already uses the {TARGET_SCHEDULER} scheduler"
            ));
            return StepOutcome::Succeeded;
        }

        match rt.system.run_with_stdin(
            "sudo",
            &["tee", sched_display.as_str()],
            &format!("{TARGET_SCHEDULER}\n"),
        ) {
            Ok(out) if out.success => {
                rt.logger.success(&format!(
                    "{device} now uses the {TARGET_SCHEDULER} scheduler"
                ));
                StepOutcome::Succeeded
            }
            Ok(out) => {
                rt.logger.warn(&format!(
                    "could not set scheduler for {device} (exit {})",
                    out.exit_code.unwrap_or(-1)
                ));
                StepOutcome::Failed
            }
            Err(e) => {
                rt.logger
                    .warn(&format!("could not set scheduler for {device}: {e}"));
                StepOutcome::Failed
            }
        }
    }
}

impl Step for DiskStep {
    fn name(&self) -> &'static str {
        "Disk tuning"
    }

    fn run(&self, rt: &mut Runtime) -> StepOutcome {
        if !rt.confirm("Tune disk settings (swappiness / I/O scheduler)?") {
            rt.logger.info("Skipping disk tuning");
            return StepOutcome::Skipped;
        }

        let disk = match hardware::first_block_device(&*rt.system) {
            Ok(Some(disk)) => disk,
            Ok(None) => {
                rt.logger
                    .warn("No block devices reported, skipping disk tuning");
                return StepOutcome::Skipped;
            }
            Err(e) => {
                rt.logger.warn(&format!("disk detection failed: {e:#}"));
                return StepOutcome::Skipped;
            }
        };

        match disk.rotational {
            Some(false) => Self::tune_ssd(rt),
            Some(true) => Self::tune_hdd(rt, &disk.name),
            None => {
                rt.logger.warn(&format!(
                    "could not determine whether {} is rotational, skipping disk tuning",
                    disk.name
                ));
                StepOutcome::Skipped
            }
        }
    }
}
