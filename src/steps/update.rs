//! Full system update
//!
//! Always offered (there is no meaningful "already updated" probe that
//! would not itself hit the network). Upgrade output is streamed to the
//! terminal so the user sees dnf's own progress.

use crate::runtime::Runtime;
use crate::steps::{Step, StepOutcome};
use crate::system::render_command;

pub struct UpdateStep;

const UPGRADE: [&str; 4] = ["dnf", "upgrade", "--refresh", "-y"];
const AUTOREMOVE: [&str; 3] = ["dnf", "autoremove", "-y"];

impl Step for UpdateStep {
    fn name(&self) -> &'static str {
        "System update"
    }

    fn run(&self, rt: &mut Runtime) -> StepOutcome {
        if !rt.confirm("Update all system packages now?") {
            rt.logger.info("Skipping system update");
            return StepOutcome::Skipped;
        }

        rt.logger.info("Refreshing metadata and upgrading packages, this can take a while...");
        match rt.system.run_visible("sudo", &UPGRADE) {
            Ok(out) if out.success => {
                rt.logger.success("System packages are up to date");
            }
            Ok(out) => {
                rt.logger.error(&format!(
                    "System update failed (exit {})",
                    out.exit_code.unwrap_or(-1)
                ));
                return StepOutcome::Failed;
            }
            Err(e) => {
                rt.logger
                    .error(&format!("{}: {e}", render_command("sudo", &UPGRADE)));
                return StepOutcome::Failed;
            }
        }

        if rt.confirm("Remove packages that are no longer required?") {
            match rt.system.run_visible("sudo", &AUTOREMOVE) {
                Ok(out) if out.success => {
                    rt.logger.success("Unneeded packages removed");
                }
                Ok(out) => {
                    rt.logger.error(&format!(
                        "Autoremove failed (exit {})",
                        out.exit_code.unwrap_or(-1)
                    ));
                    return StepOutcome::Failed;
                }
                Err(e) => {
                    rt.logger
                        .error(&format!("{}: {e}", render_command("sudo", &AUTOREMOVE)));
                    return StepOutcome::Failed;
                }
            }
        } else {
            rt.logger.info("Keeping unused packages");
        }

        StepOutcome::Succeeded
    }
}
