//! GNOME desktop tuning
//!
//! Only applicable while a GNOME Shell session is live: gsettings talks to
//! the session's dconf daemon. Without a running shell the step skips
//! silently: no prompt, nothing to tune.

use crate::checks::{self, ANIMATIONS_KEY, ANIMATIONS_SCHEMA};
use crate::runtime::Runtime;
use crate::steps::{Step, StepOutcome};

const SHELL_PROCESS: &str = "gnome-shell";

pub struct DesktopStep;

impl Step for DesktopStep {
    fn name(&self) -> &'static str {
        "Desktop tuning"
    }

    fn run(&self, rt: &mut Runtime) -> StepOutcome {
        if !checks::process_running(&*rt.system, SHELL_PROCESS) {
            rt.logger
                .info("GNOME Shell is not running, skipping desktop tuning");
            return StepOutcome::Skipped;
        }

        if !rt.confirm("Disable GNOME animations for a snappier desktop?") {
            rt.logger.info("Keeping GNOME animations");
            return StepOutcome::Skipped;
        }

        if checks::animations_disabled(&*rt.system) {
            rt.logger.success("GNOME animations already disabled");
            return StepOutcome::Succeeded;
        }

        match rt
            .system
            .run("gsettings", &["set", ANIMATIONS_SCHEMA, ANIMATIONS_KEY, "false"])
        {
            Ok(out) if out.success => {
                rt.logger.success("GNOME animations disabled");
                StepOutcome::Succeeded
            }
            Ok(out) => {
                rt.logger.warn(&format!(
                    "could not disable animations: {}",
                    out.stderr.trim()
                ));
                StepOutcome::Failed
            }
            Err(e) => {
                rt.logger
                    .warn(&format!("could not disable animations: {e}"));
                StepOutcome::Failed
            }
        }
    }
}
