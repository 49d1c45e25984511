//! DNF configuration tuning
//!
//! Appends the performance settings to dnf.conf, but only the ones whose
//! key is not already present. A pre-existing value, whatever it is, wins.
//! The append goes through `sudo tee -a` because the tool itself runs
//! unprivileged.

use crate::checks;
use crate::runtime::Runtime;
use crate::steps::{Step, StepOutcome};
use std::fs;

/// Settings appended to dnf.conf when their key is absent.
pub const DNF_TUNING_LINES: [&str; 2] = ["max_parallel_downloads=10", "fastestmirror=True"];

pub struct DnfTuningStep;

impl Step for DnfTuningStep {
    fn name(&self) -> &'static str {
        "DNF tuning"
    }

    fn run(&self, rt: &mut Runtime) -> StepOutcome {
        if !rt.confirm("Tune DNF for faster downloads (parallel downloads, fastest mirror)?") {
            rt.logger.info("Skipping DNF tuning");
            return StepOutcome::Skipped;
        }

        let conf_path = rt.config.dnf_conf.display().to_string();
        let existing = match fs::read_to_string(&rt.config.dnf_conf) {
            Ok(content) => content,
            Err(e) => {
                rt.logger.error(&format!("could not read {conf_path}: {e}"));
                return StepOutcome::Failed;
            }
        };

        let missing = checks::missing_config_lines(&existing, &DNF_TUNING_LINES);
        if missing.is_empty() {
            rt.logger.success("DNF is already tuned");
            return StepOutcome::Succeeded;
        }

        for line in &missing {
            rt.logger.info(&format!("Appending '{line}' to {conf_path}"));
        }
        let mut block = missing.join("\n");
        block.push('\n');

        match rt
            .system
            .run_with_stdin("sudo", &["tee", "-a", conf_path.as_str()], &block)
        {
            Ok(out) if out.success => {
                rt.logger.success("DNF tuned");
                StepOutcome::Succeeded
            }
            Ok(out) => {
                rt.logger.error(&format!(
                    "could not update {conf_path} (exit {})",
                    out.exit_code.unwrap_or(-1)
                ));
                StepOutcome::Failed
            }
            Err(e) => {
                rt.logger
                    .error(&format!("could not update {conf_path}: {e}"));
                StepOutcome::Failed
            }
        }
    }
}
