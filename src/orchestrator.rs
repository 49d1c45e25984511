//! Checklist orchestration
//!
//! Runs the step executors in their fixed order. A failing step is logged
//! and the sequence continues: partial tuning beats aborting on the first
//! non-essential failure. Only the preflight gates (handled before this
//! module is reached) are fatal.

use crate::runtime::Runtime;
use crate::steps::{
    CodecStep, DesktopStep, DiskStep, DnfTuningStep, GpuStep, RepoStep, Step, StepOutcome,
    UpdateStep,
};
use crate::summary;

/// The checklist, in execution order.
pub fn checklist() -> Vec<Box<dyn Step>> {
    vec![
        Box::new(UpdateStep),
        Box::new(DnfTuningStep),
        Box::new(RepoStep),
        Box::new(CodecStep),
        Box::new(GpuStep),
        Box::new(DiskStep),
        Box::new(DesktopStep),
    ]
}

/// Run every step, collecting `(name, outcome)` pairs in order.
pub fn run_checklist(rt: &mut Runtime) -> Vec<(&'static str, StepOutcome)> {
    let steps = checklist();
    let total = steps.len();
    let mut results = Vec::with_capacity(total);

    for (index, step) in steps.iter().enumerate() {
        rt.logger
            .notice(&format!("[{}/{total}] {}", index + 1, step.name()));
        let outcome = step.run(rt);
        if outcome.is_failure() {
            rt.logger.warn(&format!(
                "{} failed, continuing with the next step",
                step.name()
            ));
        }
        results.push((step.name(), outcome));
    }

    results
}

/// Run the full checklist and emit the summary.
pub fn run(rt: &mut Runtime) {
    let results = run_checklist(rt);

    let failures = results.iter().filter(|(_, o)| o.is_failure()).count();
    if failures > 0 {
        rt.logger.warn(&format!(
            "{failures} step(s) failed; see the log for details"
        ));
    }

    summary::report(rt);
}
