//! Checklist step executors
//!
//! One module per checklist item. Every step follows the same flow:
//! prompt → (declined ⇒ skipped) → idempotency check → (already satisfied ⇒
//! success without mutation) → mutate → succeeded or failed. Failures are
//! recoverable by contract: the orchestrator logs them and moves on.

pub mod codecs;
pub mod desktop;
pub mod disk;
pub mod dnf;
pub mod gpu;
pub mod repos;
pub mod update;

pub use codecs::CodecStep;
pub use desktop::DesktopStep;
pub use disk::DiskStep;
pub use dnf::DnfTuningStep;
pub use gpu::GpuStep;
pub use repos::RepoStep;
pub use update::UpdateStep;

use crate::runtime::Runtime;

/// Result of one checklist step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum StepOutcome {
    /// User declined, or the step had nothing applicable to do.
    Skipped,
    /// Goal reached: either it was already satisfied or the mutation ran.
    Succeeded,
    /// The mutation was attempted and did not complete.
    Failed,
}

impl StepOutcome {
    pub fn is_failure(self) -> bool {
        matches!(self, Self::Failed)
    }
}

/// One checklist item.
pub trait Step {
    /// Human-readable name, used in section headers and the outcome log.
    fn name(&self) -> &'static str;

    /// Execute the step against the injected runtime.
    fn run(&self, rt: &mut Runtime) -> StepOutcome;
}
