//! fedtune library
//!
//! Core functionality for the interactive Fedora post-install tuning tool:
//! the logger, the prompt and host-command seams, idempotency checks, the
//! step executors, and the orchestrator that strings them together.

pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod hardware;
pub mod logger;
pub mod orchestrator;
pub mod prompt;
pub mod runtime;
pub mod sanity;
pub mod steps;
pub mod summary;
pub mod system;

// Re-export main types for convenience
pub use config::ToolConfig;
pub use error::{Result, TuneError};
pub use hardware::{DiskDescriptor, GpuVendor};
pub use logger::{LogLevel, Logger, RunContext};
pub use prompt::{is_affirmative, Prompt, ReaderPrompter, StdinPrompter};
pub use runtime::Runtime;
pub use steps::{Step, StepOutcome};
pub use system::{CommandOutput, HostSystem, System};
