//! Run-scoped wiring
//!
//! `Runtime` owns everything a step executor needs: the logger, the prompt
//! source, the host interface, the path configuration, and the one piece of
//! cross-step state (the reboot flag the NVIDIA branch sets). There are no
//! globals; every component gets this injected.

use crate::config::ToolConfig;
use crate::logger::Logger;
use crate::prompt::Prompt;
use crate::system::System;

pub struct Runtime {
    pub logger: Logger,
    pub config: ToolConfig,
    pub system: Box<dyn System>,
    prompter: Box<dyn Prompt>,
    reboot_required: bool,
}

impl Runtime {
    pub fn new(
        logger: Logger,
        config: ToolConfig,
        system: Box<dyn System>,
        prompter: Box<dyn Prompt>,
    ) -> Self {
        Self {
            logger,
            config,
            system,
            prompter,
            reboot_required: false,
        }
    }

    /// Ask a yes/no question. The question is logged at `Prompt` level (so
    /// it appears in the run log) with the `[Y/n]` hint; an empty answer
    /// affirms.
    pub fn confirm(&mut self, question: &str) -> bool {
        self.logger.prompt(&format!("{question} [Y/n]"));
        self.prompter.read_decision()
    }

    /// Record that this run installed something requiring a reboot.
    pub fn flag_reboot(&mut self) {
        self.reboot_required = true;
    }

    pub fn reboot_required(&self) -> bool {
        self.reboot_required
    }
}
