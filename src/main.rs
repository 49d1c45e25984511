//! fedtune - main entry point
//!
//! Wires the run context, logger, and host interfaces together, runs the
//! fatal preflight gates, then hands over to the orchestrator. Exit code is
//! 0 on normal completion (even with partial step failures) and 1 only when
//! a prerequisite fails.

use colored::Colorize;

use fedtune::cli::Cli;
use fedtune::config::ToolConfig;
use fedtune::logger::{Logger, RunContext};
use fedtune::prompt::StdinPrompter;
use fedtune::runtime::Runtime;
use fedtune::system::HostSystem;
use fedtune::{orchestrator, sanity};

fn print_banner() {
    println!();
    println!("{}", "fedtune - Fedora post-install tuning".bold());
    println!("{}", "Every change is prompted; Enter accepts.".dimmed());
    println!();
}

fn main() {
    let _cli = Cli::parse_args();

    print_banner();

    let ctx = RunContext::new();
    let logger = Logger::new(&ctx);

    let mut rt = Runtime::new(
        logger,
        ToolConfig::default(),
        Box::new(HostSystem),
        Box::new(StdinPrompter),
    );

    if let Err(e) = sanity::run_preflight(&rt.logger, &*rt.system) {
        rt.logger.error(&e.to_string());
        std::process::exit(1);
    }

    rt.logger
        .info(&format!("Logging this run to {}", ctx.log_path.display()));
    orchestrator::run(&mut rt);
}
