use clap::Parser;

/// fedtune: interactive post-install tuning for Fedora Linux
///
/// The CLI surface is deliberately empty: the whole checklist runs
/// interactively, gated by its own prompts. clap still provides
/// `--help` and `--version`.
#[derive(Parser, Debug)]
#[command(name = "fedtune")]
#[command(about = "Interactive post-install tuning checklist for Fedora Linux")]
#[command(version)]
pub struct Cli {}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }
}
