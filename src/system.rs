//! External command invocation
//!
//! All interaction with the host (package manager, bus listings, kernel
//! controls, the settings daemon) goes through the `System` trait. The
//! production implementation shells out; tests substitute a recording fake.
//!
//! A command that starts but exits non-zero is NOT an `Err`: callers get the
//! captured output with `success == false` and decide how loud to be about
//! it. `Err` is reserved for commands that could not be spawned at all.

use crate::error::{Result, TuneError};
use std::io::Write;
use std::process::{Command, Stdio};

/// Captured result of one external command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code (None if terminated by signal).
    pub exit_code: Option<i32>,
    /// Whether the command exited with status 0.
    pub success: bool,
}

impl CommandOutput {
    /// Convert a non-zero exit into a typed error, for call sites where
    /// failure is not tolerable.
    pub fn ensure_success(self, command: &str) -> Result<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(TuneError::CommandFailed {
                command: command.to_string(),
                code: self.exit_code.unwrap_or(-1),
                stderr: self.stderr.trim().to_string(),
            })
        }
    }
}

/// Host collaborators consumed by checks and steps.
pub trait System {
    /// Run a command, capturing stdout and stderr.
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;

    /// Run a command with stdio inherited, so the user sees its output live
    /// (package installs, upgrades). The captured strings are empty.
    fn run_visible(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;

    /// Run a command with `input` piped to its stdin, capturing output.
    /// Used for privileged file appends through `sudo tee`.
    fn run_with_stdin(&self, program: &str, args: &[&str], input: &str) -> Result<CommandOutput>;

    /// Environment variable lookup.
    fn env_var(&self, name: &str) -> Option<String>;

    /// Whether the process runs with EUID 0.
    fn is_root(&self) -> bool;
}

/// Render a command line for log and error messages.
pub fn render_command(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{program} {}", args.join(" "))
    }
}

/// The real host.
pub struct HostSystem;

impl HostSystem {
    fn capture(output: std::process::Output) -> CommandOutput {
        CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code(),
            success: output.status.success(),
        }
    }
}

impl System for HostSystem {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| TuneError::spawn(render_command(program, args), e))?;
        Ok(Self::capture(output))
    }

    fn run_visible(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let status = Command::new(program)
            .args(args)
            .status()
            .map_err(|e| TuneError::spawn(render_command(program, args), e))?;
        Ok(CommandOutput {
            stdout: String::new(),
            stderr: String::new(),
            exit_code: status.code(),
            success: status.success(),
        })
    }

    fn run_with_stdin(&self, program: &str, args: &[&str], input: &str) -> Result<CommandOutput> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| TuneError::spawn(render_command(program, args), e))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(input.as_bytes())?;
            // dropped here so the child sees EOF
        }

        let output = child
            .wait_with_output()
            .map_err(|e| TuneError::spawn(render_command(program, args), e))?;
        Ok(Self::capture(output))
    }

    fn env_var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn is_root(&self) -> bool {
        nix::unistd::geteuid().is_root()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_captures_stdout() {
        let out = HostSystem.run("echo", &["hello"]).expect("echo runs");
        assert!(out.success);
        assert_eq!(out.stdout.trim(), "hello");
    }

    #[test]
    fn test_nonzero_exit_is_ok_with_success_false() {
        let out = HostSystem.run("false", &[]).expect("false spawns");
        assert!(!out.success);
        assert_eq!(out.exit_code, Some(1));
    }

    #[test]
    fn test_missing_binary_is_spawn_error() {
        let err = HostSystem
            .run("fedtune-no-such-binary-12345", &[])
            .expect_err("spawn must fail");
        assert!(matches!(err, TuneError::CommandSpawn { .. }));
    }

    #[test]
    fn test_run_with_stdin_feeds_child() {
        let out = HostSystem
            .run_with_stdin("cat", &[], "piped content")
            .expect("cat runs");
        assert!(out.success);
        assert_eq!(out.stdout, "piped content");
    }

    #[test]
    fn test_ensure_success_maps_failure() {
        let out = HostSystem.run("false", &[]).expect("false spawns");
        let err = out.ensure_success("false").expect_err("must map");
        assert!(matches!(err, TuneError::CommandFailed { code: 1, .. }));
    }

    #[test]
    fn test_render_command() {
        assert_eq!(render_command("dnf", &[]), "dnf");
        assert_eq!(
            render_command("rpm", &["-q", "akmod-nvidia"]),
            "rpm -q akmod-nvidia"
        );
    }
}
