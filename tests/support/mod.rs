//! Shared test doubles for driving steps without touching the host.
//!
//! `FakeSystem` answers every command the checklist issues: `rpm -q` against
//! a configurable installed set, canned stdout per command line, simulated
//! failures by command prefix, and a real-filesystem emulation of
//! `sudo tee` / `sudo cp` so config mutations land in temp files the tests
//! can inspect.

#![allow(dead_code)]

use fedtune::config::ToolConfig;
use fedtune::error::{Result, TuneError};
use fedtune::logger::{Logger, RunContext};
use fedtune::prompt::ReaderPrompter;
use fedtune::runtime::Runtime;
use fedtune::system::{render_command, CommandOutput, System};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fs::{self, OpenOptions};
use std::io::{Cursor, Write};
use std::rc::Rc;

#[derive(Clone, Default)]
pub struct FakeSystem {
    pub root: bool,
    installed: Rc<RefCell<HashSet<String>>>,
    failing: Rc<RefCell<Vec<String>>>,
    missing: Rc<RefCell<HashSet<String>>>,
    stdout: Rc<RefCell<HashMap<String, String>>>,
    env: Rc<RefCell<HashMap<String, String>>>,
    calls: Rc<RefCell<Vec<String>>>,
}

impl FakeSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark packages as registered with the fake RPM database.
    pub fn mark_installed(&self, packages: &[&str]) {
        let mut installed = self.installed.borrow_mut();
        for package in packages {
            installed.insert((*package).to_string());
        }
    }

    /// Any command whose rendered line starts with `prefix` exits non-zero.
    pub fn fail_matching(&self, prefix: &str) {
        self.failing.borrow_mut().push(prefix.to_string());
    }

    /// The named program can no longer be spawned, and `which` stops
    /// finding it.
    pub fn remove_binary(&self, program: &str) {
        self.missing.borrow_mut().insert(program.to_string());
    }

    /// Canned stdout for an exact rendered command line.
    pub fn set_stdout(&self, command: &str, output: &str) {
        self.stdout
            .borrow_mut()
            .insert(command.to_string(), output.to_string());
    }

    pub fn set_env(&self, key: &str, value: &str) {
        self.env
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    /// Every command issued so far, rendered, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn calls_matching(&self, prefix: &str) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .cloned()
            .collect()
    }

    fn ok(stdout: String) -> CommandOutput {
        CommandOutput {
            stdout,
            stderr: String::new(),
            exit_code: Some(0),
            success: true,
        }
    }

    fn fail() -> CommandOutput {
        CommandOutput {
            stdout: String::new(),
            stderr: "simulated failure".to_string(),
            exit_code: Some(1),
            success: false,
        }
    }

    fn dispatch(&self, program: &str, args: &[&str], stdin: Option<&str>) -> Result<CommandOutput> {
        let rendered = render_command(program, args);
        self.calls.borrow_mut().push(rendered.clone());

        if self.missing.borrow().contains(program) {
            return Err(TuneError::spawn(
                rendered,
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory"),
            ));
        }

        if self
            .failing
            .borrow()
            .iter()
            .any(|prefix| rendered.starts_with(prefix.as_str()))
        {
            return Ok(Self::fail());
        }

        if program == "which" {
            let target = args.first().copied().unwrap_or_default();
            return Ok(if self.missing.borrow().contains(target) {
                Self::fail()
            } else {
                Self::ok(format!("/usr/bin/{target}\n"))
            });
        }

        if program == "rpm" && args.first() == Some(&"-q") {
            let installed = self.installed.borrow();
            let all_present = args[1..].iter().all(|package| installed.contains(*package));
            return Ok(if all_present {
                Self::ok(String::new())
            } else {
                Self::fail()
            });
        }

        // `sudo tee [-a] <path>` writes to the real (temp) filesystem so the
        // append/overwrite behavior under test is the genuine article.
        if program == "sudo" && args.first() == Some(&"tee") {
            let (append, path) = if args.get(1) == Some(&"-a") {
                (true, args.get(2))
            } else {
                (false, args.get(1))
            };
            if let (Some(path), Some(input)) = (path, stdin) {
                let written = if append {
                    OpenOptions::new()
                        .create(true)
                        .append(true)
                        .open(path)
                        .and_then(|mut f| f.write_all(input.as_bytes()))
                } else {
                    fs::write(path, input)
                };
                return Ok(if written.is_ok() {
                    Self::ok(input.to_string())
                } else {
                    Self::fail()
                });
            }
            return Ok(Self::fail());
        }

        if program == "sudo" && args.first() == Some(&"cp") {
            if let (Some(src), Some(dst)) = (args.get(1), args.get(2)) {
                return Ok(if fs::copy(src, dst).is_ok() {
                    Self::ok(String::new())
                } else {
                    Self::fail()
                });
            }
            return Ok(Self::fail());
        }

        if let Some(output) = self.stdout.borrow().get(&rendered) {
            return Ok(Self::ok(output.clone()));
        }

        Ok(Self::ok(String::new()))
    }
}

impl System for FakeSystem {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        self.dispatch(program, args, None)
    }

    fn run_visible(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        self.dispatch(program, args, None)
    }

    fn run_with_stdin(&self, program: &str, args: &[&str], input: &str) -> Result<CommandOutput> {
        self.dispatch(program, args, Some(input))
    }

    fn env_var(&self, name: &str) -> Option<String> {
        self.env.borrow().get(name).cloned()
    }

    fn is_root(&self) -> bool {
        self.root
    }
}

/// Temp stand-ins for the host paths a run touches.
pub struct TempHost {
    pub dir: tempfile::TempDir,
    pub config: ToolConfig,
}

pub fn temp_host() -> TempHost {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = ToolConfig {
        dnf_conf: dir.path().join("dnf.conf"),
        sysctl_conf: dir.path().join("sysctl.conf"),
        sys_block: dir.path().join("sys_block"),
    };
    TempHost { dir, config }
}

/// Build a Runtime over the fake system with scripted prompt answers
/// (one line per question). The returned TempDir keeps the log file alive.
pub fn build_runtime(
    fake: &FakeSystem,
    answers: &str,
    config: ToolConfig,
) -> (Runtime, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let logger = Logger::new(&RunContext::at(dir.path().join("run.log")));
    let rt = Runtime::new(
        logger,
        config,
        Box::new(fake.clone()),
        Box::new(ReaderPrompter::new(Cursor::new(answers.to_string()))),
    );
    (rt, dir)
}
