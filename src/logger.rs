//! Run context and logging
//!
//! Every run owns exactly one log file, created at startup and named with
//! the start timestamp. `Logger` writes a colored, severity-tagged line to
//! the console and a plain timestamped line to that file. File appends are
//! best-effort: a full disk or unwritable temp directory must never fail
//! the run itself.

use chrono::Local;
use colored::{ColoredString, Colorize};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Message severity. The formatting table below is matched exhaustively,
/// so adding a level without a color is a compile error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum LogLevel {
    Info,
    Success,
    Notice,
    Warn,
    Error,
    Prompt,
}

impl LogLevel {
    /// Console color for the `[LEVEL]` tag.
    fn paint(self, tag: &str) -> ColoredString {
        match self {
            Self::Info => tag.cyan(),
            Self::Success => tag.green().bold(),
            Self::Notice => tag.blue(),
            Self::Warn => tag.yellow(),
            Self::Error => tag.red().bold(),
            Self::Prompt => tag.magenta(),
        }
    }
}

/// Per-invocation log file and its lifecycle.
///
/// The path is fixed at construction; the file itself is opened once by the
/// `Logger` and held for the whole run. Nothing ever reads it back.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub log_path: PathBuf,
}

impl RunContext {
    /// Create a context with a timestamp-named log file in the system
    /// temp directory, e.g. `/tmp/fedtune_20250114_093012.log`.
    pub fn new() -> Self {
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        Self {
            log_path: std::env::temp_dir().join(format!("fedtune_{stamp}.log")),
        }
    }

    /// Create a context logging to an explicit path. Used by tests.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: path.into(),
        }
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Console + file logger. The file handle is opened for append once and
/// kept for the run. The `Mutex` only satisfies interior mutability; the
/// tool is single-threaded.
pub struct Logger {
    path: PathBuf,
    file: Option<Mutex<File>>,
}

impl Logger {
    /// Open the run's log file for append. If the file cannot be opened the
    /// logger degrades to console-only after a single stderr notice.
    pub fn new(ctx: &RunContext) -> Self {
        let file = match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&ctx.log_path)
        {
            Ok(f) => Some(Mutex::new(f)),
            Err(e) => {
                eprintln!(
                    "could not open log file {}: {e} (continuing without file log)",
                    ctx.log_path.display()
                );
                None
            }
        };
        Self {
            path: ctx.log_path.clone(),
            file,
        }
    }

    /// Path of the run's log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write one message to the console (colored) and the log file (plain).
    pub fn log(&self, level: LogLevel, message: &str) {
        let tag = format!("[{level}]");
        println!("{} {message}", level.paint(&tag));
        if level == LogLevel::Error {
            eprintln!("{} {message}", level.paint(&tag));
        }
        self.append_to_file(level, message);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn success(&self, message: &str) {
        self.log(LogLevel::Success, message);
    }

    pub fn notice(&self, message: &str) {
        self.log(LogLevel::Notice, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    /// Errors are mirrored to stderr by `log`.
    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    pub fn prompt(&self, message: &str) {
        self.log(LogLevel::Prompt, message);
    }

    /// Best-effort append: `[YYYY-MM-DD HH:MM:SS] [LEVEL] message`.
    fn append_to_file(&self, level: LogLevel, message: &str) {
        if let Some(file) = &self.file {
            if let Ok(mut f) = file.lock() {
                let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
                let _ = writeln!(f, "[{stamp}] [{level}] {message}");
            }
        }
    }
}
