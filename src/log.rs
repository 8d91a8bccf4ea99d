//! File logging for handoff runs.
//!
//! Every record goes to `~/.handoff/handoff.log`. The threshold comes from
//! the command line: `-v` raises it to DEBUG (routing decisions), `-vv` to
//! TRACE (per-node graph traversal). `--debug` and `HANDOFF_DEBUG=1` are
//! shorthands for at least DEBUG.
//!
//! Nothing is written until [`init`] has run.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::OnceLock;

static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();
static THRESHOLD: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }

    fn from_u8(v: u8) -> Self {
        match v {
            0 => LogLevel::Error,
            1 => LogLevel::Warn,
            2 => LogLevel::Info,
            3 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }

    /// Threshold for a `-v` count, with `debug` forcing at least DEBUG.
    pub fn from_flags(verbose: u8, debug: bool) -> Self {
        let level = match verbose {
            0 => LogLevel::Info,
            1 => LogLevel::Debug,
            _ => LogLevel::Trace,
        };
        if debug {
            level.max(LogLevel::Debug)
        } else {
            level
        }
    }

    /// Whether a record at `level` passes this threshold.
    pub fn allows(&self, level: LogLevel) -> bool {
        level <= *self
    }
}

fn env_debug() -> bool {
    std::env::var("HANDOFF_DEBUG")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Start logging for this process at the level implied by the CLI flags
/// and `HANDOFF_DEBUG`.
pub fn init(verbose: u8, debug: bool) {
    let level = LogLevel::from_flags(verbose, debug || env_debug());
    if let Some(dir) = dirs::home_dir().map(|h| h.join(".handoff")) {
        let _ = std::fs::create_dir_all(&dir);
        init_at(dir.join("handoff.log"), level);
    }
}

/// Start logging to an explicit file. Only the first call sets the path.
pub fn init_at(path: PathBuf, level: LogLevel) {
    set_level(level);
    LOG_PATH.set(path).ok();
}

pub fn set_level(level: LogLevel) {
    THRESHOLD.store(level as u8, Ordering::SeqCst);
}

pub fn level() -> LogLevel {
    LogLevel::from_u8(THRESHOLD.load(Ordering::Relaxed))
}

pub fn log_path() -> Option<&'static Path> {
    LOG_PATH.get().map(PathBuf::as_path)
}

fn write_record<W: Write>(out: &mut W, level: LogLevel, msg: &str) -> io::Result<()> {
    let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
    writeln!(out, "[{}] [{:<5}] {}", timestamp, level.as_str(), msg)
}

pub fn log_at(level: LogLevel, msg: &str) {
    if !self::level().allows(level) {
        return;
    }
    let Some(path) = LOG_PATH.get() else {
        return;
    };
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let _ = write_record(&mut file, level, msg);
    }
}

#[macro_export]
macro_rules! hlog {
    ($($arg:tt)*) => {
        $crate::log::log_at($crate::log::LogLevel::Info, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! hlog_error {
    ($($arg:tt)*) => {
        $crate::log::log_at($crate::log::LogLevel::Error, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! hlog_warn {
    ($($arg:tt)*) => {
        $crate::log::log_at($crate::log::LogLevel::Warn, &format!($($arg)*))
    };
}

/// DEBUG records: routing and resolution decisions.
#[macro_export]
macro_rules! hlog_debug {
    ($($arg:tt)*) => {
        $crate::log::log_at($crate::log::LogLevel::Debug, &format!($($arg)*))
    };
}

/// TRACE records: individual graph visits. The message is only formatted
/// when TRACE is enabled, since these fire once per node or edge.
#[macro_export]
macro_rules! hlog_trace {
    ($($arg:tt)*) => {
        if $crate::log::level().allows($crate::log::LogLevel::Trace) {
            $crate::log::log_at($crate::log::LogLevel::Trace, &format!($($arg)*))
        }
    };
}
