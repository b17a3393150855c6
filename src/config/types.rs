//! Core configuration types.
//! - Config holds the knobs for copies and logging, with defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::fs_ops::{DurabilityMode, DEFAULT_BUFFER_SIZE};

/// Verbosity levels accepted in config files.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Warnings and errors (default)
    #[default]
    Normal,
    /// Plus informational events
    Info,
    /// Everything, including per-entry tracing
    Debug,
}

impl LogLevel {
    /// Parse common names into a LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" | "warn" => Some(LogLevel::Normal),
            "info" | "verbose" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }

    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Quiet => "error",
            LogLevel::Normal => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Chunk size used by `fs_ops::copy_with`
    pub copy_buffer_size: usize,
    /// Flush or fsync copied data
    pub durability: DurabilityMode,
    /// Carry access/modification times over on copy
    pub preserve_times: bool,
    pub log_level: LogLevel,
    /// Optional log file; stderr is always used
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            copy_buffer_size: DEFAULT_BUFFER_SIZE,
            durability: DurabilityMode::Full,
            preserve_times: false,
            log_level: LogLevel::Normal,
            log_file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_aliases() {
        assert_eq!(LogLevel::parse("QUIET"), Some(LogLevel::Quiet));
        assert_eq!(LogLevel::parse(" verbose "), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse("trace"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("loud"), None);
        assert!("loud".parse::<LogLevel>().unwrap_err().contains("loud"));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for lvl in [LogLevel::Quiet, LogLevel::Normal, LogLevel::Info, LogLevel::Debug] {
            assert_eq!(lvl.to_string().parse::<LogLevel>().unwrap(), lvl);
        }
    }

    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.copy_buffer_size, DEFAULT_BUFFER_SIZE);
        assert_eq!(cfg.durability, DurabilityMode::Full);
        assert!(!cfg.preserve_times);
        assert!(cfg.log_file.is_none());
    }
}
