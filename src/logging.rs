//! Tracing initialization for programs embedding cfs.
//! Builds a subscriber with an EnvFilter, compact or JSON formatting on stderr,
//! and optional file logging.
//!
//! Behavior:
//! - Log level is driven by `LogLevel` (no RUST_LOG override here).
//! - If `log_file` is given, a non-blocking file layer is added. The path is
//!   refused when an ancestor is a symlink.
//! - A global subscriber can only be installed once; a second call fails.

use anyhow::{anyhow, bail, Context, Result};
use chrono::Local;
use std::fmt as stdfmt;
use std::fs;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt as tsfmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{registry, Layer, Registry};

use crate::config::{path_has_symlink_ancestor, LogLevel};
use crate::platform::open_log_file_append;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Human-friendly timestamp formatter (DD/MM/YY HH:MM:SS)
pub struct LocalHumanTime;

impl FormatTime for LocalHumanTime {
    fn format_time(&self, w: &mut tsfmt::format::Writer<'_>) -> stdfmt::Result {
        write!(w, "{}", Local::now().format("%d/%m/%y %H:%M:%S"))
    }
}

/// Filter for a `LogLevel`; `cfs` targets follow the level, everything else stays at warn.
pub fn env_filter_for(lvl: &LogLevel) -> EnvFilter {
    EnvFilter::new(format!("warn,cfs={}", lvl.as_filter()))
}

fn layer_for<W>(writer: W, json: bool) -> BoxedLayer
where
    W: for<'w> tsfmt::MakeWriter<'w> + Send + Sync + 'static,
{
    if json {
        tsfmt::layer()
            .json()
            .with_timer(LocalHumanTime)
            .with_level(true)
            .with_target(true)
            .with_thread_ids(true)
            .with_writer(writer)
            .boxed()
    } else {
        tsfmt::layer()
            .compact()
            .with_timer(LocalHumanTime)
            .with_level(true)
            .with_target(true)
            .with_thread_ids(true)
            .with_writer(writer)
            .boxed()
    }
}

/// Open `path` for appending behind a non-blocking writer. Missing parent
/// directories are created.
fn open_non_blocking_writer(path: &Path) -> Result<(NonBlocking, WorkerGuard)> {
    let linked = path_has_symlink_ancestor(path)
        .with_context(|| format!("check log path '{}' for symlinks", path.display()))?;
    if linked {
        bail!("refusing file logging: an ancestor of '{}' is a symlink", path.display());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory '{}'", parent.display()))?;
    }

    let file = open_log_file_append(path)
        .with_context(|| format!("open log file '{}'", path.display()))?;
    Ok(tracing_appender::non_blocking(file))
}

/// Install the global subscriber. Returns the file writer's guard when file
/// logging is enabled; hold it until shutdown so buffered lines are flushed.
pub fn init_tracing(lvl: &LogLevel, log_file: Option<&Path>, json: bool) -> Result<Option<WorkerGuard>> {
    let mut layers: Vec<BoxedLayer> = vec![layer_for(io::stderr, json)];

    let guard = match log_file {
        Some(path) => {
            let (writer, guard) = open_non_blocking_writer(path)?;
            layers.push(layer_for(writer, json));
            Some(guard)
        }
        None => None,
    };

    registry()
        .with(layers)
        .with(env_filter_for(lvl))
        .try_init()
        .map_err(|e| anyhow!("install tracing subscriber: {e}"))?;

    tracing::debug!(level = %lvl, file = log_file.is_some(), "tracing initialized");
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_scopes_level_to_crate() {
        let f = env_filter_for(&LogLevel::Debug).to_string();
        assert!(f.contains("cfs=trace"), "{f}");
        let f = env_filter_for(&LogLevel::Quiet).to_string();
        assert!(f.contains("cfs=error"), "{f}");
    }

    #[test]
    fn writer_creates_missing_parent() {
        let td = tempfile::tempdir().unwrap();
        let path = td.path().join("nested").join("cfs.log");
        let (_writer, _guard) = open_non_blocking_writer(&path).unwrap();
        assert!(path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn writer_refuses_symlinked_ancestor() {
        let td = tempfile::tempdir().unwrap();
        let real = td.path().join("real");
        fs::create_dir(&real).unwrap();
        let link = td.path().join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();
        let err = open_non_blocking_writer(&link.join("cfs.log")).unwrap_err();
        assert!(err.to_string().contains("symlink"));
    }
}
