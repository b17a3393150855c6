//! Default path helpers and symlink checks.

use anyhow::{anyhow, Result};
use dirs::{config_dir, data_dir};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::CONFIG_ENV;

/// Config file location: `$CFS_CONFIG` when set and non-empty, else
/// `<config dir>/cfs/config.xml`.
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(p) = env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    let mut base = config_dir().ok_or_else(|| anyhow!("no config directory for this platform"))?;
    base.push("cfs");
    base.push("config.xml");
    Ok(base)
}

/// Suggested log file location (`<data dir>/cfs/cfs.log`). Nothing is created.
pub fn default_log_path() -> Result<PathBuf> {
    let mut base = data_dir().ok_or_else(|| anyhow!("no data directory for this platform"))?;
    base.push("cfs");
    base.push("cfs.log");
    Ok(base)
}

/// True if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.as_os_str().is_empty() {
            break;
        }
        match fs::symlink_metadata(anc) {
            Ok(meta) if meta.file_type().is_symlink() => return Ok(true),
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        p = anc.parent();
    }
    Ok(false)
}
