use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::Result;
use crate::platform::create_symlink;

use super::helpers::io_error_with_help;

/// Create a symbolic link at `link` pointing to `target`. The target need not
/// exist; a relative target is interpreted relative to the link's directory.
pub fn create_link<P: AsRef<Path>, Q: AsRef<Path>>(target: P, link: Q) -> Result<()> {
    let (target, link) = (target.as_ref(), link.as_ref());
    create_symlink(target, link).map_err(io_error_with_help("create link", link))?;
    debug!(target = %target.display(), link = %link.display(), "created symbolic link");
    Ok(())
}

/// Target stored in the symbolic link at `link`, unresolved.
pub fn read_link<P: AsRef<Path>>(link: P) -> Result<PathBuf> {
    let link = link.as_ref();
    fs::read_link(link).map_err(io_error_with_help("read link", link))
}
