//! Atomic rename helper.
//! - `rename` replaces an existing destination file on both platforms
//!   (POSIX `rename`, `MoveFileExW` with `MOVEFILE_REPLACE_EXISTING`).
//! - On Unix, best-effort fsync of the destination directory after rename.

use std::fs;
use std::path::Path;

use crate::errors::Result;

use super::helpers::io_error_with_help;
use super::util::{fsync_dir, parent_dir};

pub(super) fn try_atomic_move(src: &Path, dst: &Path) -> Result<()> {
    fs::rename(src, dst).map_err(io_error_with_help("rename", src))?;

    // Ignore fsync errors to avoid turning a successful rename into a failure.
    let _ = fsync_dir(parent_dir(dst));

    Ok(())
}
