//! File copy with an explicit overwrite policy.
//! - `overwrite = false`: the destination is created exclusively; an existing
//!   destination fails with `AlreadyExists` and is left untouched.
//! - `overwrite = true`: data is staged in a hidden sibling of the destination
//!   and renamed over it, so readers never see a half-written file.
//! Permission bits always follow the source; timestamps only on request.

use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::{FsError, Result};

use super::atomic::try_atomic_move;
use super::helpers::io_error_with_help;
use super::io_copy::{copy_streaming, CopyResult, DurabilityMode};
use super::metadata::{preserve_permissions, preserve_times};
use super::util::{parent_dir, unique_temp_path};

/// Default chunk size for streaming copies (1 MiB).
pub const DEFAULT_BUFFER_SIZE: usize = 1024 * 1024;

/// Knobs for [`copy_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyOptions {
    /// Replace an existing destination instead of failing.
    pub overwrite: bool,
    /// Chunk size for the read/write loop.
    pub buffer_size: usize,
    pub durability: DurabilityMode,
    /// Also carry access/modification times over.
    pub preserve_times: bool,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            overwrite: false,
            buffer_size: DEFAULT_BUFFER_SIZE,
            durability: DurabilityMode::Full,
            preserve_times: false,
        }
    }
}

impl From<&Config> for CopyOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            overwrite: false,
            buffer_size: cfg.copy_buffer_size,
            durability: cfg.durability,
            preserve_times: cfg.preserve_times,
        }
    }
}

impl CopyOptions {
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

/// Copy a regular file with default options. Returns the number of bytes copied.
pub fn copy<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q, overwrite: bool) -> Result<u64> {
    copy_with(src, dst, &CopyOptions::default().overwrite(overwrite))
}

/// Copy a regular file according to `opts`. A zero `buffer_size` is
/// rejected before anything is opened.
pub fn copy_with<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q, opts: &CopyOptions) -> Result<u64> {
    let (src, dst) = (src.as_ref(), dst.as_ref());
    if opts.buffer_size == 0 {
        return Err(FsError::from_io(
            "copy",
            dst,
            io::Error::new(io::ErrorKind::InvalidInput, "copy buffer size must be non-zero"),
        ));
    }
    let src_meta = fs::metadata(src).map_err(io_error_with_help("stat source", src))?;
    if src_meta.is_dir() {
        return Err(FsError::from_io(
            "copy",
            src,
            io::Error::new(io::ErrorKind::InvalidInput, "source is a directory"),
        ));
    }

    let res = if opts.overwrite {
        copy_replacing(src, dst, &src_meta, opts)?
    } else {
        copy_exclusive(src, dst, &src_meta, opts)?
    };

    debug!(
        src = %src.display(),
        dst = %dst.display(),
        bytes = res.bytes,
        buf_size = res.buf_size,
        durability = ?res.mode,
        overwrite = opts.overwrite,
        "copied file"
    );
    Ok(res.bytes)
}

fn copy_exclusive(src: &Path, dst: &Path, src_meta: &fs::Metadata, opts: &CopyOptions) -> Result<CopyResult> {
    let res = copy_streaming(src, dst, opts.buffer_size, opts.durability)
        .map_err(io_error_with_help("copy", dst))?;
    apply_metadata(dst, src_meta, opts);
    Ok(res)
}

fn copy_replacing(src: &Path, dst: &Path, src_meta: &fs::Metadata, opts: &CopyOptions) -> Result<CopyResult> {
    let tmp = unique_temp_path(parent_dir(dst));

    let res = copy_streaming(src, &tmp, opts.buffer_size, opts.durability)
        .map_err(io_error_with_help("copy to temporary file", &tmp))?;
    apply_metadata(&tmp, src_meta, opts);

    if let Err(e) = try_atomic_move(&tmp, dst) {
        if let Err(cleanup) = fs::remove_file(&tmp) {
            warn!(path = %tmp.display(), error = %cleanup, "failed to remove temporary copy");
        }
        return Err(e);
    }
    Ok(res)
}

fn apply_metadata(dst: &Path, src_meta: &fs::Metadata, opts: &CopyOptions) {
    preserve_permissions(dst, src_meta);
    if opts.preserve_times {
        preserve_times(dst, src_meta);
    }
}
