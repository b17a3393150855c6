//! Streaming copy with durability / configurability.
//!
//! Features:
//! - Writes to a newly created destination file (O_EXCL semantics; never clobbers).
//! - Buffered I/O in fixed-size chunks; the chunk size comes from the caller.
//! - Optional full fsync for strong durability guarantees.
//! - Returns a `CopyResult` with the chunk size and durability used, for logging.
//!
//! Snapshot semantics: the source is read once from start to EOF; bytes
//! appended concurrently are not included.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Durability mode controlling post-write flush behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DurabilityMode {
    /// Ensure written data reaches the OS page cache (`flush`), but do not force
    /// a disk barrier. Fastest; may lose data on sudden power loss.
    Data,
    /// Force data and metadata to stable storage (`sync_all`).
    #[default]
    Full,
}

impl FromStr for DurabilityMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "data" | "flush" => Ok(DurabilityMode::Data),
            "full" | "sync" => Ok(DurabilityMode::Full),
            other => Err(format!("invalid durability mode: '{other}'")),
        }
    }
}

/// Result of a streaming copy operation.
#[derive(Debug, Clone, Copy)]
pub(super) struct CopyResult {
    /// Total bytes copied from source to destination.
    pub bytes: u64,
    /// Size of the buffer used for copying.
    pub buf_size: usize,
    /// Durability mode applied.
    pub mode: DurabilityMode,
}

/// Copy `src` -> `dst` (which must not exist yet) in `buf_size` chunks.
/// A destination created here is removed again if the copy fails.
pub(super) fn copy_streaming(
    src: &Path,
    dst: &Path,
    buf_size: usize,
    mode: DurabilityMode,
) -> io::Result<CopyResult> {
    let src_f = File::open(src)?;

    let mut opts = OpenOptions::new();
    opts.write(true).create_new(true);

    #[cfg(windows)]
    {
        use std::os::windows::fs::OpenOptionsExt;
        if matches!(mode, DurabilityMode::Full) {
            const FILE_FLAG_WRITE_THROUGH: u32 = 0x8000_0000;
            opts.custom_flags(FILE_FLAG_WRITE_THROUGH);
        }
    }

    let dst_f = opts.open(dst)?;

    // From here on the destination is ours; do not leave a partial file behind.
    let res = stream_into(src_f, dst_f, buf_size, mode);
    if res.is_err() {
        let _ = fs::remove_file(dst);
    }
    res
}

fn stream_into(
    src_f: File,
    dst_f: File,
    buf_size: usize,
    mode: DurabilityMode,
) -> io::Result<CopyResult> {
    // Linux: in-kernel copy_file_range when the filesystems support it.
    #[cfg(target_os = "linux")]
    {
        use std::os::unix::io::AsRawFd;
        let mut total: u64 = 0;
        loop {
            let rc = unsafe {
                libc::copy_file_range(
                    src_f.as_raw_fd(),
                    std::ptr::null_mut(),
                    dst_f.as_raw_fd(),
                    std::ptr::null_mut(),
                    buf_size,
                    0,
                )
            };
            if rc > 0 {
                total += rc as u64;
                continue;
            }
            if rc == 0 {
                if matches!(mode, DurabilityMode::Full) {
                    dst_f.sync_all()?;
                }
                return Ok(CopyResult { bytes: total, buf_size, mode });
            }
            let err = io::Error::last_os_error();
            let unsupported = matches!(
                err.raw_os_error(),
                Some(libc::EXDEV | libc::ENOSYS | libc::EINVAL | libc::EPERM | libc::EOPNOTSUPP)
            );
            // Only fall back when nothing was copied; a partial copy is an error.
            if total == 0 && unsupported {
                break;
            }
            return Err(err);
        }
    }

    let mut reader = BufReader::with_capacity(buf_size, src_f);
    let mut writer = BufWriter::with_capacity(buf_size, dst_f);
    let bytes = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;

    if matches!(mode, DurabilityMode::Full) {
        writer.get_ref().sync_all()?;
    }

    Ok(CopyResult { bytes, buf_size, mode })
}
