//! Typed error definitions for cfs.
//! Every fallible operation returns `FsError`. The variants form the small
//! taxonomy callers are expected to match on; anything the OS reports that does
//! not fit one of them lands in `Io` with an actionable hint attached.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::dir::HandleState;

/// Result alias used across the crate.
pub type Result<T, E = FsError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum FsError {
    #[error("Path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Permission denied on {}: {context}", .path.display())]
    PermissionDenied { path: PathBuf, context: String },

    #[error("Destination already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Cannot resolve attributes of {}: {source}", .path.display())]
    AttributeResolutionFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Directory handle is already closed")]
    AlreadyClosed,

    #[error("Cannot {op} a directory handle that is {state}")]
    InvalidState { op: &'static str, state: HandleState },

    #[error("{op} '{}': {source}{hint}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
        hint: String,
    },
}

impl FsError {
    /// Classify an `io::Error` raised while performing `op` on `path`.
    pub fn from_io(op: &'static str, path: impl AsRef<Path>, err: io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => FsError::NotFound(path),
            io::ErrorKind::NotADirectory => FsError::NotADirectory(path),
            io::ErrorKind::AlreadyExists => FsError::AlreadyExists(path),
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied {
                path,
                context: format!("{op}: {err}"),
            },
            _ => {
                let hint = os_hint(&err);
                FsError::Io {
                    op,
                    path,
                    source: err,
                    hint,
                }
            }
        }
    }

    /// Stable numeric code for structured logs.
    pub fn code(&self) -> u16 {
        match self {
            FsError::NotFound(_) => 2,
            FsError::NotADirectory(_) => 3,
            FsError::PermissionDenied { .. } => 4,
            FsError::AlreadyExists(_) => 5,
            FsError::AttributeResolutionFailed { .. } => 6,
            FsError::AlreadyClosed => 7,
            FsError::InvalidState { .. } => 8,
            FsError::Io { .. } => 1,
        }
    }

    /// The path the failure refers to, when there is one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            FsError::NotFound(p) | FsError::NotADirectory(p) | FsError::AlreadyExists(p) => Some(p),
            FsError::PermissionDenied { path, .. }
            | FsError::AttributeResolutionFailed { path, .. }
            | FsError::Io { path, .. } => Some(path),
            FsError::AlreadyClosed | FsError::InvalidState { .. } => None,
        }
    }
}

/// Platform-aware hint for an OS error, with the raw code appended when known.
pub(crate) fn os_hint(e: &io::Error) -> String {
    let mut msg = String::new();

    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            let hint = match code {
                libc::EACCES | libc::EPERM => "; permission denied, check ownership and permissions",
                libc::EXDEV => "; cross-filesystem, atomic rename not possible",
                libc::EBUSY => "; resource busy",
                libc::ENOENT => "; path not found, verify it exists",
                libc::EEXIST => "; already exists, remove the target first",
                libc::ENOTDIR => "; a path component is not a directory",
                libc::EISDIR => "; is a directory",
                libc::ENOTEMPTY => "; directory not empty",
                libc::ENOSPC => "; insufficient space on device",
                libc::EROFS => "; read-only filesystem",
                libc::ELOOP => "; too many levels of symbolic links, possible symlink cycle",
                libc::ENAMETOOLONG => "; filename or path too long",
                libc::EMFILE => "; process file descriptor limit reached",
                libc::ENFILE => "; system-wide file table overflow",
                _ => "",
            };
            msg.push_str(hint);
        }
        #[cfg(windows)]
        {
            let hint = match code {
                5 => "; access denied, check permissions",           // ERROR_ACCESS_DENIED
                17 => "; not same device, cross-filesystem move",    // ERROR_NOT_SAME_DEVICE
                32 => "; sharing violation, file is in use",         // ERROR_SHARING_VIOLATION
                2 | 3 => "; path not found, verify it exists",       // FILE / PATH NOT FOUND
                80 | 183 => "; already exists",                      // ERROR_FILE_EXISTS / ALREADY_EXISTS
                112 => "; insufficient disk space",                  // ERROR_DISK_FULL
                145 => "; directory not empty",                      // ERROR_DIR_NOT_EMPTY
                206 => "; filename or path too long",                // ERROR_FILENAME_EXCED_RANGE
                267 => "; not a directory",                          // ERROR_DIRECTORY
                1314 => "; symlink creation needs privilege or developer mode", // ERROR_PRIVILEGE_NOT_HELD
                _ => "",
            };
            msg.push_str(hint);
        }
        msg.push_str(&format!(" [os code: {code}]"));
    } else {
        let hint = match e.kind() {
            io::ErrorKind::PermissionDenied => "; permission denied, check ownership and permissions",
            io::ErrorKind::NotFound => "; path not found, verify it exists",
            io::ErrorKind::AlreadyExists => "; already exists, remove the target first",
            io::ErrorKind::InvalidInput => "; invalid input",
            _ => "",
        };
        msg.push_str(hint);
    }

    msg
}
