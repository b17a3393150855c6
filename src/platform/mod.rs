//! Platform-specific implementations.
//! This module hides OS differences (POSIX / Windows) behind the
//! `DirectoryEnumerator` and `AttributeProvider` traits plus a few free
//! helpers, so the rest of the crate stays platform-agnostic.

#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

#[cfg(unix)]
pub use unix::{create_symlink, open_log_file_append, PlatformAttributes, PlatformEnumerator};

#[cfg(windows)]
pub use windows::{create_symlink, open_log_file_append, PlatformAttributes, PlatformEnumerator};
