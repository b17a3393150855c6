//! cfs: a small cross-platform filesystem layer.
//!
//! - [`dir`]: a directory handle that yields one entry at a time, with its
//!   name, joined path and [`Attr`] flags, on both POSIX and Windows.
//! - [`attr`]: classify a path as regular, hidden, directory, symlink or
//!   invalid.
//! - [`path_tools`]: lexical basename and extension helpers.
//! - [`fs_ops`]: copy (with an explicit overwrite policy), move, remove,
//!   create, links and timestamps.
//! - [`config`] and [`logging`]: optional XML configuration and tracing setup
//!   for programs embedding the crate.
//!
//! ```no_run
//! use cfs::DirectoryHandle;
//!
//! let mut dir = DirectoryHandle::open("/tmp")?;
//! while let Some(entry) = dir.advance()? {
//!     if !entry.is_dot_entry() && entry.attr().is_dir() {
//!         println!("{}", entry.path().display());
//!     }
//! }
//! dir.close()?;
//! # Ok::<(), cfs::FsError>(())
//! ```

pub mod attr;
pub mod config;
pub mod dir;
pub mod errors;
pub mod fs_ops;
pub mod logging;
pub mod path_tools;
pub mod platform;

pub use attr::{resolve, try_resolve, Attr, AttributeProvider};
pub use config::{load_config, Config, LogLevel};
pub use dir::{for_each_in_dir, DirEntry, DirectoryEnumerator, DirectoryHandle, HandleState, OwnedDirEntry};
pub use errors::{FsError, Result};
pub use fs_ops::{copy, copy_with, CopyOptions, DurabilityMode, FileTimes};
pub use logging::init_tracing;
