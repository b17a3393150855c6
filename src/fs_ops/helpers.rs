//! I/O error adapters.
//!
//! Small closures for `.map_err(...)` that turn an `io::Error` into a
//! classified [`FsError`] carrying the operation and path:
//!
//!   fs::create_dir(dir).map_err(io_error_with_help("create directory", dir))?;

use std::io;
use std::path::Path;

use crate::errors::FsError;

/// Returns a closure suitable for `.map_err(...)` that converts
/// `io::Error` -> `FsError` for `op` on `path`.
pub fn io_error_with_help<'a>(
    op: &'static str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> FsError + 'a {
    move |e: io::Error| FsError::from_io(op, path, e)
}
