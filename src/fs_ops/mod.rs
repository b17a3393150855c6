//! File operations: one OS call each, except `copy`, which streams in
//! fixed-size chunks and carries permission bits over.

mod atomic;
mod copy;
mod entry;
mod helpers;
mod io_copy;
mod link;
mod metadata;
mod util;

pub use copy::{copy, copy_with, CopyOptions, DEFAULT_BUFFER_SIZE};
pub use entry::{create_dir, exists, move_path, remove_dir, remove_file};
pub use helpers::io_error_with_help;
pub use io_copy::DurabilityMode;
pub use link::{create_link, read_link};
pub use metadata::{times, FileTimes};
