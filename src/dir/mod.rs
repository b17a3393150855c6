//! Directory enumeration.
//!
//! [`DirectoryHandle`] is a small state machine (open, exhausted, closed) over
//! one OS enumeration cursor. Platform cursors plug in through
//! [`DirectoryEnumerator`]; differences such as Windows returning the first
//! match while the cursor is created stay inside the handle.

mod entry;
mod enumerator;
mod handle;

pub use entry::{DirEntry, OwnedDirEntry};
pub use enumerator::DirectoryEnumerator;
pub use handle::{DirectoryHandle, HandleState};

use std::ops::ControlFlow;
use std::path::Path;

use crate::errors::Result;

/// Open `path`, pass every entry to `f`, then close the handle.
///
/// `f` can stop early with `ControlFlow::Break`. The handle is closed on every
/// exit path; an enumeration error takes precedence over a close error.
pub fn for_each_in_dir<P, F>(path: &P, mut f: F) -> Result<()>
where
    P: AsRef<Path> + ?Sized,
    F: FnMut(&DirEntry<'_>) -> ControlFlow<()>,
{
    let mut dir = DirectoryHandle::open(path)?;
    let walked = visit(&mut dir, &mut f);
    let closed = dir.close();
    walked.and(closed)
}

fn visit<F>(dir: &mut DirectoryHandle<'_>, f: &mut F) -> Result<()>
where
    F: FnMut(&DirEntry<'_>) -> ControlFlow<()>,
{
    while let Some(entry) = dir.advance()? {
        if f(&entry).is_break() {
            break;
        }
    }
    Ok(())
}
