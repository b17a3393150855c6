use std::ffi::OsString;
use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

use crate::attr::AttributeProvider;
use crate::errors::{FsError, Result};
use crate::path_tools;
use crate::platform::{PlatformAttributes, PlatformEnumerator};

use super::{DirEntry, DirectoryEnumerator};

/// Lifecycle of a [`DirectoryHandle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleState {
    /// Cursor held, entries may remain.
    Open,
    /// The end of the listing was reached; the cursor is still held.
    Exhausted,
    /// Cursor released.
    Closed,
}

impl fmt::Display for HandleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HandleState::Open => "open",
            HandleState::Exhausted => "exhausted",
            HandleState::Closed => "closed",
        };
        f.write_str(s)
    }
}

/// Forward-only enumerator over one directory.
///
/// Each `advance` yields the next raw name (`.` and `..` included) together
/// with its attributes, resolved from `join(path, name)`. The handle borrows
/// the directory path for its whole life and owns exactly one OS cursor, which
/// `close` releases. Dropping an unclosed handle releases the cursor as well.
pub struct DirectoryHandle<'p, E = PlatformEnumerator, A = PlatformAttributes>
where
    E: DirectoryEnumerator,
    A: AttributeProvider,
{
    path: &'p Path,
    cursor: Option<E>,
    // first name handed out by a backend that fetches it at open time
    pending: Option<OsString>,
    state: HandleState,
    name: OsString,
    child: PathBuf,
    _attrs: PhantomData<fn() -> A>,
}

impl<'p> DirectoryHandle<'p> {
    /// Open `path` with the platform enumerator and attribute provider.
    pub fn open<P: AsRef<Path> + ?Sized>(path: &'p P) -> Result<Self> {
        Self::open_with(path)
    }
}

impl<'p, E, A> DirectoryHandle<'p, E, A>
where
    E: DirectoryEnumerator,
    A: AttributeProvider,
{
    /// Open `path` with an explicit enumerator and attribute provider.
    pub fn open_with<P: AsRef<Path> + ?Sized>(path: &'p P) -> Result<Self> {
        let path = path.as_ref();
        let (cursor, pending) =
            E::open(path).map_err(|e| FsError::from_io("open directory", path, e))?;
        debug!(path = %path.display(), prefetched = pending.is_some(), "opened directory");
        Ok(Self {
            path,
            cursor: Some(cursor),
            pending,
            state: HandleState::Open,
            name: OsString::new(),
            child: PathBuf::new(),
            _attrs: PhantomData,
        })
    }

    pub fn path(&self) -> &'p Path {
        self.path
    }

    pub fn state(&self) -> HandleState {
        self.state
    }

    /// Produce the next entry, or `None` at the end of the listing.
    ///
    /// An entry whose attributes cannot be resolved fails the call with
    /// `AttributeResolutionFailed`; the cursor has already moved past it, so a
    /// later `advance` continues with the following entry.
    pub fn advance(&mut self) -> Result<Option<DirEntry<'_>>> {
        match self.state {
            HandleState::Open => {}
            HandleState::Exhausted => return Ok(None),
            HandleState::Closed => {
                return Err(FsError::InvalidState {
                    op: "advance",
                    state: self.state,
                });
            }
        }

        let path = self.path;
        let next = match self.pending.take() {
            Some(first) => Some(first),
            None => {
                let cursor = self.cursor.as_mut().ok_or(FsError::InvalidState {
                    op: "advance",
                    state: HandleState::Closed,
                })?;
                cursor
                    .next_name()
                    .map_err(|e| FsError::from_io("read directory", path, e))?
            }
        };

        let Some(name) = next else {
            trace!(path = %path.display(), "directory exhausted");
            self.state = HandleState::Exhausted;
            return Ok(None);
        };

        self.child = PathBuf::from(path_tools::join(path, [&name]));
        self.name = name;

        let attr = A::query(&self.child).map_err(|source| {
            debug!(path = %self.child.display(), error = %source, "entry attributes unresolved");
            FsError::AttributeResolutionFailed {
                path: self.child.clone(),
                source,
            }
        })?;
        trace!(entry = %self.child.display(), ?attr, "directory entry");

        Ok(Some(DirEntry {
            name: &self.name,
            path: &self.child,
            attr,
        }))
    }

    /// Release the OS cursor. A second call fails with `AlreadyClosed`.
    ///
    /// The handle is closed afterwards even when the OS reports a release
    /// error, so the error is returned exactly once.
    pub fn close(&mut self) -> Result<()> {
        if self.state == HandleState::Closed {
            return Err(FsError::AlreadyClosed);
        }
        self.state = HandleState::Closed;
        self.pending = None;
        if let Some(cursor) = self.cursor.take() {
            cursor.close().map_err(|e| {
                warn!(path = %self.path.display(), error = %e, "failed to close directory");
                FsError::from_io("close directory", self.path, e)
            })?;
        }
        debug!(path = %self.path.display(), "closed directory");
        Ok(())
    }
}

impl<E, A> fmt::Debug for DirectoryHandle<'_, E, A>
where
    E: DirectoryEnumerator,
    A: AttributeProvider,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectoryHandle")
            .field("path", &self.path)
            .field("state", &self.state)
            .field("pending", &self.pending.is_some())
            .finish()
    }
}
