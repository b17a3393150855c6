//! Attribute bitset and resolution.
//!
//! `resolve` asks the platform for an entry's classification and folds it into
//! an [`Attr`] set. Failure is reported in-band as [`Attr::INVALID`], which is
//! always returned alone; `try_resolve` is the same query with the cause kept.

use bitflags::bitflags;
use std::ffi::OsStr;
use std::io;
use std::path::Path;
use tracing::trace;

use crate::errors::{FsError, Result};
use crate::path_tools::basename_os;
use crate::platform::PlatformAttributes;

bitflags! {
    /// Classification flags for a filesystem entry.
    ///
    /// The empty set means a regular, visible entry. `HIDDEN`, `DIRECTORY` and
    /// `SYMLINK` are independent and may co-occur. `INVALID` is a sentinel for a
    /// failed query and is never combined with anything else.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Attr: u8 {
        const HIDDEN = 1 << 0;
        const DIRECTORY = 1 << 1;
        const SYMLINK = 1 << 2;
        const INVALID = 1 << 3;
    }
}

impl Attr {
    /// Baseline: no flags set.
    pub const REGULAR: Attr = Attr::empty();

    #[inline]
    pub fn is_regular(self) -> bool {
        self.is_empty()
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        !self.contains(Attr::INVALID)
    }

    #[inline]
    pub fn is_hidden(self) -> bool {
        self.is_valid() && self.contains(Attr::HIDDEN)
    }

    #[inline]
    pub fn is_dir(self) -> bool {
        self.is_valid() && self.contains(Attr::DIRECTORY)
    }

    #[inline]
    pub fn is_symlink(self) -> bool {
        self.is_valid() && self.contains(Attr::SYMLINK)
    }
}

/// Platform seam for attribute queries.
///
/// Implementations must not partially fill flags: either the whole
/// classification succeeds or an error is returned.
pub trait AttributeProvider {
    fn query(path: &Path) -> io::Result<Attr>;
}

/// Dotfile rule shared by every platform. Also covers `.` and `..`.
#[inline]
pub(crate) fn is_hidden_name(path: &OsStr) -> bool {
    basename_os(path).as_encoded_bytes().first() == Some(&b'.')
}

/// Resolve `path` with the platform provider; `Attr::INVALID` on failure.
pub fn resolve<P: AsRef<Path>>(path: P) -> Attr {
    resolve_with::<PlatformAttributes>(path.as_ref())
}

/// Resolve `path` with an explicit provider.
pub fn resolve_with<A: AttributeProvider>(path: &Path) -> Attr {
    match A::query(path) {
        Ok(attr) => {
            trace!(path = %path.display(), ?attr, "resolved attributes");
            attr
        }
        Err(e) => {
            trace!(path = %path.display(), error = %e, "attribute query failed");
            Attr::INVALID
        }
    }
}

/// Resolve `path`, keeping the OS error on failure.
pub fn try_resolve<P: AsRef<Path>>(path: P) -> Result<Attr> {
    let path = path.as_ref();
    PlatformAttributes::query(path).map_err(|source| FsError::AttributeResolutionFailed {
        path: path.to_path_buf(),
        source,
    })
}
