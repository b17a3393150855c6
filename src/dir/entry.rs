use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::attr::Attr;

/// One entry yielded by [`DirectoryHandle::advance`](super::DirectoryHandle::advance).
///
/// Name and path borrow the handle's buffers and are overwritten by the next
/// `advance`; use [`DirEntry::to_owned_entry`] to keep them.
#[derive(Debug, Clone, Copy)]
pub struct DirEntry<'h> {
    pub(super) name: &'h OsStr,
    pub(super) path: &'h Path,
    pub(super) attr: Attr,
}

impl<'h> DirEntry<'h> {
    /// Raw entry name as reported by the OS.
    pub fn name(&self) -> &'h OsStr {
        self.name
    }

    /// Directory path joined with the entry name.
    pub fn path(&self) -> &'h Path {
        self.path
    }

    pub fn attr(&self) -> Attr {
        self.attr
    }

    /// `.` or `..`.
    pub fn is_dot_entry(&self) -> bool {
        self.name == "." || self.name == ".."
    }

    pub fn to_owned_entry(&self) -> OwnedDirEntry {
        OwnedDirEntry {
            name: self.name.to_os_string(),
            path: self.path.to_path_buf(),
            attr: self.attr,
        }
    }
}

/// Detached copy of a [`DirEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedDirEntry {
    pub name: OsString,
    pub path: PathBuf,
    pub attr: Attr,
}
