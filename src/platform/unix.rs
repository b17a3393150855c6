//! POSIX implementations: `opendir`/`readdir`/`closedir` cursors and
//! `lstat`-based classification.

use std::ffi::{CStr, CString, OsStr, OsString};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::mem::ManuallyDrop;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::Path;
use std::ptr::NonNull;

use errno::{errno, set_errno, Errno};

use crate::attr::{is_hidden_name, Attr, AttributeProvider};
use crate::dir::DirectoryEnumerator;

/// `DIR*` stream owned for the life of the value.
#[derive(Debug)]
pub struct PlatformEnumerator {
    dir: NonNull<libc::DIR>,
}

// SAFETY: a DIR stream may be used from any thread as long as it is not used
// from two at once, which `&mut self` on every operation guarantees.
unsafe impl Send for PlatformEnumerator {}

fn c_path(path: &Path) -> io::Result<CString> {
    CString::new(path.as_os_str().as_bytes())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "path contains null byte"))
}

impl DirectoryEnumerator for PlatformEnumerator {
    fn open(path: &Path) -> io::Result<(Self, Option<OsString>)> {
        let c_path = c_path(path)?;
        let dir = unsafe { libc::opendir(c_path.as_ptr()) };
        match NonNull::new(dir) {
            // readdir does the first fetch; nothing is pre-read here
            Some(dir) => Ok((PlatformEnumerator { dir }, None)),
            None => Err(io::Error::last_os_error()),
        }
    }

    fn next_name(&mut self) -> io::Result<Option<OsString>> {
        // a null readdir is end-of-stream only if errno stayed 0
        set_errno(Errno(0));
        let ent = unsafe { libc::readdir(self.dir.as_ptr()) };
        if ent.is_null() {
            return match errno().0 {
                0 => Ok(None),
                code => Err(io::Error::from_raw_os_error(code)),
            };
        }
        // SAFETY: readdir returned a valid entry whose d_name is NUL-terminated
        // and stays valid until the next readdir/closedir on this stream.
        let name = unsafe { CStr::from_ptr((*ent).d_name.as_ptr()) };
        Ok(Some(OsStr::from_bytes(name.to_bytes()).to_os_string()))
    }

    fn close(self) -> io::Result<()> {
        let this = ManuallyDrop::new(self);
        if unsafe { libc::closedir(this.dir.as_ptr()) } != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

impl Drop for PlatformEnumerator {
    fn drop(&mut self) {
        unsafe {
            libc::closedir(self.dir.as_ptr());
        }
    }
}

/// `lstat`-based classification; link targets are followed only to decide
/// `DIRECTORY` for symlinks.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformAttributes;

impl AttributeProvider for PlatformAttributes {
    fn query(path: &Path) -> io::Result<Attr> {
        let meta = fs::symlink_metadata(path)?;
        let mut attr = Attr::REGULAR;

        if is_hidden_name(path.as_os_str()) {
            attr |= Attr::HIDDEN;
        }

        let ft = meta.file_type();
        if ft.is_symlink() {
            attr |= Attr::SYMLINK;
            // a dangling link stays SYMLINK alone
            if fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false) {
                attr |= Attr::DIRECTORY;
            }
        } else if ft.is_dir() {
            attr |= Attr::DIRECTORY;
        }

        Ok(attr)
    }
}

/// Create a symbolic link at `link` pointing to `target`.
pub fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

/// Open log file for appending; set 0600 only when creating a new file.
/// An existing file keeps its permissions (e.g. group-readable for log shipping).
pub fn open_log_file_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let existed = path.exists();
    let f = OpenOptions::new()
        .create(true)
        .append(true)
        .mode(0o600) // applies on create
        .open(path)?;
    if !existed {
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }
    Ok(f)
}
