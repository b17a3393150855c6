//! Windows implementations: `FindFirstFileW`/`FindNextFileW`/`FindClose`
//! cursors and file-attribute classification.
//!
//! Notes:
//! - `FindFirstFileW` returns the first match while creating the search
//!   handle; that name is handed back from `open` so no entry is lost.
//! - Reparse points (symlinks and junctions) are reported as `SYMLINK`.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::mem::{self, ManuallyDrop};
use std::os::windows::ffi::{OsStrExt, OsStringExt};
use std::os::windows::fs::MetadataExt;
use std::path::Path;

use windows_sys::Win32::Foundation::{
    ERROR_FILE_NOT_FOUND, ERROR_NO_MORE_FILES, HANDLE, INVALID_HANDLE_VALUE,
};
use windows_sys::Win32::Storage::FileSystem::{
    FILE_ATTRIBUTE_DIRECTORY, FILE_ATTRIBUTE_HIDDEN, FILE_ATTRIBUTE_REPARSE_POINT, FindClose,
    FindFirstFileW, FindNextFileW, WIN32_FIND_DATAW,
};

use crate::attr::{is_hidden_name, Attr, AttributeProvider};
use crate::dir::DirectoryEnumerator;

/// Search handle owned for the life of the value. `None` when the pattern
/// matched nothing at all.
#[derive(Debug)]
pub struct PlatformEnumerator {
    handle: Option<HANDLE>,
}

// SAFETY: find handles are not tied to the creating thread; `&mut self` on
// every operation rules out concurrent use.
unsafe impl Send for PlatformEnumerator {}

fn wide_name(buf: &[u16]) -> OsString {
    let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    OsString::from_wide(&buf[..len])
}

fn search_pattern(path: &Path) -> Vec<u16> {
    let mut pattern: Vec<u16> = path.as_os_str().encode_wide().collect();
    match pattern.last() {
        Some(&c) if c == u16::from(b'\\') || c == u16::from(b'/') => {}
        _ => pattern.push(u16::from(b'\\')),
    }
    pattern.push(u16::from(b'*'));
    pattern.push(0);
    pattern
}

impl DirectoryEnumerator for PlatformEnumerator {
    fn open(path: &Path) -> io::Result<(Self, Option<OsString>)> {
        // FindFirstFileW reports a generic error for `file\*`; classify up front.
        let meta = fs::metadata(path)?;
        if !meta.is_dir() {
            return Err(io::Error::new(io::ErrorKind::NotADirectory, "not a directory"));
        }

        let pattern = search_pattern(path);
        let mut data: WIN32_FIND_DATAW = unsafe { mem::zeroed() };
        let handle = unsafe { FindFirstFileW(pattern.as_ptr(), &mut data) };
        if handle == INVALID_HANDLE_VALUE {
            let err = io::Error::last_os_error();
            if err.raw_os_error() == Some(ERROR_FILE_NOT_FOUND as i32) {
                return Ok((PlatformEnumerator { handle: None }, None));
            }
            return Err(err);
        }

        let first = wide_name(&data.cFileName);
        Ok((PlatformEnumerator { handle: Some(handle) }, Some(first)))
    }

    fn next_name(&mut self) -> io::Result<Option<OsString>> {
        let Some(handle) = self.handle else {
            return Ok(None);
        };
        let mut data: WIN32_FIND_DATAW = unsafe { mem::zeroed() };
        if unsafe { FindNextFileW(handle, &mut data) } == 0 {
            let err = io::Error::last_os_error();
            if err.raw_os_error() == Some(ERROR_NO_MORE_FILES as i32) {
                return Ok(None);
            }
            return Err(err);
        }
        Ok(Some(wide_name(&data.cFileName)))
    }

    fn close(self) -> io::Result<()> {
        let this = ManuallyDrop::new(self);
        if let Some(handle) = this.handle {
            if unsafe { FindClose(handle) } == 0 {
                return Err(io::Error::last_os_error());
            }
        }
        Ok(())
    }
}

impl Drop for PlatformEnumerator {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            unsafe {
                FindClose(handle);
            }
        }
    }
}

/// Attribute-word classification, queried without following reparse points.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformAttributes;

impl AttributeProvider for PlatformAttributes {
    fn query(path: &Path) -> io::Result<Attr> {
        let meta = fs::symlink_metadata(path)?;
        let bits = meta.file_attributes();
        let mut attr = Attr::REGULAR;

        if bits & FILE_ATTRIBUTE_HIDDEN != 0 || is_hidden_name(path.as_os_str()) {
            attr |= Attr::HIDDEN;
        }
        if bits & FILE_ATTRIBUTE_DIRECTORY != 0 {
            attr |= Attr::DIRECTORY;
        }
        if bits & FILE_ATTRIBUTE_REPARSE_POINT != 0 {
            attr |= Attr::SYMLINK;
        }

        Ok(attr)
    }
}

/// Create a symbolic link at `link` pointing to `target`. Directory targets
/// get a directory link; anything else (including a missing target) a file link.
pub fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    let resolved = if target.is_absolute() {
        target.to_path_buf()
    } else {
        link.parent().unwrap_or_else(|| Path::new(".")).join(target)
    };
    if resolved.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}

/// Open log file for appending. No ACL management is attempted.
pub fn open_log_file_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn find_first_is_prefetched() {
        let dir = tempdir().unwrap();
        let (mut cursor, first) = PlatformEnumerator::open(dir.path()).unwrap();
        assert_eq!(first, Some(OsString::from(".")));
        let mut rest = Vec::new();
        while let Some(name) = cursor.next_name().unwrap() {
            rest.push(name);
        }
        assert_eq!(rest, vec![OsString::from("..")]);
        cursor.close().unwrap();
    }

    #[test]
    fn pattern_does_not_double_separator() {
        let p = search_pattern(Path::new("C:\\data\\"));
        assert_eq!(String::from_utf16_lossy(&p[..p.len() - 1]), "C:\\data\\*");
        let p = search_pattern(Path::new("C:\\data"));
        assert_eq!(String::from_utf16_lossy(&p[..p.len() - 1]), "C:\\data\\*");
    }

    #[test]
    fn file_path_is_not_a_directory() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("f.txt");
        fs::write(&file, b"").unwrap();
        let err = PlatformEnumerator::open(&file).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotADirectory);
    }
}
